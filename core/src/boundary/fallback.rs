//! Views drawn in place of a failed child.

use std::borrow::Cow;
use std::mem;

use folio_types::BuildMode;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Widget};
use unicode_width::UnicodeWidthStr;

use super::{ContextInfo, ControlKind, Controls, FailureInfo};

const DEFAULT_TITLE: &str = "Something went wrong";
const DEFAULT_BODY: &str = "We're sorry, but something unexpected happened. Please try \
                            refreshing the page or contact support if the problem persists.";
const SECTION_BODY: &str = "This section encountered an error and couldn't load properly.";
const SECTION_DEBUG_LABEL: &str = "Error Details";
pub const DEFAULT_SECTION_NAME: &str = "Component";

const CARD_MAX_WIDTH: u16 = 64;

const ERROR_FG: Color = Color::Rgb(255, 93, 98);
const TEXT_FG: Color = Color::Rgb(220, 215, 186);
const MUTED_FG: Color = Color::Rgb(114, 113, 105);
const BUTTON_FG: Color = Color::Rgb(22, 22, 29);
const PRIMARY_BG: Color = Color::Rgb(126, 156, 216);
const SECONDARY_BG: Color = Color::Rgb(84, 84, 109);
const PANEL_BG: Color = Color::Rgb(31, 31, 40);

/// Everything a fallback gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct FallbackProps<'a> {
    pub failure: &'a FailureInfo,
    pub context: &'a ContextInfo,
    pub build_mode: BuildMode,
    pub debug_expanded: bool,
}

impl FallbackProps<'_> {
    #[must_use]
    pub fn shows_debug(&self) -> bool {
        self.build_mode.shows_debug()
    }
}

/// Draws a replacement view for a failed child and registers its controls.
pub trait FallbackProvider {
    fn render_fallback(
        &self,
        props: &FallbackProps<'_>,
        area: Rect,
        buf: &mut Buffer,
        controls: &mut Controls,
    );
}

impl<F> FallbackProvider for F
where
    F: Fn(&FallbackProps<'_>, Rect, &mut Buffer, &mut Controls),
{
    fn render_fallback(
        &self,
        props: &FallbackProps<'_>,
        area: Rect,
        buf: &mut Buffer,
        controls: &mut Controls,
    ) {
        self(props, area, buf, controls);
    }
}

/// Full-page card with Try Again, Reload Page and (outside production) a
/// debug disclosure.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFallback;

impl FallbackProvider for DefaultFallback {
    fn render_fallback(
        &self,
        props: &FallbackProps<'_>,
        area: Rect,
        buf: &mut Buffer,
        controls: &mut Controls,
    ) {
        Clear.render(area, buf);
        if area.width < 4 || area.height < 3 {
            return;
        }

        let width = area.width.min(CARD_MAX_WIDTH);
        // Borders plus one column of padding each side.
        let text_width = usize::from(width.saturating_sub(4));
        let body = wrap_words(DEFAULT_BODY, text_width);
        let debug = debug_lines(props, text_width);

        // Title, gap, body, gap, buttons.
        let mut rows = 4 + body.len();
        if props.shows_debug() {
            rows += 2 + debug.len();
        }
        let height = (rows as u16).saturating_add(2).min(area.height);
        let card = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ERROR_FG))
            .style(Style::default().bg(PANEL_BG))
            .padding(Padding::horizontal(1));
        let inner = block.inner(card);
        block.render(card, buf);

        let mut out = Rows::new(inner, buf);
        out.line(Line::from(Span::styled(
            DEFAULT_TITLE,
            Style::default().fg(ERROR_FG).add_modifier(Modifier::BOLD),
        )));
        out.blank();
        for line in body {
            out.line(Line::from(Span::styled(line, Style::default().fg(TEXT_FG))));
        }
        out.blank();
        out.buttons(
            &[
                (ControlKind::TryAgain, ControlKind::TryAgain.label(), PRIMARY_BG),
                (ControlKind::ReloadPage, ControlKind::ReloadPage.label(), SECONDARY_BG),
            ],
            controls,
        );

        if props.shows_debug() {
            out.blank();
            out.disclosure(ControlKind::ToggleDebug.label(), props.debug_expanded, controls);
            for line in debug {
                out.line(line);
            }
        }
    }
}

/// Compact inline panel naming the section that failed.
#[derive(Debug, Clone)]
pub struct SectionFallback<'a> {
    name: Cow<'a, str>,
}

impl Default for SectionFallback<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_NAME)
    }
}

impl<'a> SectionFallback<'a> {
    pub fn new(name: impl Into<Cow<'a, str>>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} Error", self.name)
    }
}

impl FallbackProvider for SectionFallback<'_> {
    fn render_fallback(
        &self,
        props: &FallbackProps<'_>,
        area: Rect,
        buf: &mut Buffer,
        controls: &mut Controls,
    ) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(ERROR_FG))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);

        let text_width = usize::from(inner.width);
        let mut out = Rows::new(inner, buf);
        out.line(Line::from(Span::styled(
            self.heading(),
            Style::default().fg(ERROR_FG).add_modifier(Modifier::BOLD),
        )));
        // Keep a row for the button in short panels.
        let body_rows = usize::from(out.remaining().saturating_sub(1));
        for line in wrap_words(SECTION_BODY, text_width).into_iter().take(body_rows) {
            out.line(Line::from(Span::styled(line, Style::default().fg(TEXT_FG))));
        }
        out.buttons(
            &[(ControlKind::TryAgain, ControlKind::TryAgain.label(), PRIMARY_BG)],
            controls,
        );

        if props.shows_debug() {
            out.disclosure(SECTION_DEBUG_LABEL, props.debug_expanded, controls);
            if props.debug_expanded {
                for line in wrap_words(props.failure.message(), text_width) {
                    out.line(Line::from(Span::styled(line, Style::default().fg(MUTED_FG))));
                }
            }
        }
    }
}

/// Message, component stack and trace; empty while collapsed.
fn debug_lines(props: &FallbackProps<'_>, width: usize) -> Vec<Line<'static>> {
    if !props.shows_debug() || !props.debug_expanded {
        return Vec::new();
    }
    let muted = Style::default().fg(MUTED_FG);
    let message = format!("Error: {}", props.failure.message());
    let mut lines: Vec<Line<'static>> = wrap_words(&message, width)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(ERROR_FG))))
        .collect();
    let stack = props.context.component_stack();
    if !stack.is_empty() {
        lines.push(Line::from(Span::styled(format!("in {stack}"), muted)));
    }
    if let Some(trace) = props.failure.stack() {
        lines.extend(
            trace
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), muted))),
        );
    }
    lines
}

/// Greedy word wrap. Words wider than `width` overflow and get clipped.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.width() + 1 + word.width() > width {
            lines.push(mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Writes one row at a time into `area`, dropping whatever does not fit.
struct Rows<'b> {
    area: Rect,
    next: u16,
    buf: &'b mut Buffer,
}

impl<'b> Rows<'b> {
    fn new(area: Rect, buf: &'b mut Buffer) -> Self {
        Self { area, next: 0, buf }
    }

    fn remaining(&self) -> u16 {
        self.area.height.saturating_sub(self.next)
    }

    fn take_row(&mut self) -> Option<Rect> {
        if self.next >= self.area.height {
            return None;
        }
        let row = Rect::new(self.area.x, self.area.y + self.next, self.area.width, 1);
        self.next += 1;
        Some(row)
    }

    fn blank(&mut self) {
        let _ = self.take_row();
    }

    fn line(&mut self, line: Line<'_>) {
        if let Some(row) = self.take_row() {
            line.render(row, self.buf);
        }
    }

    fn buttons(&mut self, buttons: &[(ControlKind, &str, Color)], controls: &mut Controls) {
        let Some(row) = self.take_row() else {
            return;
        };
        let mut x = row.x;
        for (kind, label, bg) in buttons {
            let text = format!("[ {label} ]");
            let width = text.width() as u16;
            let rect = Rect::new(x, row.y, width, 1).intersection(row);
            if rect.is_empty() {
                break;
            }
            Span::styled(
                text,
                Style::default()
                    .fg(BUTTON_FG)
                    .bg(*bg)
                    .add_modifier(Modifier::BOLD),
            )
            .render(rect, self.buf);
            controls.register(*kind, rect);
            x = x.saturating_add(width + 2);
        }
    }

    fn disclosure(&mut self, label: &str, expanded: bool, controls: &mut Controls) {
        let Some(row) = self.take_row() else {
            return;
        };
        let marker = if expanded { "[-]" } else { "[+]" };
        let text = format!("{marker} {label}");
        let rect = Rect::new(row.x, row.y, text.width() as u16, 1).intersection(row);
        Span::styled(
            text,
            Style::default().fg(MUTED_FG).add_modifier(Modifier::UNDERLINED),
        )
        .render(rect, self.buf);
        controls.register(ControlKind::ToggleDebug, rect);
    }
}
