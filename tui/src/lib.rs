//! TUI rendering for Folio using ratatui.
//!
//! The whole page sits inside one [`FaultBoundary`]; each panel inside its own
//! [`NamedFaultBoundary`]. Boundary state lives on the [`App`] so a failed
//! panel stays failed across frames until it is reset.

mod input;
mod panels;
mod theme;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use std::iter;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
};

use folio_core::{FaultBoundary, NamedFaultBoundary, RenderError};
use folio_engine::{App, BoundaryTarget, BuildMode, Panel, StatusKind};

use self::panels::View;

/// Label of the page-level boundary; the root of every component path.
pub const PAGE_BOUNDARY: &str = "Dashboard";
/// Message carried by a fault armed with `!`.
pub const INJECTED_FAULT: &str = "Injected fault";

const OVERVIEW_HEIGHT: u16 = 5;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let area = frame.area();
    // Clear with background color
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg_dark)),
        area,
    );

    let build_mode = app.build_mode();
    app.with_boundary(BoundaryTarget::Page, |app, page| {
        let dashboard = |area: Rect, buf: &mut Buffer| -> Result<(), RenderError> {
            draw_dashboard(app, area, buf, &palette, &glyphs);
            Ok(())
        };
        frame.render_stateful_widget(
            FaultBoundary::new(dashboard)
                .label(PAGE_BOUNDARY)
                .build_mode(build_mode),
            area,
            page,
        );
    });
}

fn draw_dashboard(app: &mut App, area: Rect, buf: &mut Buffer, palette: &Palette, glyphs: &Glyphs) {
    let [header, grid, status] = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(1),    // Panels
        Constraint::Length(1), // Status bar
    ])
    .areas(area);

    draw_header(app, header, buf, palette, glyphs);
    draw_panels(app, grid, buf, palette, glyphs);
    draw_status_bar(app, status, buf, palette, glyphs);
}

fn draw_header(app: &App, area: Rect, buf: &mut Buffer, palette: &Palette, glyphs: &Glyphs) {
    let snapshot = app.snapshot();
    let title = snapshot
        .group
        .as_ref()
        .map_or("Portfolio", |g| g.group.name.as_str());
    let sep = Span::styled(
        format!(" {} ", glyphs.separator),
        Style::default().fg(palette.bg_border),
    );

    let mut spans = vec![
        Span::styled(
            " Folio ",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled(title.to_string(), Style::default().fg(palette.text_primary)),
        sep.clone(),
        Span::styled(app.source_description(), Style::default().fg(palette.text_muted)),
        sep,
        Span::styled(
            format!("as of {}", snapshot.as_of.format("%Y-%m-%d %H:%M")),
            Style::default().fg(palette.text_muted),
        ),
    ];
    if app.build_mode() != BuildMode::Production {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" {} ", app.build_mode().as_str().to_uppercase()),
            styles::mode_badge(palette),
        ));
    }
    Paragraph::new(Line::from(spans)).render(area, buf);
}

/// Overview spans the top row when visible; the rest pair up two per row.
fn grid_layout(panels: &[Panel], area: Rect) -> Vec<Rect> {
    let (has_overview, rest) = match panels.split_first() {
        Some((Panel::Overview, rest)) => (true, rest),
        _ => (false, panels),
    };

    let mut constraints = Vec::new();
    if has_overview {
        constraints.push(Constraint::Length(OVERVIEW_HEIGHT));
    }
    constraints.extend(iter::repeat_n(Constraint::Fill(1), rest.len().div_ceil(2)));
    let rows = Layout::vertical(constraints).split(area);

    let mut rows = rows.iter().copied();
    let mut rects = Vec::with_capacity(panels.len());
    if has_overview {
        rects.extend(rows.next());
    }
    for (pair, row) in rest.chunks(2).zip(rows) {
        if pair.len() == 2 {
            let [left, right] = Layout::horizontal([Constraint::Fill(1); 2]).areas(row);
            rects.push(left);
            rects.push(right);
        } else {
            rects.push(row);
        }
    }
    rects
}

fn draw_panels(app: &mut App, area: Rect, buf: &mut Buffer, palette: &Palette, glyphs: &Glyphs) {
    let build_mode = app.build_mode();
    let panels = app.visible_panels();
    let rects = grid_layout(&panels, area);

    for (panel, rect) in panels.into_iter().zip(rects) {
        // A failed panel does not render its child, so leave the fault armed.
        let fault = !app.boundary(panel).is_failed() && app.take_injected_fault(panel);
        app.with_boundary(BoundaryTarget::Panel(panel), |app, state| {
            let view = View {
                app: &*app,
                palette,
                glyphs,
            };
            let child = |area: Rect, buf: &mut Buffer| -> Result<(), RenderError> {
                if fault {
                    return Err(RenderError::new(INJECTED_FAULT)
                        .in_component(panels::component_name(panel)));
                }
                panels::render(&view, panel, area, buf)
            };
            NamedFaultBoundary::new(child)
                .name(panel.display_name())
                .build_mode(build_mode)
                .render(rect, buf, state);
        });
    }
}

fn key_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("Tab", "focus"), ("r", "retry"), ("R", "reload")];
    let settings = app.settings();
    if settings.features.analytics {
        hints.push(("s", "sort tags"));
    }
    hints.push(("/", "filter"));
    hints.push(("t", "tag"));
    if settings.features.export {
        hints.push(("e", "export"));
        hints.push(("c", "csv"));
        hints.push(("m", "report"));
    }
    if app.build_mode().shows_debug() {
        hints.push(("d", "debug"));
        hints.push(("!", "inject fault"));
    }
    hints.push(("q", "quit"));
    hints
}

pub(crate) fn draw_status_bar(
    app: &App,
    area: Rect,
    buf: &mut Buffer,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let mut spans = vec![Span::raw(" ")];
    if let Some(msg) = app.status() {
        let (prefix, color) = match msg.kind() {
            StatusKind::Error => ("Error: ", palette.error),
            StatusKind::Warning => ("Warning: ", palette.warning),
            StatusKind::Success => ("Success: ", palette.success),
            StatusKind::Info => ("", palette.text_secondary),
        };
        spans.push(Span::styled(
            format!("{prefix}{}", msg.text()),
            Style::default().fg(color),
        ));
    } else {
        for (i, (key, action)) in key_hints(app).into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    format!(" {} ", glyphs.separator),
                    styles::key_hint(palette),
                ));
            }
            spans.push(Span::styled(key, styles::key_highlight(palette)));
            spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
        }
    }
    Paragraph::new(Line::from(spans)).render(area, buf);
}
