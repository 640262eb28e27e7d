//! Panel bodies. Each renders into its own area and may fail; the caller
//! wraps it in a fault boundary.

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table,
        Widget,
    },
};
use unicode_width::UnicodeWidthStr;

use folio_core::RenderError;
use folio_engine::{App, Panel};
use folio_types::{
    AnnualFigure, AssetClass, ClassTotals, Holding, InvestmentSummary, PerformanceItem,
    format_compact_currency, format_currency, format_signed_percent,
};

use crate::theme::{ASCII_BARS, Glyphs, Palette, styles};

const EMPTY_PORTFOLIO: &str = "No investments to display";
const NO_ACTIVITY: &str = "No recent activity";
const NO_TAGS: &str = "No tagged assets";
const NO_MATCHES: &str = "No holdings match the filter";
const PERFORMER_ROWS: usize = 3;

/// Read-only inputs shared by every panel.
pub(crate) struct View<'a> {
    pub app: &'a App,
    pub palette: &'a Palette,
    pub glyphs: &'a Glyphs,
}

/// Name of the component inside a panel, reported in the component stack.
pub(crate) const fn component_name(panel: Panel) -> &'static str {
    match panel {
        Panel::Overview => "OverviewCards",
        Panel::Allocation => "AllocationChart",
        Panel::TagAnalytics => "TagTable",
        Panel::Performers => "PerformerList",
        Panel::Holdings => "HoldingsTable",
        Panel::Activity => "ActivityFeed",
    }
}

pub(crate) fn render(
    view: &View<'_>,
    panel: Panel,
    area: Rect,
    buf: &mut Buffer,
) -> Result<(), RenderError> {
    let focused = view.app.focus() == panel;
    let inner = frame(view, panel, focused, area, buf);
    if inner.is_empty() {
        return Ok(());
    }
    match panel {
        Panel::Overview => overview(view, inner, buf),
        Panel::Allocation => allocation(view, inner, buf),
        Panel::TagAnalytics => tag_analytics(view, inner, buf)?,
        Panel::Performers => performers(view, inner, buf),
        Panel::Holdings => holdings(view, inner, buf),
        Panel::Activity => activity(view, inner, buf),
    }
    Ok(())
}

fn frame(view: &View<'_>, panel: Panel, focused: bool, area: Rect, buf: &mut Buffer) -> Rect {
    let palette = view.palette;
    let marker = if focused { view.glyphs.focus } else { " " };
    let mut title = vec![
        Span::styled(format!("{marker} "), styles::panel_title(palette, focused)),
        Span::styled(panel.display_name(), styles::panel_title(palette, focused)),
    ];
    if panel == Panel::TagAnalytics {
        title.push(Span::styled(
            format!(" (by {})", view.app.tag_sort().label()),
            styles::key_hint(palette),
        ));
    }
    if panel == Panel::Holdings {
        title.extend(filter_label(view.app, palette));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::panel_border(palette, focused))
        .style(Style::default().bg(palette.bg_panel))
        .title(Line::from(title))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

fn empty_message(text: &str, palette: &Palette, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(palette.text_muted),
    )))
    .alignment(Alignment::Center)
    .render(area, buf);
}

fn truncate_with_ellipsis(raw: &str, max: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.width() <= max {
        return trimmed.to_string();
    }
    let budget = max.saturating_sub(3);
    let mut out = String::new();
    for c in trimmed.chars() {
        if out.width() + c.to_string().width() > budget {
            break;
        }
        out.push(c);
    }
    format!("{out}...")
}

fn signed_span(value: f64, palette: &Palette, glyphs: &Glyphs) -> Span<'static> {
    let arrow = if value < 0.0 { glyphs.down } else { glyphs.up };
    Span::styled(
        format!("{arrow} {}", format_signed_percent(value)),
        Style::default().fg(palette.signed(value)),
    )
}

// ------------------------------------------------------------------
// Overview
// ------------------------------------------------------------------

fn overview(view: &View<'_>, area: Rect, buf: &mut Buffer) {
    let portfolio = &view.app.snapshot().portfolio;
    if portfolio.is_empty() {
        empty_message(EMPTY_PORTFOLIO, view.palette, area, buf);
        return;
    }
    let summary = portfolio.summary();
    let cards = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

    total_card(view, &summary, cards[0], buf);
    for (class, rect) in AssetClass::ALL.into_iter().zip(cards.iter().skip(1)) {
        class_card(view, class, summary.class(class), *rect, buf);
    }
}

fn total_card(view: &View<'_>, summary: &InvestmentSummary, area: Rect, buf: &mut Buffer) {
    let palette = view.palette;
    let lines = vec![
        Line::from(Span::styled("Total Value", Style::default().fg(palette.text_muted))),
        Line::from(Span::styled(
            format_currency(summary.total_value()),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            signed_span(summary.return_percentage(), palette, view.glyphs),
            Span::styled(
                format!(" {}", format_compact_currency(summary.total_return())),
                Style::default().fg(palette.signed(summary.total_return())),
            ),
        ]),
    ];
    Paragraph::new(lines).render(area, buf);
}

fn class_card(view: &View<'_>, class: AssetClass, totals: &ClassTotals, area: Rect, buf: &mut Buffer) {
    let palette = view.palette;
    let lines = vec![
        Line::from(Span::styled(class.label(), Style::default().fg(palette.text_muted))),
        Line::from(Span::styled(
            format_compact_currency(totals.value),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("{} {} ", totals.count, class.count_noun()),
                Style::default().fg(palette.text_secondary),
            ),
            signed_span(totals.return_percentage(), palette, view.glyphs),
        ]),
    ];
    Paragraph::new(lines).render(area, buf);
}

// ------------------------------------------------------------------
// Allocation
// ------------------------------------------------------------------

fn allocation(view: &View<'_>, area: Rect, buf: &mut Buffer) {
    let palette = view.palette;
    let slices = view.app.snapshot().portfolio.summary().allocation();
    if slices.is_empty() {
        empty_message(EMPTY_PORTFOLIO, palette, area, buf);
        return;
    }

    let [chart_area, legend_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(slices.len() as u16)])
            .areas(area);

    let bar_width = (chart_area.width / slices.len() as u16)
        .saturating_sub(2)
        .clamp(3, 12);
    let bars: Vec<Bar<'_>> = slices
        .iter()
        .zip(palette.classes)
        .map(|(slice, color)| {
            Bar::default()
                .value(slice.percentage.round() as u64)
                .text_value(format!("{:.0}%", slice.percentage))
                .label(Line::from(slice.class.label()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(palette.bg_dark).bg(color))
        })
        .collect();
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2)
        .max(100)
        .label_style(Style::default().fg(palette.text_secondary));
    if view.app.ui_options().ascii_only {
        chart.bar_set(ASCII_BARS).render(chart_area, buf);
    } else {
        chart.render(chart_area, buf);
    }

    let legend: Vec<Line<'_>> = slices
        .iter()
        .zip(palette.classes)
        .map(|(slice, color)| {
            Line::from(vec![
                Span::styled(view.glyphs.bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {:<11}", slice.class.label()),
                    Style::default().fg(palette.text_primary),
                ),
                Span::styled(
                    format!("{:>5.1}%  ", slice.percentage),
                    Style::default().fg(palette.text_secondary),
                ),
                Span::styled(
                    format_compact_currency(slice.value),
                    Style::default().fg(palette.text_muted),
                ),
            ])
        })
        .collect();
    Paragraph::new(legend).render(legend_area, buf);
}

// ------------------------------------------------------------------
// Tag analytics
// ------------------------------------------------------------------

fn tag_analytics(view: &View<'_>, area: Rect, buf: &mut Buffer) -> Result<(), RenderError> {
    let palette = view.palette;
    let summaries = view
        .app
        .tag_summaries()
        .map_err(|e| RenderError::from_error(e).in_component(component_name(Panel::TagAnalytics)))?;
    if summaries.is_empty() {
        empty_message(NO_TAGS, palette, area, buf);
        return Ok(());
    }

    let header = Row::new(["Tag", "Assets", "Value", "Return", "Best"])
        .style(styles::table_header(palette));
    let rows = summaries.iter().map(|s| {
        let tag_color = s
            .rgb()
            .map_or(palette.text_primary, |(r, g, b)| Color::Rgb(r, g, b));
        let best = s
            .best_performer
            .as_ref()
            .map_or_else(String::new, |p| p.name.clone());
        Row::new(vec![
            Cell::from(Line::from(vec![
                Span::styled(view.glyphs.bullet, Style::default().fg(tag_color)),
                Span::styled(
                    format!(" {}", s.tag_name),
                    Style::default().fg(palette.text_primary),
                ),
            ])),
            Cell::from(s.total_assets_count().to_string()),
            Cell::from(format_compact_currency(s.total_value)),
            Cell::from(Span::styled(
                format_signed_percent(s.return_percentage),
                Style::default().fg(palette.signed(s.return_percentage)),
            )),
            Cell::from(best),
        ])
        .style(Style::default().fg(palette.text_secondary))
    });
    Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(8),
        ],
    )
    .header(header)
    .column_spacing(1)
    .render(area, buf);
    Ok(())
}

// ------------------------------------------------------------------
// Performers
// ------------------------------------------------------------------

fn performer_line(item: &PerformanceItem, width: usize, view: &View<'_>) -> Line<'static> {
    let palette = view.palette;
    let name_width = width.saturating_sub(22).max(6);
    Line::from(vec![
        Span::styled(
            format!(
                "{:<name_width$} ",
                truncate_with_ellipsis(&item.name, name_width)
            ),
            Style::default().fg(palette.text_primary),
        ),
        Span::styled(
            format!("{:<9}", item.class.label()),
            Style::default().fg(palette.text_muted),
        ),
        signed_span(item.return_percentage, palette, view.glyphs),
    ])
}

fn performers(view: &View<'_>, area: Rect, buf: &mut Buffer) {
    let palette = view.palette;
    let items = view.app.snapshot().portfolio.performers();
    if items.is_empty() {
        empty_message(EMPTY_PORTFOLIO, palette, area, buf);
        return;
    }
    let width = usize::from(area.width);
    let top = items.iter().take(PERFORMER_ROWS);
    // Keep the bottom list disjoint from the top one in small portfolios.
    let bottom_start = items.len().saturating_sub(PERFORMER_ROWS).max(PERFORMER_ROWS);
    let bottom = items.iter().skip(bottom_start).rev();

    let heading = |text: &'static str| {
        Line::from(Span::styled(text, styles::table_header(palette)))
    };
    let mut lines = vec![heading("Top performers")];
    lines.extend(top.map(|item| performer_line(item, width, view)));
    if bottom_start < items.len() {
        lines.push(heading("Bottom performers"));
        lines.extend(bottom.map(|item| performer_line(item, width, view)));
    }
    Paragraph::new(lines).render(area, buf);
}

// ------------------------------------------------------------------
// Holdings
// ------------------------------------------------------------------

fn holdings(view: &View<'_>, area: Rect, buf: &mut Buffer) {
    let palette = view.palette;
    let portfolio = &view.app.snapshot().portfolio;
    if portfolio.is_empty() {
        empty_message(EMPTY_PORTFOLIO, palette, area, buf);
        return;
    }

    let mut shown = view.app.filtered_holdings().peekable();
    if shown.peek().is_none() {
        empty_message(NO_MATCHES, palette, area, buf);
        return;
    }

    let header = Row::new(["Name", "Class", "Value", "Return", "Yearly"])
        .style(styles::table_header(palette));
    let rows = shown.map(|h: &dyn Holding| {
        let pct = h.return_percentage();
        let return_cell = match pct {
            Some(p) => Cell::from(Span::styled(
                format_signed_percent(p),
                Style::default().fg(palette.signed(p)),
            )),
            None => Cell::from(Span::styled("n/a", Style::default().fg(palette.text_muted))),
        };
        Row::new(vec![
            Cell::from(h.display_name().to_string()),
            Cell::from(h.class().label()),
            Cell::from(format_currency(h.total_value())),
            return_cell,
            annual_cell(h.annual_figure(), palette),
        ])
        .style(Style::default().fg(palette.text_primary))
    });
    Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .column_spacing(1)
    .render(area, buf);
}

fn annual_cell(figure: Option<AnnualFigure>, palette: &Palette) -> Cell<'static> {
    match figure {
        Some(AnnualFigure::ExpenseCost(cost)) => Cell::from(Span::styled(
            format!("-{} fees", format_compact_currency(cost)),
            Style::default().fg(palette.text_muted),
        )),
        Some(AnnualFigure::NetYield(pct)) => Cell::from(Span::styled(
            format!("{pct:.1}% net"),
            Style::default().fg(palette.signed(pct)),
        )),
        None => Cell::from(""),
    }
}

/// Title suffix describing the holdings filter. Empty when nothing filters.
fn filter_label(app: &App, palette: &Palette) -> Vec<Span<'static>> {
    let filter = app.holdings_filter();
    let hint = styles::key_hint(palette);
    let query = filter.query().trim();
    let mut spans = Vec::new();
    if app.is_editing_filter() {
        spans.push(Span::styled(format!(" /{}_", filter.query()), hint));
    } else if !query.is_empty() {
        spans.push(Span::styled(format!(" /{query}"), hint));
    }
    if let Some(id) = filter.tag() {
        let (name, color) = match app.holdings_tag() {
            Some(tag) => (
                tag.name.clone(),
                tag.rgb().map_or(palette.text_secondary, |(r, g, b)| Color::Rgb(r, g, b)),
            ),
            None => (id.to_string(), palette.text_secondary),
        };
        spans.push(Span::styled(format!(" #{name}"), Style::default().fg(color)));
    }
    spans
}

// ------------------------------------------------------------------
// Activity
// ------------------------------------------------------------------

fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

fn activity(view: &View<'_>, area: Rect, buf: &mut Buffer) {
    let palette = view.palette;
    let snapshot = view.app.snapshot();
    let Some(group) = snapshot.group.as_ref().filter(|g| !g.activity.is_empty()) else {
        empty_message(NO_ACTIVITY, palette, area, buf);
        return;
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            group.group.name.clone(),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " {} {} {} of {} members active",
                view.glyphs.separator,
                group.group.kind.label(),
                group.active_members(),
                group.members.len()
            ),
            Style::default().fg(palette.text_muted),
        ),
    ])];

    let limit = usize::from(area.height.saturating_sub(1));
    let now = snapshot.as_of;
    let width = usize::from(area.width);
    for entry in group.recent_activity(limit) {
        let when = relative_time(entry.created_at, now);
        let prefix = format!("{} {}: ", view.glyphs.bullet, entry.user_name);
        let room = width.saturating_sub(prefix.width() + when.width() + 1);
        lines.push(Line::from(vec![
            Span::styled(prefix, Style::default().fg(palette.accent)),
            Span::styled(
                format!("{} ", truncate_with_ellipsis(&entry.details, room)),
                Style::default().fg(palette.text_primary),
            ),
            Span::styled(when, Style::default().fg(palette.text_muted)),
        ]));
    }
    Paragraph::new(lines).render(area, buf);
}
