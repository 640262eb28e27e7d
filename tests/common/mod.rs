//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use folio_core::ControlKind;
use folio_engine::{
    App, BoundaryTarget, BuildMode, LoadError, Panel, PortfolioSnapshot, PortfolioSource,
    Settings, demo_snapshot,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub const WIDTH: u16 = 140;
pub const HEIGHT: u16 = 48;

/// Serves the same snapshot on every load.
pub struct FixedSource(pub PortfolioSnapshot);

impl PortfolioSource for FixedSource {
    fn load(&self) -> Result<PortfolioSnapshot, LoadError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "fixture".to_string()
    }
}

pub fn settings(build_mode: BuildMode) -> Settings {
    Settings {
        build_mode,
        ..Settings::default()
    }
}

pub fn demo_app() -> App {
    App::new(Settings::default(), Box::new(FixedSource(demo_snapshot())))
}

pub fn app_with(settings: Settings, snapshot: PortfolioSnapshot) -> App {
    App::new(settings, Box::new(FixedSource(snapshot)))
}

/// Demo data with one holding pointing at a tag the catalogue lacks.
pub fn snapshot_with_unknown_tag() -> PortfolioSnapshot {
    let mut snapshot = demo_snapshot();
    snapshot.portfolio.stocks[0].tags.push("tag_missing".to_string());
    snapshot
}

pub fn buffer_text(buffer: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Draw one frame of the dashboard and return the screen as text.
pub fn render(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| folio_tui::draw(frame, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

pub fn press(app: &mut App, code: KeyCode) -> bool {
    folio_tui::apply_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

pub fn click(app: &mut App, column: u16, row: u16) -> bool {
    folio_tui::apply_event(
        app,
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }),
    )
}

/// Screen area of a control registered by the last frame.
pub fn control_area(app: &App, target: BoundaryTarget, kind: ControlKind) -> Option<Rect> {
    let state = match target {
        BoundaryTarget::Page => app.page_boundary(),
        BoundaryTarget::Panel(panel) => app.boundary(panel),
    };
    state.controls().area_of(kind)
}

pub fn focus(app: &mut App, panel: Panel) {
    for _ in 0..Panel::COUNT {
        if app.focus() == panel {
            return;
        }
        app.focus_next();
    }
    panic!("{panel:?} is not visible");
}
