//! Dashboard frames pushed through a virtual terminal.
//!
//! Unlike `TestBackend`, only changed cells are written between frames, so
//! these catch fallbacks that leave stale content behind after a reset.

mod common;
mod vt100_backend;

use crossterm::event::KeyCode;
use folio_engine::{App, Panel};
use ratatui::Terminal;

use common::{HEIGHT, WIDTH, click, demo_app, focus, press};
use vt100_backend::VirtualTerminal;

fn terminal() -> Terminal<VirtualTerminal> {
    Terminal::new(VirtualTerminal::new(WIDTH, HEIGHT)).unwrap()
}

fn frame(terminal: &mut Terminal<VirtualTerminal>, app: &mut App) -> String {
    terminal.draw(|frame| folio_tui::draw(frame, app)).unwrap();
    terminal.backend().contents()
}

#[test]
fn first_frame_draws_full_dashboard() {
    let mut terminal = terminal();
    let mut app = demo_app();

    let screen = frame(&mut terminal, &mut app);

    assert!(screen.contains("Folio"));
    assert!(screen.contains("Portfolio Overview"));
    assert!(screen.contains("Recent Activity"));
}

#[test]
fn fallback_appears_and_clears_across_frames() {
    let mut terminal = terminal();
    let mut app = demo_app();
    frame(&mut terminal, &mut app);

    focus(&mut app, Panel::Holdings);
    press(&mut app, KeyCode::Char('!'));
    let failed = frame(&mut terminal, &mut app);
    assert!(failed.contains("Holdings Error"));
    assert!(failed.contains("Try Again"));

    press(&mut app, KeyCode::Char('r'));
    let recovered = frame(&mut terminal, &mut app);
    assert!(!recovered.contains("Holdings Error"));
    assert!(!recovered.contains("Try Again"));
    assert!(recovered.contains("Retrying Holdings"));
}

#[test]
fn failed_panel_frames_are_stable() {
    let mut terminal = terminal();
    let mut app = demo_app();
    focus(&mut app, Panel::Allocation);
    press(&mut app, KeyCode::Char('!'));

    frame(&mut terminal, &mut app);
    assert!(terminal.backend().last_draw() > 0);

    // Nothing changes while the panel sits in its fallback.
    frame(&mut terminal, &mut app);
    assert_eq!(terminal.backend().last_draw(), 0);
}

#[test]
fn clicking_the_drawn_button_resets_the_panel() {
    let mut terminal = terminal();
    let mut app = demo_app();
    focus(&mut app, Panel::Activity);
    press(&mut app, KeyCode::Char('!'));
    frame(&mut terminal, &mut app);

    let button = terminal.backend().find("Try Again").unwrap();
    click(&mut app, button.x, button.y);

    let screen = frame(&mut terminal, &mut app);
    assert!(!app.boundary(Panel::Activity).is_failed());
    assert!(!screen.contains("Recent Activity Error"));
}
