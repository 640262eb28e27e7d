//! Input handling for the Folio dashboard.

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use folio_engine::{App, ExportKind};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(&stop2, &tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so a backpressured send in the input thread unblocks.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: &AtomicBool, tx: &mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    // Bounded queue: apply backpressure instead of dropping events.
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending input without blocking. Returns `true` when the app should quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event to the app. Returns `true` when the app should quit.
pub fn apply_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            // Handle press + repeat events (ignore releases)
            if matches!(key.kind, KeyEventKind::Release) {
                return app.should_quit();
            }
            handle_key(app, key);
        }
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => {}
    }
    app.should_quit()
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }
    if app.is_editing_filter() {
        handle_filter_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Esc if app.holdings_filter().is_active() => app.finish_filter_edit(false),
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.focus_next(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.focus_prev(),
        KeyCode::Char('r') | KeyCode::Enter => app.retry_focused(),
        KeyCode::Char('R') => app.reload(),
        KeyCode::Char('s') => app.cycle_tag_sort(),
        KeyCode::Char('d') => app.toggle_debug_focused(),
        KeyCode::Char('!') => {
            let panel = app.focus();
            app.inject_fault(panel);
        }
        KeyCode::Char('/') => app.start_filter_edit(),
        KeyCode::Char('t') => app.cycle_holdings_tag(),
        // Export outcomes are reported through the status bar.
        KeyCode::Char('e') => {
            let _ = app.export_default(ExportKind::Snapshot);
        }
        KeyCode::Char('c') => {
            let _ = app.export_default(ExportKind::Csv);
        }
        KeyCode::Char('m') => {
            let _ = app.export_default(ExportKind::Summary);
        }
        _ => {}
    }
}

/// Typing goes to the holdings search until Enter or Esc.
fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.finish_filter_edit(true),
        KeyCode::Esc => app.finish_filter_edit(false),
        KeyCode::Backspace => app.filter_pop(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.filter_push(c),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if let Some(hit) = app.hit_test(mouse.column, mouse.row) {
        debug!(column = mouse.column, row = mouse.row, ?hit, "Fallback control clicked");
        app.activate(hit);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, MouseEvent};
    use folio_engine::{App, DemoSource, Panel, Settings, StatusKind};
    use folio_types::TagSort;

    use super::*;

    fn app() -> App {
        App::new(Settings::default(), Box::new(DemoSource))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut a = app();
        assert!(apply_event(&mut a, key(KeyCode::Char('q'))));

        let mut a = app();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(apply_event(&mut a, ctrl_c));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut a = app();
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(!apply_event(&mut a, release));
    }

    #[test]
    fn tab_and_backtab_move_focus() {
        let mut a = app();
        apply_event(&mut a, key(KeyCode::Tab));
        assert_eq!(a.focus(), Panel::Allocation);
        apply_event(&mut a, key(KeyCode::BackTab));
        apply_event(&mut a, key(KeyCode::BackTab));
        assert_eq!(a.focus(), Panel::Activity);
    }

    #[test]
    fn s_cycles_tag_sort() {
        let mut a = app();
        apply_event(&mut a, key(KeyCode::Char('s')));
        assert_eq!(a.tag_sort(), TagSort::Return);
    }

    #[test]
    fn bang_arms_fault_in_focused_panel() {
        let mut a = app();
        apply_event(&mut a, key(KeyCode::Char('!')));
        assert!(a.take_injected_fault(Panel::Overview));
        assert_eq!(a.status().map(|s| s.kind()), Some(StatusKind::Warning));
    }

    #[test]
    fn slash_captures_typing_until_enter() {
        let mut a = app();
        apply_event(&mut a, key(KeyCode::Char('/')));
        assert!(a.is_editing_filter());
        assert_eq!(a.focus(), Panel::Holdings);

        // `q` is text while editing, not quit.
        for c in "qbe".chars() {
            assert!(!apply_event(&mut a, key(KeyCode::Char(c))));
        }
        apply_event(&mut a, key(KeyCode::Backspace));
        assert_eq!(a.holdings_filter().query(), "qb");

        apply_event(&mut a, key(KeyCode::Enter));
        assert!(!a.is_editing_filter());
        assert_eq!(a.holdings_filter().query(), "qb");
    }

    #[test]
    fn esc_clears_an_active_filter_before_quitting() {
        let mut a = app();
        apply_event(&mut a, key(KeyCode::Char('t')));
        assert!(a.holdings_filter().tag().is_some());

        assert!(!apply_event(&mut a, key(KeyCode::Esc)));
        assert!(!a.holdings_filter().is_active());
        assert!(apply_event(&mut a, key(KeyCode::Esc)));
    }

    #[test]
    fn click_outside_controls_does_nothing() {
        let mut a = app();
        assert!(!apply_event(&mut a, click(3, 3)));
        assert!(a.status().is_none());
    }
}
