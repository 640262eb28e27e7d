//! Panic capture and the component path stack.
//!
//! Both are thread-local: rendering is single-threaded, and a boundary only
//! cares about panics raised on its own thread while its child renders.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::panic::{self, PanicHookInfo};
use std::sync::Once;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_PANIC: RefCell<Option<CapturedPanic>> = const { RefCell::new(None) };
    static PATH: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

static INSTALL: Once = Once::new();

/// Location and backtrace recorded by the hook for the innermost boundary.
#[derive(Debug)]
pub(crate) struct CapturedPanic {
    location: Option<String>,
    backtrace: Option<String>,
}

impl CapturedPanic {
    fn capture(info: &PanicHookInfo<'_>) -> Self {
        let backtrace = Backtrace::capture();
        Self {
            location: info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
            backtrace: (backtrace.status() == BacktraceStatus::Captured)
                .then(|| backtrace.to_string()),
        }
    }

    pub(crate) fn into_stack(self) -> String {
        match (self.location, self.backtrace) {
            (Some(loc), Some(bt)) => format!("at {loc}\n{bt}"),
            (Some(loc), None) => format!("at {loc}"),
            (None, Some(bt)) => bt,
            (None, None) => String::new(),
        }
    }
}

/// Wrap the process panic hook so panics inside a fault boundary are
/// recorded for the boundary instead of being printed over the UI.
///
/// Panics outside any boundary go to the previous hook unchanged. Safe to
/// call more than once; only the first call installs.
pub fn install_panic_hook() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if DEPTH.with(Cell::get) > 0 {
                let captured = CapturedPanic::capture(info);
                LAST_PANIC.with(|slot| *slot.borrow_mut() = Some(captured));
            } else {
                previous(info);
            }
        }));
    });
}

pub(crate) fn take_last_panic() -> Option<CapturedPanic> {
    LAST_PANIC.with(|slot| slot.borrow_mut().take())
}

/// Marks the current thread as rendering inside a boundary labelled `label`.
///
/// Dropping it pops the label, including during unwinding.
pub(crate) struct BoundaryScope {
    _private: (),
}

impl BoundaryScope {
    pub(crate) fn enter(label: &str) -> Self {
        DEPTH.with(|d| d.set(d.get() + 1));
        PATH.with(|p| p.borrow_mut().push(label.to_string()));
        Self { _private: () }
    }

    /// Labels of every boundary currently rendering, outermost first.
    pub(crate) fn path(&self) -> Vec<String> {
        PATH.with(|p| p.borrow().clone())
    }
}

impl Drop for BoundaryScope {
    fn drop(&mut self) {
        PATH.with(|p| {
            p.borrow_mut().pop();
        });
        DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
pub(crate) fn current_depth() -> usize {
    DEPTH.with(Cell::get)
}
