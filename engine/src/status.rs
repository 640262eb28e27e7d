use std::time::{Duration, Instant};

/// Severity of a status-bar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Informational messages fade after this long; warnings and errors stay
/// until replaced.
const TRANSIENT_FOR: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct StatusMessage {
    kind: StatusKind,
    text: String,
    shown_at: Instant,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> StatusKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        matches!(self.kind, StatusKind::Info | StatusKind::Success)
            && now.saturating_duration_since(self.shown_at) >= TRANSIENT_FOR
    }
}
