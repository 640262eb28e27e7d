use ratatui::layout::{Position, Rect};

/// Interactive element a fallback can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Reset this boundary and remount its child.
    TryAgain,
    /// Ask the application to reload everything.
    ReloadPage,
    /// Expand or collapse the debug disclosure.
    ToggleDebug,
}

impl ControlKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ControlKind::TryAgain => "Try Again",
            ControlKind::ReloadPage => "Reload Page",
            ControlKind::ToggleDebug => "Debug Information",
        }
    }
}

/// Screen regions where the fallback drew its controls this frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    entries: Vec<(ControlKind, Rect)>,
}

impl Controls {
    pub fn register(&mut self, kind: ControlKind, area: Rect) {
        if area.is_empty() {
            return;
        }
        self.entries.push((kind, area));
    }

    /// Control under the given cell, if any. Later registrations win.
    #[must_use]
    pub fn hit(&self, column: u16, row: u16) -> Option<ControlKind> {
        let pos = Position::new(column, row);
        self.entries
            .iter()
            .rev()
            .find(|(_, area)| area.contains(pos))
            .map(|(kind, _)| *kind)
    }

    #[must_use]
    pub fn contains(&self, kind: ControlKind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    #[must_use]
    pub fn area_of(&self, kind: ControlKind) -> Option<Rect> {
        self.entries.iter().find(|(k, _)| *k == kind).map(|(_, a)| *a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlKind, Rect)> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
