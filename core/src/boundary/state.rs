use super::{ContextInfo, ControlKind, Controls, FailureInfo};

/// Whether the child is mounted or replaced by the fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Healthy,
    Failed {
        failure: Box<FailureInfo>,
        context: Box<ContextInfo>,
    },
}

/// What activating a control asks of the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    /// The boundary is healthy again; the child mounts on the next frame.
    Reset,
    DebugToggled,
    /// The owner should reload its data and reset every boundary.
    ReloadRequested,
}

/// Per-boundary state that survives across frames.
///
/// Created healthy. Moves to failed when the child fails to render and back
/// to healthy only through [`BoundaryState::reset`].
#[derive(Debug, Clone, Default)]
pub struct BoundaryState {
    pub(crate) phase: Phase,
    pub(crate) debug_expanded: bool,
    pub(crate) controls: Controls,
    pub(crate) render_passes: u64,
    cycles: u32,
}

impl BoundaryState {
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.phase, Phase::Failed { .. })
    }

    #[must_use]
    pub fn failure(&self) -> Option<&FailureInfo> {
        match &self.phase {
            Phase::Failed { failure, .. } => Some(failure),
            Phase::Healthy => None,
        }
    }

    #[must_use]
    pub fn context(&self) -> Option<&ContextInfo> {
        match &self.phase {
            Phase::Failed { context, .. } => Some(context),
            Phase::Healthy => None,
        }
    }

    /// Return to healthy. Always succeeds, whatever caused the failure.
    pub fn reset(&mut self) {
        if self.is_failed() {
            self.cycles = self.cycles.saturating_add(1);
            tracing::debug!(cycles = self.cycles, "Fault boundary reset");
        }
        self.phase = Phase::Healthy;
        self.debug_expanded = false;
        self.controls.clear();
    }

    /// Completed failure/reset cycles. Diagnostic only.
    #[must_use]
    pub const fn cycles(&self) -> u32 {
        self.cycles
    }

    #[must_use]
    pub const fn debug_expanded(&self) -> bool {
        self.debug_expanded
    }

    pub fn toggle_debug(&mut self) {
        if self.is_failed() {
            self.debug_expanded = !self.debug_expanded;
        }
    }

    /// Controls drawn by the fallback on the last frame.
    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ControlKind> {
        self.controls.hit(column, row)
    }

    /// Apply a control the user activated.
    pub fn activate(&mut self, kind: ControlKind) -> ControlOutcome {
        match kind {
            ControlKind::TryAgain => {
                self.reset();
                ControlOutcome::Reset
            }
            ControlKind::ToggleDebug => {
                self.toggle_debug();
                ControlOutcome::DebugToggled
            }
            ControlKind::ReloadPage => ControlOutcome::ReloadRequested,
        }
    }

    pub(crate) fn fail(&mut self, failure: FailureInfo, context: ContextInfo) {
        self.phase = Phase::Failed {
            failure: Box::new(failure),
            context: Box::new(context),
        };
        self.debug_expanded = false;
    }
}
