//! Dashboard state.
//!
//! [`App`] owns the loaded snapshot, one [`BoundaryState`] per panel plus one
//! for the whole page, keyboard focus and the status line. The TUI reads from
//! it to draw and forwards input back to it; no rendering happens here.

mod export;
mod filter;

use std::collections::HashSet;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use folio_core::{BoundaryState, ControlKind, ControlOutcome};
use folio_types::{
    BuildMode, HoldingFilter, Settings, TagError, TagSort, TaggedAssetSummary, UiOptions,
};

pub use export::{ExportError, ExportKind};

use crate::panel::Panel;
use crate::source::{PortfolioSnapshot, PortfolioSource};
use crate::status::{StatusKind, StatusMessage};

/// Which boundary a fallback control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryTarget {
    Page,
    Panel(Panel),
}

/// A fallback control resolved from a click position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlHit {
    pub target: BoundaryTarget,
    pub kind: ControlKind,
}

pub struct App {
    settings: Settings,
    source: Box<dyn PortfolioSource>,
    snapshot: PortfolioSnapshot,
    page: BoundaryState,
    panels: [BoundaryState; Panel::COUNT],
    focus: Panel,
    tag_sort: TagSort,
    holdings_filter: HoldingFilter,
    editing_filter: bool,
    armed_faults: HashSet<Panel>,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    /// Build the app and load the first snapshot.
    ///
    /// A failed load leaves an empty snapshot and an error in the status bar.
    pub fn new(settings: Settings, source: Box<dyn PortfolioSource>) -> Self {
        let mut app = Self {
            settings,
            source,
            snapshot: PortfolioSnapshot::empty(),
            page: BoundaryState::default(),
            panels: Default::default(),
            focus: Panel::Overview,
            tag_sort: TagSort::default(),
            holdings_filter: HoldingFilter::default(),
            editing_filter: false,
            armed_faults: HashSet::new(),
            status: None,
            should_quit: false,
        };
        app.focus = app.visible_panels().first().copied().unwrap_or(Panel::Overview);
        app.load();
        app
    }

    fn load(&mut self) -> bool {
        match self.source.load() {
            Ok(snapshot) => {
                tracing::info!(
                    source = %self.source.describe(),
                    holdings = snapshot.portfolio.len(),
                    "Portfolio loaded"
                );
                self.snapshot = snapshot;
                true
            }
            Err(err) => {
                tracing::warn!("Portfolio load failed: {err}");
                let details = err.details();
                self.set_status(StatusKind::Error, details.summary());
                false
            }
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn build_mode(&self) -> BuildMode {
        self.settings.build_mode
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.settings.ui
    }

    #[must_use]
    pub fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    // ------------------------------------------------------------------
    // Panels and focus
    // ------------------------------------------------------------------

    /// Panels enabled by feature flags, in layout order.
    #[must_use]
    pub fn visible_panels(&self) -> Vec<Panel> {
        Panel::ALL
            .into_iter()
            .filter(|p| p.is_enabled(self.settings.features))
            .collect()
    }

    #[must_use]
    pub fn focus(&self) -> Panel {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        let visible = self.visible_panels();
        if visible.is_empty() {
            return;
        }
        let len = visible.len() as isize;
        let current = visible.iter().position(|p| *p == self.focus).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.focus = visible[next];
    }

    #[must_use]
    pub fn boundary(&self, panel: Panel) -> &BoundaryState {
        &self.panels[panel.index()]
    }

    pub fn boundary_mut(&mut self, panel: Panel) -> &mut BoundaryState {
        &mut self.panels[panel.index()]
    }

    #[must_use]
    pub fn page_boundary(&self) -> &BoundaryState {
        &self.page
    }

    pub fn page_boundary_mut(&mut self) -> &mut BoundaryState {
        &mut self.page
    }

    fn boundary_slot(&mut self, target: BoundaryTarget) -> &mut BoundaryState {
        match target {
            BoundaryTarget::Page => &mut self.page,
            BoundaryTarget::Panel(panel) => &mut self.panels[panel.index()],
        }
    }

    /// Lend `target`'s state to `render` while the rest of the app stays
    /// readable.
    ///
    /// The state is put back even if `render` unwinds, so a panicking
    /// fallback cannot turn a failed boundary back into a healthy one.
    pub fn with_boundary<R>(
        &mut self,
        target: BoundaryTarget,
        render: impl FnOnce(&mut Self, &mut BoundaryState) -> R,
    ) -> R {
        let mut state = mem::take(self.boundary_slot(target));
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| render(self, &mut state)));
        *self.boundary_slot(target) = state;
        match outcome {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    // ------------------------------------------------------------------
    // Tag analytics
    // ------------------------------------------------------------------

    #[must_use]
    pub fn tag_sort(&self) -> TagSort {
        self.tag_sort
    }

    pub fn cycle_tag_sort(&mut self) {
        self.tag_sort = self.tag_sort.next();
        self.set_status(
            StatusKind::Info,
            format!("Sorting tags by {}", self.tag_sort.label()),
        );
    }

    /// Tag summaries in the current sort order.
    pub fn tag_summaries(&self) -> Result<Vec<TaggedAssetSummary>, TagError> {
        let mut summaries = self.snapshot.tags.summaries(&self.snapshot.portfolio)?;
        self.tag_sort.apply(&mut summaries);
        Ok(summaries)
    }

    // ------------------------------------------------------------------
    // Recovery
    // ------------------------------------------------------------------

    /// Reset the focused panel, or the page if the whole page has failed.
    pub fn retry_focused(&mut self) {
        if self.page.is_failed() {
            self.page.reset();
            self.set_status(StatusKind::Info, "Retrying dashboard");
            return;
        }
        let panel = self.focus;
        if self.boundary(panel).is_failed() {
            self.boundary_mut(panel).reset();
            tracing::info!(panel = panel.display_name(), "Panel reset");
            self.set_status(
                StatusKind::Info,
                format!("Retrying {}", panel.display_name()),
            );
        }
    }

    /// Reload from the source and remount everything.
    ///
    /// On failure the previous snapshot stays on screen.
    pub fn reload(&mut self) {
        self.armed_faults.clear();
        self.reset_all_boundaries();
        if self.load() {
            self.set_status(StatusKind::Success, "Reloaded");
        }
    }

    fn reset_all_boundaries(&mut self) {
        self.page.reset();
        for state in &mut self.panels {
            state.reset();
        }
    }

    /// Resolve a click to a fallback control.
    ///
    /// A failed page covers the whole screen, so it is checked first.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ControlHit> {
        if self.page.is_failed() {
            return self.page.hit_test(column, row).map(|kind| ControlHit {
                target: BoundaryTarget::Page,
                kind,
            });
        }
        self.visible_panels().into_iter().find_map(|panel| {
            self.boundary(panel)
                .hit_test(column, row)
                .map(|kind| ControlHit {
                    target: BoundaryTarget::Panel(panel),
                    kind,
                })
        })
    }

    /// Apply a fallback control.
    pub fn activate(&mut self, hit: ControlHit) {
        if let BoundaryTarget::Panel(panel) = hit.target {
            self.focus = panel;
        }
        match self.boundary_slot(hit.target).activate(hit.kind) {
            ControlOutcome::Reset => {
                tracing::info!(target = ?hit.target, "Boundary reset from fallback");
            }
            ControlOutcome::DebugToggled => {}
            ControlOutcome::ReloadRequested => self.reload(),
        }
    }

    pub fn toggle_debug_focused(&mut self) {
        if !self.build_mode().shows_debug() {
            return;
        }
        if self.page.is_failed() {
            self.page.toggle_debug();
        } else {
            let panel = self.focus;
            self.boundary_mut(panel).toggle_debug();
        }
    }

    // ------------------------------------------------------------------
    // Fault injection
    // ------------------------------------------------------------------

    /// Arm a one-shot render failure in `panel`. Not available in production.
    pub fn inject_fault(&mut self, panel: Panel) -> bool {
        if self.build_mode() == BuildMode::Production {
            self.set_status(
                StatusKind::Warning,
                "Fault injection is disabled in production",
            );
            return false;
        }
        self.armed_faults.insert(panel);
        tracing::debug!(panel = panel.display_name(), "Fault armed");
        self.set_status(
            StatusKind::Warning,
            format!("Fault armed in {}", panel.display_name()),
        );
        true
    }

    /// Consume an armed fault for `panel`, if any.
    pub fn take_injected_fault(&mut self, panel: Panel) -> bool {
        self.armed_faults.remove(&panel)
    }

    // ------------------------------------------------------------------
    // Status and lifecycle
    // ------------------------------------------------------------------

    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(kind, text));
    }

    /// Drop a transient status once it has been shown long enough.
    pub fn tick(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }
}
