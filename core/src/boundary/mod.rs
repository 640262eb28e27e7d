//! Fault boundaries for ratatui widgets.
//!
//! A boundary renders a fallible child into a scratch copy of its area. If
//! the child returns an error or panics, the copy is thrown away, the failure
//! is reported, and a fallback is drawn in the same frame. The boundary stays
//! failed (and stops rendering its child) until [`BoundaryState::reset`].
//!
//! ```ignore
//! let panel = NamedFaultBoundary::new(|area: Rect, buf: &mut Buffer| {
//!     draw_tag_table(app, area, buf)
//! })
//! .name("Tag Analytics");
//! frame.render_stateful_widget(panel, area, app.boundary_mut(Panel::TagAnalytics));
//! ```

mod child;
mod controls;
mod fallback;
mod failure;
mod panic;
mod report;
mod state;

use std::borrow::Cow;
use std::panic::{AssertUnwindSafe, catch_unwind};

use folio_types::BuildMode;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;

pub use child::{Infallible, TryWidget};
pub use controls::{ControlKind, Controls};
pub use fallback::{
    DEFAULT_SECTION_NAME, DefaultFallback, FallbackProps, FallbackProvider, SectionFallback,
};
pub use failure::{ContextInfo, FailureInfo, FailureOrigin, RenderError};
pub use panic::install_panic_hook;
pub use report::{FailureReporter, NoopReporter, TracingReporter};
pub use state::{BoundaryState, ControlOutcome, Phase};

use panic::{BoundaryScope, take_last_panic};
use report::TRACING_REPORTER;

const DEFAULT_LABEL: &str = "FaultBoundary";

/// Isolates render failures of `child` from everything around it.
pub struct FaultBoundary<'a, C, F = DefaultFallback> {
    child: C,
    label: Cow<'a, str>,
    fallback: F,
    reporter: &'a dyn FailureReporter,
    build_mode: BuildMode,
}

impl<'a, C: TryWidget> FaultBoundary<'a, C> {
    pub fn new(child: C) -> Self {
        Self {
            child,
            label: Cow::Borrowed(DEFAULT_LABEL),
            fallback: DefaultFallback,
            reporter: &TRACING_REPORTER,
            build_mode: BuildMode::default(),
        }
    }
}

impl<'a, C: TryWidget, F: FallbackProvider> FaultBoundary<'a, C, F> {
    /// Name used in the component path of failure context.
    pub fn label(mut self, label: impl Into<Cow<'a, str>>) -> Self {
        self.label = label.into();
        self
    }

    pub fn fallback<P: FallbackProvider>(self, fallback: P) -> FaultBoundary<'a, C, P> {
        FaultBoundary {
            child: self.child,
            label: self.label,
            fallback,
            reporter: self.reporter,
            build_mode: self.build_mode,
        }
    }

    pub fn reporter(mut self, reporter: &'a dyn FailureReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn build_mode(mut self, build_mode: BuildMode) -> Self {
        self.build_mode = build_mode;
        self
    }
}

impl<C: TryWidget, F: FallbackProvider> StatefulWidget for FaultBoundary<'_, C, F> {
    type State = BoundaryState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Self {
            child,
            label,
            fallback,
            reporter,
            build_mode,
        } = self;
        let area = area.intersection(buf.area);
        state.render_passes += 1;
        state.controls.clear();

        if state.is_failed() {
            // Stays unmounted until reset.
            drop(child);
        } else if let Err(caught) = render_isolated(&label, child, area, buf) {
            let context = ContextInfo::capture(
                &label,
                caught.path,
                caught.component.as_deref(),
                area,
                state.render_passes,
            );
            reporter.report(&caught.failure, &context);
            state.fail(caught.failure, context);
        }

        if let Phase::Failed { failure, context } = &state.phase {
            let props = FallbackProps {
                failure,
                context,
                build_mode,
                debug_expanded: state.debug_expanded,
            };
            fallback.render_fallback(&props, area, buf, &mut state.controls);
        }
    }
}

struct Caught {
    failure: FailureInfo,
    component: Option<String>,
    path: Vec<String>,
}

/// Render `child` into a scratch copy of `area`, committing only on success.
fn render_isolated<C: TryWidget>(
    label: &str,
    child: C,
    area: Rect,
    buf: &mut Buffer,
) -> Result<(), Caught> {
    let _ = take_last_panic();
    let scope = BoundaryScope::enter(label);

    let mut scratch = Buffer::empty(area);
    for pos in area.positions() {
        scratch[pos] = buf[pos].clone();
    }

    let outcome = catch_unwind(AssertUnwindSafe(|| child.try_render(area, &mut scratch)));
    let path = scope.path();
    drop(scope);

    match outcome {
        Ok(Ok(())) => {
            for pos in area.positions() {
                buf[pos] = scratch[pos].clone();
            }
            Ok(())
        }
        Ok(Err(err)) => Err(Caught {
            failure: FailureInfo::from_render_error(&err),
            component: err.component().map(str::to_string),
            path,
        }),
        Err(payload) => Err(Caught {
            failure: FailureInfo::from_panic(payload.as_ref(), take_last_panic()),
            component: None,
            path,
        }),
    }
}

/// A [`FaultBoundary`] with an inline fallback that names its section.
pub struct NamedFaultBoundary<'a, C> {
    child: C,
    name: Cow<'a, str>,
    reporter: &'a dyn FailureReporter,
    build_mode: BuildMode,
}

impl<'a, C: TryWidget> NamedFaultBoundary<'a, C> {
    pub fn new(child: C) -> Self {
        Self {
            child,
            name: Cow::Borrowed(DEFAULT_SECTION_NAME),
            reporter: &TRACING_REPORTER,
            build_mode: BuildMode::default(),
        }
    }

    pub fn name(mut self, name: impl Into<Cow<'a, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn reporter(mut self, reporter: &'a dyn FailureReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn build_mode(mut self, build_mode: BuildMode) -> Self {
        self.build_mode = build_mode;
        self
    }
}

impl<C: TryWidget> StatefulWidget for NamedFaultBoundary<'_, C> {
    type State = BoundaryState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        FaultBoundary::new(self.child)
            .label(self.name.clone())
            .fallback(SectionFallback::new(self.name))
            .reporter(self.reporter)
            .build_mode(self.build_mode)
            .render(area, buf, state);
    }
}
