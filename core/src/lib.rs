//! Core mechanisms for Folio.
//!
//! - [`boundary`]: fault boundaries that keep one broken panel from taking
//!   down the dashboard.
//! - [`errors`]: user-facing classification of load and export failures.

pub mod boundary;
pub mod errors;

pub use boundary::{
    BoundaryState, ContextInfo, ControlKind, ControlOutcome, Controls, DefaultFallback,
    FailureInfo, FailureOrigin, FailureReporter, FallbackProps, FallbackProvider, FaultBoundary,
    Infallible, NamedFaultBoundary, NoopReporter, Phase, RenderError, SectionFallback,
    TracingReporter, TryWidget, install_panic_hook,
};
pub use errors::{ErrorDetails, Failure, classify};
