use super::{ContextInfo, FailureInfo};

/// Observability hook invoked once per intercepted failure.
pub trait FailureReporter {
    fn report(&self, failure: &FailureInfo, context: &ContextInfo);
}

impl<F> FailureReporter for F
where
    F: Fn(&FailureInfo, &ContextInfo),
{
    fn report(&self, failure: &FailureInfo, context: &ContextInfo) {
        self(failure, context);
    }
}

/// Emits a `tracing` error event. The default reporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, failure: &FailureInfo, context: &ContextInfo) {
        tracing::error!(
            boundary = context.boundary(),
            component_stack = %context.component_stack(),
            origin = ?failure.origin(),
            render_pass = context.render_pass(),
            timestamp = %context.timestamp().to_rfc3339(),
            stack = failure.stack().unwrap_or(""),
            "Render failure caught by fault boundary: {}",
            failure.message()
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl FailureReporter for NoopReporter {
    fn report(&self, _failure: &FailureInfo, _context: &ContextInfo) {}
}

pub(crate) static TRACING_REPORTER: TracingReporter = TracingReporter;
