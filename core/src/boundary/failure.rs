//! What went wrong and where.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use thiserror::Error;

use super::panic::CapturedPanic;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure a child returns from [`super::TryWidget::try_render`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RenderError {
    message: String,
    component: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            component: None,
            source: None,
        }
    }

    /// Wrap a lower-level error; its `source()` chain becomes the stack.
    pub fn from_error(err: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            message: err.to_string(),
            component: None,
            source: Some(Box::new(err)),
        }
    }

    /// Name the component that failed, appended to the context path.
    #[must_use]
    pub fn in_component(mut self, name: impl Into<String>) -> Self {
        self.component = Some(name.into());
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    /// The child returned `Err`.
    Error,
    /// The child panicked.
    Panic,
}

/// Captured description of a render failure.
///
/// Only the boundary creates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureInfo {
    message: String,
    stack: Option<String>,
    origin: FailureOrigin,
}

impl FailureInfo {
    pub(crate) fn from_render_error(err: &RenderError) -> Self {
        let mut stack = String::new();
        let mut source = err.source();
        while let Some(cause) = source {
            let _ = writeln!(stack, "caused by: {cause}");
            source = cause.source();
        }
        Self {
            message: err.message.clone(),
            stack: (!stack.is_empty()).then(|| stack.trim_end().to_string()),
            origin: FailureOrigin::Error,
        }
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send), captured: Option<CapturedPanic>) -> Self {
        Self {
            message: panic_payload_to_string(payload),
            stack: captured
                .map(CapturedPanic::into_stack)
                .filter(|s| !s.is_empty()),
            origin: FailureOrigin::Panic,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    #[must_use]
    pub const fn origin(&self) -> FailureOrigin {
        self.origin
    }
}

fn panic_payload_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Where a failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    boundary: String,
    component_path: Vec<String>,
    area: Rect,
    render_pass: u64,
    timestamp: DateTime<Utc>,
}

impl ContextInfo {
    pub(crate) fn capture(
        boundary: &str,
        mut component_path: Vec<String>,
        component: Option<&str>,
        area: Rect,
        render_pass: u64,
    ) -> Self {
        if let Some(component) = component {
            component_path.push(component.to_string());
        }
        Self {
            boundary: boundary.to_string(),
            component_path,
            area,
            render_pass,
            timestamp: Utc::now(),
        }
    }

    /// Label of the boundary that caught the failure.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Outermost first.
    #[must_use]
    pub fn component_path(&self) -> &[String] {
        &self.component_path
    }

    /// `Page > Tag Analytics > TagTable`
    #[must_use]
    pub fn component_stack(&self) -> String {
        self.component_path.join(" > ")
    }

    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    #[must_use]
    pub const fn render_pass(&self) -> u64 {
        self.render_pass
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("disk on fire")]
    struct Root;

    #[derive(Debug, Error)]
    #[error("could not read prices")]
    struct Outer(#[source] Root);

    #[test]
    fn error_stack_walks_source_chain() {
        let err = RenderError::from_error(Outer(Root));
        let info = FailureInfo::from_render_error(&err);
        assert_eq!(info.message(), "could not read prices");
        assert_eq!(
            info.stack(),
            Some("caused by: could not read prices\ncaused by: disk on fire")
        );
        assert_eq!(info.origin(), FailureOrigin::Error);
    }

    #[test]
    fn plain_error_has_no_stack() {
        let info = FailureInfo::from_render_error(&RenderError::new("Test error"));
        assert_eq!(info.message(), "Test error");
        assert_eq!(info.stack(), None);
    }

    #[test]
    fn panic_payloads_are_stringified() {
        let boxed: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(FailureInfo::from_panic(boxed.as_ref(), None).message(), "static message");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(FailureInfo::from_panic(boxed.as_ref(), None).message(), "owned");

        let boxed: Box<dyn Any + Send> = Box::new(42_u8);
        let info = FailureInfo::from_panic(boxed.as_ref(), None);
        assert_eq!(info.message(), "unknown panic");
        assert_eq!(info.origin(), FailureOrigin::Panic);
    }

    #[test]
    fn context_appends_named_component() {
        let ctx = ContextInfo::capture(
            "Tag Analytics",
            vec!["Dashboard".to_string(), "Tag Analytics".to_string()],
            Some("TagTable"),
            Rect::new(0, 0, 10, 5),
            3,
        );
        assert_eq!(ctx.component_stack(), "Dashboard > Tag Analytics > TagTable");
        assert_eq!(ctx.boundary(), "Tag Analytics");
        assert_eq!(ctx.render_pass(), 3);
    }
}
