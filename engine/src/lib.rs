//! Dashboard engine for Folio: data loading and UI-independent state.
//!
//! This crate contains the `App` state without terminal dependencies. The
//! TUI crate draws from it and forwards input back.

mod app;
mod demo;
mod panel;
mod report;
mod source;
mod status;

pub use app::{App, BoundaryTarget, ControlHit, ExportError, ExportKind};
pub use demo::demo_snapshot;
pub use panel::Panel;
pub use source::{DemoSource, FileSource, LoadError, PortfolioSnapshot, PortfolioSource};
pub use status::{StatusKind, StatusMessage};

// Re-export so the frontend needs only this crate for shared types.
pub use folio_core::{BoundaryState, ControlKind};
pub use folio_types::{BuildMode, DataSource, Settings};
