//! Where portfolio data comes from.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use folio_core::errors::{ErrorDetails, Failure, classify};
use folio_types::{GroupAggregation, Portfolio, TagCatalog};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::demo::demo_snapshot;

/// Everything the dashboard renders, as loaded at one point in time.
///
/// Also the JSON format of data files and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    #[serde(flatten)]
    pub portfolio: Portfolio,
    #[serde(default)]
    pub tags: TagCatalog,
    #[serde(default)]
    pub group: Option<GroupAggregation>,
    #[serde(default = "Utc::now")]
    pub as_of: DateTime<Utc>,
}

impl PortfolioSnapshot {
    /// Nothing loaded yet.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            portfolio: Portfolio::default(),
            tags: TagCatalog::default(),
            group: None,
            as_of: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read portfolio at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse portfolio at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Status-bar description of this error.
    #[must_use]
    pub fn details(&self) -> ErrorDetails {
        match self {
            LoadError::Read { source, .. } => match source.kind() {
                ErrorKind::NotFound => classify(Failure::Status {
                    code: 404,
                    message: None,
                }),
                ErrorKind::PermissionDenied => classify(Failure::Status {
                    code: 403,
                    message: None,
                }),
                ErrorKind::TimedOut => classify(Failure::Timeout),
                _ => classify(Failure::Message(&source.to_string())),
            },
            LoadError::Parse { source, .. } => classify(Failure::Status {
                code: 400,
                message: Some(&source.to_string()),
            }),
        }
    }
}

pub trait PortfolioSource {
    fn load(&self) -> Result<PortfolioSnapshot, LoadError>;

    /// Short description for the header.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSource;

impl PortfolioSource for DemoSource {
    fn load(&self) -> Result<PortfolioSnapshot, LoadError> {
        Ok(demo_snapshot())
    }

    fn describe(&self) -> String {
        "demo data".to_string()
    }
}

/// Reads a JSON snapshot (the same format `export` writes).
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PortfolioSource for FileSource {
    fn load(&self) -> Result<PortfolioSnapshot, LoadError> {
        let content = fs::read_to_string(&self.path).map_err(|source| LoadError::Read {
            path: self.path.clone(),
            source,
        })?;
        let snapshot = serde_json::from_str(&content).map_err(|source| LoadError::Parse {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "Loaded portfolio file");
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
