//! Resolved application settings shared across crates.
//!
//! Raw TOML structs (all `Option`) stay private in `folio-config`; the loader
//! resolves them into these types at the parse boundary.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which kind of build the dashboard is running as.
///
/// Production hides diagnostic detail (stack traces, fault injection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Development,
    Test,
    Production,
}

const BUILD_MODE_VALUES: &[&str] = &["development", "dev", "test", "production", "prod"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid build mode '{raw}'; expected one of: {BUILD_MODE_VALUES:?}")]
pub struct ParseBuildModeError {
    raw: String,
}

impl ParseBuildModeError {
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl BuildMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Test => "test",
            BuildMode::Production => "production",
        }
    }

    /// Whether fallbacks may show failure messages and stacks.
    #[must_use]
    pub const fn shows_debug(self) -> bool {
        !matches!(self, BuildMode::Production)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = ParseBuildModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "test" => Ok(BuildMode::Test),
            "production" | "prod" => Ok(BuildMode::Production),
            _ => Err(ParseBuildModeError { raw: s.trim().to_string() }),
        }
    }
}

/// Optional dashboard features. Everything is on unless configured off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Tag analytics panel.
    pub analytics: bool,
    /// Top/bottom performers panel.
    pub benchmarking: bool,
    /// Snapshot, CSV and summary exports.
    pub export: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            analytics: true,
            benchmarking: true,
            export: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
}

/// Where portfolio data comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DataSource {
    /// Built-in sample portfolio.
    #[default]
    Demo,
    /// JSON snapshot on disk.
    File(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub build_mode: BuildMode,
    pub ui: UiOptions,
    pub features: FeatureFlags,
    pub data: DataSource,
}
