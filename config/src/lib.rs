//! Config file loading for Folio.
//!
//! `~/.folio/config.toml` is parsed into raw `Option`-heavy structs, then
//! resolved (with `FOLIO_*` env overrides) into [`folio_types::Settings`].

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use folio_types::{BuildMode, DataSource, FeatureFlags, Settings, UiOptions};
use serde::Deserialize;
use thiserror::Error;

pub const ENV_BUILD_MODE: &str = "FOLIO_ENV";
pub const ENV_DATA_PATH: &str = "FOLIO_DATA";

const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct FolioConfig {
    pub app: Option<AppConfig>,
    pub features: Option<FeaturesConfig>,
    pub data: Option<DataConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// `development`, `test` or `production`.
    pub env: Option<String>,
    /// Use ASCII-only glyphs for bars, bullets and markers.
    #[serde(default)]
    pub ascii_only: bool,
    #[serde(default)]
    pub high_contrast: bool,
}

#[derive(Debug, Deserialize)]
pub struct FeaturesConfig {
    #[serde(default = "default_true")]
    pub analytics: bool,
    #[serde(default = "default_true")]
    pub benchmarking: bool,
    #[serde(default = "default_true")]
    pub export: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Demo,
    File,
}

/// ```toml
/// [data]
/// source = "file"
/// path = "${HOME}/portfolio.json"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub source: SourceKind,
    pub path: Option<String>,
}

/// `${VAR}` substitution. Unset variables expand to nothing; malformed
/// references are left as written.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                if name.is_empty() {
                    out.push_str("${}");
                } else {
                    out.push_str(&env::var(name).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Env expansion plus a leading `~/`.
fn expand_path(raw: &str) -> PathBuf {
    let expanded = expand_env_vars(raw);
    if let Some(rest) = expanded.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(expanded)
}

impl FolioConfig {
    /// Load from the default location. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read config at {}: {source}", path.display());
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&content).map(Some).map_err(|source| {
            tracing::warn!("Failed to parse config at {}: {source}", path.display());
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolve using the process environment for overrides.
    #[must_use]
    pub fn resolve(&self) -> Settings {
        self.resolve_with(|key| env::var(key).ok())
    }

    /// Resolve with an explicit env lookup.
    ///
    /// `FOLIO_ENV` beats `[app] env`; `FOLIO_DATA` beats `[data]` and
    /// implies a file source. Unknown build modes fall back to development.
    #[must_use]
    pub fn resolve_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Settings {
        let app = self.app.as_ref();

        let build_mode = lookup(ENV_BUILD_MODE)
            .or_else(|| app.and_then(|a| a.env.clone()))
            .map_or(BuildMode::default(), |raw| {
                raw.parse().unwrap_or_else(|err| {
                    tracing::warn!("{err}; using {}", BuildMode::default());
                    BuildMode::default()
                })
            });

        let ui = app.map_or(UiOptions::default(), |a| UiOptions {
            ascii_only: a.ascii_only,
            high_contrast: a.high_contrast,
        });

        let features = self
            .features
            .as_ref()
            .map_or(FeatureFlags::default(), |f| FeatureFlags {
                analytics: f.analytics,
                benchmarking: f.benchmarking,
                export: f.export,
            });

        let data = match lookup(ENV_DATA_PATH).filter(|p| !p.trim().is_empty()) {
            Some(path) => DataSource::File(expand_path(&path)),
            None => self.resolve_data(),
        };

        Settings {
            build_mode,
            ui,
            features,
            data,
        }
    }

    fn resolve_data(&self) -> DataSource {
        let Some(data) = self.data.as_ref() else {
            return DataSource::Demo;
        };
        match (data.source, data.path.as_deref()) {
            (SourceKind::Demo, _) => DataSource::Demo,
            (SourceKind::File, Some(path)) if !path.trim().is_empty() => {
                DataSource::File(expand_path(path))
            }
            (SourceKind::File, _) => {
                tracing::warn!("[data] source = \"file\" without a path; using demo data");
                DataSource::Demo
            }
        }
    }
}

/// Load and resolve in one step. A config error is returned alongside
/// default settings so the caller can surface it without aborting.
#[must_use]
pub fn load_settings() -> (Settings, Option<ConfigError>) {
    match FolioConfig::load() {
        Ok(config) => (config.unwrap_or_default().resolve(), None),
        Err(err) => (FolioConfig::default().resolve(), Some(err)),
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".folio").join("config.toml"))
}
