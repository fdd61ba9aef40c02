//! Process-wide dropdown configuration.
//!
//! Read from the `[dropdown]` table of a TOML file:
//!
//! ```toml
//! [dropdown]
//! limit = 50
//! missing_relation = "null"
//! ```
//!
//! Callers usually build one `DropdownConfig` at startup and pass it by
//! reference; `global()` offers a lazily initialized process-wide instance.


use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};
use thiserror::Error as ThisError;
use tracing::{debug, warn};

///
/// CONSTANTS
///

/// Item limit applied when no configuration says otherwise.
pub const DEFAULT_LIMIT: u32 = 100;

/// Environment variable naming the configuration file read by `global()`.
pub const CONFIG_ENV_VAR: &str = "DROPDOWN_CONFIG";

static GLOBAL: OnceLock<DropdownConfig> = OnceLock::new();

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to parse dropdown config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read dropdown config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("dropdown limit must fit in an unsigned 32-bit integer, got {value}")]
    InvalidLimit { value: i64 },
}

///
/// MissingRelation
///
/// What context extraction does when a relation on the way to a field is
/// unset on a record.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingRelation {
    /// Abort the whole build with `MissingField`.
    #[default]
    Error,

    /// Store `Value::Null` under the requested path.
    Null,
}

///
/// DropdownConfig
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DropdownConfig {
    /// Item cap for limited builds; `0` disables limiting.
    pub limit: u32,
    pub missing_relation: MissingRelation,
}

impl DropdownConfig {
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            limit,
            missing_relation: MissingRelation::Error,
        }
    }

    #[must_use]
    pub const fn with_missing_relation(mut self, policy: MissingRelation) -> Self {
        self.missing_relation = policy;
        self
    }

    /// Parse a TOML document. A missing `[dropdown]` table yields defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(source)?;
        let Some(table) = file.dropdown else {
            return Ok(Self::default());
        };

        let limit = match table.limit {
            Some(value) => {
                u32::try_from(value).map_err(|_| ConfigError::InvalidLimit { value })?
            }
            None => DEFAULT_LIMIT,
        };

        Ok(Self {
            limit,
            missing_relation: table.missing_relation.unwrap_or_default(),
        })
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), limit = config.limit, "loaded dropdown config");

        Ok(config)
    }

    /// Like `load`, but an unreadable or malformed file falls back to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        Self::load(path).unwrap_or_else(|err| {
            warn!(
                path = %path.display(),
                error = %err,
                limit = DEFAULT_LIMIT,
                "dropdown config unavailable, using defaults"
            );
            Self::default()
        })
    }

    /// Configuration named by `DROPDOWN_CONFIG`, or defaults when unset.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var_os(CONFIG_ENV_VAR).map_or_else(Self::default, Self::load_or_default)
    }
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

// On-disk shape; `limit` is read wide so negative or oversized values get a
// dedicated error instead of a generic parse failure.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    dropdown: Option<ConfigTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigTable {
    limit: Option<i64>,
    missing_relation: Option<MissingRelation>,
}

///
/// Process-wide instance
///

/// Install the process-wide configuration. Returns `false` if one was
/// already installed; the first call wins.
pub fn init(config: DropdownConfig) -> bool {
    GLOBAL.set(config).is_ok()
}

/// The process-wide configuration, read from the environment on first use
/// when `init` was never called.
pub fn global() -> &'static DropdownConfig {
    GLOBAL.get_or_init(DropdownConfig::from_env)
}
