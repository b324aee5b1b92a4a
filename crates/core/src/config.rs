//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! components. Nothing below startup reads environment variables, so tests can
//! build a [`CoreConfig`] directly without touching process-wide state.

use crate::{CoreError, CoreResult};
use obgyn_ids::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where patient data is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreSource {
    /// The demo store compiled into `obgyn-records`.
    Bundled,
    /// A YAML store document on disk.
    File(PathBuf),
}

impl fmt::Display for StoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreSource::Bundled => f.write_str("bundled demo store"),
            StoreSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// How new list entries get their ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// UUID-backed suffixes, unique across sessions.
    #[default]
    Random,
    /// A counter starting at 1, for reproducible sessions and tests.
    Sequential,
}

impl IdStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            IdStrategy::Random => "random",
            IdStrategy::Sequential => "sequential",
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(IdStrategy::Random),
            "sequential" => Ok(IdStrategy::Sequential),
            other => Err(CoreError::Config(format!(
                "unknown id strategy '{other}' (expected 'random' or 'sequential')"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    store_source: StoreSource,
    id_strategy: IdStrategy,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if a file store source does not point at an
    /// existing regular file.
    pub fn new(store_source: StoreSource, id_strategy: IdStrategy) -> CoreResult<Self> {
        if let StoreSource::File(path) = &store_source {
            if !path.is_file() {
                return Err(CoreError::Config(format!(
                    "store file {} does not exist or is not a regular file",
                    path.display()
                )));
            }
        }

        Ok(Self {
            store_source,
            id_strategy,
        })
    }

    pub fn store_source(&self) -> &StoreSource {
        &self.store_source
    }

    /// Path of the store file, if one is configured.
    pub fn store_path(&self) -> Option<&Path> {
        match &self.store_source {
            StoreSource::Bundled => None,
            StoreSource::File(path) => Some(path),
        }
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    /// Build the id generator this configuration asks for.
    pub fn id_generator(&self) -> Box<dyn IdGenerator> {
        match self.id_strategy {
            IdStrategy::Random => Box::new(RandomIdGenerator),
            IdStrategy::Sequential => Box::new(SequentialIdGenerator::new()),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            store_source: StoreSource::Bundled,
            id_strategy: IdStrategy::default(),
        }
    }
}

/// Resolve the store source from an optional environment value.
///
/// `None` or a blank value selects the bundled store.
pub fn store_source_from_env_value(value: Option<String>) -> StoreSource {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| StoreSource::File(PathBuf::from(v)))
        .unwrap_or(StoreSource::Bundled)
}

/// Parse the id strategy from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns [`IdStrategy::Random`].
pub fn id_strategy_from_env_value(value: Option<String>) -> CoreResult<IdStrategy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<IdStrategy>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}
