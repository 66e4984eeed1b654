//! Runtime configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults, the TOML config
//! file, then environment variables and command-line flags (both resolved by
//! clap, see [`crate::cli::Overrides`]).
//!
//! ```toml
//! base_url = "http://localhost:8080"
//! embedding_type = "fasttext"
//! ai_validation = false
//! response_ordering = "last-issued"
//! limit = 5
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::EmbeddingType;
use crate::search::{ResponseOrdering, SearchFilters, SearchState};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the search backend.
    pub base_url: String,
    /// Embedding type selected at startup.
    pub embedding_type: EmbeddingType,
    /// Whether the AI-validation endpoint is selected at startup.
    pub ai_validation: bool,
    pub response_ordering: ResponseOrdering,
    /// Result limit sent to the backend; omitted from requests when unset.
    pub limit: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            embedding_type: EmbeddingType::default(),
            ai_validation: false,
            response_ordering: ResponseOrdering::default(),
            limit: None,
        }
    }
}

impl Config {
    /// Load from `explicit` if given (it must exist), otherwise from the
    /// default location if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.is_file() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Initial view state for these settings.
    pub fn initial_state(&self) -> SearchState {
        SearchState::new(
            SearchFilters {
                category: None,
                embedding_type: self.embedding_type,
                use_validation: self.ai_validation,
            },
            self.response_ordering,
            self.limit,
        )
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "contactnova", "nova")
}

/// `<config dir>/config.toml`, e.g. `~/.config/nova/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Directory for the TUI log file.
pub fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("nova"))
}
