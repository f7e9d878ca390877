//! Configuration
//!
//! Layered configuration: built-in defaults, then `tilefolio.toml` in the
//! workspace root, then `TILEFOLIO__SECTION__KEY` environment variables.

pub mod facade;
pub mod layers;
pub mod workspace;

pub use facade::ConfigLoader;
pub use workspace::content_paths::{ContentConfig, SnapshotConfig};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Workspace config file name
pub const CONFIG_FILE_NAME: &str = "tilefolio.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TilefolioConfig {
    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
