//! ContentConfig and SnapshotConfig with workspace path resolution.

use crate::tree::builder::DEFAULT_EXTENSION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_content_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("generated/contentData.json")
}

fn default_true() -> bool {
    true
}

/// Content source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content root directory (relative to workspace root)
    #[serde(default = "default_content_root")]
    pub root: PathBuf,

    /// Content file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl ContentConfig {
    /// Resolve the content root against the workspace root.
    pub fn resolve_root(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.root)
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
            extension: default_extension(),
        }
    }
}

/// Snapshot artifact configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Snapshot output path (relative to workspace root)
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,

    /// Pretty-print the JSON artifact
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl SnapshotConfig {
    /// Resolve the snapshot path against the workspace root.
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.path)
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
            pretty: default_true(),
        }
    }
}
