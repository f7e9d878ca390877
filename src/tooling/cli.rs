//! CLI Tooling
//!
//! Command-line interface for building the content snapshot and querying it.
//! Every command is workspace-scoped: paths in the config resolve against
//! `--workspace`.

use super::format::{
    format_build_summary_text, format_node_text, format_status_text, format_tile_text,
    ColumnStatus, SnapshotStatus,
};
use crate::config::{ConfigLoader, TilefolioConfig};
use crate::content::parse_file_content;
use crate::error::ApiError;
use crate::query::SnapshotView;
use crate::snapshot::{load_snapshot, run_build, snapshot_fingerprint, BuildRequest};
use crate::types::Direction;
use crate::watch::{WatchConfig, WatchDaemon};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Tilefolio CLI - compile a content directory into a portfolio tile grid
#[derive(Parser)]
#[command(name = "tilefolio")]
#[command(about = "Compile a directory of content files into a navigable tile grid")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan the content root and write the snapshot
    Build {
        /// Content root (overrides [content] root)
        #[arg(long)]
        content: Option<PathBuf>,
        /// Snapshot output path (overrides [snapshot] path)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Rewrite the snapshot even when unchanged
        #[arg(long)]
        force: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Rebuild the snapshot whenever content changes
    Watch {
        /// Debounce window in milliseconds
        #[arg(long, default_value = "100")]
        debounce_ms: u64,
        /// Batch window in milliseconds
        #[arg(long, default_value = "50")]
        batch_window_ms: u64,
    },
    /// Show snapshot status
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one tile of the grid
    Tile {
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one node of the filetree
    Node {
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the navigation menu, or follow a neighbor link from a tile
    Nav {
        /// Tile to navigate from
        #[arg(requires = "direction")]
        id: Option<String>,
        /// left, right, up, down (or ArrowLeft, ...)
        direction: Option<String>,
    },
    /// Print the parsed elements and metadata of a node's content as JSON
    Render { id: String },
    /// Write a default tilefolio.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Build { .. } => "build",
        Commands::Watch { .. } => "watch",
        Commands::Status { .. } => "status",
        Commands::Tile { .. } => "tile",
        Commands::Node { .. } => "node",
        Commands::Nav { .. } => "nav",
        Commands::Render { .. } => "render",
        Commands::Init { .. } => "init",
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidArgument(format!("Failed to serialize output: {}", e)))
}

fn check_format(format: &str) -> Result<bool, ApiError> {
    match format {
        "text" => Ok(false),
        "json" => Ok(true),
        other => Err(ApiError::InvalidArgument(format!(
            "Unknown format '{}' (expected text or json)",
            other
        ))),
    }
}

/// CLI context: resolved workspace and configuration
pub struct CliContext {
    workspace_root: PathBuf,
    config: TilefolioConfig,
}

impl CliContext {
    /// Create a context, loading `config_path` or else the workspace config.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &TilefolioConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    fn snapshot_path(&self) -> PathBuf {
        self.config.snapshot.resolve_path(&self.workspace_root)
    }

    fn build_request(
        &self,
        content: Option<&PathBuf>,
        output: Option<&PathBuf>,
        force: bool,
    ) -> BuildRequest {
        BuildRequest {
            content_root: content
                .map(|p| self.workspace_root.join(p))
                .unwrap_or_else(|| self.config.content.resolve_root(&self.workspace_root)),
            extension: self.config.content.extension.clone(),
            output: output
                .map(|p| self.workspace_root.join(p))
                .unwrap_or_else(|| self.snapshot_path()),
            pretty: self.config.snapshot.pretty,
            force,
        }
    }

    fn view(&self) -> SnapshotView {
        SnapshotView::load(&self.snapshot_path())
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(command = command_name(command), workspace = %self.workspace_root.display(), "Running command");
        match command {
            Commands::Build {
                content,
                output,
                force,
                format,
            } => {
                let json = check_format(format)?;
                let request = self.build_request(content.as_ref(), output.as_ref(), *force);
                let summary = run_build(&request)?;
                if json {
                    to_json(&summary)
                } else {
                    Ok(format_build_summary_text(&summary))
                }
            }
            Commands::Watch {
                debounce_ms,
                batch_window_ms,
            } => {
                let mut config = WatchConfig::new(self.build_request(None, None, false));
                config.debounce_ms = *debounce_ms;
                config.batch_window_ms = *batch_window_ms;
                WatchDaemon::new(config).start()?;
                Ok("Watch stopped".to_string())
            }
            Commands::Status { format } => {
                let json = check_format(format)?;
                let status = self.status()?;
                if json {
                    to_json(&status)
                } else {
                    Ok(format_status_text(&status))
                }
            }
            Commands::Tile { id, format } => {
                let json = check_format(format)?;
                let view = self.view();
                let tile = view
                    .get_tile(id)
                    .ok_or_else(|| ApiError::NotFound(format!("No tile with id '{}'", id)))?;
                if json {
                    to_json(tile)
                } else {
                    Ok(format_tile_text(tile))
                }
            }
            Commands::Node { id, format } => {
                let json = check_format(format)?;
                let view = self.view();
                let node = view
                    .get_node(id)
                    .ok_or_else(|| ApiError::NotFound(format!("No node with id '{}'", id)))?;
                if json {
                    to_json(node)
                } else {
                    Ok(format_node_text(node))
                }
            }
            Commands::Nav { id, direction } => self.handle_nav(id.as_deref(), direction.as_deref()),
            Commands::Render { id } => {
                let view = self.view();
                if view.get_node(id).is_none() {
                    return Err(ApiError::NotFound(format!("No node with id '{}'", id)));
                }
                let content = view
                    .get_content_by_id(id)
                    .ok_or_else(|| ApiError::NotFound(format!("Node '{}' has no content", id)))?;
                to_json(&parse_file_content(content))
            }
            Commands::Init { force } => {
                let path = ConfigLoader::write_default(&self.workspace_root, *force)?;
                Ok(format!("Wrote default configuration to {}", path.display()))
            }
        }
    }

    fn handle_nav(&self, id: Option<&str>, direction: Option<&str>) -> Result<String, ApiError> {
        let view = self.view();
        let (Some(id), Some(direction)) = (id, direction) else {
            return to_json(&view.nav());
        };

        let direction: Direction = direction.parse().map_err(ApiError::InvalidArgument)?;
        if view.get_tile(id).is_none() {
            return Err(ApiError::NotFound(format!("No tile with id '{}'", id)));
        }
        match view.navigate(id, direction) {
            Some(tile) => to_json(tile),
            None => Ok(format!("No {} neighbor for '{}'", direction, id)),
        }
    }

    fn status(&self) -> Result<SnapshotStatus, ApiError> {
        let content_root = self.config.content.resolve_root(&self.workspace_root);
        let snapshot_path = self.snapshot_path();
        let mut status = SnapshotStatus {
            content_root: content_root.display().to_string(),
            snapshot_path: snapshot_path.display().to_string(),
            built: false,
            fingerprint: None,
            nodes: 0,
            tiles: 0,
            width: 0,
            height: 0,
            nav_items: 0,
            columns: Vec::new(),
        };
        if !snapshot_path.exists() {
            return Ok(status);
        }

        let bytes = std::fs::read(&snapshot_path).map_err(|source| {
            crate::error::SnapshotError::Io {
                path: snapshot_path.clone(),
                source,
            }
        })?;
        let snapshot = load_snapshot(&snapshot_path)?;
        let grid = &snapshot.tile_grid;

        status.built = true;
        status.fingerprint = Some(snapshot_fingerprint(&bytes));
        status.nodes = snapshot.filetree_map.flat_list.len();
        status.tiles = grid.tiles.len();
        status.width = grid.width;
        status.height = grid.height;
        status.nav_items = snapshot.nav_structure.len();
        status.columns = snapshot
            .filetree_map
            .top_level()
            .iter()
            .filter_map(|node| {
                grid.tiles.get(&node.id).map(|tile| ColumnStatus {
                    x: tile.coords.x,
                    id: node.id.clone(),
                    label: node.label.clone(),
                    children: node.children.len(),
                })
            })
            .collect();
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_format() {
        assert!(!check_format("text").unwrap());
        assert!(check_format("json").unwrap());
        assert!(matches!(
            check_format("yaml"),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_nav_requires_direction_with_id() {
        assert!(Cli::try_parse_from(["tilefolio", "nav", "about"]).is_err());
        assert!(Cli::try_parse_from(["tilefolio", "nav", "about", "right"]).is_ok());
        assert!(Cli::try_parse_from(["tilefolio", "nav"]).is_ok());
    }
}
