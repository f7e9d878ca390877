//! Snapshot artifact
//!
//! The snapshot bundles the filetree, tile grid, and navigation list produced by
//! one build pass. It is written once per build and loaded verbatim by the
//! presentation layer.

pub mod loader;
pub mod pipeline;
pub mod writer;

pub use loader::{load_snapshot, load_snapshot_or_empty};
pub use pipeline::{run_build, BuildRequest, BuildSummary};
pub use writer::{snapshot_fingerprint, write_snapshot, WriteOutcome};

use crate::error::GridError;
use crate::grid::{GridCompiler, GridReport, TileGrid};
use crate::nav::{build_nav_structure, NavItem};
use crate::tree::FiletreeMap;
use serde::{Deserialize, Serialize};

/// Serialized `{tree, grid, nav}` bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub filetree_map: FiletreeMap,
    pub tile_grid: TileGrid,
    pub nav_structure: Vec<NavItem>,
}

impl Snapshot {
    /// Compile the grid and navigation for a fully built filetree.
    pub fn compile(filetree_map: FiletreeMap) -> Result<(Self, GridReport), GridError> {
        let compiled = GridCompiler::new().compile(&filetree_map)?;
        let nav_structure = build_nav_structure(&filetree_map);
        Ok((
            Self {
                filetree_map,
                tile_grid: compiled.grid,
                nav_structure,
            },
            compiled.report,
        ))
    }

    /// Snapshot of an empty content tree.
    pub fn empty() -> Self {
        Self {
            filetree_map: FiletreeMap::empty(),
            tile_grid: TileGrid::empty(),
            nav_structure: Vec::new(),
        }
    }
}
