//! Read-only query surface over a loaded snapshot
//!
//! A [`SnapshotView`] is constructed once at process start and shared by
//! reference (or cheap clone) with whatever serves requests. Every lookup is
//! keyed by node id and never mutates the snapshot; unknown ids yield `None`,
//! `false`, or an empty list.

use crate::grid::{tiles_by_category, Tile, TileGrid};
use crate::nav::NavItem;
use crate::snapshot::{load_snapshot_or_empty, Snapshot};
use crate::tree::{FiletreeMap, Node};
use crate::types::{Direction, NodeId};
use std::path::Path;
use std::sync::Arc;

pub use crate::grid::get_tile;
pub use crate::tree::get_node;

/// Immutable, shareable view of one snapshot
#[derive(Debug, Clone)]
pub struct SnapshotView {
    snapshot: Arc<Snapshot>,
}

impl SnapshotView {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn from_shared(snapshot: Arc<Snapshot>) -> Self {
        Self { snapshot }
    }

    /// Load the snapshot at `path`; a missing or unreadable file yields an empty tree.
    pub fn load(path: &Path) -> Self {
        Self::new(load_snapshot_or_empty(path))
    }

    /// View over an empty tree.
    pub fn empty() -> Self {
        Self::new(Snapshot::empty())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn filetree(&self) -> &FiletreeMap {
        &self.snapshot.filetree_map
    }

    pub fn grid(&self) -> &TileGrid {
        &self.snapshot.tile_grid
    }

    pub fn nav(&self) -> &[NavItem] {
        &self.snapshot.nav_structure
    }

    pub fn get_tile(&self, id: &str) -> Option<&Tile> {
        get_tile(self.grid(), id)
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        get_node(self.filetree(), id)
    }

    /// Raw content of a node.
    pub fn get_content_by_id(&self, id: &str) -> Option<&str> {
        self.get_node(id).and_then(|n| n.content.as_deref())
    }

    pub fn has_children(&self, id: &str) -> bool {
        self.get_node(id).map(Node::has_children).unwrap_or(false)
    }

    /// Child ids of a folder in listing order; empty for files and unknown ids.
    pub fn get_children_ids(&self, id: &str) -> Vec<NodeId> {
        self.filetree()
            .children(id)
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    /// Display label, falling back to the id itself.
    pub fn get_label<'a>(&'a self, id: &'a str) -> &'a str {
        self.get_node(id).map(|n| n.label.as_str()).unwrap_or(id)
    }

    /// Follow a tile's neighbor link in one direction.
    pub fn navigate(&self, from: &str, direction: Direction) -> Option<&Tile> {
        let tile = self.get_tile(from)?;
        let next = tile.neighbors.get(direction)?;
        self.get_tile(next)
    }

    pub fn tiles_by_category(&self, category: &str) -> Vec<&Tile> {
        tiles_by_category(self.grid(), category)
    }
}

impl Default for SnapshotView {
    fn default() -> Self {
        Self::empty()
    }
}
