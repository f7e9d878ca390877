//! Tile grid
//!
//! Projects the filetree onto a 2-D grid of tiles. Top-level nodes form the
//! spine along row 0; a top-level folder's children stack downward in its
//! column. Only one level of nesting is projected.

pub mod compiler;
pub mod neighbors;

pub use compiler::{generate_tile_grid, CellCollision, CompiledGrid, GridCompiler, GridReport};

use crate::types::{Coords, Direction, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Adjacent tile ids; an absent direction has no neighbor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileNeighbors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down: Option<NodeId>,
}

impl TileNeighbors {
    pub fn get(&self, direction: Direction) -> Option<&NodeId> {
        match direction {
            Direction::Left => self.left.as_ref(),
            Direction::Right => self.right.as_ref(),
            Direction::Up => self.up.as_ref(),
            Direction::Down => self.down.as_ref(),
        }
    }
}

/// A node placed on a grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub id: NodeId,
    pub label: String,
    pub coords: Coords,
    pub neighbors: TileNeighbors,
    /// Parent folder id, used for grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NodeId>,
    pub has_content: bool,
}

/// Compiled grid: tiles by id plus the extent of the used cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    pub tiles: BTreeMap<NodeId, Tile>,
    pub width: u32,
    pub height: u32,
}

impl TileGrid {
    /// Grid with no tiles and a 1x1 extent.
    pub fn empty() -> Self {
        Self {
            tiles: BTreeMap::new(),
            width: 1,
            height: 1,
        }
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::empty()
    }
}

/// Look up a tile by id.
pub fn get_tile<'a>(grid: &'a TileGrid, id: &str) -> Option<&'a Tile> {
    grid.tiles.get(id)
}

/// Tiles grouped under one category, ordered by cell.
pub fn tiles_by_category<'a>(grid: &'a TileGrid, category: &str) -> Vec<&'a Tile> {
    let mut tiles: Vec<&Tile> = grid
        .tiles
        .values()
        .filter(|t| t.category.as_deref() == Some(category))
        .collect();
    tiles.sort_by_key(|t| t.coords);
    tiles
}
