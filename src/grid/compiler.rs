//! Grid placement
//!
//! Placement walks the top-level nodes left to right. A node whose metadata
//! carries both `tileX` and `tileY` is placed at those coordinates instead of
//! its computed cell. The placement surface grows on demand, so overrides are
//! never out of bounds.

use super::neighbors::link_topological;
use super::{Tile, TileGrid, TileNeighbors};
use crate::content::MetadataValue;
use crate::error::GridError;
use crate::tree::{FiletreeMap, Node};
use crate::types::{Coords, NodeId};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Two nodes placed on the same cell; the later placement owns the cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellCollision {
    pub coords: Coords,
    pub displaced: NodeId,
    pub occupant: NodeId,
}

/// Diagnostics collected while compiling a grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridReport {
    /// Ids placed through a `tileX`/`tileY` override
    pub overrides: Vec<NodeId>,
    pub collisions: Vec<CellCollision>,
}

/// Grid plus its compile diagnostics
#[derive(Debug, Clone)]
pub struct CompiledGrid {
    pub grid: TileGrid,
    pub report: GridReport,
}

/// Cell occupancy, sized by what is written into it
#[derive(Debug, Default)]
struct PlacementSurface {
    cells: BTreeMap<Coords, NodeId>,
    max_x: u32,
    max_y: u32,
}

impl PlacementSurface {
    /// Write an id into a cell, returning the id it displaced.
    fn place(&mut self, coords: Coords, id: &str) -> Option<NodeId> {
        self.max_x = self.max_x.max(coords.x);
        self.max_y = self.max_y.max(coords.y);
        self.cells.insert(coords, id.to_string())
    }
}

/// Compiles a filetree into a tile grid
#[derive(Debug, Default)]
pub struct GridCompiler {
    surface: PlacementSurface,
    tiles: BTreeMap<NodeId, Tile>,
    report: GridReport,
}

impl GridCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place every top-level node and its direct children, then link neighbors.
    pub fn compile(mut self, map: &FiletreeMap) -> Result<CompiledGrid, GridError> {
        let top_level = map.top_level();

        for (column, node) in top_level.iter().enumerate() {
            let x = column as u32;
            self.place_node(node, Coords::new(x, 0))?;

            if node.has_children() {
                for (i, child) in node.children.iter().enumerate() {
                    self.place_node(child, Coords::new(x, i as u32 + 1))?;
                }
            }
        }

        link_topological(top_level, &mut self.tiles);

        let grid = TileGrid {
            tiles: self.tiles,
            width: self.surface.max_x + 1,
            height: self.surface.max_y + 1,
        };
        info!(
            tiles = grid.tiles.len(),
            width = grid.width,
            height = grid.height,
            overrides = self.report.overrides.len(),
            collisions = self.report.collisions.len(),
            "Compiled tile grid"
        );

        Ok(CompiledGrid {
            grid,
            report: self.report,
        })
    }

    fn place_node(&mut self, node: &Node, computed: Coords) -> Result<(), GridError> {
        let coords = match tile_override(node)? {
            Some(coords) => {
                debug!(id = %node.id, %computed, %coords, "Applying tile override");
                self.report.overrides.push(node.id.clone());
                coords
            }
            None => computed,
        };

        if let Some(displaced) = self.surface.place(coords, &node.id) {
            warn!(
                %coords,
                displaced = %displaced,
                occupant = %node.id,
                "Tile cell already occupied; later placement wins"
            );
            self.report.collisions.push(CellCollision {
                coords,
                displaced,
                occupant: node.id.clone(),
            });
        }

        self.tiles.insert(
            node.id.clone(),
            Tile {
                id: node.id.clone(),
                label: node.label.clone(),
                coords,
                neighbors: TileNeighbors::default(),
                category: node.parent.clone(),
                has_content: node.content.is_some(),
            },
        );
        Ok(())
    }
}

/// Override coordinates from `tileX`/`tileY`; both keys are required.
fn tile_override(node: &Node) -> Result<Option<Coords>, GridError> {
    let (x, y) = match (node.metadata.tile_x(), node.metadata.tile_y()) {
        (Some(x), Some(y)) => (x, y),
        (None, None) => return Ok(None),
        _ => {
            debug!(id = %node.id, "Ignoring partial tile override");
            return Ok(None);
        }
    };

    match (coordinate(x), coordinate(y)) {
        (Some(cx), Some(cy)) => Ok(Some(Coords::new(cx, cy))),
        _ => Err(GridError::InvalidOverride {
            id: node.id.clone(),
            x: x.to_string(),
            y: y.to_string(),
        }),
    }
}

/// Cell index from a metadata value. `u32::MAX` is excluded so the grid extent
/// (`max + 1`) always fits.
fn coordinate(value: &MetadataValue) -> Option<u32> {
    value
        .as_i64()
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v < u32::MAX)
}

/// Compile a filetree into a tile grid, discarding diagnostics.
pub fn generate_tile_grid(map: &FiletreeMap) -> Result<TileGrid, GridError> {
    Ok(GridCompiler::new().compile(map)?.grid)
}
