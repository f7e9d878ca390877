//! Topological neighbor linkage
//!
//! Adjacency follows the tree, not cell geometry: consecutive spine tiles link
//! left/right, a folder links down to its first child, and children chain
//! up/down in listing order with the first child's `up` pointing at the folder.
//! Tiles moved by a coordinate override keep their tree links.

use super::Tile;
use crate::tree::Node;
use crate::types::NodeId;
use std::collections::BTreeMap;

pub(crate) fn link_topological(top_level: &[Node], tiles: &mut BTreeMap<NodeId, Tile>) {
    for (i, node) in top_level.iter().enumerate() {
        let Some(tile) = tiles.get_mut(&node.id) else {
            continue;
        };

        if i > 0 {
            tile.neighbors.left = Some(top_level[i - 1].id.clone());
        }
        if let Some(next) = top_level.get(i + 1) {
            tile.neighbors.right = Some(next.id.clone());
        }

        if !node.has_children() {
            continue;
        }
        tile.neighbors.down = Some(node.children[0].id.clone());

        let children = &node.children;
        for (j, child) in children.iter().enumerate() {
            let Some(child_tile) = tiles.get_mut(&child.id) else {
                continue;
            };
            child_tile.neighbors.up = Some(if j > 0 {
                children[j - 1].id.clone()
            } else {
                node.id.clone()
            });
            if let Some(below) = children.get(j + 1) {
                child_tile.neighbors.down = Some(below.id.clone());
            }
        }
    }
}
