//! Navigation projector
//!
//! Derives the menu structure from the filetree: one item per top-level node,
//! and for top-level folders with children, one flat level of child items.

use crate::tree::FiletreeMap;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub id: NodeId,
    pub label: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavItem>>,
}

/// Build the two-level navigation list.
pub fn build_nav_structure(map: &FiletreeMap) -> Vec<NavItem> {
    map.top_level()
        .iter()
        .map(|node| {
            let children = node.has_children().then(|| {
                node.children
                    .iter()
                    .map(|child| NavItem {
                        id: child.id.clone(),
                        label: child.label.clone(),
                        path: child.path.clone(),
                        children: None,
                    })
                    .collect()
            });
            NavItem {
                id: node.id.clone(),
                label: node.label.clone(),
                path: node.path.clone(),
                children,
            }
        })
        .collect()
}
