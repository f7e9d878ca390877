//! FiletreeMap: tree + flat id index + pre-order node list

use super::node::{Node, NodeKind};
use crate::error::BuildError;
use crate::types::{NodeId, ROOT_ID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built content tree.
///
/// `nodes` holds every node by id, the synthetic root included under `"root"`.
/// `flat_list` is the pre-order sequence of the same nodes, root first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiletreeMap {
    pub nodes: BTreeMap<NodeId, Node>,
    pub root: Node,
    pub flat_list: Vec<Node>,
}

impl FiletreeMap {
    /// Index a root node, rejecting any id that appears twice in the tree.
    pub fn from_root(root: Node) -> Result<Self, BuildError> {
        let mut order: Vec<&Node> = Vec::new();
        root.walk(&mut |node| order.push(node));

        let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
        for node in &order {
            if let Some(existing) = nodes.get(&node.id) {
                return Err(BuildError::DuplicateId {
                    id: node.id.clone(),
                    first: display_path(existing),
                    second: display_path(node),
                });
            }
            nodes.insert(node.id.clone(), (*node).clone());
        }
        let flat_list = order.into_iter().cloned().collect();

        Ok(Self {
            nodes,
            root,
            flat_list,
        })
    }

    /// A map holding only an empty root folder.
    pub fn empty() -> Self {
        let root = Node::root(Vec::new());
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT_ID.to_string(), root.clone());
        Self {
            nodes,
            flat_list: vec![root.clone()],
            root,
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.flat_list.len()
    }

    /// True when the root has no children.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Top-level nodes, in listing order.
    pub fn top_level(&self) -> &[Node] {
        &self.root.children
    }

    /// All nodes of one kind, in pre-order.
    pub fn nodes_by_kind(&self, kind: NodeKind) -> Vec<&Node> {
        self.flat_list.iter().filter(|n| n.kind == kind).collect()
    }

    /// Children of a folder; empty for files and unknown ids.
    pub fn children(&self, folder_id: &str) -> &[Node] {
        match self.nodes.get(folder_id) {
            Some(node) if node.is_folder() => &node.children,
            _ => &[],
        }
    }
}

fn display_path(node: &Node) -> String {
    if node.id == ROOT_ID && node.path.is_empty() {
        "<root>".to_string()
    } else {
        node.path.clone()
    }
}

/// Look up a node by id.
pub fn get_node<'a>(map: &'a FiletreeMap, id: &str) -> Option<&'a Node> {
    map.nodes.get(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Metadata;

    fn file(id: &str, path: &str, parent: Option<&str>) -> Node {
        Node::file(
            &format!("{}.txt", id),
            id.to_string(),
            path.to_string(),
            String::new(),
            Metadata::new(),
            parent.map(str::to_string),
        )
    }

    #[test]
    fn test_empty_map_has_root_only() {
        let map = FiletreeMap::empty();
        assert_eq!(map.len(), 1);
        assert!(map.is_empty());
        assert!(map.nodes.contains_key("root"));
        assert_eq!(map.flat_list[0].id, "root");
    }

    #[test]
    fn test_from_root_indexes_pre_order() {
        let mut skills = Node::folder("skills", "skills".to_string(), None);
        skills
            .children
            .push(file("skills_business", "skills/skills_business.txt", Some("skills")));
        let root = Node::root(vec![file("about", "about.txt", None), skills]);

        let map = FiletreeMap::from_root(root).unwrap();
        let ids: Vec<&str> = map.flat_list.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "about", "skills", "skills_business"]);
        assert_eq!(map.nodes.len(), map.flat_list.len());
        assert_eq!(map.nodes_by_kind(NodeKind::Folder).len(), 2);
        assert_eq!(map.children("skills").len(), 1);
        assert!(map.children("about").is_empty());
        assert!(map.children("missing").is_empty());
    }

    #[test]
    fn test_from_root_rejects_duplicate_ids() {
        let mut projects = Node::folder("projects", "projects".to_string(), None);
        projects
            .children
            .push(file("about", "projects/about.txt", Some("projects")));
        let root = Node::root(vec![file("about", "about.txt", None), projects]);

        match FiletreeMap::from_root(root) {
            Err(BuildError::DuplicateId { id, first, second }) => {
                assert_eq!(id, "about");
                assert_eq!(first, "about.txt");
                assert_eq!(second, "projects/about.txt");
            }
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_root_id_is_reserved() {
        let root = Node::root(vec![Node::folder("root", "root".to_string(), None)]);
        assert!(matches!(
            FiletreeMap::from_root(root),
            Err(BuildError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_get_node_absent_returns_none() {
        let map = FiletreeMap::empty();
        assert!(get_node(&map, "nope").is_none());
        assert!(get_node(&map, "root").is_some());
    }
}
