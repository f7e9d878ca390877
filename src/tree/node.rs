//! Content node types and label derivation

use crate::content::Metadata;
use crate::types::{NodeId, ROOT_ID};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_-]+").expect("word separator pattern"));

/// Node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// Cosmetic icon tag derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    Folder,
    FileText,
    Mail,
    Database,
    ScrollText,
    File,
}

impl Icon {
    /// Icon for a file name; unrecognized extensions get the generic file icon.
    pub fn for_file_name(name: &str) -> Self {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext);
        match ext {
            Some("txt") => Icon::FileText,
            Some("sys") => Icon::Mail,
            Some("dat") => Icon::Database,
            Some("log") => Icon::ScrollText,
            _ => Icon::File,
        }
    }
}

/// A file or folder in the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    /// Path relative to the content root, `/`-separated
    pub path: String,
    pub id: NodeId,
    pub label: String,
    /// Raw file text; for folders, the text of the folder's index file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    pub icon: Icon,
}

impl Node {
    /// The synthetic root folder wrapping the top-level listing.
    pub fn root(children: Vec<Node>) -> Self {
        Node {
            kind: NodeKind::Folder,
            name: ROOT_ID.to_string(),
            path: String::new(),
            id: ROOT_ID.to_string(),
            label: "Root".to_string(),
            content: None,
            metadata: Metadata::new(),
            children,
            parent: None,
            icon: Icon::Folder,
        }
    }

    /// A folder node; its label is always derived from the directory name.
    pub fn folder(name: &str, path: String, parent: Option<NodeId>) -> Self {
        Node {
            kind: NodeKind::Folder,
            name: name.to_string(),
            path,
            id: name.to_string(),
            label: capitalize_words(name),
            content: None,
            metadata: Metadata::new(),
            children: Vec::new(),
            parent,
            icon: Icon::Folder,
        }
    }

    /// A file node; the label prefers the metadata `title`.
    pub fn file(
        name: &str,
        id: NodeId,
        path: String,
        content: String,
        metadata: Metadata,
        parent: Option<NodeId>,
    ) -> Self {
        let label = metadata
            .title()
            .unwrap_or_else(|| capitalize_words(&id.replace('_', " ")));
        Node {
            kind: NodeKind::File,
            name: name.to_string(),
            path,
            id,
            label,
            content: Some(content),
            metadata,
            children: Vec::new(),
            parent,
            icon: Icon::for_file_name(name),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// True for folders with at least one child.
    pub fn has_children(&self) -> bool {
        self.is_folder() && !self.children.is_empty()
    }

    pub fn child_ids(&self) -> Vec<NodeId> {
        self.children.iter().map(|c| c.id.clone()).collect()
    }

    /// Pre-order traversal of this node and its descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Display label from an identifier: words split on whitespace, `_`, and `-`,
/// each capitalized with the remainder lowercased.
pub fn capitalize_words(s: &str) -> String {
    WORD_SEPARATORS
        .split(s)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
