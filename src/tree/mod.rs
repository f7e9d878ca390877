//! Content filetree
//!
//! Scans a content directory into a typed tree of file and folder nodes, with a
//! flat id index and a pre-order node list.

pub mod builder;
pub mod map;
pub mod node;

pub use builder::FiletreeBuilder;
pub use map::{get_node, FiletreeMap};
pub use node::{capitalize_words, Icon, Node, NodeKind};
