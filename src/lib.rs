//! Tilefolio: Content Tree to Tile Grid Compiler
//!
//! Scans a directory of plain-text content files into a typed tree, parses the
//! embedded metadata and markup, and projects the tree onto a 2D grid of tiles
//! with neighbor links for spatial navigation. The result is written as one
//! JSON snapshot and served read-only through [`query::SnapshotView`].

pub mod config;
pub mod content;
pub mod error;
pub mod grid;
pub mod logging;
pub mod nav;
pub mod query;
pub mod snapshot;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod watch;

pub use error::ApiError;
pub use query::SnapshotView;
pub use snapshot::Snapshot;
