//! Integration tests for the tilefolio content compiler

mod cli_contracts;
mod filetree_build;
mod grid_layout;
mod snapshot_roundtrip;
mod support;
