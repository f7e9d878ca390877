//! One full build pass: scan, compile, write.

use super::{write_snapshot, Snapshot, WriteOutcome};
use crate::error::ApiError;
use crate::grid::GridReport;
use crate::tree::FiletreeBuilder;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Inputs of a build pass
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub content_root: PathBuf,
    pub extension: String,
    pub output: PathBuf,
    pub pretty: bool,
    pub force: bool,
}

/// Counts and outcome of a finished build pass
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub nodes: usize,
    pub tiles: usize,
    pub nav_items: usize,
    pub width: u32,
    pub height: u32,
    pub written: bool,
    pub fingerprint: String,
    pub report: GridReport,
    pub elapsed_ms: u64,
}

/// Run a build pass. Nothing is written unless every stage succeeds.
pub fn run_build(request: &BuildRequest) -> Result<BuildSummary, ApiError> {
    let started = Instant::now();

    let map = FiletreeBuilder::new(request.content_root.clone())
        .with_extension(request.extension.as_str())
        .build()?;
    let (snapshot, report) = Snapshot::compile(map)?;
    let outcome = write_snapshot(&snapshot, &request.output, request.pretty, request.force)?;

    let summary = BuildSummary {
        output: request.output.clone(),
        nodes: snapshot.filetree_map.flat_list.len(),
        tiles: snapshot.tile_grid.tiles.len(),
        nav_items: snapshot.nav_structure.len(),
        width: snapshot.tile_grid.width,
        height: snapshot.tile_grid.height,
        written: matches!(outcome, WriteOutcome::Written { .. }),
        fingerprint: outcome.fingerprint().to_string(),
        report,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        nodes = summary.nodes,
        tiles = summary.tiles,
        nav_items = summary.nav_items,
        written = summary.written,
        elapsed_ms = summary.elapsed_ms,
        "Build finished"
    );
    Ok(summary)
}
