//! Format build summaries, snapshot status, and lookups as text.

use crate::grid::Tile;
use crate::snapshot::BuildSummary;
use crate::tree::Node;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// One spine column in the status output
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStatus {
    pub x: u32,
    pub id: String,
    pub label: String,
    pub children: usize,
}

/// Snapshot status as reported by `tilefolio status`
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotStatus {
    pub content_root: String,
    pub snapshot_path: String,
    pub built: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    pub nodes: usize,
    pub tiles: usize,
    pub width: u32,
    pub height: u32,
    pub nav_items: usize,
    pub columns: Vec<ColumnStatus>,
}

/// Bold, underlined heading. Respects NO_COLOR and TTY.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn short_fingerprint(fingerprint: &str) -> &str {
    &fingerprint[..fingerprint.len().min(12)]
}

pub fn format_build_summary_text(summary: &BuildSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Build")));
    out.push_str(&format!("  Snapshot: {}\n", summary.output.display()));
    out.push_str(&format!("  Nodes: {}\n", summary.nodes));
    out.push_str(&format!(
        "  Tiles: {} ({} x {})\n",
        summary.tiles, summary.width, summary.height
    ));
    out.push_str(&format!("  Nav items: {}\n", summary.nav_items));
    if !summary.report.overrides.is_empty() {
        out.push_str(&format!(
            "  Overrides: {}\n",
            summary.report.overrides.join(", ")
        ));
    }
    let state = if summary.written { "written" } else { "unchanged" };
    out.push_str(&format!(
        "  Fingerprint: {}... ({})\n",
        short_fingerprint(&summary.fingerprint),
        state
    ));

    if !summary.report.collisions.is_empty() {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Cell collisions")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Cell", "Displaced", "Occupant"]);
        for c in &summary.report.collisions {
            table.add_row(vec![
                c.coords.to_string(),
                c.displaced.clone(),
                c.occupant.clone(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out
}

pub fn format_status_text(status: &SnapshotStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Snapshot Status")));
    out.push_str(&format!("  Content root: {}\n", status.content_root));
    out.push_str(&format!("  Snapshot path: {}\n", status.snapshot_path));
    if !status.built {
        out.push_str("  Built: no\n\n");
        out.push_str("Run `tilefolio build` to compile the content tree.\n");
        return out;
    }
    out.push_str("  Built: yes\n");
    if let Some(ref fingerprint) = status.fingerprint {
        out.push_str(&format!(
            "  Fingerprint: {}...\n",
            short_fingerprint(fingerprint)
        ));
    }
    out.push_str(&format!("  Nodes: {}\n", status.nodes));
    out.push_str(&format!(
        "  Tiles: {} ({} x {})\n",
        status.tiles, status.width, status.height
    ));
    out.push_str(&format!("  Nav items: {}\n\n", status.nav_items));

    if status.columns.is_empty() {
        out.push_str("Content tree is empty.\n");
        return out;
    }
    out.push_str(&format!("{}\n\n", format_section_heading("Columns")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["X", "Id", "Label", "Children"]);
    for col in &status.columns {
        table.add_row(vec![
            col.x.to_string(),
            col.id.clone(),
            col.label.clone(),
            col.children.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_tile_text(tile: &Tile) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Id".to_string(), tile.id.clone()]);
    table.add_row(vec!["Label".to_string(), tile.label.clone()]);
    table.add_row(vec!["Cell".to_string(), tile.coords.to_string()]);
    table.add_row(vec![
        "Category".to_string(),
        tile.category.clone().unwrap_or_else(|| "-".to_string()),
    ]);
    let n = &tile.neighbors;
    for (name, link) in [
        ("Left", &n.left),
        ("Right", &n.right),
        ("Up", &n.up),
        ("Down", &n.down),
    ] {
        table.add_row(vec![
            name.to_string(),
            link.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    format!("{}\n\n{}\n", format_section_heading("Tile"), table)
}

pub fn format_node_text(node: &Node) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Node")));
    out.push_str(&format!("  Id: {}\n", node.id));
    out.push_str(&format!("  Label: {}\n", node.label));
    out.push_str(&format!("  Path: {}\n", node.path));
    out.push_str(&format!(
        "  Parent: {}\n",
        node.parent.as_deref().unwrap_or("-")
    ));
    if !node.metadata.is_empty() {
        out.push_str("  Metadata:\n");
        for (key, value) in node.metadata.iter() {
            out.push_str(&format!("    {}: {}\n", key, value));
        }
    }
    if node.has_children() {
        out.push_str(&format!("  Children: {}\n", node.child_ids().join(", ")));
    }
    if let Some(ref content) = node.content {
        out.push_str(&format!("\n{}\n", content));
    }
    out
}
