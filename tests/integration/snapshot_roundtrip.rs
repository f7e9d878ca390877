use tempfile::TempDir;
use tilefolio::snapshot::{load_snapshot, write_snapshot, WriteOutcome};
use tilefolio::tree::FiletreeBuilder;
use tilefolio::types::Direction;
use tilefolio::{Snapshot, SnapshotView};

use crate::integration::support::portfolio;

fn compiled(temp: &TempDir) -> Snapshot {
    portfolio(&temp.path().join("content"));
    let map = FiletreeBuilder::new(temp.path().join("content"))
        .build()
        .unwrap();
    Snapshot::compile(map).unwrap().0
}

#[test]
fn written_snapshot_loads_identically() {
    let temp = TempDir::new().unwrap();
    let snapshot = compiled(&temp);
    let path = temp.path().join("generated/contentData.json");

    let outcome = write_snapshot(&snapshot, &path, true, false).unwrap();
    assert!(matches!(outcome, WriteOutcome::Written { .. }));

    let loaded = load_snapshot(&path).unwrap();
    assert_eq!(loaded.filetree_map.nodes, snapshot.filetree_map.nodes);
    assert_eq!(loaded.filetree_map.flat_list, snapshot.filetree_map.flat_list);
    assert_eq!(loaded, snapshot);
}

#[test]
fn wire_format_uses_camel_case_and_omits_absent_fields() {
    let temp = TempDir::new().unwrap();
    let snapshot = compiled(&temp);
    let json = serde_json::to_value(&snapshot).unwrap();

    let about = &json["filetreeMap"]["nodes"]["about"];
    assert_eq!(about["type"], "file");
    assert_eq!(about["label"], "About Me");
    assert_eq!(about["icon"], "FileText");
    assert!(about.get("parent").is_none());
    assert!(about.get("children").is_none());

    let contact_meta = &json["filetreeMap"]["nodes"]["contact"]["metadata"];
    assert_eq!(contact_meta["tileX"], 3);

    let about_tile = &json["tileGrid"]["tiles"]["about"];
    assert_eq!(about_tile["coords"]["x"], 0);
    assert!(about_tile["neighbors"].get("left").is_none());
    assert_eq!(about_tile["neighbors"]["right"], "contact");
    assert_eq!(about_tile["hasContent"], true);

    assert!(json["filetreeMap"]["flatList"].is_array());
    assert_eq!(json["navStructure"].as_array().unwrap().len(), 3);
}

#[test]
fn loaded_view_answers_queries() {
    let temp = TempDir::new().unwrap();
    let snapshot = compiled(&temp);
    let path = temp.path().join("contentData.json");
    write_snapshot(&snapshot, &path, false, false).unwrap();

    let view = SnapshotView::load(&path);
    assert_eq!(view.get_label("skills_business"), "Skills Business");
    assert_eq!(
        view.navigate("skills", Direction::Down).map(|t| t.id.as_str()),
        Some("skills_business")
    );
    assert!(view
        .get_content_by_id("skills_business")
        .unwrap()
        .starts_with("plain text"));
}
