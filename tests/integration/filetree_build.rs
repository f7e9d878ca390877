use std::fs;

use tempfile::TempDir;
use tilefolio::error::BuildError;
use tilefolio::tree::{FiletreeBuilder, NodeKind};

use crate::integration::support::{portfolio, write_tree, SKILLS_INDEX};

#[test]
fn folder_absorbs_index_file() {
    let temp = TempDir::new().unwrap();
    portfolio(temp.path());

    let map = FiletreeBuilder::new(temp.path().to_path_buf()).build().unwrap();
    let skills = &map.nodes["skills"];

    assert_eq!(skills.kind, NodeKind::Folder);
    assert_eq!(skills.label, "Skills");
    assert_eq!(skills.content.as_deref(), Some(SKILLS_INDEX));
    assert_eq!(
        map.root.children.iter().filter(|c| c.id == "skills").count(),
        1
    );
    assert_eq!(
        skills.metadata.title().as_deref(),
        Some("Skill Index")
    );
    assert!(!map.nodes.contains_key("skills_index"));
    assert_eq!(
        skills.child_ids(),
        vec!["skills_business", "skills_consulting", "skills_development"]
    );
    assert_eq!(map.nodes["skills_business"].path, "skills/skills_business.txt");
    assert_eq!(map.nodes["skills_business"].parent.as_deref(), Some("skills"));
}

#[test]
fn listing_is_sorted_and_filtered_by_extension() {
    let temp = TempDir::new().unwrap();
    portfolio(temp.path());

    let map = FiletreeBuilder::new(temp.path().to_path_buf()).build().unwrap();
    let ids: Vec<&str> = map.top_level().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["about", "contact", "skills"]);
    assert!(!map.nodes.contains_key("notes"));

    // root + 3 top level + 3 skills children
    assert_eq!(map.flat_list.len(), 7);
    assert_eq!(map.flat_list[0].id, "root");
    assert_eq!(map.nodes["about"].label, "About Me");
    assert!(map.nodes["about"].parent.is_none());
}

#[test]
fn same_name_at_two_depths_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_tree(
        temp.path(),
        &[
            ("assets/logo.txt", "a"),
            ("projects/assets/logo_large.txt", "b"),
        ],
    );

    let err = FiletreeBuilder::new(temp.path().to_path_buf())
        .build()
        .unwrap_err();
    match err {
        BuildError::DuplicateId { id, first, second } => {
            assert_eq!(id, "assets");
            assert_eq!(first, "assets");
            assert_eq!(second, "projects/assets");
        }
        other => panic!("expected duplicate id, got {other:?}"),
    }
}

#[test]
fn empty_content_root_yields_root_only() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("content")).unwrap();

    let map = FiletreeBuilder::new(temp.path().join("content")).build().unwrap();
    assert!(map.top_level().is_empty());
    assert_eq!(map.flat_list.len(), 1);
}
