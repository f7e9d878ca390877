use std::fs;

use clap::Parser;
use tempfile::TempDir;
use tilefolio::error::ApiError;
use tilefolio::tooling::cli::{Cli, CliContext, Commands};

use crate::integration::support::portfolio;

fn workspace() -> (TempDir, CliContext) {
    let temp = TempDir::new().unwrap();
    portfolio(&temp.path().join("content"));
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    (temp, cli)
}

fn build(cli: &CliContext, force: bool) -> serde_json::Value {
    let output = cli
        .execute(&Commands::Build {
            content: None,
            output: None,
            force,
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["tilefolio", "build"],
        vec!["tilefolio", "build", "--force", "--format", "json"],
        vec!["tilefolio", "build", "--content", "site", "--output", "out.json"],
        vec!["tilefolio", "watch", "--debounce-ms", "250"],
        vec!["tilefolio", "status", "--format", "json"],
        vec!["tilefolio", "tile", "about"],
        vec!["tilefolio", "node", "skills", "--format", "json"],
        vec!["tilefolio", "nav"],
        vec!["tilefolio", "nav", "about", "ArrowRight"],
        vec!["tilefolio", "render", "about"],
        vec!["tilefolio", "init", "--force"],
        vec!["tilefolio", "--log-level", "debug", "--workspace", "/tmp", "build"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["tilefolio", "scan"]).is_err());
    assert!(Cli::try_parse_from(["tilefolio", "tile"]).is_err());
}

#[test]
fn build_json_contract_and_idempotence() {
    let (temp, cli) = workspace();

    let first = build(&cli, false);
    assert_eq!(first["nodes"], 7);
    assert_eq!(first["tiles"], 6);
    assert_eq!(first["nav_items"], 3);
    assert_eq!(first["written"], true);
    assert!(first["fingerprint"].as_str().unwrap().len() == 64);
    assert!(temp.path().join("generated/contentData.json").is_file());

    let second = build(&cli, false);
    assert_eq!(second["written"], false);
    assert_eq!(second["fingerprint"], first["fingerprint"]);

    let forced = build(&cli, true);
    assert_eq!(forced["written"], true);
}

#[test]
fn status_json_before_and_after_build() {
    let (_temp, cli) = workspace();
    let status = |cli: &CliContext| -> serde_json::Value {
        let output = cli
            .execute(&Commands::Status {
                format: "json".to_string(),
            })
            .unwrap();
        serde_json::from_str(&output).unwrap()
    };

    let before = status(&cli);
    assert_eq!(before["built"], false);
    assert!(before.get("fingerprint").is_none());

    let built = build(&cli, false);
    let after = status(&cli);
    assert_eq!(after["built"], true);
    assert_eq!(after["fingerprint"], built["fingerprint"]);
    let columns = after["columns"].as_array().unwrap();
    let ids: Vec<&str> = columns.iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["about", "contact", "skills"]);
    assert_eq!(columns[2]["children"], 3);
}

#[test]
fn lookups_and_navigation() {
    let (_temp, cli) = workspace();
    build(&cli, false);

    let tile: serde_json::Value = serde_json::from_str(
        &cli.execute(&Commands::Tile {
            id: "contact".to_string(),
            format: "json".to_string(),
        })
        .unwrap(),
    )
    .unwrap();
    assert_eq!(tile["coords"]["x"], 3);
    assert_eq!(tile["coords"]["y"], 2);

    let next: serde_json::Value = serde_json::from_str(
        &cli.execute(&Commands::Nav {
            id: Some("about".to_string()),
            direction: Some("ArrowRight".to_string()),
        })
        .unwrap(),
    )
    .unwrap();
    assert_eq!(next["id"], "contact");

    let missing = cli.execute(&Commands::Node {
        id: "ghost".to_string(),
        format: "text".to_string(),
    });
    assert!(matches!(missing, Err(ApiError::NotFound(_))));

    let bad_direction = cli.execute(&Commands::Nav {
        id: Some("about".to_string()),
        direction: Some("sideways".to_string()),
    });
    assert!(matches!(bad_direction, Err(ApiError::InvalidArgument(_))));
}

#[test]
fn render_emits_parsed_elements() {
    let (_temp, cli) = workspace();
    build(&cli, false);

    let rendered: serde_json::Value = serde_json::from_str(
        &cli.execute(&Commands::Render {
            id: "about".to_string(),
        })
        .unwrap(),
    )
    .unwrap();
    assert_eq!(rendered["hasCustomTags"], true);
    assert_eq!(rendered["metadata"]["title"], "About Me");
    let elements = rendered["elements"].as_array().unwrap();
    assert_eq!(elements[0]["type"], "heading");
    assert_eq!(elements[1]["type"], "paragraph");
    assert_eq!(elements[1]["spans"][1]["type"], "strong");
    assert_eq!(elements[1]["spans"][1]["text"], "things");
}

#[test]
fn init_writes_config_once() {
    let temp = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    cli.execute(&Commands::Init { force: false }).unwrap();
    let written = fs::read_to_string(temp.path().join("tilefolio.toml")).unwrap();
    assert!(written.contains("[content]"));
    assert!(written.contains("[snapshot]"));

    assert!(cli.execute(&Commands::Init { force: false }).is_err());
    assert!(cli.execute(&Commands::Init { force: true }).is_ok());
}

#[test]
fn build_without_content_root_fails() {
    let temp = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let result = cli.execute(&Commands::Build {
        content: None,
        output: None,
        force: false,
        format: "text".to_string(),
    });
    assert!(matches!(result, Err(ApiError::Build(_))));
    assert!(!temp.path().join("generated/contentData.json").exists());
}
