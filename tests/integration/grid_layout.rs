use tempfile::TempDir;
use tilefolio::grid::{generate_tile_grid, tiles_by_category, GridCompiler};
use tilefolio::tree::FiletreeBuilder;
use tilefolio::types::{Coords, Direction};

use crate::integration::support::{portfolio, write_tree};

#[test]
fn metadata_override_moves_tile() {
    let temp = TempDir::new().unwrap();
    portfolio(temp.path());
    let map = FiletreeBuilder::new(temp.path().to_path_buf()).build().unwrap();

    let compiled = GridCompiler::new().compile(&map).unwrap();
    let grid = &compiled.grid;
    assert_eq!(grid.tiles["contact"].coords, Coords::new(3, 2));
    assert_eq!(compiled.report.overrides, vec!["contact".to_string()]);
    assert!(compiled.report.collisions.is_empty());

    // spine order: about, contact, skills
    assert_eq!(grid.tiles["about"].coords, Coords::new(0, 0));
    assert_eq!(grid.tiles["skills"].coords, Coords::new(2, 0));
    assert_eq!(grid.tiles["skills_development"].coords, Coords::new(2, 3));
    assert_eq!((grid.width, grid.height), (4, 4));
}

#[test]
fn spine_neighbors_are_symmetric() {
    let temp = TempDir::new().unwrap();
    portfolio(temp.path());
    let map = FiletreeBuilder::new(temp.path().to_path_buf()).build().unwrap();
    let grid = generate_tile_grid(&map).unwrap();

    for tile in grid.tiles.values() {
        for direction in Direction::ALL {
            let Some(other) = tile.neighbors.get(direction) else {
                continue;
            };
            let back = grid.tiles[other].neighbors.get(direction.opposite());
            assert_eq!(
                back.map(String::as_str),
                Some(tile.id.as_str()),
                "{} -> {} ({}) has no reverse link",
                tile.id,
                other,
                direction
            );
        }
    }
}

#[test]
fn children_are_grouped_by_category() {
    let temp = TempDir::new().unwrap();
    portfolio(temp.path());
    let map = FiletreeBuilder::new(temp.path().to_path_buf()).build().unwrap();
    let grid = generate_tile_grid(&map).unwrap();

    let ids: Vec<&str> = tiles_by_category(&grid, "skills")
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec!["skills_business", "skills_consulting", "skills_development"]
    );
    assert!(tiles_by_category(&grid, "about").is_empty());
}

#[test]
fn layout_is_deterministic() {
    let temp = TempDir::new().unwrap();
    write_tree(
        temp.path(),
        &[("b.txt", "b"), ("a/a1.txt", "x"), ("c.txt", "c")],
    );
    let builder = FiletreeBuilder::new(temp.path().to_path_buf());
    let first = generate_tile_grid(&builder.build().unwrap()).unwrap();
    let second = generate_tile_grid(&builder.build().unwrap()).unwrap();
    assert_eq!(first, second);
}
