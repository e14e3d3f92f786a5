use std::path::Path;

use clap::Parser;
use millpath::cli::{run, Cli};
use millpath::{AnnularParameters, Config, ParameterStore};
use tempfile::TempDir;

fn config_file(dir: &Path) -> String {
    let path = dir.join("config.toml");
    Config::default().save_to_file(&path).unwrap();
    path.to_str().unwrap().to_string()
}

fn files_with_prefix(dir: &Path, prefix: &str) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_str().unwrap().to_string())
        .filter(|name| name.starts_with(prefix))
        .collect()
}

#[test]
fn test_c_shape_exports_and_previews() {
    let dir = TempDir::new().unwrap();
    let config = config_file(dir.path());
    let out = dir.path().join("programs");
    let svg = dir.path().join("plan.svg");
    let svg_3d = dir.path().join("path.svg");
    let json = dir.path().join("path.json");

    let cli = Cli::try_parse_from([
        "millpath",
        "c-shape",
        "--config",
        config.as_str(),
        "--output-dir",
        out.to_str().unwrap(),
        "--svg",
        svg.to_str().unwrap(),
        "--svg-3d",
        svg_3d.to_str().unwrap(),
        "--view",
        "side1",
        "--preview-json",
        json.to_str().unwrap(),
    ])
    .unwrap();
    run(cli).unwrap();

    assert_eq!(files_with_prefix(&out, "c_shape_gcode_").len(), 1);
    assert!(std::fs::read_to_string(&svg).unwrap().starts_with("<svg"));
    assert!(std::fs::read_to_string(&svg_3d).unwrap().contains("<svg"));

    let waypoints: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert!(!waypoints.as_array().unwrap().is_empty());
}

#[test]
fn test_invalid_parameters_write_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_file(dir.path());
    let out = dir.path().join("programs");

    let cli = Cli::try_parse_from([
        "millpath",
        "c-shape",
        "--config",
        config.as_str(),
        "--output-dir",
        out.to_str().unwrap(),
        "--inner-radius",
        "25",
    ])
    .unwrap();
    assert!(run(cli).is_err());
    assert!(!out.exists());
}

#[test]
fn test_degenerate_ring_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = config_file(dir.path());

    let cli = Cli::try_parse_from([
        "millpath",
        "c-shape",
        "--config",
        config.as_str(),
        "--no-export",
        "--tool-diameter",
        "25",
    ])
    .unwrap();
    let error = run(cli).unwrap_err();
    assert!(format!("{:#}", error).contains("generating C-shape"));
}

#[test]
fn test_degenerate_parameters_are_not_saved_as_preset() {
    let dir = TempDir::new().unwrap();
    let config = config_file(dir.path());
    let presets = dir.path().join("presets");

    let cli = Cli::try_parse_from([
        "millpath",
        "c-shape",
        "--config",
        config.as_str(),
        "--no-export",
        "--tool-diameter",
        "20",
        "--save-preset",
        "too_wide",
        "--preset-dir",
        presets.to_str().unwrap(),
    ])
    .unwrap();
    assert!(run(cli).is_err());

    let store = ParameterStore::new(&presets);
    assert!(store.list::<AnnularParameters>().unwrap().is_empty());
}

#[test]
fn test_linear_preset_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = config_file(dir.path());
    let presets = dir.path().join("presets");

    let cli = Cli::try_parse_from([
        "millpath",
        "linear",
        "--config",
        config.as_str(),
        "--no-export",
        "--direction",
        "Y",
        "--depth-end",
        "2",
        "--save-preset",
        "slot",
        "--preset-dir",
        presets.to_str().unwrap(),
    ])
    .unwrap();
    run(cli).unwrap();

    let store = ParameterStore::new(&presets);
    let saved: millpath::LinearParameters = store.load("slot").unwrap();
    assert_eq!(saved.depth_end, 2.0);
    assert_eq!(saved.direction, millpath::Axis::Y);

    // Presets for one tool are invisible to the other.
    assert!(store.list::<AnnularParameters>().unwrap().is_empty());
}

#[test]
fn test_defaults_written_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("defaults.json");

    let cli = Cli::try_parse_from(["millpath", "defaults", "--write", path.to_str().unwrap()])
        .unwrap();
    run(cli).unwrap();

    assert_eq!(Config::load_from_file(&path).unwrap(), Config::default());
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");

    let cli = Cli::try_parse_from([
        "millpath",
        "linear",
        "--no-export",
        "--config",
        missing.to_str().unwrap(),
    ])
    .unwrap();
    assert!(run(cli).is_err());
}
