//! End-to-end smoke tests for the CLI replay pipeline
//!
//! These tests run the full pipeline through `geodraw_cli::run` against
//! real files in a temporary directory.

use std::fs;

use clap::Parser;
use tempfile::TempDir;

use geodraw_cli::Args;

fn args_for(dir: &TempDir, script: &str, extra: &[&str]) -> Args {
    let input = dir.path().join("session.json");
    fs::write(&input, script).expect("Failed to write script");
    let output = dir.path().join("out.svg");

    let mut argv = vec![
        "geodraw".to_string(),
        input.to_string_lossy().to_string(),
        "-o".to_string(),
        output.to_string_lossy().to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Args::parse_from(argv)
}

#[test]
fn test_replay_writes_svg() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let script = r#"{
        "steps": [
            {
                "step": "render",
                "batch": {
                    "created": [
                        {
                            "type": "Feature",
                            "id": "p1",
                            "geometry": { "type": "Point", "coordinates": [10.0, 20.0] },
                            "properties": {}
                        }
                    ]
                }
            }
        ]
    }"#;

    let args = args_for(&dir, script, &[]);
    geodraw_cli::run(&args).expect("Replay should succeed");

    let svg = fs::read_to_string(&args.output).expect("Output SVG should exist");
    assert!(svg.contains("<svg"), "Output should be an SVG document");
    assert!(svg.contains("<image"), "Point should render as marker image");
}

#[test]
fn test_replay_writes_snapshot() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let snapshot = dir.path().join("snapshot.json");
    let script = r#"{
        "steps": [
            {
                "step": "render",
                "batch": {
                    "created": [
                        {
                            "type": "Feature",
                            "id": "line1",
                            "geometry": {
                                "type": "LineString",
                                "coordinates": [[0.0, 0.0], [10.0, 10.0]]
                            },
                            "properties": {}
                        }
                    ]
                }
            }
        ]
    }"#;

    let args = args_for(
        &dir,
        script,
        &["-s", &snapshot.to_string_lossy()],
    );
    geodraw_cli::run(&args).expect("Replay should succeed");

    let contents = fs::read_to_string(&snapshot).expect("Snapshot should exist");
    assert!(contents.contains("\"FeatureCollection\""));
    assert!(contents.contains("\"line1\""));
}

#[test]
fn test_download_command_writes_features_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let script = r#"{
        "steps": [
            {
                "step": "render",
                "batch": {
                    "created": [
                        {
                            "type": "Feature",
                            "id": "p1",
                            "geometry": { "type": "Point", "coordinates": [1.0, 2.0] },
                            "properties": {}
                        }
                    ]
                }
            },
            { "step": "command", "command": { "command": "download" } }
        ]
    }"#;

    let args = args_for(&dir, script, &[]);
    geodraw_cli::run(&args).expect("Replay should succeed");

    let features = dir.path().join("features.json");
    let contents = fs::read_to_string(&features).expect("Download file should exist");
    assert!(contents.contains("\"FeatureCollection\""));
}

#[test]
fn test_invalid_script_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let args = args_for(&dir, "not json at all", &[]);
    assert!(geodraw_cli::run(&args).is_err());
}
