use clap::Parser;
use screen_graph::cli::commands::{
    cmd_extract, cmd_maps, cmd_names, cmd_screens, cmd_to_canonical, cmd_to_original,
    cmd_transitions, load_maps,
};
use screen_graph::cli::config::{AppConfig, Cli, Commands, MapSource, load_config};
use screen_graph::error::TraceError;

use crate::common::fixtures::{hash, login_home_trace, write_trace};

mod common;

// ============================================================================
// CLI Parsing Tests
// ============================================================================

#[test]
fn cli_parse_names_with_label() {
    let cli = Cli::parse_from([
        "screen-graph",
        "names",
        "--trace",
        "graph.txt",
        "--unknown-label",
        "???",
    ]);
    match cli.command {
        Commands::Names {
            trace,
            unknown_label,
        } => {
            assert_eq!(trace, "graph.txt");
            assert_eq!(unknown_label, Some("???".to_string()));
        }
        _ => panic!("Expected Names command"),
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.format.is_none());
}

#[test]
fn cli_parse_global_flags() {
    let cli = Cli::parse_from([
        "screen-graph",
        "-vv",
        "transitions",
        "--trace",
        "graph.txt",
        "--keep-weight",
        "--format",
        "json",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.format, Some("json".to_string()));
    match cli.command {
        Commands::Transitions { trace, keep_weight } => {
            assert_eq!(trace, "graph.txt");
            assert!(keep_weight);
        }
        _ => panic!("Expected Transitions command"),
    }
}

#[test]
fn cli_rewrite_needs_exactly_one_map_source() {
    assert!(Cli::try_parse_from(["screen-graph", "to-original"]).is_err());
    assert!(
        Cli::try_parse_from([
            "screen-graph",
            "to-original",
            "--trace",
            "a.txt",
            "--maps",
            "m.json"
        ])
        .is_err()
    );

    let cli = Cli::parse_from(["screen-graph", "to-canonical", "--maps", "m.json"]);
    match cli.command {
        Commands::ToCanonical { source, input } => {
            assert_eq!(source.maps, Some("m.json".to_string()));
            assert!(source.trace.is_none());
            assert!(input.is_none());
        }
        _ => panic!("Expected ToCanonical command"),
    }
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_load_missing_file() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config.output.format, "text");
    assert_eq!(config.output.unknown_screen_label, "Unknown Screen");
    assert!(config.transitions.strip_weight);
}

#[test]
fn config_partial_yaml() {
    let yaml = r#"
output:
  unknown_screen_label: "Unnamed"
transitions:
  strip_weight: false
"#;
    let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.output.unknown_screen_label, "Unnamed");
    assert_eq!(config.output.format, "text");
    assert!(!config.transitions.strip_weight);
}

#[test]
fn config_malformed_file_falls_back_to_defaults() {
    let path = write_trace("malformed_config.yaml", "output: [unclosed");
    let config = load_config(path.to_str());
    assert_eq!(config.output.format, "text");
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn cmd_names_and_screens_text() {
    let path = write_trace("cli_names.txt", &login_home_trace());
    let trace = path.to_str().unwrap();

    assert_eq!(cmd_names(trace, "text", "Unknown Screen").unwrap(), "S1: Login\nS2: Home");

    let screens = cmd_screens(trace, "text").unwrap();
    assert!(screens.starts_with("S1, Login, activity=.MainActivity\n"));
    assert!(screens.ends_with("S2, Home, activity=.HomeActivity"));
}

#[test]
fn cmd_transitions_strips_weight_on_request() {
    let path = write_trace("cli_transitions.txt", &login_home_trace());
    let trace = path.to_str().unwrap();

    let stripped = cmd_transitions(trace, "text", true).unwrap();
    assert!(!stripped.contains("weight="));
    let kept = cmd_transitions(trace, "text", false).unwrap();
    assert!(kept.ends_with("weight=0.5"));

    let json: serde_json::Value =
        serde_json::from_str(&cmd_transitions(trace, "json", true).unwrap()).unwrap();
    assert_eq!(json[0]["canonical_id"], "T1");
    assert_eq!(json[0]["source"], "S1");
    assert_eq!(
        json[0]["payload"],
        "act=(1) click, cp=[ty=Button,idx=login_btn,tx=Login,dsc=]"
    );
}

#[test]
fn cmd_extract_json_has_component_fields() {
    let path = write_trace("cli_extract.txt", &login_home_trace());
    let trace = path.to_str().unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&cmd_extract(trace, "json").unwrap()).unwrap();
    assert_eq!(json[0]["action"], "click");
    assert_eq!(json[0]["component"]["identifier"], "login_btn");
}

#[test]
fn saved_maps_drive_a_later_rewrite() {
    let trace_path = write_trace("cli_maps_trace.txt", &login_home_trace());
    let maps_path = std::env::temp_dir()
        .join("screen_graph_tests")
        .join("cli_maps.json");
    let maps = maps_path.to_str().unwrap();

    let msg = cmd_maps(trace_path.to_str().unwrap(), Some(maps)).unwrap();
    assert!(msg.contains("2 screen and 1 transition ids"));

    let input = write_trace("cli_answer.txt", "Go from S1 to S2 via T1");
    let source = MapSource {
        trace: None,
        maps: Some(maps.to_string()),
    };
    let original = cmd_to_original(&source, input.to_str()).unwrap();
    assert_eq!(
        original,
        format!("Go from {} to {} via <{}>", hash('a'), hash('b'), hash('c'))
    );

    let back_input = write_trace("cli_back.txt", &original);
    assert_eq!(
        cmd_to_canonical(&source, back_input.to_str()).unwrap(),
        format!("Go from S1 to S2 via <{}>", hash('c'))
    );
}

#[test]
fn load_maps_from_trace_matches_saved_maps() {
    let trace_path = write_trace("cli_load_maps.txt", &login_home_trace());
    let (screens, transitions) = load_maps(&MapSource {
        trace: Some(trace_path.to_str().unwrap().to_string()),
        maps: None,
    })
    .unwrap();
    assert_eq!(screens.len(), 2);
    assert_eq!(transitions.original_of("T1"), Some(hash('c').as_str()));
}

#[test]
fn cmd_reports_missing_trace() {
    let err = cmd_names("no/such/trace.txt", "text", "Unknown Screen").unwrap_err();
    assert!(matches!(err, TraceError::FileNotFound { .. }));
}
