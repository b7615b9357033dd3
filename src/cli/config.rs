use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::canonical::screen_ids::UNKNOWN_SCREEN;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "screen-graph",
    version,
    about = "Canonicalize UI exploration traces into short screen and transition ids"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format: text or json
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Path to config file (default: screen-graph.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print screen definitions relabeled with S<n> ids
    Screens {
        /// Trace file to read
        #[arg(long)]
        trace: String,
    },

    /// Print one `S<n>: <name>` line per screen
    Names {
        /// Trace file to read
        #[arg(long)]
        trace: String,

        /// Label for screens only seen in transitions
        #[arg(long)]
        unknown_label: Option<String>,
    },

    /// Print transitions relabeled with T<n>/S<n> ids
    Transitions {
        /// Trace file to read
        #[arg(long)]
        trace: String,

        /// Keep the trailing weight= metadata
        #[arg(long, default_value_t = false)]
        keep_weight: bool,
    },

    /// Print action and component fields of every transition
    Extract {
        /// Trace file to read
        #[arg(long)]
        trace: String,
    },

    /// Dump both id maps as JSON
    Maps {
        /// Trace file to read
        #[arg(long)]
        trace: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Rewrite canonical ids in free text back to original hashes
    ToOriginal {
        #[command(flatten)]
        source: MapSource,

        /// Text file to rewrite (default: stdin)
        #[arg(long)]
        input: Option<String>,
    },

    /// Rewrite original screen hashes in free text to S<n> ids
    ToCanonical {
        #[command(flatten)]
        source: MapSource,

        /// Text file to rewrite (default: stdin)
        #[arg(long)]
        input: Option<String>,
    },
}

/// Where the rewrite commands get their id maps from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct MapSource {
    /// Rebuild the maps from this trace file
    #[arg(long)]
    pub trace: Option<String>,

    /// Load maps previously written by `maps`
    #[arg(long)]
    pub maps: Option<String>,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `screen-graph.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub transitions: TransitionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_text")]
    pub format: String,

    #[serde(default = "default_unknown_label")]
    pub unknown_screen_label: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            unknown_screen_label: UNKNOWN_SCREEN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionsConfig {
    /// Drop `weight=...` before printing transitions
    #[serde(default = "default_true")]
    pub strip_weight: bool,
}

impl Default for TransitionsConfig {
    fn default() -> Self {
        Self { strip_weight: true }
    }
}

// Serde default helpers
fn default_text() -> String { "text".to_string() }
fn default_unknown_label() -> String { UNKNOWN_SCREEN.to_string() }
fn default_true() -> bool { true }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("screen-graph.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Log filter: `RUST_LOG` wins, otherwise the `-v` count picks the level.
pub fn log_filter(verbose: u8) -> tracing_subscriber::EnvFilter {
    if let Ok(filter) = tracing_subscriber::EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::EnvFilter::new(level)
}
