use std::io::Read;

use serde::Serialize;
use tracing::info;

use crate::canonical::id_map::{IdKind, IdMap, SavedMaps};
use crate::cli::config::MapSource;
use crate::error::{Result, TraceError};
use crate::rewrite::screen_ids::{
    rewrite_canonical_to_original_screens, rewrite_original_to_canonical_screens,
};
use crate::rewrite::transition_refs::normalize_transition_references;
use crate::screen::blocks::parse_screens;
use crate::screen::listing::format_screen_listing;
use crate::transition::clean::{clean_transition_line, clean_transition_lines};
use crate::transition::extractor::parse_transition_fields;
use crate::transition::normalizer::parse_transitions;

// ============================================================================
// screens subcommand
// ============================================================================

/// Relabeled screen blocks in screen order.
pub fn cmd_screens(trace: &str, format: &str) -> Result<String> {
    let parsed = parse_screens(trace)?;

    match format {
        "json" => to_json("screens", &parsed.blocks),
        _ => Ok(parsed.block_texts().join("\n")),
    }
}

// ============================================================================
// names subcommand
// ============================================================================

#[derive(Debug, Serialize)]
struct ScreenName<'a> {
    canonical: &'a str,
    original: &'a str,
    name: Option<&'a str>,
}

pub fn cmd_names(trace: &str, format: &str, unknown_label: &str) -> Result<String> {
    let parsed = parse_screens(trace)?;

    match format {
        "json" => {
            let names: Vec<ScreenName> = parsed
                .catalog
                .entries()
                .map(|(canonical, original, name)| ScreenName {
                    canonical,
                    original,
                    name,
                })
                .collect();
            to_json("names", &names)
        }
        _ => Ok(format_screen_listing(&parsed.catalog, unknown_label)),
    }
}

// ============================================================================
// transitions / extract subcommands
// ============================================================================

pub fn cmd_transitions(trace: &str, format: &str, strip_weight: bool) -> Result<String> {
    let parsed = parse_transitions(trace)?;

    match format {
        "json" => {
            let mut transitions = parsed.transitions;
            if strip_weight {
                for t in &mut transitions {
                    t.payload = clean_transition_line(&t.payload);
                }
            }
            to_json("transitions", &transitions)
        }
        _ => {
            let lines = parsed.lines();
            let lines = if strip_weight {
                clean_transition_lines(&lines)
            } else {
                lines
            };
            Ok(lines.join("\n"))
        }
    }
}

pub fn cmd_extract(trace: &str, format: &str) -> Result<String> {
    let parsed = parse_transitions(trace)?;
    let fields = parse_transition_fields(&clean_transition_lines(&parsed.lines()));

    match format {
        "json" => to_json("extract", &fields),
        _ => Ok(fields
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

// ============================================================================
// maps subcommand
// ============================================================================

/// Serialize both id maps; written to `output` when given.
pub fn cmd_maps(trace: &str, output: Option<&str>) -> Result<String> {
    let parsed = parse_transitions(trace)?;
    let saved = SavedMaps::from_maps(parsed.screen_ids(), &parsed.transition_ids);
    let json = to_json("maps", &saved)?;

    match output {
        Some(path) => {
            std::fs::write(path, &json).map_err(|e| TraceError::from_io(path, e))?;
            info!(path, "wrote id maps");
            Ok(format!(
                "Wrote {} screen and {} transition ids to {}",
                saved.screens.len(),
                saved.transitions.len(),
                path
            ))
        }
        None => Ok(json),
    }
}

// ============================================================================
// to-original / to-canonical subcommands
// ============================================================================

/// Screen ids back to hashes, then transition references to `<hash>` tags.
pub fn cmd_to_original(source: &MapSource, input: Option<&str>) -> Result<String> {
    let (screens, transitions) = load_maps(source)?;
    let text = read_input(input)?;

    let text = rewrite_canonical_to_original_screens(&text, &screens);
    Ok(normalize_transition_references(&text, &transitions))
}

pub fn cmd_to_canonical(source: &MapSource, input: Option<&str>) -> Result<String> {
    let (screens, _) = load_maps(source)?;
    let text = read_input(input)?;

    Ok(rewrite_original_to_canonical_screens(&text, &screens))
}

// ============================================================================
// Helpers
// ============================================================================

/// `(screens, transitions)` maps from a trace or a saved maps file.
pub fn load_maps(source: &MapSource) -> Result<(IdMap, IdMap)> {
    match (&source.trace, &source.maps) {
        (_, Some(maps_path)) => {
            let content = std::fs::read_to_string(maps_path)
                .map_err(|e| TraceError::from_io(maps_path, e))?;
            let saved: SavedMaps =
                serde_json::from_str(&content).map_err(|e| TraceError::Json {
                    context: maps_path.clone(),
                    source: e,
                })?;
            saved.into_maps()
        }
        (Some(trace), None) => {
            let parsed = parse_transitions(trace)?;
            Ok((parsed.catalog.ids, parsed.transition_ids))
        }
        (None, None) => Ok((
            IdMap::new(IdKind::Screen),
            IdMap::new(IdKind::Transition),
        )),
    }
}

/// Contents of `path`, or all of stdin.
pub fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| TraceError::from_io(path, e)),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| TraceError::from_io("<stdin>", e))?;
            Ok(buf)
        }
    }
}

fn to_json<T: Serialize + ?Sized>(context: &str, value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| TraceError::Json {
        context: context.to_string(),
        source: e,
    })
}
