use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::canonical::id_map::{IdKind, IdMap};
use crate::canonical::screen_ids::{ScreenCatalog, build_screen_catalog};
use crate::error::Result;
use crate::trace::diagnostics::{Diagnostics, ParseWarning};
use crate::trace::document::TraceDocument;
use crate::trace::patterns::{TRANSITION_HEADER, TRANSITION_START, excerpt};

// ============================================================================
// Section scanner
// ============================================================================

/// Where the line scanner is relative to the trace sections.
///
/// Transitions always precede States, so reaching the States header ends
/// the scan for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Scanning,
    InsideTransitions,
    Done,
}

impl ScanState {
    /// State after seeing `line` (already trimmed).
    pub fn advance(self, line: &str) -> ScanState {
        match self {
            ScanState::Done => ScanState::Done,
            _ if line.starts_with("States") => ScanState::Done,
            _ if line.starts_with("Transitions") => ScanState::InsideTransitions,
            other => other,
        }
    }
}

// ============================================================================
// Normalized transitions
// ============================================================================

/// A transition record with every hash swapped for its short id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTransition {
    pub canonical_id: String,
    pub original_id: String,

    /// `S<n>`, or the raw hash when the screen map lacks it
    pub source: String,
    pub target: String,

    /// Everything after the `(s:..., t:...):` header, trimmed
    pub payload: String,
}

impl fmt::Display for NormalizedTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: (s:{},t:{}): {}",
            self.canonical_id, self.source, self.target, self.payload
        )
    }
}

/// Output of [`parse_transitions`].
#[derive(Debug, Clone)]
pub struct ParsedTransitions {
    pub transitions: Vec<NormalizedTransition>,
    pub transition_ids: IdMap,
    pub catalog: ScreenCatalog,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedTransitions {
    pub fn screen_ids(&self) -> &IdMap {
        &self.catalog.ids
    }

    /// `T<n>: (s:S<a>,t:S<b>): <payload>` per record.
    pub fn lines(&self) -> Vec<String> {
        self.transitions.iter().map(ToString::to_string).collect()
    }
}

/// Read a trace file and normalize its Transitions section.
pub fn parse_transitions(path: impl AsRef<Path>) -> Result<ParsedTransitions> {
    let doc = TraceDocument::load(path)?;
    Ok(parse_transitions_in(&doc))
}

/// Normalize the transitions of an already loaded document.
pub fn parse_transitions_in(doc: &TraceDocument) -> ParsedTransitions {
    let mut diagnostics = Diagnostics::new();
    let catalog = build_screen_catalog(doc, &mut diagnostics);
    let (transitions, transition_ids) =
        normalize_transitions(doc, &catalog.ids, &mut diagnostics);

    info!(
        transitions = transitions.len(),
        distinct = transition_ids.len(),
        "parsed transitions"
    );

    ParsedTransitions {
        transitions,
        transition_ids,
        catalog,
        warnings: diagnostics.into_warnings(),
    }
}

/// Walk the Transitions section and relabel each record.
///
/// Transition ids follow first appearance within this section only.
/// Records without a `(s:<hash>, t:<hash>):` header are skipped.
pub fn normalize_transitions(
    doc: &TraceDocument,
    screen_ids: &IdMap,
    diagnostics: &mut Diagnostics,
) -> (Vec<NormalizedTransition>, IdMap) {
    let mut transition_ids = IdMap::new(IdKind::Transition);
    let mut transitions = Vec::new();
    let mut state = ScanState::Scanning;

    for line in doc.trimmed_lines() {
        let next = state.advance(line);
        if next != state {
            state = next;
            debug!(?state, "section boundary");
            if state == ScanState::Done {
                break;
            }
            continue;
        }

        if state != ScanState::InsideTransitions || !TRANSITION_START.is_match(line) {
            continue;
        }

        let Some(caps) = TRANSITION_HEADER.captures(line) else {
            diagnostics.record(ParseWarning::MalformedTransition {
                excerpt: excerpt(line),
            });
            continue;
        };

        let original_id = caps[1].to_string();
        let canonical_id = transition_ids.assign(&original_id);
        let source = resolve_screen(screen_ids, &caps[2], diagnostics);
        let target = resolve_screen(screen_ids, &caps[3], diagnostics);

        transitions.push(NormalizedTransition {
            canonical_id,
            original_id,
            source,
            target,
            payload: caps[4].trim().to_string(),
        });
    }

    diagnostics.check_count(
        "Transitions",
        doc.transitions_declared_count(),
        transition_ids.len(),
    );

    (transitions, transition_ids)
}

fn resolve_screen(screen_ids: &IdMap, hash: &str, diagnostics: &mut Diagnostics) -> String {
    match screen_ids.canonical_of(hash) {
        Some(canonical) => canonical.to_string(),
        None => {
            diagnostics.record(ParseWarning::UnresolvedScreenReference {
                hash: hash.to_string(),
            });
            hash.to_string()
        }
    }
}
