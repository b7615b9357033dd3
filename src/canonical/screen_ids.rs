use std::collections::HashMap;

use tracing::debug;

use crate::canonical::id_map::{IdKind, IdMap};
use crate::trace::diagnostics::{Diagnostics, ParseWarning};
use crate::trace::document::TraceDocument;
use crate::trace::patterns::{SCREEN_HEADER, TRANSITION_HEADER, excerpt};

pub const UNKNOWN_SCREEN: &str = "Unknown Screen";

// ============================================================================
// Screen catalog
// ============================================================================

/// Screen id map plus the names declared in the States section.
///
/// Screens that only show up as transition endpoints have no name.
#[derive(Debug, Clone)]
pub struct ScreenCatalog {
    pub ids: IdMap,
    names: HashMap<String, Option<String>>,
}

impl ScreenCatalog {
    /// Declared name for an original screen hash.
    pub fn name_of(&self, original: &str) -> Option<&str> {
        self.names.get(original).and_then(|n| n.as_deref())
    }

    /// Declared name, or `unknown_label` for transition-only screens.
    pub fn display_name<'a>(&'a self, original: &str, unknown_label: &'a str) -> &'a str {
        self.name_of(original).unwrap_or(unknown_label)
    }

    /// `(canonical, original, name)` in ascending id order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, Option<&str>)> {
        self.ids
            .iter()
            .map(move |(canonical, original)| (canonical, original, self.name_of(original)))
    }
}

// ============================================================================
// Canonicalizer
// ============================================================================

/// Assign `S1, S2, ...` to every screen hash in the document.
///
/// Screens declared in States come first, in declaration order; the first
/// declaration of a hash wins. Hashes referenced only by transition
/// headers (anywhere in the document) follow, in order of first
/// appearance. The result depends only on the text, so reparsing the same
/// trace always yields the same ids.
pub fn build_screen_catalog(doc: &TraceDocument, diagnostics: &mut Diagnostics) -> ScreenCatalog {
    let mut ids = IdMap::new(IdKind::Screen);
    let mut names: HashMap<String, Option<String>> = HashMap::new();

    if let Some(section) = doc.states_section() {
        for block in section.screen_blocks() {
            let Some(caps) = SCREEN_HEADER.captures(block) else {
                diagnostics.record(ParseWarning::MalformedScreenHeader {
                    excerpt: excerpt(block),
                });
                continue;
            };

            let hash = &caps[1];
            if ids.contains_original(hash) {
                continue;
            }
            ids.assign(hash);
            names.insert(hash.to_string(), Some(caps[2].trim().to_string()));
        }

        diagnostics.check_count("States", section.declared_count, ids.len());
    }

    let declared = ids.len();

    for caps in TRANSITION_HEADER.captures_iter(doc.text()) {
        for hash in [&caps[2], &caps[3]] {
            if !ids.contains_original(hash) {
                ids.assign(hash);
                names.insert(hash.to_string(), None);
            }
        }
    }

    debug!(
        declared,
        transition_only = ids.len() - declared,
        "built screen id map"
    );

    ScreenCatalog { ids, names }
}
