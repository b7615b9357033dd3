use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::canonical::id_map::IdMap;
use crate::canonical::screen_ids::{ScreenCatalog, build_screen_catalog};
use crate::error::Result;
use crate::trace::diagnostics::{Diagnostics, ParseWarning};
use crate::trace::document::TraceDocument;
use crate::trace::patterns::{LEADING_HASH, excerpt};

/// One logical screen definition with its hash replaced by `S<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenBlock {
    pub canonical_id: String,
    pub original_id: String,

    /// Full block text, continuation lines included
    pub text: String,
}

/// Output of [`parse_screens`].
#[derive(Debug, Clone)]
pub struct ParsedScreens {
    /// Relabeled blocks ordered by screen number
    pub blocks: Vec<ScreenBlock>,
    pub catalog: ScreenCatalog,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedScreens {
    pub fn screen_ids(&self) -> &IdMap {
        &self.catalog.ids
    }

    pub fn block_texts(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.text.as_str()).collect()
    }
}

/// Read a trace file and reassemble its screen blocks.
pub fn parse_screens(path: impl AsRef<Path>) -> Result<ParsedScreens> {
    let doc = TraceDocument::load(path)?;
    Ok(parse_screens_in(&doc))
}

/// Reassemble the screen blocks of an already loaded document.
pub fn parse_screens_in(doc: &TraceDocument) -> ParsedScreens {
    let mut diagnostics = Diagnostics::new();
    let catalog = build_screen_catalog(doc, &mut diagnostics);
    let blocks = reassemble_screen_blocks(doc, &catalog.ids, &mut diagnostics);

    info!(
        screens = catalog.ids.len(),
        blocks = blocks.len(),
        "parsed screen blocks"
    );

    ParsedScreens {
        blocks,
        catalog,
        warnings: diagnostics.into_warnings(),
    }
}

/// Relabel every block of the States section with its canonical id.
///
/// Repeated declarations of the same hash are all kept; only id assignment
/// treats the first one specially. Blocks whose hash has no id are skipped
/// with a warning.
pub fn reassemble_screen_blocks(
    doc: &TraceDocument,
    screen_ids: &IdMap,
    diagnostics: &mut Diagnostics,
) -> Vec<ScreenBlock> {
    let Some(section) = doc.states_section() else {
        return Vec::new();
    };

    let raw_blocks = section.screen_blocks();
    if raw_blocks.is_empty() {
        diagnostics.record(ParseWarning::NoScreenBlocks);
        return Vec::new();
    }

    let mut blocks = Vec::with_capacity(raw_blocks.len());
    for block in raw_blocks {
        let Some(hash) = LEADING_HASH.find(block) else {
            diagnostics.record(ParseWarning::MalformedScreenHeader {
                excerpt: excerpt(block),
            });
            continue;
        };

        let original = hash.as_str();
        let Some(canonical) = screen_ids.canonical_of(original) else {
            diagnostics.record(ParseWarning::UnmappedScreen {
                hash: original.to_string(),
            });
            continue;
        };

        blocks.push(ScreenBlock {
            canonical_id: canonical.to_string(),
            original_id: original.to_string(),
            text: format!("{}{}", canonical, &block[hash.end()..]),
        });
    }

    // Stable: repeated declarations keep their relative order.
    blocks.sort_by_key(|b| screen_ids.numeric_suffix(&b.canonical_id).unwrap_or(u64::MAX));
    blocks
}
