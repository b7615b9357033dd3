//! Canonicalization of UI exploration traces.
//!
//! A trace lists transitions and screens keyed by 64-character content
//! hashes. This crate swaps those hashes for short sequential ids (`S<n>`
//! for screens, `T<n>` for transitions), reassembles multi-line screen
//! definitions, extracts action/component fields from transition payloads
//! and rewrites free text between the two id spaces.
//!
//! Every operation rebuilds its id maps from the input text; nothing is
//! cached between calls.

pub mod canonical;
pub mod cli;
pub mod error;
pub mod rewrite;
pub mod screen;
pub mod trace;
pub mod transition;

pub use canonical::id_map::{IdEntry, IdKind, IdMap, SavedMaps};
pub use canonical::screen_ids::{ScreenCatalog, UNKNOWN_SCREEN, build_screen_catalog};
pub use error::{Result, TraceError};
pub use rewrite::screen_ids::{
    rewrite_canonical_to_original_screens, rewrite_original_to_canonical_screens,
};
pub use rewrite::transition_refs::normalize_transition_references;
pub use screen::blocks::{ParsedScreens, ScreenBlock, parse_screens, parse_screens_in};
pub use screen::listing::{format_screen_listing, list_screens_with_names};
pub use trace::diagnostics::ParseWarning;
pub use trace::document::TraceDocument;
pub use transition::clean::{clean_transition_line, clean_transition_lines};
pub use transition::extractor::{
    ComponentDescriptor, TransitionFields, extract_transition_fields, parse_transition_fields,
};
pub use transition::normalizer::{
    NormalizedTransition, ParsedTransitions, parse_transitions, parse_transitions_in,
};
