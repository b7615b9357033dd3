use std::fmt;

use serde::Serialize;
use tracing::warn;

/// A non-fatal problem found while parsing a trace.
///
/// Malformed records are skipped and unresolvable ids are echoed back
/// unchanged; either way the caller gets a warning instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// States block whose header lacks the `<hash>, <name>,` shape
    MalformedScreenHeader { excerpt: String },

    /// States block whose hash never received a canonical id
    UnmappedScreen { hash: String },

    /// Transition record without a `(s:<hash>, t:<hash>):` pair
    MalformedTransition { excerpt: String },

    /// Transition endpoint missing from the screen map
    UnresolvedScreenReference { hash: String },

    /// Section header count differs from the records actually found
    CountMismatch {
        section: String,
        declared: usize,
        found: usize,
    },

    /// States section present but contains no screen definitions
    NoScreenBlocks,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MalformedScreenHeader { excerpt } => {
                write!(f, "malformed screen header, block skipped: '{}'", excerpt)
            }
            ParseWarning::UnmappedScreen { hash } => {
                write!(f, "screen hash '{}' has no canonical id, block skipped", hash)
            }
            ParseWarning::MalformedTransition { excerpt } => {
                write!(f, "malformed transition record, line skipped: '{}'", excerpt)
            }
            ParseWarning::UnresolvedScreenReference { hash } => {
                write!(f, "screen hash '{}' missing from screen map, kept as-is", hash)
            }
            ParseWarning::CountMismatch {
                section,
                declared,
                found,
            } => write!(
                f,
                "{} header declares {} records but {} were found",
                section, declared, found
            ),
            ParseWarning::NoScreenBlocks => {
                write!(f, "no valid screen definitions found in States section")
            }
        }
    }
}

/// Collects warnings for one parse session and logs each as it arrives.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<ParseWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, warning: ParseWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Record a `CountMismatch` when a declared header count disagrees.
    pub fn check_count(&mut self, section: &str, declared: Option<usize>, found: usize) {
        if let Some(declared) = declared {
            if declared != found {
                self.record(ParseWarning::CountMismatch {
                    section: section.to_string(),
                    declared,
                    found,
                });
            }
        }
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<ParseWarning> {
        self.warnings
    }
}
