use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TraceError};
use crate::trace::patterns::{SCREEN_BLOCK_START, STATES_HEADER, TRANSITIONS_HEADER};

// ============================================================================
// Trace document
// ============================================================================

/// Raw text of one exploration trace, read once and shared by every
/// parsing stage.
///
/// The layout is fixed: a `Transitions (<n>):` section followed by a
/// `States (<n>):` section. Nothing here is validated up front; each stage
/// pulls what it needs and records warnings for what it cannot use.
#[derive(Debug, Clone)]
pub struct TraceDocument {
    source: Option<PathBuf>,
    text: String,
}

/// A section body together with the count its header declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub declared_count: Option<usize>,
    pub body: &'a str,
}

impl<'a> Section<'a> {
    /// Split a States body into logical screen blocks.
    ///
    /// A block starts at each line beginning with `<hash>,` and runs up to
    /// the next such line, so multi-line descriptions stay attached to
    /// their screen. Text before the first boundary is ignored.
    pub fn screen_blocks(&self) -> Vec<&'a str> {
        let body = self.body;
        let starts: Vec<usize> = SCREEN_BLOCK_START
            .find_iter(body)
            .map(|m| m.start())
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(body.len());
                body[start..end].trim()
            })
            .filter(|block| !block.is_empty())
            .collect()
    }
}

impl TraceDocument {
    /// Read a trace file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TraceError::from_io(path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "loaded trace document");
        Ok(Self {
            source: Some(path.to_path_buf()),
            text,
        })
    }

    /// Wrap in-memory trace text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: None,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Path the document was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Everything after the `States (<n>):` header, trimmed.
    ///
    /// `None` when the document has no States header; that is not an error,
    /// the screen set simply comes from transitions alone.
    pub fn states_section(&self) -> Option<Section<'_>> {
        let caps = STATES_HEADER.captures(&self.text)?;
        let header = caps.get(0)?;
        Some(Section {
            declared_count: caps.get(1).and_then(|m| m.as_str().parse().ok()),
            body: self.text[header.end()..].trim(),
        })
    }

    /// Count declared by the `Transitions (<n>):` header.
    pub fn transitions_declared_count(&self) -> Option<usize> {
        TRANSITIONS_HEADER
            .captures(&self.text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Physical lines with surrounding whitespace removed.
    pub fn trimmed_lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().map(str::trim)
    }
}
