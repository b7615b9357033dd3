use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::trace::patterns::NORMALIZED_TRANSITION;

static ACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bact=\(\d+\)\s*([^,\]]+)").unwrap());
static COMPONENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bcp=(null|\[[^\]]*\])").unwrap());
static COMPONENT_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bty=([^,\]]+)").unwrap());
static COMPONENT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bidx=([^,\]]+)").unwrap());
static COMPONENT_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btx=([^,\]]+)").unwrap());
// Runs to the end of the component, so commas and empty values are allowed.
static COMPONENT_DESC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdsc=([^\]]*)").unwrap());

// ============================================================================
// Extracted transition fields
// ============================================================================

/// UI element a transition's action targeted. `cp=null` leaves every
/// field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    pub component_type: String,
    pub identifier: String,
    pub text: String,
    pub description: String,
}

impl ComponentDescriptor {
    /// Parse the inside of a `cp=[...]` bracket.
    pub fn parse(details: &str) -> Self {
        Self {
            component_type: capture_trimmed(&COMPONENT_TYPE, details),
            identifier: capture_trimmed(&COMPONENT_ID, details),
            text: capture_trimmed(&COMPONENT_TEXT, details),
            description: capture_trimmed(&COMPONENT_DESC, details),
        }
    }
}

/// Structured view of one normalized transition line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionFields {
    pub transition_id: String,
    pub source: String,
    pub target: String,
    pub action: String,
    pub component: ComponentDescriptor,
}

impl TransitionFields {
    /// Parse `T<n>: (s:S<a>,t:S<b>): <payload>`.
    ///
    /// Returns `None` when the header does not have that shape. Missing
    /// payload fields default to empty strings.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = NORMALIZED_TRANSITION.captures(line.trim_end())?;
        let details = caps[5].trim();

        let action = capture_trimmed(&ACTION, details);

        let component = COMPONENT
            .captures(details)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().strip_prefix('['))
            .and_then(|inner| inner.strip_suffix(']'))
            .map(|inner| ComponentDescriptor::parse(inner.trim()))
            .unwrap_or_default();

        Some(Self {
            transition_id: format!("T{}", &caps[2]),
            source: caps[3].to_string(),
            target: caps[4].to_string(),
            action,
            component,
        })
    }
}

impl fmt::Display for TransitionFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: (s:{},t:{}): Action = \"{}\"; Component = [Type = \"{}\", Identifier = \"{}\", Text = \"{}\", Description = \"{}\"]",
            self.transition_id,
            self.source,
            self.target,
            self.action,
            self.component.component_type,
            self.component.identifier,
            self.component.text,
            self.component.description,
        )
    }
}

/// Structured fields for each well-formed line; others are dropped.
pub fn parse_transition_fields<S: AsRef<str>>(lines: &[S]) -> Vec<TransitionFields> {
    lines
        .iter()
        .filter_map(|line| TransitionFields::parse(line.as_ref()))
        .collect()
}

/// One formatted `Action = ...; Component = [...]` line per transition.
pub fn extract_transition_fields<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    parse_transition_fields(lines)
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn capture_trimmed(re: &Regex, haystack: &str) -> String {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
