use once_cell::sync::Lazy;
use regex::Regex;

/// `States (<count>):` header line; the section body starts right after it.
pub static STATES_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*States \((\d+)\):[ \t]*\r?$\n?").unwrap());

/// `Transitions (<count>):` header line.
pub static TRANSITIONS_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*Transitions \((\d+)\):").unwrap());

/// Start of a screen block inside the States section: `<hash>,`
pub static SCREEN_BLOCK_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[a-f0-9]{64},").unwrap());

/// Screen block header: hash followed by a comma-terminated name field.
pub static SCREEN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-f0-9]{64}),\s*([^,]+),").unwrap());

pub static LEADING_HASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-f0-9]{64}").unwrap());

/// Start of a transition record: `<hash>:`
pub static TRANSITION_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-f0-9]{64}:").unwrap());

/// Full transition header: `<hash>: (s:<hash>, t:<hash>): <payload>`
pub static TRANSITION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([a-f0-9]{64}):\s*\(s:\s*([a-f0-9]+)\s*,\s*t:\s*([a-f0-9]+)\s*\):(.*)$")
        .unwrap()
});

/// Header of a normalized transition line: `T<n>: (s:S<a>,t:S<b>): <payload>`
pub static NORMALIZED_TRANSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(T(\d+):\s*\(s:(S\d+),t:(S\d+)\)):(.*)$").unwrap());

/// Exploration-internal `weight=` metadata and everything after it.
pub static WEIGHT_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\bweight=.*").unwrap());

/// Shorten a record for log output.
pub fn excerpt(text: &str) -> String {
    const MAX_CHARS: usize = 50;
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
