use regex::{NoExpand, Regex};
use tracing::trace;

use crate::canonical::id_map::IdMap;

// ============================================================================
// Screen id rewriting
// ============================================================================

/// Replace every canonical screen id (`S<n>`) in `text` with its hash.
///
/// Ids are substituted highest number first and only as whole tokens, so
/// `S1` never touches `S10`, `S1X` or `9S1`.
pub fn rewrite_canonical_to_original_screens(text: &str, screen_ids: &IdMap) -> String {
    let mut pairs: Vec<(&str, &str)> = screen_ids
        .canonical_to_original()
        .iter()
        .map(|(canonical, original)| (canonical.as_str(), original.as_str()))
        .collect();
    pairs.sort_by(|a, b| {
        let key = |id: &str| screen_ids.numeric_suffix(id).unwrap_or(0);
        key(b.0).cmp(&key(a.0)).then_with(|| b.0.cmp(a.0))
    });

    replace_tokens(text, &pairs)
}

/// Replace every original screen hash in `text` with its canonical id.
///
/// Hashes are substituted longest first (ties in reverse lexicographic
/// order) and only as whole tokens.
pub fn rewrite_original_to_canonical_screens(text: &str, screen_ids: &IdMap) -> String {
    let mut pairs: Vec<(&str, &str)> = screen_ids
        .original_to_canonical()
        .iter()
        .map(|(original, canonical)| (original.as_str(), canonical.as_str()))
        .collect();
    pairs.sort_by(|a, b| (b.0.len(), b.0).cmp(&(a.0.len(), a.0)));

    replace_tokens(text, &pairs)
}

/// Apply `(from, to)` whole-token substitutions in the given order.
fn replace_tokens(text: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = text.to_string();
    for &(from, to) in pairs {
        if !out.contains(from) {
            continue;
        }
        let Ok(re) = Regex::new(&format!(r"\b{}\b", regex::escape(from))) else {
            continue;
        };
        out = re.replace_all(&out, NoExpand(to)).into_owned();
        trace!(from, to, "rewrote screen id");
    }
    out
}
