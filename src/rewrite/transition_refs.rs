use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::canonical::id_map::IdMap;

/// Surface spellings of a transition reference, tried leftmost first and
/// then in listed order. Every alternative captures just the number.
static TRANSITION_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?im)",
        // <1>, <T1>
        r"<[ \t]*T?(\d+)[ \t]*>[ \t\r]*$",
        // (1), (T1)
        r"|\([ \t]*T?(\d+)[ \t]*\)[ \t\r]*$",
        // [1], [T1]
        r"|\[[ \t]*T?(\d+)[ \t]*\][ \t\r]*$",
        // transition_id=23, [transition_id: T46], transition_id-7
        r"|[(<\[]?[ \t]*transition_id[ \t]*[:=\-][ \t]*T?[ \t]*(\d+)[ \t]*[)> \]]?[ \t\r]*$",
        // (transition T1), <transition T2>
        r"|\(?[ \t]*transition[ \t]+T?(\d+)[ \t]*\)?[ \t\r]*$",
        // Transition: T11, Transition T11
        r"|^Transition[: ][ \t]*T?(\d+)[ \t\r]*$",
        // bare T5 / 5 alone on a line
        r"|^T?(\d+)[ \t\r]*$",
        // "transition T3" mid-sentence; the prose prefix is kept
        r"|(?P<lead>\btransition[ \t]+)T(\d+)\b",
    ))
    .unwrap()
});

/// Rewrite loosely written transition references to `<original-id>` tags.
///
/// Meant for free text produced downstream (model answers and the like).
/// Each recognized reference becomes `<hash>` when `T<n>` is in the map
/// and `<T<n>>` otherwise; unrecognized spellings are left alone.
pub fn normalize_transition_references(text: &str, transition_ids: &IdMap) -> String {
    TRANSITION_REFERENCE
        .replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            let lead = caps.name("lead");
            if lead.is_some() && inside_angle_brackets(text, caps) {
                return whole.to_string();
            }

            // Number groups are all digits; `lead` never is.
            let number = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .find(|s| s.bytes().all(|b| b.is_ascii_digit()))
                .unwrap_or_default();
            let tid = format!("T{}", number);
            let tag = match transition_ids.original_of(&tid) {
                Some(original) => format!("<{}>", original),
                None => format!("<{}>", tid),
            };
            match lead {
                Some(lead) => format!("{}{}", lead.as_str(), tag),
                None => tag,
            }
        })
        .into_owned()
}

/// Mid-line match wrapped in angle brackets, as in `<transition T2>`.
fn inside_angle_brackets(text: &str, caps: &Captures) -> bool {
    let Some(whole) = caps.get(0) else {
        return false;
    };
    let before = text[..whole.start()].trim_end_matches([' ', '\t']);
    let after = text[whole.end()..].trim_start_matches([' ', '\t']);
    before.ends_with('<') || after.starts_with('>')
}
