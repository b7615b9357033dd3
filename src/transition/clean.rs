use crate::trace::patterns::WEIGHT_SUFFIX;

/// Drop the ` weight=...` tail the explorer appends to a transition.
pub fn clean_transition_line(line: &str) -> String {
    WEIGHT_SUFFIX.replace(line, "").trim().to_string()
}

/// [`clean_transition_line`] over a list. Idempotent.
pub fn clean_transition_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| clean_transition_line(line.as_ref()))
        .collect()
}
