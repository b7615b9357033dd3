pub mod screen_ids;
pub mod transition_refs;
