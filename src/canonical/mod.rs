pub mod id_map;
pub mod screen_ids;
