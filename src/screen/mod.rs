pub mod blocks;
pub mod listing;
