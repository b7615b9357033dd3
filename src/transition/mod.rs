pub mod clean;
pub mod extractor;
pub mod normalizer;
