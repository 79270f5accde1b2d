pub mod adaptive_reader;
pub mod content_range;
