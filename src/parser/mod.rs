// Extraction: rule tables and the cascade runner.

pub mod listing_parser;
pub mod rules;

pub use listing_parser::{default_distribution, ListingExtractor};
