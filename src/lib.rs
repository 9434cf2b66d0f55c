//! App Store Optimization analysis for Play Store listings.
//!
//! [`Aggregator::analyze`] fetches a listing page, extracts its fields through
//! fallback rule cascades, mines keywords and derives the score, competition,
//! clone-feasibility and recommendation views. Narrative enrichment is
//! optional; every enrichment failure falls back to the deterministic
//! heuristics in [`analyzer`].

pub mod aggregator;
pub mod analyzer;
pub mod config;
pub mod demo;
pub mod fetcher;
pub mod model;
pub mod narrative;
pub mod parser;
pub mod utils;

pub use aggregator::Aggregator;
pub use model::{AnalysisError, AnalysisReport};
