// Analyzer module: keyword mining and the deterministic heuristic scorer.

pub mod keywords;
pub mod market;
pub mod recommendations;
pub mod scoring;

pub use keywords::KeywordMiner;
pub use market::{clone_feasibility, competition, difficulty_for};
pub use recommendations::recommendations;
pub use scoring::score;

use crate::model::{AsoScore, CloneFeasibility, Competition, ExtractedListing, Keywords};
use crate::utils::parse_count;

// Listing-level entry points, shared by the aggregator and the narrative fallbacks.

pub fn listing_score(listing: &ExtractedListing) -> AsoScore {
    score(&listing.title, listing.description_text(), listing.rating, listing.review_count)
}

pub fn listing_competition(listing: &ExtractedListing) -> Competition {
    competition(&listing.category, listing.rating, parse_count(&listing.installs))
}

pub fn listing_clone_feasibility(listing: &ExtractedListing, keywords: &Keywords) -> CloneFeasibility {
    clone_feasibility(
        &listing.category,
        listing.rating,
        listing.review_count,
        parse_count(&listing.installs),
        keywords,
    )
}

pub fn listing_recommendations(listing: &ExtractedListing, keywords: &Keywords) -> Vec<String> {
    recommendations(&listing.title, listing.description_text(), keywords, listing.rating)
}
