// Core structs: ExtractedListing, Keywords, derived views, AnalysisReport
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_DEVELOPER: &str = "Unknown Developer";
pub const VARIES: &str = "Varies";
pub const EVERYONE: &str = "Everyone";
pub const NO_DESCRIPTION: &str = "No description available";

/// Flat record pulled out of one storefront page.
///
/// Every string field is non-empty: gaps resolve to the named defaults above.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedListing {
    pub title: String,
    pub developer: String,
    pub category: String,
    /// Raw display string, e.g. "10M+".
    pub installs: String,
    pub version: String,
    pub size: String,
    pub content_rating: String,
    pub rating: f64,
    pub review_count: u64,
    /// Star level (1..=5) to approximate percentage.
    pub rating_distribution: BTreeMap<u8, u32>,
    pub description: String,
}

impl ExtractedListing {
    /// Description as scraped; empty when only the placeholder is present.
    pub fn description_text(&self) -> &str {
        if self.description == NO_DESCRIPTION {
            ""
        } else {
            &self.description
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keywords {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    /// Simulated search ranks for primary keywords. Derived, never observed.
    #[serde(rename = "simulatedPositions")]
    pub positions: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub title_optimization: u32,
    pub description_quality: u32,
    pub keyword_density: u32,
    /// Placeholder: screenshots are never inspected.
    pub visual_assets: u32,
    pub user_engagement: u32,
}

impl ScoreBreakdown {
    /// Integer average (floor) of the five metrics.
    pub fn average(&self) -> u32 {
        (self.title_optimization
            + self.description_quality
            + self.keyword_density
            + self.visual_assets
            + self.user_engagement)
            / 5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AsoScore {
    pub overall: u32,
    pub breakdown: ScoreBreakdown,
}

impl AsoScore {
    pub fn from_breakdown(breakdown: ScoreBreakdown) -> Self {
        Self {
            overall: breakdown.average(),
            breakdown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competition {
    pub ranking: String,
    pub level: String,
    pub saturation: String,
    pub opportunities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Factors {
    pub technical: String,
    pub demand: String,
    pub barrier: String,
    pub unique_features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloneFeasibility {
    pub score: u32,
    pub difficulty: String,
    pub recommendation: String,
    pub factors: Factors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub title: String,
    pub developer: String,
    pub category: String,
    pub installs: String,
    pub version: String,
    pub size: String,
    pub content_rating: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratings {
    pub overall: f64,
    pub total_reviews: u64,
    pub distribution: BTreeMap<u8, u32>,
}

impl From<&ExtractedListing> for AppInfo {
    fn from(listing: &ExtractedListing) -> Self {
        Self {
            title: listing.title.clone(),
            developer: listing.developer.clone(),
            category: listing.category.clone(),
            installs: listing.installs.clone(),
            version: listing.version.clone(),
            size: listing.size.clone(),
            content_rating: listing.content_rating.clone(),
        }
    }
}

impl From<&ExtractedListing> for Ratings {
    fn from(listing: &ExtractedListing) -> Self {
        Self {
            overall: listing.rating,
            total_reviews: listing.review_count,
            distribution: listing.rating_distribution.clone(),
        }
    }
}

/// Complete result of one analysis. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub package_id: String,
    pub analyzed_at: DateTime<Utc>,
    pub app_info: AppInfo,
    pub ratings: Ratings,
    pub keywords: Keywords,
    pub aso_score: AsoScore,
    pub competition: Competition,
    pub clone_feasibility: CloneFeasibility,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid package id: {0:?}")]
    InvalidPackageId(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("storefront responded with status {0}")]
    Status(u16),
    #[error("failed to read response body: {0}")]
    Body(String),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector {0:?}: {1}")]
    InvalidSelector(&'static str, String),
    #[error("invalid pattern {0:?}: {1}")]
    InvalidPattern(&'static str, String),
}

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("endpoint responded with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("schema violation: {0}")]
    Schema(String),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("analysis failed: {0}")]
    Aggregation(String),
}
