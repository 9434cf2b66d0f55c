// Narrative enrichment: text-generation backed derivations with heuristic fallback.

pub mod client;
pub mod prompts;
pub mod response;

pub use client::{CompletionClient, OpenAiClient};

use crate::analyzer;
use crate::config::NarrativeConfig;
use crate::model::{AsoScore, CloneFeasibility, ExtractedListing, Keywords, NarrativeError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Best-effort enrichment. Every operation returns a usable value: on any
/// failure it logs and returns what the heuristic scorer computes for the
/// same listing.
#[derive(Clone)]
pub struct NarrativeService {
    client: Arc<dyn CompletionClient>,
    call_timeout: Duration,
}

impl NarrativeService {
    pub fn new(client: Arc<dyn CompletionClient>, call_timeout: Duration) -> Self {
        Self { client, call_timeout }
    }

    /// `None` when disabled, when no API key is available, or when the HTTP
    /// client cannot be built.
    pub fn from_config(cfg: &NarrativeConfig) -> Option<Self> {
        if !cfg.enabled {
            info!("Narrative enrichment disabled by config");
            return None;
        }
        let Some(api_key) = cfg.resolved_api_key() else {
            info!("No narrative API key configured, using heuristics only");
            return None;
        };
        match OpenAiClient::new(cfg, api_key) {
            Ok(client) => Some(Self::new(Arc::new(client), Duration::from_secs(cfg.timeout_seconds))),
            Err(e) => {
                warn!("Failed to build narrative client: {}", e);
                None
            }
        }
    }

    async fn ask(&self, prompt: &str) -> Result<String, NarrativeError> {
        match timeout(self.call_timeout, self.client.complete(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(NarrativeError::Timeout),
        }
    }

    pub async fn generate_score(&self, listing: &ExtractedListing) -> AsoScore {
        let fallback = analyzer::listing_score(listing);
        let result = self
            .ask(&prompts::score_prompt(listing))
            .await
            .and_then(|content| response::parse_score(&content, &fallback));
        settle("score", result, fallback)
    }

    pub async fn generate_clone_feasibility(
        &self,
        listing: &ExtractedListing,
        keywords: &Keywords,
    ) -> CloneFeasibility {
        let fallback = analyzer::listing_clone_feasibility(listing, keywords);
        let result = self
            .ask(&prompts::clone_feasibility_prompt(listing, &keywords.primary))
            .await
            .and_then(|content| response::parse_clone_feasibility(&content, &fallback));
        settle("clone feasibility", result, fallback)
    }

    pub async fn generate_recommendations(
        &self,
        listing: &ExtractedListing,
        keywords: &Keywords,
    ) -> Vec<String> {
        let fallback = analyzer::listing_recommendations(listing, keywords);
        let all_keywords: Vec<String> = keywords
            .primary
            .iter()
            .chain(&keywords.secondary)
            .cloned()
            .collect();
        let result = self
            .ask(&prompts::recommendations_prompt(listing, &all_keywords))
            .await
            .and_then(|content| response::parse_recommendations(&content));
        settle("recommendations", result, fallback)
    }
}

fn settle<T>(what: &str, result: Result<T, NarrativeError>, fallback: T) -> T {
    match result {
        Ok(value) => {
            debug!("Narrative {} accepted", what);
            value
        }
        Err(e) => {
            warn!("⚠️ Narrative {} failed, using heuristic fallback: {}", what, e);
            fallback
        }
    }
}
