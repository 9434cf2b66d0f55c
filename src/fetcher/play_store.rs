use crate::config::FetchConfig;
use crate::fetcher::traits::ListingFetcher;
use crate::model::FetchError;

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use reqwest::{Client, redirect};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fetches Play Store detail pages with a browser-like client.
pub struct PlayStoreFetcher {
    client: Client,
    base_url: String,
    language: String,
    country: String,
}

impl PlayStoreFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, header_value(&cfg.referrer)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&cfg.accept_language)?);

        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .default_headers(headers)
            .redirect(redirect::Policy::limited(cfg.max_redirects))
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
            language: cfg.language.clone(),
            country: cfg.country.clone(),
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|e| FetchError::Http(format!("bad header {value:?}: {e}")))
}

/// Android package names: dot-separated segments of letters, digits and underscores.
pub fn validate_package_id(package_id: &str) -> Result<(), FetchError> {
    let valid = !package_id.is_empty()
        && package_id
            .split('.')
            .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if valid {
        Ok(())
    } else {
        Err(FetchError::InvalidPackageId(package_id.to_string()))
    }
}

#[async_trait::async_trait]
impl ListingFetcher for PlayStoreFetcher {
    async fn fetch(&self, package_id: &str) -> Result<String, FetchError> {
        validate_package_id(package_id)?;
        debug!("Fetching listing page for {}", package_id);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("id", package_id),
                ("hl", self.language.as_str()),
                ("gl", self.country.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("❌ Storefront responded [{}] for {}", status, package_id);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(e.to_string())
            }
        })?;
        info!("Fetched listing page for {} ({} bytes)", package_id, body.len());
        Ok(body)
    }
}
