use crate::model::FetchError;

/// Supplies the raw storefront page for a package id.
#[async_trait::async_trait]
pub trait ListingFetcher: Send + Sync {
    async fn fetch(&self, package_id: &str) -> Result<String, FetchError>;
}
