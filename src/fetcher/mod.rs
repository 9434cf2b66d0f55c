// Fetch collaborator: storefront page retrieval.

pub mod play_store;
pub mod traits;

pub use play_store::PlayStoreFetcher;
pub use traits::ListingFetcher;
