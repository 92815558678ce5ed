// src/services/provider.rs
// DOCUMENTATION: Mapping provider abstraction
// PURPOSE: The three lookups the search pipeline depends on

use crate::errors::SearchError;
use crate::models::{GeoLocation, PlaceCandidate, PlaceDetail};
use async_trait::async_trait;

/// Mapping provider interface
/// DOCUMENTATION: Implemented by GoogleMapsClient; SearchService only
/// talks to this trait. Every method performs exactly one outbound call.
///
/// Test mocks are generated with `cfg(test)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MapsProvider: Send + Sync {
    /// Resolve a free-text address to coordinates (first provider match)
    ///
    /// # Errors
    /// `NotFound` when the address cannot be resolved, `ProviderRejected`
    /// on credential/quota refusal, `Transport` when the call fails
    async fn geocode(&self, address: &str) -> Result<GeoLocation, SearchError>;

    /// One page of places of `category` within `radius_meters` of `location`
    ///
    /// # Errors
    /// An empty page is `Ok(vec![])`; `Transport` or `ProviderRejected` otherwise
    async fn nearby_search(
        &self,
        location: GeoLocation,
        radius_meters: u32,
        category: &str,
    ) -> Result<Vec<PlaceCandidate>, SearchError>;

    /// Phone and website for one place
    ///
    /// # Errors
    /// Only `Transport`; missing fields come back as placeholders
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetail, SearchError>;
}
