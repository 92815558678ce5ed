// src/services/google_maps_client.rs
// DOCUMENTATION: Google Maps Platform client
// PURPOSE: Geocoding, nearby search and place details over HTTPS

use crate::config::Config;
use crate::errors::SearchError;
use crate::models::{GeoLocation, PlaceCandidate, PlaceDetail};
use crate::services::MapsProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Field mask for place details: only what the export needs
pub const DETAILS_FIELDS: &str = "formatted_phone_number,website";

/// Google Maps API client
/// DOCUMENTATION: Holds the API key and endpoints; no per-run state
pub struct GoogleMapsClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Maps API key
    api_key: String,
    /// Geocoding endpoint
    geocode_url: String,
    /// Base URL for Places endpoints
    places_base_url: String,
}

/// Response from the Geocoding API
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Status of the API call
    pub status: String,
    /// Candidate locations, best match first
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Error message (if status is not OK)
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: GoogleGeometry,
}

/// Geographic location from Google
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleGeometry {
    pub location: GoogleLocation,
}

/// Coordinates from Google
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Response from Google Places Nearby Search
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GooglePlace>,
    /// Next page token; never followed
    pub next_page_token: Option<String>,
    pub error_message: Option<String>,
}

/// Individual place from a nearby search
#[derive(Debug, Clone, Deserialize)]
pub struct GooglePlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    /// Short address
    pub vicinity: Option<String>,
}

/// Response from Google Place Details
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    #[serde(default)]
    pub status: String,
    pub result: Option<GooglePlaceDetails>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GooglePlaceDetails {
    /// Phone number (formatted for local use)
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
}

impl GoogleMapsClient {
    /// Create new Google Maps API client
    /// DOCUMENTATION: The HTTP client carries the timeout; see config::http
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.google_maps_api_key.clone(),
            geocode_url: config.geocode_url.clone(),
            places_base_url: config.places_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issue a GET and decode the JSON body
    /// DOCUMENTATION: Connection failures, non-2xx statuses and
    /// undecodable bodies all map to SearchError::Transport
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SearchError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                log::error!("Google {} request failed: {}", endpoint, e);
                SearchError::Transport(format!("{} request failed: {}", endpoint, e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Google {} HTTP error {}: {}", endpoint, status, body);
            return Err(SearchError::Transport(format!(
                "{} HTTP error {}",
                endpoint, status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            log::error!("Failed to parse Google {} response: {}", endpoint, e);
            SearchError::Transport(format!("{} parse error: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl MapsProvider for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<GeoLocation, SearchError> {
        log::debug!("Google geocode lookup: address={}", address);

        let api_response: GeocodeResponse = self
            .get_json("geocode", &self.geocode_url, &[("address", address)])
            .await?;

        location_from_geocode(api_response)
    }

    async fn nearby_search(
        &self,
        location: GeoLocation,
        radius_meters: u32,
        category: &str,
    ) -> Result<Vec<PlaceCandidate>, SearchError> {
        let url = format!("{}/nearbysearch/json", self.places_base_url);
        let location_param = location.to_string();
        let radius_param = radius_meters.to_string();

        log::debug!(
            "Google Places nearby search: location={}, radius={}, type={}",
            location_param,
            radius_param,
            category
        );

        let api_response: NearbySearchResponse = self
            .get_json(
                "nearby search",
                &url,
                &[
                    ("location", location_param.as_str()),
                    ("radius", radius_param.as_str()),
                    ("type", category),
                ],
            )
            .await?;

        candidates_from_search(api_response)
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetail, SearchError> {
        let url = format!("{}/details/json", self.places_base_url);

        log::debug!("Google Places details lookup: place_id={}", place_id);

        let api_response: DetailsResponse = self
            .get_json(
                "place details",
                &url,
                &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
            )
            .await?;

        Ok(detail_from_response(place_id, api_response))
    }
}

/// Statuses meaning the provider refused the key or the quota is spent
fn rejection(status: &str, error_message: Option<String>) -> Option<SearchError> {
    match status {
        "REQUEST_DENIED" | "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => {
            let message = error_message.unwrap_or_else(|| "no message".to_string());
            log::error!("Google API refused request: {} ({})", status, message);
            Some(SearchError::ProviderRejected {
                status: status.to_string(),
                message,
            })
        }
        _ => None,
    }
}

/// Map a geocoding response to the first candidate location
fn location_from_geocode(api_response: GeocodeResponse) -> Result<GeoLocation, SearchError> {
    let GeocodeResponse {
        status,
        results,
        error_message,
    } = api_response;

    if let Some(err) = rejection(&status, error_message.clone()) {
        return Err(err);
    }

    match status.as_str() {
        "OK" => results
            .into_iter()
            .next()
            .map(|first| {
                GeoLocation::new(first.geometry.location.lat, first.geometry.location.lng)
            })
            .ok_or_else(|| SearchError::NotFound("OK with no results".to_string())),
        "ZERO_RESULTS" | "INVALID_REQUEST" => {
            log::info!("Geocoding found no match (status {})", status);
            Err(SearchError::NotFound(status.clone()))
        }
        other => {
            let msg = error_message.unwrap_or_else(|| format!("Unknown status: {}", other));
            log::error!("Google geocode unexpected status: {}", msg);
            Err(SearchError::Transport(msg))
        }
    }
}

/// Map a nearby search response to candidates, in provider order
fn candidates_from_search(
    api_response: NearbySearchResponse,
) -> Result<Vec<PlaceCandidate>, SearchError> {
    let NearbySearchResponse {
        status,
        results,
        next_page_token,
        error_message,
    } = api_response;

    if let Some(err) = rejection(&status, error_message.clone()) {
        return Err(err);
    }

    match status.as_str() {
        "OK" | "ZERO_RESULTS" => {
            if next_page_token.is_some() {
                log::warn!("More results are available; only the first page is used");
            }
            log::info!("Google Places search returned {} results", results.len());
            Ok(results
                .into_iter()
                .map(|place| PlaceCandidate::new(place.place_id, place.name, place.vicinity))
                .collect())
        }
        other => {
            let msg = error_message.unwrap_or_else(|| format!("Unknown status: {}", other));
            log::error!("Google Places search unexpected status: {}", msg);
            Err(SearchError::Transport(msg))
        }
    }
}

/// Map a details response to phone/website, placeholders for anything absent
fn detail_from_response(place_id: &str, api_response: DetailsResponse) -> PlaceDetail {
    if api_response.status != "OK" {
        log::warn!(
            "Details status {} for {}: {}",
            api_response.status,
            place_id,
            api_response.error_message.as_deref().unwrap_or("no message")
        );
    }

    match api_response.result {
        Some(result) => PlaceDetail::new(result.formatted_phone_number, result.website),
        None => PlaceDetail::unavailable(),
    }
}
