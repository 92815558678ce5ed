// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Pipeline-internal place types and the exported business record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for a missing phone number or website
pub const UNAVAILABLE: &str = "Unavailable";
/// Placeholder for a missing address
pub const ADDRESS_UNAVAILABLE: &str = "Address unavailable";
/// Placeholder for a missing place name
pub const NAME_UNAVAILABLE: &str = "N/A";

/// Geographic coordinates resolved from the requested city
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Formats as "lat,lng", the form the nearby search endpoint expects
impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// One nearby search result, before details are fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCandidate {
    /// Provider place identifier; None if the provider omitted it
    pub place_id: Option<String>,
    pub name: String,
    /// Short address from the search result
    pub vicinity: String,
}

impl PlaceCandidate {
    /// Build a candidate, substituting placeholders for missing fields
    pub fn new(place_id: Option<String>, name: Option<String>, vicinity: Option<String>) -> Self {
        Self {
            place_id: non_empty(place_id),
            name: non_empty(name).unwrap_or_else(|| NAME_UNAVAILABLE.to_string()),
            vicinity: non_empty(vicinity).unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string()),
        }
    }
}

/// Phone and website for one place
/// DOCUMENTATION: Both fields always hold either a value or UNAVAILABLE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceDetail {
    pub phone: String,
    pub website: String,
}

impl PlaceDetail {
    pub fn new(phone: Option<String>, website: Option<String>) -> Self {
        Self {
            phone: non_empty(phone).unwrap_or_else(|| UNAVAILABLE.to_string()),
            website: non_empty(website).unwrap_or_else(|| UNAVAILABLE.to_string()),
        }
    }

    /// Details with every field set to the placeholder
    pub fn unavailable() -> Self {
        Self::new(None, None)
    }
}

/// Flattened row shown in the table and written to the CSV export
/// DOCUMENTATION: Column order is Name, Address, Phone, Website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusinessRecord {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
}

impl BusinessRecord {
    /// Join a search candidate with its details
    pub fn from_parts(candidate: PlaceCandidate, detail: PlaceDetail) -> Self {
        Self {
            name: candidate.name,
            address: candidate.vicinity,
            phone: detail.phone,
            website: detail.website,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
