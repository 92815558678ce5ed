// src/models/search.rs
// DOCUMENTATION: Search input model
// PURPOSE: The validated user request that drives one pipeline run

use crate::errors::SearchError;
use validator::{Validate, ValidationError};

/// Smallest accepted search radius, in meters
pub const RADIUS_MIN: u32 = 100;
/// Largest accepted search radius, in meters (provider maximum)
pub const RADIUS_MAX: u32 = 50_000;

/// Clamp a radius into the accepted range
pub fn clamp_radius(radius: u32) -> u32 {
    radius.clamp(RADIUS_MIN, RADIUS_MAX)
}

/// Reject values that are empty once trimmed
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Request DTO for one search run
/// DOCUMENTATION: Built from user input at the presentation boundary
/// Validated again by SearchService before any network call
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SearchRequest {
    /// City or free-text address to geocode (required)
    #[validate(
        length(min = 1, message = "a city is required"),
        custom = "not_blank"
    )]
    pub city: String,

    /// Provider place type, e.g. "restaurant", "pharmacy" (required)
    #[validate(
        length(min = 1, message = "a business category is required"),
        custom = "not_blank"
    )]
    pub category: String,

    /// Search radius in meters
    #[validate(range(min = 100, max = 50000, message = "radius must be between 100 and 50000 meters"))]
    pub radius_meters: u32,
}

impl SearchRequest {
    /// Build and validate a request
    /// DOCUMENTATION: City and category are trimmed, so whitespace-only
    /// input is rejected like empty input
    pub fn new(
        city: impl AsRef<str>,
        category: impl AsRef<str>,
        radius_meters: u32,
    ) -> Result<Self, SearchError> {
        let request = SearchRequest {
            city: city.as_ref().trim().to_string(),
            category: category.as_ref().trim().to_string(),
            radius_meters,
        };
        request.validate()?;
        Ok(request)
    }
}
