// src/errors.rs
// DOCUMENTATION: Custom error types and user-facing messages
// PURPOSE: Centralized error handling for the search pipeline

use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every failure a search run can end with
/// Each variant maps to a fixed message shown to the user; the detail
/// strings carried by the variants only go to the log
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Provider rejected request ({status}): {message}")]
    ProviderRejected { status: String, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Details lookup failed for {place}: {source}")]
    DetailLookup {
        place: String,
        #[source]
        source: Box<SearchError>,
    },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl SearchError {
    /// Short error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::Validation(_) => "VALIDATION_ERROR",
            SearchError::NotFound(_) => "NOT_FOUND",
            SearchError::ProviderRejected { .. } => "PROVIDER_REJECTED",
            SearchError::Transport(_) => "TRANSPORT_ERROR",
            SearchError::DetailLookup { .. } => "DETAIL_LOOKUP_ERROR",
            SearchError::Export(_) => "EXPORT_ERROR",
            SearchError::Prompt(_) => "PROMPT_ERROR",
        }
    }

    /// Convert SearchError to a message for the end user
    /// DOCUMENTATION: Raw transport text never reaches the user, except
    /// for validation messages which describe their own input
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Validation(msg) => format!("Invalid input: {}", msg),
            SearchError::NotFound(_) => {
                "City not found. Try another city.".to_string()
            }
            SearchError::ProviderRejected { status, .. } => format!(
                "The mapping provider refused the request ({}). Check the API key and quota.",
                status
            ),
            SearchError::Transport(_) => {
                "Could not reach the mapping provider. Please try again later.".to_string()
            }
            SearchError::DetailLookup { place, .. } => format!(
                "Details could not be retrieved for \"{}\"; the search was aborted.",
                place
            ),
            SearchError::Export(_) => "The CSV file could not be written.".to_string(),
            SearchError::Prompt(_) => {
                "No answer could be read from the terminal. Use --yes or --no-export when not running interactively."
                    .to_string()
            }
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::Transport(e.to_string())
    }
}

impl From<validator::ValidationErrors> for SearchError {
    fn from(e: validator::ValidationErrors) -> Self {
        SearchError::Validation(e.to_string())
    }
}

impl From<csv::Error> for SearchError {
    fn from(e: csv::Error) -> Self {
        SearchError::Export(e.to_string())
    }
}

impl From<std::io::Error> for SearchError {
    fn from(e: std::io::Error) -> Self {
        SearchError::Export(e.to_string())
    }
}
