// src/config/http.rs
// DOCUMENTATION: HTTP client initialization
// PURPOSE: Build the shared reqwest client used for every provider call

use crate::config::Config;
use reqwest::Client;
use std::time::Duration;

/// Initialize the HTTP client
/// DOCUMENTATION: Called once during startup; the client is handed to
/// GoogleMapsClient and reused for the geocode, search and details calls
pub fn init_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    log::debug!(
        "Initializing HTTP client (timeout: {}s)",
        config.request_timeout_secs
    );

    Client::builder()
        // Whole-request timeout; the pipeline has no timeout of its own
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.request_timeout_secs.min(5)))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
