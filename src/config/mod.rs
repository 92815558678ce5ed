// src/config/mod.rs
// DOCUMENTATION: Configuration module organization
// PURPOSE: Re-export configuration components

pub mod env;
pub mod http;

pub use env::{Config, DetailFailurePolicy};
pub use http::init_http_client;
