// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod export;
pub mod google_maps_client;
pub mod provider;
pub mod search_service;

pub use export::*;
pub use google_maps_client::*;
pub use provider::*;
pub use search_service::*;
