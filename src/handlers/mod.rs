// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod form;
pub mod results;
pub mod search;

pub use search::{handle_search, ExportMode};
