// src/handlers/form.rs
// DOCUMENTATION: Interactive search form
// PURPOSE: Prompt for city, category and radius; ask before exporting

use crate::models::{SearchRequest, RADIUS_MAX, RADIUS_MIN};
use dialoguer::{Confirm, Input};

fn require_text(field: &'static str) -> impl FnMut(&String) -> Result<(), String> {
    move |input: &String| {
        if input.trim().is_empty() {
            Err(format!("Please enter a {}.", field))
        } else {
            Ok(())
        }
    }
}

fn check_radius(radius: &u32) -> Result<(), String> {
    if (RADIUS_MIN..=RADIUS_MAX).contains(radius) {
        Ok(())
    } else {
        Err(format!(
            "Radius must be between {} and {} meters.",
            RADIUS_MIN, RADIUS_MAX
        ))
    }
}

/// Ask for the three search inputs
/// DOCUMENTATION: Each field is re-asked until valid, so the returned
/// request always passes validation
pub fn prompt_request(default_radius: u32) -> anyhow::Result<SearchRequest> {
    let city: String = Input::new()
        .with_prompt("City")
        .validate_with(require_text("city"))
        .interact_text()?;

    let category: String = Input::new()
        .with_prompt("Business type (e.g. restaurant, pharmacy)")
        .validate_with(require_text("business type"))
        .interact_text()?;

    let radius: u32 = Input::new()
        .with_prompt("Search radius (m)")
        .default(default_radius)
        .validate_with(check_radius)
        .interact_text()?;

    SearchRequest::new(city, category, radius).map_err(|e| anyhow::anyhow!(e.user_message()))
}

/// Ask whether to write the CSV file
pub fn confirm_export(path: &str) -> anyhow::Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!("Export results to {}?", path))
        .default(true)
        .interact()?)
}

/// Ask whether to run another search
pub fn confirm_again() -> anyhow::Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Run another search?")
        .default(false)
        .interact()?)
}
