// src/handlers/search.rs
// DOCUMENTATION: One search submission, end to end
// PURPOSE: Run the service, show the result, export on request

use crate::errors::SearchError;
use crate::handlers::{form, results};
use crate::models::SearchRequest;
use crate::services::{export_to_path, SearchService};
use colored::*;
use std::path::Path;

/// Whether a successful, non-empty result is written to CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Always,
    Never,
    Ask,
}

/// Run one search and report it
/// DOCUMENTATION: Fatal errors are printed and returned; no table is
/// shown for a failed run. An empty result is a warning and succeeds.
pub async fn handle_search(
    service: &SearchService,
    request: &SearchRequest,
    export_path: &Path,
    export_mode: ExportMode,
) -> Result<(), SearchError> {
    println!(
        "{}",
        format!(
            "🔍 Searching \"{}\" within {} m of {}...",
            request.category, request.radius_meters, request.city
        )
        .bright_blue()
    );

    let outcome = match service.run(request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("Search failed [{}]: {}", e.code(), e);
            results::print_error(&e);
            return Err(e);
        }
    };

    results::print_outcome(&outcome);
    for failure in &outcome.detail_failures {
        log::debug!("Row {} degraded: {}", failure.index + 1, failure.reason);
    }

    if outcome.is_empty() {
        return Ok(());
    }

    let export = match export_mode {
        ExportMode::Always => true,
        ExportMode::Never => false,
        ExportMode::Ask => form::confirm_export(&export_path.display().to_string())
            .map_err(|e| SearchError::Prompt(e.to_string()))?,
    };

    if export {
        if let Err(e) = export_to_path(&outcome.records, export_path) {
            results::print_error(&e);
            return Err(e);
        }
        println!();
        println!(
            "{} {}",
            "💾 Saved to".green(),
            export_path.display().to_string().bright_white().bold()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetailFailurePolicy;
    use crate::models::{GeoLocation, PlaceCandidate, PlaceDetail};
    use crate::services::{read_csv, MockMapsProvider};
    use std::fs::File;
    use std::sync::Arc;

    fn service_with(candidates: Vec<PlaceCandidate>) -> SearchService {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode()
            .returning(|_| Ok(GeoLocation::new(48.8566, 2.3522)));
        mock.expect_nearby_search()
            .returning(move |_, _, _| Ok(candidates.clone()));
        mock.expect_place_details()
            .returning(|_| Ok(PlaceDetail::new(Some("01 40 00 00 00".to_string()), None)));
        SearchService::with_options(Arc::new(mock), 1, DetailFailurePolicy::Degrade)
    }

    fn request() -> SearchRequest {
        SearchRequest::new("Paris", "bakery", 1000).unwrap()
    }

    #[tokio::test]
    async fn test_always_mode_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commerces.csv");
        let service = service_with(vec![PlaceCandidate::new(
            Some("p1".to_string()),
            Some("Du Pain et des Idees".to_string()),
            Some("34 Rue Yves Toudic".to_string()),
        )]);

        handle_search(&service, &request(), &path, ExportMode::Always)
            .await
            .unwrap();

        let records = read_csv(File::open(&path).unwrap()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Du Pain et des Idees");
        assert_eq!(records[0].phone, "01 40 00 00 00");
    }

    #[tokio::test]
    async fn test_never_mode_skips_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commerces.csv");
        let service = service_with(vec![PlaceCandidate::new(
            Some("p1".to_string()),
            Some("Poilane".to_string()),
            None,
        )]);

        handle_search(&service, &request(), &path, ExportMode::Never)
            .await
            .unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_empty_result_is_not_exported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commerces.csv");
        let service = service_with(Vec::new());

        handle_search(&service, &request(), &path, ExportMode::Always)
            .await
            .unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_fatal_error_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commerces.csv");
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode()
            .returning(|_| Err(SearchError::NotFound("ZERO_RESULTS".to_string())));
        mock.expect_nearby_search().times(0);
        let service = SearchService::with_options(Arc::new(mock), 1, DetailFailurePolicy::Degrade);

        let result = handle_search(&service, &request(), &path, ExportMode::Always).await;

        assert!(matches!(result, Err(SearchError::NotFound(_))));
        assert!(!path.exists());
    }
}
