// src/services/search_service.rs
// DOCUMENTATION: Search orchestration
// PURPOSE: Geocode a city, search nearby places and enrich each one with details

use crate::config::{Config, DetailFailurePolicy};
use crate::errors::SearchError;
use crate::models::{BusinessRecord, GeoLocation, PlaceCandidate, PlaceDetail, SearchRequest};
use crate::services::MapsProvider;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

/// A details lookup that failed and was replaced by placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFailure {
    /// Position of the record in the result list
    pub index: usize,
    pub place_name: String,
    /// Log-level description of the failure
    pub reason: String,
}

/// Result of one successful run
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Coordinates the search was centred on
    pub location: GeoLocation,
    /// One record per search result, in provider order
    pub records: Vec<BusinessRecord>,
    /// Records whose details could not be fetched
    pub detail_failures: Vec<DetailFailure>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Search service
/// DOCUMENTATION: Runs the geocode → nearby search → details pipeline
/// against any MapsProvider. Holds no state between runs.
pub struct SearchService {
    provider: Arc<dyn MapsProvider>,
    /// Details lookups in flight at once; 1 keeps them strictly sequential
    detail_concurrency: usize,
    failure_policy: DetailFailurePolicy,
}

impl SearchService {
    pub fn new(provider: Arc<dyn MapsProvider>, config: &Config) -> Self {
        Self::with_options(
            provider,
            config.detail_concurrency,
            config.detail_failure_policy,
        )
    }

    pub fn with_options(
        provider: Arc<dyn MapsProvider>,
        detail_concurrency: usize,
        failure_policy: DetailFailurePolicy,
    ) -> Self {
        Self {
            provider,
            detail_concurrency: detail_concurrency.max(1),
            failure_policy,
        }
    }

    /// Run one search
    /// DOCUMENTATION: Main pipeline method
    ///
    /// Process:
    /// 1. Validate the request (no network call on failure)
    /// 2. Geocode the city; failure aborts the run
    /// 3. Nearby search around the location; failure aborts the run
    /// 4. Fetch details for each candidate, keeping candidate order
    /// 5. Join candidates and details into records
    ///
    /// # Returns
    /// SearchOutcome with exactly one record per search result; an empty
    /// result set is a successful outcome, not an error
    pub async fn run(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        request.validate()?;

        let start_time = Instant::now();
        log::info!(
            "Starting search: city={}, category={}, radius={}m",
            request.city,
            request.category,
            request.radius_meters
        );

        let location = self.provider.geocode(&request.city).await?;
        log::debug!("Resolved {} to {}", request.city, location);

        let candidates = self
            .provider
            .nearby_search(location, request.radius_meters, &request.category)
            .await?;

        if candidates.is_empty() {
            log::info!("No places found for {} near {}", request.category, request.city);
            return Ok(SearchOutcome {
                location,
                records: Vec::new(),
                detail_failures: Vec::new(),
            });
        }

        let (records, detail_failures) = self.enrich(candidates).await?;

        log::info!(
            "Search completed: {} records, {} degraded, {:.1}s",
            records.len(),
            detail_failures.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(SearchOutcome {
            location,
            records,
            detail_failures,
        })
    }

    /// Fetch details for every candidate
    /// DOCUMENTATION: `buffered` yields results in input order whatever the
    /// concurrency, so records line up with candidates by position
    async fn enrich(
        &self,
        candidates: Vec<PlaceCandidate>,
    ) -> Result<(Vec<BusinessRecord>, Vec<DetailFailure>), SearchError> {
        let total = candidates.len();
        let mut records = Vec::with_capacity(total);
        let mut failures = Vec::new();

        let mut lookups = stream::iter(candidates.into_iter().enumerate())
            .map(|(idx, candidate)| async move {
                log::debug!("Fetching details {}/{}: {}", idx + 1, total, candidate.name);
                let detail = self.lookup(&candidate).await;
                (idx, candidate, detail)
            })
            .buffered(self.detail_concurrency);

        while let Some((idx, candidate, detail)) = lookups.next().await {
            let detail = match detail {
                Ok(detail) => detail,
                Err(e) => match self.failure_policy {
                    DetailFailurePolicy::Abort => {
                        log::error!("Details failed for {}: {}; aborting", candidate.name, e);
                        return Err(SearchError::DetailLookup {
                            place: candidate.name,
                            source: Box::new(e),
                        });
                    }
                    DetailFailurePolicy::Degrade => {
                        log::warn!(
                            "Could not fetch details for {}: {}. Using placeholders.",
                            candidate.name,
                            e
                        );
                        failures.push(DetailFailure {
                            index: idx,
                            place_name: candidate.name.clone(),
                            reason: e.to_string(),
                        });
                        PlaceDetail::unavailable()
                    }
                },
            };

            records.push(BusinessRecord::from_parts(candidate, detail));
        }

        Ok((records, failures))
    }

    async fn lookup(&self, candidate: &PlaceCandidate) -> Result<PlaceDetail, SearchError> {
        match candidate.place_id.as_deref() {
            Some(place_id) => self.provider.place_details(place_id).await,
            None => {
                log::debug!("No place_id for {}; skipping details", candidate.name);
                Ok(PlaceDetail::unavailable())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNAVAILABLE;
    use crate::services::MockMapsProvider;

    fn lyon() -> GeoLocation {
        GeoLocation::new(45.764, 4.8357)
    }

    fn candidate(id: &str, name: &str) -> PlaceCandidate {
        PlaceCandidate::new(
            Some(id.to_string()),
            Some(name.to_string()),
            Some(format!("{} street, Lyon", name)),
        )
    }

    fn request() -> SearchRequest {
        SearchRequest::new("Lyon", "restaurant", 5000).unwrap()
    }

    fn service(mock: MockMapsProvider, policy: DetailFailurePolicy) -> SearchService {
        SearchService::with_options(Arc::new(mock), 1, policy)
    }

    #[tokio::test]
    async fn test_run_returns_one_record_per_candidate_in_order() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().times(1).returning(|address| {
            assert_eq!(address, "Lyon");
            Ok(lyon())
        });
        mock.expect_nearby_search()
            .times(1)
            .returning(|location, radius, category| {
                assert_eq!(location, lyon());
                assert_eq!(radius, 5000);
                assert_eq!(category, "restaurant");
                Ok(vec![
                    candidate("p1", "Le Bouchon"),
                    candidate("p2", "La Mere Brazier"),
                    candidate("p3", "Daniel et Denise"),
                ])
            });
        mock.expect_place_details()
            .times(3)
            .returning(|place_id| {
                Ok(PlaceDetail::new(
                    Some(format!("phone-{}", place_id)),
                    Some(format!("https://{}.example", place_id)),
                ))
            });

        let outcome = service(mock, DetailFailurePolicy::Degrade)
            .run(&request())
            .await
            .unwrap();

        let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Le Bouchon", "La Mere Brazier", "Daniel et Denise"]);
        assert_eq!(outcome.records[1].phone, "phone-p2");
        assert_eq!(outcome.records[2].website, "https://p3.example");
        assert!(outcome.detail_failures.is_empty());
    }

    #[tokio::test]
    async fn test_missing_detail_fields_become_placeholders() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().returning(|_| Ok(lyon()));
        mock.expect_nearby_search()
            .returning(|_, _, _| Ok(vec![candidate("p1", "Pharmacie Centrale")]));
        mock.expect_place_details()
            .returning(|_| Ok(PlaceDetail::new(None, None)));

        let outcome = service(mock, DetailFailurePolicy::Degrade)
            .run(&request())
            .await
            .unwrap();

        assert_eq!(outcome.records[0].phone, UNAVAILABLE);
        assert_eq!(outcome.records[0].website, UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_empty_city_makes_no_calls() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().times(0);
        mock.expect_nearby_search().times(0);
        mock.expect_place_details().times(0);

        let request = SearchRequest {
            city: String::new(),
            category: "restaurant".to_string(),
            radius_meters: 5000,
        };
        let result = service(mock, DetailFailurePolicy::Degrade).run(&request).await;

        assert!(matches!(result, Err(SearchError::Validation(_))));
    }

    #[tokio::test]
    async fn test_blank_city_makes_no_calls() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().times(0);
        mock.expect_nearby_search().times(0);
        mock.expect_place_details().times(0);

        let request = SearchRequest {
            city: "   ".to_string(),
            category: "restaurant".to_string(),
            radius_meters: 5000,
        };
        let result = service(mock, DetailFailurePolicy::Degrade).run(&request).await;

        assert!(matches!(result, Err(SearchError::Validation(_))));
    }

    #[tokio::test]
    async fn test_blank_category_makes_no_calls() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().times(0);
        mock.expect_nearby_search().times(0);
        mock.expect_place_details().times(0);

        let request = SearchRequest {
            city: "Lyon".to_string(),
            category: " \t ".to_string(),
            radius_meters: 5000,
        };
        let result = service(mock, DetailFailurePolicy::Degrade).run(&request).await;

        assert!(matches!(result, Err(SearchError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_category_makes_no_calls() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().times(0);
        mock.expect_nearby_search().times(0);
        mock.expect_place_details().times(0);

        let request = SearchRequest {
            city: "Lyon".to_string(),
            category: String::new(),
            radius_meters: 5000,
        };
        let result = service(mock, DetailFailurePolicy::Degrade).run(&request).await;

        assert!(matches!(result, Err(SearchError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_city_stops_before_search() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode()
            .times(1)
            .returning(|_| Err(SearchError::NotFound("ZERO_RESULTS".to_string())));
        mock.expect_nearby_search().times(0);
        mock.expect_place_details().times(0);

        let result = service(mock, DetailFailurePolicy::Degrade)
            .run(&request())
            .await;

        assert!(matches!(result, Err(SearchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_transport_failure_aborts() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().returning(|_| Ok(lyon()));
        mock.expect_nearby_search()
            .times(1)
            .returning(|_, _, _| Err(SearchError::Transport("timeout".to_string())));
        mock.expect_place_details().times(0);

        let result = service(mock, DetailFailurePolicy::Degrade)
            .run(&request())
            .await;

        assert!(matches!(result, Err(SearchError::Transport(_))));
    }

    #[test]
    fn test_zero_matches_is_empty_outcome() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().returning(|_| Ok(lyon()));
        mock.expect_nearby_search().returning(|_, _, _| Ok(Vec::new()));
        mock.expect_place_details().times(0);

        let service = service(mock, DetailFailurePolicy::Degrade);
        let outcome = tokio_test::block_on(service.run(&request())).unwrap();

        assert!(outcome.is_empty());
        assert!(outcome.detail_failures.is_empty());
    }

    #[tokio::test]
    async fn test_degrade_policy_keeps_failed_record() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().returning(|_| Ok(lyon()));
        mock.expect_nearby_search().returning(|_, _, _| {
            Ok(vec![
                candidate("p1", "First"),
                candidate("p2", "Flaky"),
                candidate("p3", "Third"),
            ])
        });
        mock.expect_place_details().times(3).returning(|place_id| {
            if place_id == "p2" {
                Err(SearchError::Transport("connection reset".to_string()))
            } else {
                Ok(PlaceDetail::new(Some("01 02 03 04 05".to_string()), None))
            }
        });

        let outcome = service(mock, DetailFailurePolicy::Degrade)
            .run(&request())
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.records[1].name, "Flaky");
        assert_eq!(outcome.records[1].phone, UNAVAILABLE);
        assert_eq!(outcome.records[2].phone, "01 02 03 04 05");
        assert_eq!(outcome.detail_failures.len(), 1);
        assert_eq!(outcome.detail_failures[0].index, 1);
        assert_eq!(outcome.detail_failures[0].place_name, "Flaky");
    }

    #[tokio::test]
    async fn test_abort_policy_stops_at_first_failure() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().returning(|_| Ok(lyon()));
        mock.expect_nearby_search().returning(|_, _, _| {
            Ok(vec![
                candidate("p1", "First"),
                candidate("p2", "Flaky"),
                candidate("p3", "Never Fetched"),
            ])
        });
        mock.expect_place_details().times(2).returning(|place_id| {
            if place_id == "p2" {
                Err(SearchError::Transport("connection reset".to_string()))
            } else {
                Ok(PlaceDetail::unavailable())
            }
        });

        let result = service(mock, DetailFailurePolicy::Abort)
            .run(&request())
            .await;

        match result {
            Err(SearchError::DetailLookup { place, .. }) => assert_eq!(place, "Flaky"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_candidate_without_place_id_skips_details() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().returning(|_| Ok(lyon()));
        mock.expect_nearby_search().returning(|_, _, _| {
            Ok(vec![PlaceCandidate::new(None, Some("Kiosque".to_string()), None)])
        });
        mock.expect_place_details().times(0);

        let outcome = service(mock, DetailFailurePolicy::Degrade)
            .run(&request())
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].website, UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_concurrent_details_preserve_order() {
        let mut mock = MockMapsProvider::new();
        mock.expect_geocode().returning(|_| Ok(lyon()));
        mock.expect_nearby_search().returning(|_, _, _| {
            Ok((0..8)
                .map(|i| candidate(&format!("p{}", i), &format!("Place {}", i)))
                .collect())
        });
        mock.expect_place_details()
            .times(8)
            .returning(|place_id| Ok(PlaceDetail::new(Some(place_id.to_string()), None)));

        let service =
            SearchService::with_options(Arc::new(mock), 4, DetailFailurePolicy::Degrade);
        let outcome = service.run(&request()).await.unwrap();

        for (i, record) in outcome.records.iter().enumerate() {
            assert_eq!(record.name, format!("Place {}", i));
            assert_eq!(record.phone, format!("p{}", i));
        }
    }
}
