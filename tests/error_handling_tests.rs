//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - A failed fetch is sticky: every read reports the very same failure
//! - Retrying replaces the failed resource with a fresh fetch
//! - Missing collaborators fail fast at build time
//! - Unregistered sort columns are rejected without changing state
//! - Error codes and messages are stable

#[macro_use]
mod catalog_harness;

use catalog::prelude::*;
use catalog_harness::*;
use tokio_test::assert_ready;

// =============================================================================
// Fetch failures
// =============================================================================

mod fetch_failure_tests {
    use super::*;

    fn flaky_catalog(failures: usize) -> (FlakyService, Catalog<TestItem>) {
        let service = FlakyService::new(sample_batch(5), failures);
        let catalog = Catalog::builder()
            .with_data_service(service.clone())
            .build()
            .unwrap();
        (service, catalog)
    }

    #[tokio::test]
    async fn test_failure_is_rethrown_identically() {
        let (service, catalog) = flaky_catalog(1);
        let state = catalog.initial_state();

        let first = match catalog.render_settled(&state).await {
            Err(CatalogError::Fetch(e)) => e,
            other => panic!("expected a fetch failure, got {:?}", other),
        };

        for _ in 0..3 {
            match assert_ready!(catalog.render(&state)) {
                Err(CatalogError::Fetch(e)) => {
                    assert!(e.same_failure(&first));
                    assert_eq!(e.to_string(), first.to_string());
                }
                other => panic!("expected the same failure, got {:?}", other),
            }
        }

        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_message_carries_cause() {
        let (_, catalog) = flaky_catalog(1);

        let err = catalog
            .render_settled(&catalog.initial_state())
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "FETCH_FAILED");
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Fetch failed: upstream unavailable");
    }

    #[tokio::test]
    async fn test_retry_fetches_again() {
        let (service, catalog) = flaky_catalog(1);
        let state = catalog.initial_state();

        assert!(catalog.render_settled(&state).await.is_err());

        let fresh = catalog.retry().unwrap();
        assert!(fresh.is_pending());

        let page = catalog.render_settled(&state).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn test_retry_can_fail_again() {
        let (service, catalog) = flaky_catalog(2);
        let state = catalog.initial_state();

        let first = catalog.render_settled(&state).await.unwrap_err();
        catalog.retry().unwrap();
        let second = catalog.render_settled(&state).await.unwrap_err();

        match (first, second) {
            (CatalogError::Fetch(a), CatalogError::Fetch(b)) => assert!(!a.same_failure(&b)),
            other => panic!("expected two fetch failures, got {:?}", other),
        }
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn test_retry_for_other_params_keeps_other_entries() {
        let (service, catalog) = flaky_catalog(1);
        let books = QueryParams::new().with("category", "Books");

        let failed = catalog.resource_for(&books).unwrap();
        assert!(failed.settled().await.is_err());

        let healthy = catalog.resource().unwrap();
        healthy.settled().await.unwrap();

        let fresh = catalog.retry_for(&books).unwrap();
        assert!(!fresh.ptr_eq(&failed));
        assert_eq!(fresh.settled().await.unwrap().items.len(), 5);

        assert!(catalog.resource().unwrap().ptr_eq(&healthy));
        assert!(catalog.resource_for(&books).unwrap().ptr_eq(&fresh));
        assert_eq!(service.calls(), 3);
    }

    #[tokio::test]
    async fn test_session_retry_recovers() {
        let (_, catalog) = flaky_catalog(1);
        let mut session = CatalogSession::new(Arc::new(catalog));

        assert!(session.render_settled().await.is_err());
        assert!(session.last_page().is_none());

        session.retry().unwrap();
        let page = session.render_settled().await.unwrap();

        assert_eq!(page.source_len, 5);
        assert_eq!(session.items().len(), 5);
    }
}

// =============================================================================
// Misconfiguration
// =============================================================================

mod misconfiguration_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_data_service() {
        let err = Catalog::<TestItem>::builder().build().unwrap_err();

        assert!(matches!(
            err,
            CatalogError::MissingDependency { dependency: "data service" }
        ));
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "Missing dependency: data service must be configured before the catalog is used"
        );
    }

    #[test]
    fn test_missing_runtime() {
        let err = Catalog::<TestItem>::builder()
            .with_data_service(CountingService::new(Vec::new()))
            .build()
            .unwrap_err();

        assert_eq!(err.error_code(), "MISSING_DEPENDENCY");
    }

    #[tokio::test]
    async fn test_default_sort_on_unregistered_column() {
        let config = CatalogConfig {
            default_sort: vec![SortEntry::ascending("featured")],
            ..CatalogConfig::default()
        };

        let err = Catalog::<TestItem>::builder()
            .with_data_service(CountingService::new(Vec::new()))
            .with_config(config)
            .build()
            .unwrap_err();

        match err {
            CatalogError::InvalidColumn { column, registered } => {
                assert_eq!(column, "featured");
                assert_eq!(registered, &["name", "price", "rating", "added"]);
            }
            other => panic!("expected InvalidColumn, got {:?}", other),
        }
    }
}

// =============================================================================
// Invalid sort columns
// =============================================================================

mod invalid_column_tests {
    use super::*;

    #[test]
    fn test_toggle_unregistered_column_leaves_spec() {
        let mut spec = SortSpec::from_entries([
            SortEntry::ascending("price"),
            SortEntry::ascending("name"),
        ]);
        let before = spec.clone();

        let err = spec.toggle::<TestItem>("featured", true).unwrap_err();

        assert_eq!(spec, before);
        assert_eq!(err.error_code(), "INVALID_COLUMN");
        assert_eq!(
            err.to_string(),
            "Column 'featured' is not sortable (sortable columns: name, price, rating, added)"
        );
    }

    #[test]
    fn test_unknown_field_is_not_sortable() {
        let mut state = ViewState::default();
        assert!(state.toggle_sort::<TestItem>("does_not_exist", false).is_err());
        assert_eq!(state.sort, SortSpec::by("name"));
    }
}
