//! Macro-generated test suite for `ResourceCache<u32>` contract validation.
//!
//! The `resource_cache_tests!` macro generates a test module that validates
//! any `ResourceCache<u32>` implementation: lookups, replacement, removal,
//! and single creation under concurrent `get_or_insert_with`.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod catalog_harness;
//!
//! resource_cache_tests!(InMemoryResourceCache::<u32>::new());
//! ```
//!
//! `$factory` is re-evaluated for each test. For the concurrency test the
//! returned cache must also be `Clone + 'static` (shared state via Arc).

#![allow(unused_macros)]

macro_rules! resource_cache_tests {
    ($factory:expr) => {
        mod resource_cache_contract_tests {
            use super::*;
            use catalog::core::{Resource, ResourceCache};
            use std::sync::Arc;
            use std::sync::atomic::{AtomicUsize, Ordering};

            // ==================================================================
            // Lookups
            // ==================================================================

            #[test]
            fn test_get_missing_key() {
                let cache = $factory;
                assert!(cache.get("missing").unwrap().is_none());
                assert!(cache.is_empty().unwrap());
            }

            #[test]
            fn test_set_then_get_returns_same_resource() {
                let cache = $factory;
                let resource = Resource::ready(7_u32);

                cache.set("k", resource.clone()).unwrap();

                let cached = cache.get("k").unwrap().expect("resource should be cached");
                assert!(cached.ptr_eq(&resource));
                assert_eq!(cache.len().unwrap(), 1);
            }

            #[test]
            fn test_set_replaces_existing() {
                let cache = $factory;
                let first = Resource::ready(1_u32);
                let second = Resource::ready(2_u32);

                cache.set("k", first.clone()).unwrap();
                cache.set("k", second.clone()).unwrap();

                let cached = cache.get("k").unwrap().unwrap();
                assert!(cached.ptr_eq(&second));
                assert!(!cached.ptr_eq(&first));
                assert_eq!(cache.len().unwrap(), 1);
            }

            // ==================================================================
            // get_or_insert_with
            // ==================================================================

            #[test]
            fn test_get_or_insert_with_creates_once() {
                let cache = $factory;
                let mut created = 0;

                let first = cache
                    .get_or_insert_with("k", &mut || {
                        created += 1;
                        Resource::ready(1_u32)
                    })
                    .unwrap();
                let second = cache
                    .get_or_insert_with("k", &mut || {
                        created += 1;
                        Resource::ready(2_u32)
                    })
                    .unwrap();

                assert_eq!(created, 1);
                assert!(first.ptr_eq(&second));
            }

            #[test]
            fn test_get_or_insert_with_distinct_keys() {
                let cache = $factory;

                let a = cache
                    .get_or_insert_with("a", &mut || Resource::ready(1_u32))
                    .unwrap();
                let b = cache
                    .get_or_insert_with("b", &mut || Resource::ready(2_u32))
                    .unwrap();

                assert!(!a.ptr_eq(&b));
                assert_eq!(cache.len().unwrap(), 2);
            }

            // ==================================================================
            // Removal
            // ==================================================================

            #[test]
            fn test_remove_returns_entry() {
                let cache = $factory;
                cache.set("k", Resource::ready(1_u32)).unwrap();

                assert!(cache.remove("k").unwrap().is_some());
                assert!(cache.remove("k").unwrap().is_none());
                assert!(cache.get("k").unwrap().is_none());
            }

            #[test]
            fn test_clear_empties_cache() {
                let cache = $factory;
                cache.set("a", Resource::ready(1_u32)).unwrap();
                cache.set("b", Resource::ready(2_u32)).unwrap();

                cache.clear().unwrap();

                assert!(cache.is_empty().unwrap());
                assert!(cache.get("a").unwrap().is_none());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
            async fn test_concurrent_get_or_insert_creates_once() {
                let cache = $factory;
                let created = Arc::new(AtomicUsize::new(0));

                let handles: Vec<_> = (0..16)
                    .map(|_| {
                        let cache = cache.clone();
                        let created = Arc::clone(&created);
                        tokio::spawn(async move {
                            cache
                                .get_or_insert_with("shared", &mut || {
                                    created.fetch_add(1, Ordering::SeqCst);
                                    Resource::ready(42_u32)
                                })
                                .unwrap()
                        })
                    })
                    .collect();

                let resources = futures::future::try_join_all(handles).await.unwrap();

                assert_eq!(created.load(Ordering::SeqCst), 1);
                assert!(resources.windows(2).all(|w| w[0].ptr_eq(&w[1])));
            }
        }
    };
}
