//! Property tests for the refresh protocol's size bound: for any limit L
//! and any store contents, a refresh never leaves more than L items on
//! the panel.

use std::sync::Arc;

use proptest::prelude::*;

use activitystream::panel::{RedrawSignal, TopSiteCacheController};
use activitystream::store::memory_store::MemoryHistoryStore;
use activitystream::types::site::Site;

fn ranked_sites(n: usize) -> Vec<Site> {
    (0..n)
        .map(|i| {
            let url = format!("https://site{:03}.com/", i);
            Site {
                id: url.clone(),
                url: url.clone(),
                title: url.clone(),
                tile_url: url,
                favicon_url: None,
                visit_time: 1_000_000 - i as i64,
                visit_count: 500 - i as i32,
            }
        })
        .collect()
}

fn run<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime")
        .block_on(fut)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn refresh_never_exceeds_limit(
        store_size in 0usize..40,
        limit in 0usize..30,
        dirty in any::<bool>(),
    ) {
        run(async move {
            let store = Arc::new(MemoryHistoryStore::new());
            store.set_sites(ranked_sites(store_size));
            store.set_dirty(dirty);
            let ctrl = TopSiteCacheController::new(
                Arc::clone(&store),
                Arc::new(RedrawSignal::new()),
            );

            ctrl.refresh(limit).await;
            let after_one = ctrl.top_sites();
            prop_assert!(after_one.len() <= limit);

            // The first pass loads (dirty or empty); by here the panel
            // shows exactly the ranked prefix.
            prop_assert_eq!(after_one.len(), limit.min(store_size));
            for (i, item) in after_one.iter().enumerate() {
                prop_assert_eq!(&item.site_url, &format!("https://site{:03}.com/", i));
            }

            // A second refresh against the now-clean cache changes nothing.
            ctrl.refresh(limit).await;
            prop_assert_eq!(ctrl.top_sites(), after_one);
            Ok(())
        })?;
    }
}
