//! Property tests for the batch transform: a batch of N sites with M
//! invalid records always yields exactly N − M items, in order, and the
//! favicon never decides whether a record survives.

use proptest::prelude::*;

use activitystream::panel::transform::{top_site_item, top_site_items};
use activitystream::types::site::Site;

fn arb_valid_tile_url() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("https"), Just("http")],
        "[a-z][a-z0-9]{2,12}",
        prop_oneof![Just(".com"), Just(".org"), Just(".net")],
    )
        .prop_map(|(scheme, host, tld)| format!("{}://{}{}/", scheme, host, tld))
}

fn arb_invalid_tile_url() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{3,10}",                   // no scheme
        "[a-z]{3,8}\\.com",              // bare domain, still relative
        Just("mailto:x@example.com".to_string()), // no host
    ]
}

fn arb_favicon() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("https://cdn.example.com/favicon.ico".to_string())),
        Just(Some("totally not a url".to_string())),
    ]
}

fn arb_site(valid: bool) -> impl Strategy<Value = Site> {
    let tile = if valid {
        arb_valid_tile_url().boxed()
    } else {
        arb_invalid_tile_url().boxed()
    };
    (tile, arb_favicon(), 0i64..1_000_000, 1i32..100).prop_map(
        |(tile_url, favicon_url, visit_time, visit_count)| Site {
            id: tile_url.clone(),
            url: tile_url.clone(),
            title: tile_url.clone(),
            tile_url,
            favicon_url,
            visit_time,
            visit_count,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn batch_yields_exactly_n_minus_m_items(
        tagged in proptest::collection::vec(
            prop_oneof![
                arb_site(true).prop_map(|s| (true, s)),
                arb_site(false).prop_map(|s| (false, s)),
            ],
            0..30,
        ),
    ) {
        let sites: Vec<Site> = tagged.iter().map(|(_, s)| s.clone()).collect();
        let valid_count = tagged.iter().filter(|(valid, _)| *valid).count();

        let items = top_site_items(&sites);
        prop_assert_eq!(items.len(), valid_count);
    }

    #[test]
    fn valid_sites_always_transform(site in arb_site(true)) {
        let item = top_site_item(&site).expect("valid tile URL must transform");
        prop_assert_eq!(&item.site_url, &site.tile_url);
        prop_assert!(!item.url_title.is_empty());
        // The favicon only parses when the raw string was a real URL.
        match site.favicon_url.as_deref() {
            Some(raw) if url::Url::parse(raw).is_ok() => prop_assert!(item.favicon_url.is_some()),
            _ => prop_assert!(item.favicon_url.is_none()),
        }
    }

    #[test]
    fn invalid_sites_never_transform(site in arb_site(false)) {
        prop_assert!(top_site_item(&site).is_err());
    }

    #[test]
    fn order_is_preserved(sites in proptest::collection::vec(arb_site(true), 0..20)) {
        let items = top_site_items(&sites);
        prop_assert_eq!(items.len(), sites.len());
        for (item, site) in items.iter().zip(&sites) {
            prop_assert_eq!(&item.site_url, &site.tile_url);
        }
    }
}
