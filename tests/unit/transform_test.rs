//! Unit tests for the Site → TopSiteItem transform: domain extraction,
//! favicon degradation, and batch filtering.

use rstest::rstest;

use activitystream::panel::transform::{extract_domain_name, top_site_item, top_site_items};
use activitystream::types::errors::ValidationError;
use activitystream::types::site::Site;

fn site(tile_url: &str, favicon_url: Option<&str>) -> Site {
    Site {
        id: "id".to_string(),
        url: tile_url.to_string(),
        title: "Title".to_string(),
        tile_url: tile_url.to_string(),
        favicon_url: favicon_url.map(str::to_string),
        visit_time: 1_000,
        visit_count: 3,
    }
}

#[rstest]
#[case("https://www.mozilla.org/en-US/", "mozilla.org")]
#[case("https://news.ycombinator.com/item?id=1", "news.ycombinator.com")]
#[case("http://example.com", "example.com")]
#[case("https://www.www-like.net/x", "www-like.net")]
fn test_extract_domain_name(#[case] tile_url: &str, #[case] expected: &str) {
    assert_eq!(extract_domain_name(tile_url).unwrap(), expected);
}

#[test]
fn test_empty_tile_url_is_missing() {
    assert_eq!(extract_domain_name(""), Err(ValidationError::MissingUrl));
}

#[rstest]
#[case("not a url")]
#[case("example.com")] // no scheme, not absolute
#[case("mailto:someone@example.com")] // no host
fn test_bad_tile_url_is_malformed(#[case] tile_url: &str) {
    assert_eq!(
        extract_domain_name(tile_url),
        Err(ValidationError::MalformedUrl(tile_url.to_string()))
    );
}

#[test]
fn test_well_formed_favicon_is_kept() {
    let item = top_site_item(&site(
        "https://example.com/",
        Some("https://example.com/favicon.ico"),
    ))
    .unwrap();

    assert_eq!(item.url_title, "example.com");
    assert_eq!(item.site_url, "https://example.com/");
    assert_eq!(
        item.favicon_url.unwrap().as_str(),
        "https://example.com/favicon.ico"
    );
}

#[test]
fn test_unparseable_favicon_degrades_to_none() {
    let item = top_site_item(&site("https://example.com/", Some("не url"))).unwrap();

    // Favicon is decorative: the item survives with title and URL intact.
    assert_eq!(item.url_title, "example.com");
    assert_eq!(item.site_url, "https://example.com/");
    assert!(item.favicon_url.is_none());
}

#[test]
fn test_no_favicon_stays_none() {
    let item = top_site_item(&site("https://example.com/", None)).unwrap();
    assert!(item.favicon_url.is_none());
}

#[test]
fn test_batch_drops_invalid_records_only() {
    let sites = vec![
        site("https://a.com/", None),
        site("", None),
        site("https://b.org/", Some("bad favicon")),
        site("no-scheme.com", None),
        site("https://c.net/", None),
    ];

    let items = top_site_items(&sites);

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].url_title, "a.com");
    assert_eq!(items[1].url_title, "b.org");
    assert_eq!(items[2].url_title, "c.net");
}

#[test]
fn test_empty_batch() {
    assert!(top_site_items(&[]).is_empty());
}
