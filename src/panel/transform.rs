//! Site → TopSiteItem transform.
//!
//! Pure functions, no store access. Validation is explicit: a record
//! either becomes an item or yields a [`ValidationError`] that the batch
//! collector drops. A bad favicon never drops a record — the favicon is
//! decorative, the title and URL are required.

use url::Url;

use crate::types::errors::ValidationError;
use crate::types::site::{Site, TopSiteItem};

/// Extracts the display domain from a tile URL: the host with any leading
/// `www.` stripped.
pub fn extract_domain_name(tile_url: &str) -> Result<String, ValidationError> {
    if tile_url.is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    let parsed =
        Url::parse(tile_url).map_err(|_| ValidationError::MalformedUrl(tile_url.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ValidationError::MalformedUrl(tile_url.to_string()))?;
    Ok(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Builds the display item for one site.
///
/// Fails only when the tile URL is missing or malformed. An unparseable
/// favicon string degrades to no favicon.
pub fn top_site_item(site: &Site) -> Result<TopSiteItem, ValidationError> {
    let url_title = extract_domain_name(&site.tile_url)?;

    let favicon_url = site.favicon_url.as_deref().and_then(|raw| match Url::parse(raw) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::debug!("unparseable favicon URL {:?} for {}, omitting", raw, site.url);
            None
        }
    });

    Ok(TopSiteItem {
        url_title,
        favicon_url,
        site_url: site.tile_url.clone(),
    })
}

/// Transforms a batch, dropping invalid records. N inputs with M invalid
/// yield exactly N − M items; order is preserved.
pub fn top_site_items(sites: &[Site]) -> Vec<TopSiteItem> {
    sites
        .iter()
        .filter_map(|site| match top_site_item(site) {
            Ok(item) => Some(item),
            Err(e) => {
                log::debug!("skipping site {:?}: {}", site.url, e);
                None
            }
        })
        .collect()
}
