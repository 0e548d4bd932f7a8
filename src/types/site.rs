use serde::{Deserialize, Serialize};
use url::Url;

/// A visited URL record owned by the history store.
///
/// Read-only to the panel layer; the store is the single writer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Site {
    pub id: String,
    pub url: String,
    pub title: String,
    /// Canonical URL used to represent the site's shortcut/display entry.
    pub tile_url: String,
    /// Raw favicon URL string as recorded, if any. Parsed lazily at
    /// display time; may be malformed.
    pub favicon_url: Option<String>,
    pub visit_time: i64,
    pub visit_count: i32,
}

/// A derived display record for one tile in the top-sites strip.
///
/// Immutable once built; the whole sequence is replaced on each
/// successful refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct TopSiteItem {
    /// Domain name extracted from the tile URL.
    pub url_title: String,
    /// Parsed favicon URL. `None` when the site has no favicon or the
    /// recorded string does not parse.
    pub favicon_url: Option<Url>,
    /// The navigable site URL (the tile URL carried through).
    pub site_url: String,
}

/// Tag forwarded to navigation describing how a visit was initiated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VisitType {
    Bookmark,
    Link,
}
