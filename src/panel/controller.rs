//! Activity Stream panel orchestrator.
//!
//! Thin glue between the event bus, the two data controllers, and the
//! list-rendering surface. Owns no protocol logic of its own: each signal
//! routes to a top-sites refresh (with or without the dirty pre-check),
//! and the list surface reads straight out of the controllers' state.

use std::sync::Arc;

use url::Url;

use crate::config::PanelConfig;
use crate::events::EventSubscription;
use crate::store::HistoryStore;
use crate::types::events::PanelEvent;
use crate::types::site::{Site, TopSiteItem, VisitType};

use super::recent_history::RecentHistoryLoader;
use super::top_sites::TopSiteCacheController;
use super::{RedrawObserver, RedrawSignal};

/// Collaborator that opens a resolved URL.
pub trait NavigationDelegate: Send + Sync {
    fn open_url(&self, url: &Url, visit_type: VisitType);
}

/// The two logical sections of the panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    TopSites,
    History,
}

impl Section {
    pub const COUNT: usize = 2;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Section::TopSites),
            1 => Some(Section::History),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Section::TopSites => 0,
            Section::History => 1,
        }
    }

    /// Header title; the top-sites strip has none.
    pub fn title(self) -> Option<&'static str> {
        match self {
            Section::TopSites => None,
            Section::History => Some("Recent Activity"),
        }
    }
}

/// One displayable row handed to the list surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelItem {
    /// The whole top-sites strip renders as a single row.
    TopSiteStrip(Vec<TopSiteItem>),
    HistorySite(Site),
}

/// The panel controller: construction wires the store and config,
/// [`run_event_loop`](Self::run_event_loop) wires the signals, and the
/// row accessors serve the list surface.
pub struct ActivityPanelController<S, N> {
    config: PanelConfig,
    top_sites: TopSiteCacheController<S>,
    recent_history: RecentHistoryLoader<S>,
    navigation: N,
    redraw: Arc<RedrawSignal>,
}

impl<S: HistoryStore, N: NavigationDelegate> ActivityPanelController<S, N> {
    /// Builds the panel around an injected store and navigation delegate.
    /// Sets the store's cache size once, here and nowhere else.
    pub fn new(config: PanelConfig, store: Arc<S>, navigation: N) -> Self {
        store.set_top_sites_cache_size(config.top_sites_cache_size);

        let redraw = Arc::new(RedrawSignal::new());
        Self {
            top_sites: TopSiteCacheController::new(Arc::clone(&store), Arc::clone(&redraw)),
            recent_history: RecentHistoryLoader::new(store, Arc::clone(&redraw)),
            config,
            navigation,
            redraw,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// First-visibility load: both sections populate from the store.
    pub async fn activate(&self) {
        tokio::join!(
            self.top_sites.refresh(self.config.top_sites_cache_size),
            self.recent_history.reload(self.config.recent_history_size),
        );
    }

    /// Routes one external signal. Sync-finished fires on every
    /// foreground transition, so it alone gets the dirty pre-check; the
    /// rest go through the unconditional refresh.
    pub async fn handle_event(&self, event: PanelEvent) {
        let limit = self.config.top_sites_cache_size;
        match event {
            PanelEvent::SyncFinished => self.top_sites.refresh_if_dirty(limit).await,
            PanelEvent::AccountChanged
            | PanelEvent::PrivateDataCleared
            | PanelEvent::DisplaySettingsChanged => self.top_sites.refresh(limit).await,
        }
    }

    /// Consumes bus events until every publisher is gone. The
    /// subscription drops exactly once, at loop exit — that drop is the
    /// deregistration.
    pub async fn run_event_loop(&self, mut subscription: EventSubscription) {
        while let Some(event) = subscription.next().await {
            self.handle_event(event).await;
        }
    }

    // --- List surface ---

    pub fn section_count(&self) -> usize {
        Section::COUNT
    }

    /// Rows in a section. The top-sites strip is one row when it has any
    /// tiles, zero otherwise.
    pub fn row_count(&self, section: Section) -> usize {
        match section {
            Section::TopSites => {
                if self.top_sites.is_empty() {
                    0
                } else {
                    1
                }
            }
            Section::History => self.recent_history.len(),
        }
    }

    pub fn item(&self, section: Section, row: usize) -> Option<PanelItem> {
        match section {
            Section::TopSites => {
                let items = self.top_sites.top_sites();
                if row == 0 && !items.is_empty() {
                    Some(PanelItem::TopSiteStrip(items))
                } else {
                    None
                }
            }
            Section::History => self
                .recent_history
                .history()
                .get(row)
                .cloned()
                .map(PanelItem::HistorySite),
        }
    }

    /// Resolves a selected history row to its URL and forwards it to
    /// navigation. A stored URL that no longer parses is logged and
    /// ignored rather than crashing the panel.
    pub fn select(&self, section: Section, row: usize) {
        match section {
            Section::History => {
                let history = self.recent_history.history();
                let Some(site) = history.get(row) else {
                    return;
                };
                self.open(&site.url);
            }
            // Tiles inside the strip select through select_top_site.
            Section::TopSites => {}
        }
    }

    /// Resolves a pressed tile in the top-sites strip.
    pub fn select_top_site(&self, index: usize) {
        let items = self.top_sites.top_sites();
        if let Some(item) = items.get(index) {
            self.open(&item.site_url);
        }
    }

    fn open(&self, raw: &str) {
        match Url::parse(raw) {
            Ok(url) => self.navigation.open_url(&url, VisitType::Bookmark),
            Err(e) => log::warn!("selected site URL {:?} does not parse: {}", raw, e),
        }
    }

    /// Observer the UI glue redraws on.
    pub fn observe_redraw(&self) -> RedrawObserver {
        self.redraw.observe()
    }

    /// Current redraw generation (bumped once per content change).
    pub fn redraw_generation(&self) -> u64 {
        self.redraw.generation()
    }

    pub fn top_sites(&self) -> Vec<TopSiteItem> {
        self.top_sites.top_sites()
    }

    pub fn history(&self) -> Vec<Site> {
        self.recent_history.history()
    }
}
