//! The panel data layer: top-sites cache controller, recent-history
//! loader, the Site → TopSiteItem transform, and the thin orchestrator
//! exposing the two-section list surface.

pub mod controller;
pub mod recent_history;
pub mod top_sites;
pub mod transform;

pub use controller::{ActivityPanelController, NavigationDelegate, PanelItem, Section};
pub use recent_history::RecentHistoryLoader;
pub use top_sites::TopSiteCacheController;

use tokio::sync::watch;

/// Redraw request channel between the data layer and the list surface.
///
/// Each request bumps a generation counter; the UI glue holds a
/// [`RedrawObserver`] and redraws whenever the generation changes. The
/// fast no-op paths never bump it, so a clean cache causes no layout
/// churn.
pub struct RedrawSignal {
    tx: watch::Sender<u64>,
}

impl RedrawSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx }
    }

    /// Asks the list surface to redraw.
    pub fn request(&self) {
        self.tx.send_modify(|generation| *generation += 1);
    }

    /// Current generation; changes exactly once per request.
    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn observe(&self) -> RedrawObserver {
        RedrawObserver {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for RedrawSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of [`RedrawSignal`].
pub struct RedrawObserver {
    rx: watch::Receiver<u64>,
}

impl RedrawObserver {
    /// Waits until a redraw is requested. Returns `false` once the signal
    /// is gone (panel torn down).
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Latest generation, marking it seen.
    pub fn generation(&mut self) -> u64 {
        *self.rx.borrow_and_update()
    }
}
