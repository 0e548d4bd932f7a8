//! Demo binary: seeds a history database, runs the panel against it, and
//! prints both sections after each signal.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use url::Url;

use activitystream::config::PanelConfig;
use activitystream::database::Database;
use activitystream::events::EventBus;
use activitystream::panel::{ActivityPanelController, NavigationDelegate, PanelItem, Section};
use activitystream::store::SqliteHistoryStore;
use activitystream::types::events::PanelEvent;
use activitystream::types::site::VisitType;

/// Prints resolved selections instead of opening them.
struct LogNavigation;

impl NavigationDelegate for LogNavigation {
    fn open_url(&self, url: &Url, visit_type: VisitType) {
        println!("navigate -> {} ({:?})", url, visit_type);
    }
}

/// Data directory: ACTIVITYSTREAM_DATA_DIR, else the executable's directory.
fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ACTIVITYSTREAM_DATA_DIR") {
        return PathBuf::from(dir);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

async fn seed(store: &SqliteHistoryStore) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;

    let visits: &[(&str, &str, Option<&str>, i64, u32)] = &[
        (
            "https://news.ycombinator.com/",
            "Hacker News",
            Some("https://news.ycombinator.com/favicon.ico"),
            now - 600,
            5,
        ),
        (
            "https://www.rust-lang.org/",
            "Rust Programming Language",
            Some("https://www.rust-lang.org/favicon.ico"),
            now - 3_600,
            9,
        ),
        (
            "https://github.com/",
            "GitHub",
            Some("https://github.com/favicon.ico"),
            now - 7_200,
            12,
        ),
        (
            "https://doc.rust-lang.org/std/",
            "std - Rust",
            None,
            now - 86_400,
            7,
        ),
        (
            "https://en.wikipedia.org/",
            "Wikipedia",
            Some("not a url"),
            now - 40 * 86_400,
            20,
        ),
    ];

    for (url, title, favicon, time, count) in visits {
        for i in (0..*count).rev() {
            if let Err(e) = store
                .record_visit_at(url, title, url, *favicon, time - i64::from(i))
                .await
            {
                log::warn!("seed visit failed: {}", e);
            }
        }
    }
}

fn print_panel<S, N>(panel: &ActivityPanelController<S, N>)
where
    S: activitystream::store::HistoryStore,
    N: NavigationDelegate,
{
    for index in 0..panel.section_count() {
        let section = Section::from_index(index).unwrap();
        if let Some(title) = section.title() {
            println!("== {} ==", title);
        } else {
            println!("== Top Sites ==");
        }
        for row in 0..panel.row_count(section) {
            match panel.item(section, row) {
                Some(PanelItem::TopSiteStrip(tiles)) => {
                    for tile in tiles {
                        let favicon = tile
                            .favicon_url
                            .as_ref()
                            .map(Url::as_str)
                            .unwrap_or("no favicon");
                        println!("  [{}] {} ({})", tile.url_title, tile.site_url, favicon);
                    }
                }
                Some(PanelItem::HistorySite(site)) => {
                    println!("  {} — {}", site.title, site.url);
                }
                None => {}
            }
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let dir = data_dir();
    let config = match PanelConfig::load(dir.join("panel.json")) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("config load failed, using defaults: {}", e);
            PanelConfig::default()
        }
    };

    let db = Database::open(dir.join("activitystream.db")).expect("Failed to open history database");
    let store = Arc::new(SqliteHistoryStore::new(db));
    seed(&store).await;

    let panel = Arc::new(ActivityPanelController::new(
        config,
        Arc::clone(&store),
        LogNavigation,
    ));

    let bus = EventBus::new();
    let subscription = bus.subscribe();
    let loop_panel = Arc::clone(&panel);
    let event_loop = tokio::spawn(async move { loop_panel.run_event_loop(subscription).await });

    panel.activate().await;
    print_panel(&panel);

    // New visit while the panel is showing: the sync-finished signal sees
    // the dirty cache and revalidates.
    store
        .record_visit("https://crates.io/", "crates.io", "https://crates.io/", None)
        .await
        .expect("record visit");
    bus.publish(PanelEvent::SyncFinished);
    tokio::time::sleep(Duration::from_millis(200)).await;

    println!("\nafter sync-finished:");
    print_panel(&panel);

    panel.select(Section::History, 0);
    panel.select_top_site(0);

    drop(bus);
    let _ = event_loop.await;
}
