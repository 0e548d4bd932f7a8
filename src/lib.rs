//! Activity Stream home panel data layer.
//!
//! Two sections — frecency-ranked "Top Sites" and a "Recent Activity"
//! history list — kept in sync with a local history store through a
//! stale-while-revalidate refresh protocol. Rendering is somebody else's
//! job: this crate exposes section/row accessors and a redraw signal.

pub mod config;
pub mod database;
pub mod events;
pub mod panel;
pub mod store;
pub mod types;
