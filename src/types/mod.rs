// Activity Stream shared type definitions
// Each submodule defines types used across the panel data layer.

pub mod errors;
pub mod events;
pub mod site;
