// SQLite persistence layer for the history store.

pub mod connection;
pub mod migrations;

pub use connection::Database;
