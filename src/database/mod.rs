pub mod connector;
pub mod models;
pub mod schema;
pub mod seed;

// Re-export the primary DB types and connect helper for convenient access as `database::connect_with_settings()`
pub use connector::{DB, connect_with_settings, ping};
