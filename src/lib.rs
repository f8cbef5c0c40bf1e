pub mod api; // routes are public so integration tests can mount them
pub mod app_state;
pub mod config;
pub mod database;
pub mod errors;
