pub mod api;
pub mod config;
pub mod error;
pub mod maps;
pub mod rentals;
pub mod telemetry;
