pub mod config;
pub mod error;
pub mod share;
pub mod telemetry;
