pub mod api;
pub mod config;
pub mod errors;
pub mod order;
pub mod restaurant;
pub mod sink;
pub mod source;
pub mod telemetry;
