pub mod api;
pub mod config;
pub mod error;
pub mod gate;
pub mod portal;
pub mod projection;
pub mod status;
pub mod telemetry;
pub mod workflows;
