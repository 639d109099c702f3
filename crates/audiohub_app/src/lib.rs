//! AudioHub terminal client: configuration, effect execution and the
//! session loop around the pure core.
pub mod config;
pub mod platform;
