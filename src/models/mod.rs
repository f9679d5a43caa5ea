// src/models/mod.rs

//! Domain models for the press-release monitor.

mod config;
mod release;

// Re-export all public types
pub use config::{Config, HttpConfig, MonitorConfig, SourceConfig};
pub use release::{FetchResult, ReleaseRecord};
