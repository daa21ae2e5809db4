// Specwatch - API Specification & Changelog Monitor
// Polls a vendor's public API spec and changelog and reports what changed

pub mod cli;
pub mod config;
pub mod digest;
pub mod fetcher;
pub mod models;
pub mod monitor;
pub mod parser;
pub mod state;

pub use anyhow::{Context, Result};

// Re-export commonly used types
pub use config::{MonitorConfig, VersionPick};
pub use fetcher::{DocumentFetcher, FetchError, HttpFetcher};
pub use models::{MonitorResult, ParsedChangelog};
pub use monitor::Monitor;
