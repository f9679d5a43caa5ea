// src/source/mod.rs

//! Press-release source fetcher.
//!
//! Retrieves releases from the configured source (syndication feed or HTML
//! listing page) and normalizes them into [`ReleaseRecord`]s. All failures
//! are caught at this boundary and reported as [`FetchResult::Error`]; the
//! caller always receives either a release list or an error message.

mod feed;
mod scrape;

use std::sync::Arc;

use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, FetchResult, ReleaseRecord, SourceConfig};
use crate::utils::http;

pub use feed::parse_channel;
pub use scrape::parse_listing;

/// Service for fetching press releases from the configured source.
pub struct ReleaseFetcher {
    config: Arc<Config>,
    client: Client,
}

impl ReleaseFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = http::create_client(&config.http)?;
        Ok(Self { config, client })
    }

    /// Fetch the latest releases, most recent first.
    ///
    /// Never returns an error: any network, parse, or selector failure is
    /// converted into the [`FetchResult::Error`] variant.
    pub async fn fetch(&self) -> FetchResult {
        match self.fetch_inner().await {
            Ok(releases) => FetchResult::Releases(releases),
            Err(error) => {
                log::warn!("Fetch failed: {error}");
                FetchResult::Error(error.to_string())
            }
        }
    }

    async fn fetch_inner(&self) -> Result<Vec<ReleaseRecord>> {
        let count = self.config.monitor.release_count;
        match &self.config.source {
            SourceConfig::Feed { url } => feed::fetch_feed(&self.client, url, count).await,
            SourceConfig::Scrape {
                url,
                headline_class,
            } => scrape::fetch_listing(&self.client, url, headline_class, count).await,
        }
    }
}
