//! One monitoring cycle: fetch (via cache) → detect → report.

use crate::error::Result;
use crate::models::FetchResult;
use crate::pipeline::{CachedFetcher, detect_new};
use crate::storage::LastSeenStore;

/// What one cycle produced: the fetch outcome and the new-release signal.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Releases or the error message, as fetched (possibly from cache)
    pub result: FetchResult,
    /// Whether the newest release differs from the last-seen record
    pub is_new: bool,
}

/// Run one monitoring cycle.
///
/// The fetch completes before the store is read, and any store write
/// happens before the report is returned. A fetch error yields a report
/// carrying the message with `is_new` false; store I/O failures beyond
/// the missing-file case propagate.
pub async fn run_cycle(fetcher: &mut CachedFetcher, store: &LastSeenStore) -> Result<CycleReport> {
    let result = fetcher.fetch().await;

    let is_new = match &result {
        FetchResult::Releases(releases) => detect_new(releases, store).await?,
        FetchResult::Error(message) => {
            log::warn!("Skipping change detection: {message}");
            false
        }
    };

    Ok(CycleReport { result, is_new })
}
