//! Pipeline entry points for monitoring operations.
//!
//! - `detect_new`: Compare the newest fetch against the last-seen record
//! - `CachedFetcher`: TTL-memoized wrapper around the fetcher
//! - `run_cycle`: One full fetch → detect cycle

pub mod detect;
pub mod monitor;
pub mod refresh;

pub use detect::detect_new;
pub use monitor::{CycleReport, run_cycle};
pub use refresh::{CachedFetcher, TtlCache};
