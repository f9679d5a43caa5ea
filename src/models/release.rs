//! Press release data structures.

use serde::{Deserialize, Serialize};

/// A single press release observed on the monitored source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseRecord {
    /// Headline text. Identity key for change detection.
    pub title: String,

    /// Absolute URL to the full release (empty string when unavailable)
    #[serde(default)]
    pub link: String,

    /// Display-formatted publication date
    #[serde(default)]
    pub date: String,

    /// Stable identifier, present only when the source supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
}

/// Outcome of a fetch: releases (most recent first) or an error message.
///
/// Cloneable so the TTL cache can memoize whichever variant the last
/// network round produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Ordered list of releases, truncated to the configured count.
    Releases(Vec<ReleaseRecord>),
    /// The fetch failed; carries the underlying error message.
    Error(String),
}

impl FetchResult {
    /// The release list, if the fetch succeeded.
    pub fn releases(&self) -> Option<&[ReleaseRecord]> {
        match self {
            Self::Releases(releases) => Some(releases),
            Self::Error(_) => None,
        }
    }

    /// Whether this result carries an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
