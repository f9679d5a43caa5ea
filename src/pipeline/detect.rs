//! New-release detection.
//!
//! Compares the newest fetched release against the persisted last-seen
//! record. Titles are the identity key: no guid is reliably available
//! across both source modes, so a retitled release counts as new and a
//! genuinely new release reusing an old title goes unnoticed. Inherited
//! behavior, kept as-is.

use crate::error::Result;
use crate::models::ReleaseRecord;
use crate::storage::LastSeenStore;

/// Decide whether the newest fetched release is new, persisting it if so.
///
/// An empty `releases` list is never new and leaves the store untouched.
/// An absent store record always counts as new.
pub async fn detect_new(releases: &[ReleaseRecord], store: &LastSeenStore) -> Result<bool> {
    let Some(newest) = releases.first() else {
        return Ok(false);
    };

    let last_seen = store.load().await?;
    let is_new = match &last_seen {
        Some(previous) => previous.title != newest.title,
        None => true,
    };

    if is_new {
        store.save(newest).await?;
        log::info!("New press release detected: {}", newest.title);
    }

    Ok(is_new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn release(title: &str) -> ReleaseRecord {
        ReleaseRecord {
            title: title.to_string(),
            link: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
            date: "Jan 01, 2024 at 09:00 AM ET".to_string(),
            guid: None,
        }
    }

    fn store_in(tmp: &TempDir) -> LastSeenStore {
        LastSeenStore::new(tmp.path().join("last.json"))
    }

    #[tokio::test]
    async fn absent_store_is_new_and_persists() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let releases = vec![ReleaseRecord {
            title: "New Plant Opening".to_string(),
            link: "https://x/y".to_string(),
            date: "Jan 01, 2024 at 09:00 AM ET".to_string(),
            guid: None,
        }];

        assert!(detect_new(&releases, &store).await.unwrap());

        let saved = store.load().await.unwrap().unwrap();
        assert_eq!(saved, releases[0]);
    }

    #[tokio::test]
    async fn matching_title_is_not_new() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.save(&release("Q3 Earnings")).await.unwrap();
        let before = store.load().await.unwrap().unwrap();

        let releases = vec![release("Q3 Earnings"), release("Older Release")];
        assert!(!detect_new(&releases, &store).await.unwrap());

        // Store unchanged
        assert_eq!(store.load().await.unwrap().unwrap(), before);
    }

    #[tokio::test]
    async fn changed_title_is_new_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.save(&release("Q3 Earnings")).await.unwrap();

        let releases = vec![release("Q4 Earnings")];
        assert!(detect_new(&releases, &store).await.unwrap());

        let saved = store.load().await.unwrap().unwrap();
        assert_eq!(saved.title, "Q4 Earnings");
    }

    #[tokio::test]
    async fn empty_fetch_is_not_new_and_does_not_write() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert!(!detect_new(&[], &store).await.unwrap());
        assert!(store.load().await.unwrap().is_none());

        // Also with prior state
        store.save(&release("Q3 Earnings")).await.unwrap();
        assert!(!detect_new(&[], &store).await.unwrap());
        assert_eq!(store.load().await.unwrap().unwrap().title, "Q3 Earnings");
    }

    #[tokio::test]
    async fn second_detection_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let releases = vec![release("Share Buyback")];
        assert!(detect_new(&releases, &store).await.unwrap());
        assert!(!detect_new(&releases, &store).await.unwrap());
    }
}
