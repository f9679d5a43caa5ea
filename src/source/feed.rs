//! Feed-mode retrieval.
//!
//! Parses the investor-relations RSS feed and formats publication
//! timestamps in US Eastern time, the timezone IR press releases are
//! announced in.

use chrono::DateTime;
use chrono_tz::America::New_York;
use reqwest::Client;
use rss::Channel;

use crate::error::Result;
use crate::models::ReleaseRecord;

/// Display format for feed dates, e.g. `Oct 30, 2025 at 04:05 PM ET`.
const DATE_FORMAT: &str = "%b %d, %Y at %I:%M %p ET";

/// Fallback date when an entry has no parseable timestamp.
const FALLBACK_DATE: &str = "Recent";

/// Fetch the feed and extract the first `count` releases.
pub(super) async fn fetch_feed(
    client: &Client,
    url: &str,
    count: usize,
) -> Result<Vec<ReleaseRecord>> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let channel = Channel::read_from(bytes.as_ref())?;
    Ok(parse_channel(&channel, count))
}

/// Extract releases from an already-fetched channel.
///
/// Pure function (no I/O) so tests can exercise the parsing logic without
/// hitting the network. Entries without a title are skipped; other missing
/// fields degrade to safe defaults rather than failing the whole call.
pub fn parse_channel(channel: &Channel, count: usize) -> Vec<ReleaseRecord> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title().unwrap_or_default().trim().to_string();
            if title.is_empty() {
                return None;
            }

            Some(ReleaseRecord {
                title,
                link: item.link().unwrap_or_default().to_string(),
                date: item
                    .pub_date()
                    .and_then(format_eastern)
                    .unwrap_or_else(|| FALLBACK_DATE.to_string()),
                guid: item.guid().map(|g| g.value().to_string()),
            })
        })
        .take(count)
        .collect()
}

/// Convert an RFC 2822 feed timestamp to an Eastern-time display string.
fn format_eastern(pub_date: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc2822(pub_date).ok()?;
    let eastern = parsed.with_timezone(&New_York);
    Some(eastern.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(xml: &str) -> Channel {
        Channel::read_from(xml.as_bytes()).unwrap()
    }

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Investor Relations</title>
    <item>
      <title>Q3 Earnings</title>
      <link>https://example.com/news/q3</link>
      <guid>rel-3</guid>
      <pubDate>Thu, 30 Oct 2025 20:05:00 +0000</pubDate>
    </item>
    <item>
      <title>New Plant Opening</title>
      <link>https://example.com/news/plant</link>
      <guid>rel-2</guid>
      <pubDate>Mon, 01 Jan 2024 14:00:00 +0000</pubDate>
    </item>
    <item>
      <title>Convertible Notes Offering</title>
      <link>https://example.com/news/notes</link>
      <guid>rel-1</guid>
      <pubDate>Fri, 01 Dec 2023 13:30:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parse_channel_extracts_releases_in_order() {
        let releases = parse_channel(&channel(SAMPLE_FEED), 10);

        assert_eq!(releases.len(), 3);
        assert_eq!(releases[0].title, "Q3 Earnings");
        assert_eq!(releases[0].link, "https://example.com/news/q3");
        assert_eq!(releases[0].guid.as_deref(), Some("rel-3"));
        assert_eq!(releases[2].title, "Convertible Notes Offering");
    }

    #[test]
    fn parse_channel_truncates_to_count() {
        assert_eq!(parse_channel(&channel(SAMPLE_FEED), 2).len(), 2);
        assert_eq!(parse_channel(&channel(SAMPLE_FEED), 1).len(), 1);
    }

    #[test]
    fn dates_are_converted_to_eastern() {
        let releases = parse_channel(&channel(SAMPLE_FEED), 10);

        // 20:05 UTC during EDT (-4) is 4:05 PM
        assert_eq!(releases[0].date, "Oct 30, 2025 at 04:05 PM ET");
        // 14:00 UTC during EST (-5) is 9:00 AM
        assert_eq!(releases[1].date, "Jan 01, 2024 at 09:00 AM ET");
    }

    #[test]
    fn invalid_date_falls_back() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>T</title>
    <item>
      <title>Undated Release</title>
      <pubDate>not-a-real-date</pubDate>
    </item>
    <item>
      <title>Missing Date</title>
    </item>
  </channel>
</rss>"#;

        let releases = parse_channel(&channel(xml), 10);
        assert_eq!(releases[0].date, FALLBACK_DATE);
        assert_eq!(releases[1].date, FALLBACK_DATE);
    }

    #[test]
    fn untitled_entries_are_skipped() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>T</title>
    <item>
      <guid>no-title</guid>
    </item>
    <item>
      <title>Real Release</title>
    </item>
  </channel>
</rss>"#;

        let releases = parse_channel(&channel(xml), 10);
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].title, "Real Release");
    }

    #[test]
    fn missing_link_defaults_to_empty() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>T</title>
    <item>
      <title>No Link</title>
    </item>
  </channel>
</rss>"#;

        let releases = parse_channel(&channel(xml), 10);
        assert_eq!(releases[0].link, "");
        assert!(releases[0].guid.is_none());
    }
}
