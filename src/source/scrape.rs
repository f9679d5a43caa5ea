//! Scrape-mode retrieval.
//!
//! Extracts releases from an HTML listing page using a class-based
//! selector for headline blocks.

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ReleaseRecord;
use crate::utils::resolve_url;

/// Fallback date when no time element accompanies a headline.
const FALLBACK_DATE: &str = "Recent";

/// Fetch the listing page and extract the first `count` releases.
pub(super) async fn fetch_listing(
    client: &Client,
    url: &str,
    headline_class: &str,
    count: usize,
) -> Result<Vec<ReleaseRecord>> {
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let base = Url::parse(url)?;
    parse_listing(&html, &base, headline_class, count)
}

/// Extract releases from already-fetched HTML.
///
/// Each block matching `.{headline_class}` becomes one release: its visible
/// text (minus any time element) is the title, the first anchor's href
/// (resolved against `base`) is
/// the link, and the nearest time element supplies the date. A block with a
/// missing anchor still yields a release with an empty link.
pub fn parse_listing(
    html: &str,
    base: &Url,
    headline_class: &str,
    count: usize,
) -> Result<Vec<ReleaseRecord>> {
    let block_sel = parse_selector(&format!(".{headline_class}"))?;
    let anchor_sel = parse_selector("a[href]")?;
    let time_sel = parse_selector("time")?;

    let document = Html::parse_document(html);
    let mut releases = Vec::new();

    for block in document.select(&block_sel) {
        if releases.len() == count {
            break;
        }

        let title = title_text(&block);
        if title.is_empty() {
            continue;
        }

        let link = block
            .select(&anchor_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_url(base, href))
            .unwrap_or_default();

        let date = find_date(&block, &time_sel).unwrap_or_else(|| FALLBACK_DATE.to_string());

        releases.push(ReleaseRecord {
            title,
            link,
            date,
            guid: None,
        });
    }

    Ok(releases)
}

/// Collapse an element's text nodes into a single whitespace-normalized string.
fn visible_text(element: &ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Block text with any time element's contents left out, so the date
/// never leaks into the title used for change detection.
fn title_text(block: &ElementRef) -> String {
    let text: String = block
        .descendants()
        .filter(|node| {
            !node
                .ancestors()
                .any(|a| a.value().as_element().is_some_and(|el| el.name() == "time"))
        })
        .filter_map(|node| node.value().as_text().map(|t| &**t))
        .collect();
    normalize_whitespace(&text)
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Look for a time element inside the block, then among its direct
/// siblings. Searching further up would grab another block's date.
fn find_date(block: &ElementRef, time_sel: &Selector) -> Option<String> {
    if let Some(time) = block.select(time_sel).next() {
        return Some(visible_text(&time)).filter(|s| !s.is_empty());
    }

    block
        .next_siblings()
        .chain(block.prev_siblings())
        .filter_map(ElementRef::wrap)
        .find(|el| time_sel.matches(el))
        .map(|time| visible_text(&time))
        .filter(|s| !s.is_empty())
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
