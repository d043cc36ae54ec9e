//! Newest-first ordering
//!
//! Items are sorted by their parsed publish date, descending. The sort is
//! stable, so items with equal dates keep extraction order, and dates that do
//! not parse sink to the end instead of failing the request.

use crate::feed::item::FeedItem;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Reverse;

/// ISO 8601 forms carrying an offset that RFC 3339 parsing rejects (`+0800`)
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%z"];

/// Forms without any offset, read as UTC
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a publish date in any of the accepted forms
///
/// Accepted, in order: RFC 2822 (`Mon, 06 Jan 2025 10:00:00 GMT`, weekday
/// ignored, `UTC` allowed), RFC 3339 (`2025-01-06T10:00:00Z`), ISO 8601 with
/// a basic offset (`2025-01-06T10:00:00+0800`), offset-less date-times (UTC)
/// and `2025-01-06` (midnight UTC).
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc2822(&normalize_rfc2822(raw)) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Drops a leading `Day,` and spells a trailing `UTC` zone as `+0000`
///
/// Feeds often carry a weekday that does not match the date; the date wins.
fn normalize_rfc2822(raw: &str) -> String {
    let body = match raw.split_once(',') {
        Some((day, rest)) if day.trim().chars().all(|c| c.is_ascii_alphabetic()) => {
            rest.trim_start()
        }
        _ => raw,
    };

    match body.strip_suffix("UTC") {
        Some(head) => format!("{}+0000", head),
        None => body.to_string(),
    }
}

/// Sorts items newest first; unparsable dates count as the oldest possible
pub fn order_items(items: &mut [FeedItem]) {
    // `None` orders below every `Some`, so reversing sinks unparsable dates
    items.sort_by_cached_key(|item| Reverse(parse_published(&item.published_at)));
}
