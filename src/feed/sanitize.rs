//! Description sanitization
//!
//! Steps, in order:
//! 1. Strip anything shaped like a tag (`<...>`)
//! 2. Decode `&nbsp;`, `&amp;`, `&lt;`, `&gt;` (nothing else)
//! 3. Trim surrounding whitespace
//! 4. Keep at most [`MAX_DESCRIPTION_CHARS`] characters
//!
//! Stripping runs before decoding so an encoded `&lt;b&gt;` survives as text
//! instead of being mistaken for markup.
//!
//! The same ordering means cleaning is not idempotent for entity-encoded
//! markup: a second pass strips the `<b>` that the first pass decoded.
//! Re-sanitizing is only stable for text without encoded tags.

use crate::feed::item::{ExtractedItem, FeedItem, RawDescription, NO_DESCRIPTION};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 200;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<[^>]*?>").expect("Invalid tag pattern")
});

/// Entities decoded after tag stripping, applied in this order
const ENTITIES: [(&str, &str); 4] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

/// Cleans a description text
///
/// # Example
///
/// ```
/// use feedrelay::feed::sanitize_text;
///
/// assert_eq!(sanitize_text("<p>Hello&nbsp;World!</p><br/>"), "Hello World!");
/// ```
pub fn sanitize_text(raw: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(raw, "");

    let decoded = ENTITIES
        .iter()
        .fold(stripped.into_owned(), |text, &(entity, replacement)| {
            text.replace(entity, replacement)
        });

    let trimmed = decoded.trim();
    if trimmed.chars().count() <= MAX_DESCRIPTION_CHARS {
        return trimmed.to_string();
    }

    let truncated: String = trimmed.chars().take(MAX_DESCRIPTION_CHARS).collect();
    // A cut landing on whitespace would leave a trailing gap
    truncated.trim_end().to_string()
}

/// Cleans a raw description; non-text shapes become [`NO_DESCRIPTION`]
pub fn sanitize_description(raw: &RawDescription) -> String {
    match raw {
        RawDescription::Text(text) => sanitize_text(text),
        RawDescription::Structured => NO_DESCRIPTION.to_string(),
    }
}

/// Finalizes an extracted item: only the description is touched
pub fn sanitize_item(item: ExtractedItem) -> FeedItem {
    FeedItem {
        description: sanitize_description(&item.description),
        title: item.title,
        link: item.link,
        published_at: item.published_at,
        guid: item.guid,
    }
}
