use serde::Serialize;

/// Title used when an item has none
pub const NO_TITLE: &str = "No title";

/// Link used when an item has none
pub const NO_LINK: &str = "#";

/// Description used when an item has no usable description
pub const NO_DESCRIPTION: &str = "No description";

/// One syndicated entry as served to clients
///
/// Every field except `guid` is always present; missing source data is
/// replaced by the placeholders above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Publish date exactly as found in the feed
    #[serde(rename = "pubDate")]
    pub published_at: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
}

/// Description candidate before sanitization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDescription {
    /// Plain text (possibly carrying HTML markup)
    Text(String),
    /// A nested element structure instead of text
    Structured,
}

/// An item as extracted, before its description is cleaned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    pub title: String,
    pub link: String,
    pub published_at: String,
    pub description: RawDescription,
    pub guid: Option<String>,
}
