//! Feed processing module
//!
//! This module turns a raw feed document into ordered, sanitized items:
//! - [`tree`] parses XML into a [`GenericNode`] tree
//! - [`extract`] maps item elements onto a stable schema with fallbacks
//! - [`sanitize`] cleans descriptions
//! - [`order`] sorts items newest first

pub mod extract;
mod item;
pub mod order;
pub mod sanitize;
pub mod tree;

pub use extract::{extract_items, extract_items_at};
pub use item::{
    ExtractedItem, FeedItem, RawDescription, NO_DESCRIPTION, NO_LINK, NO_TITLE,
};
pub use order::{order_items, parse_published};
pub use sanitize::{sanitize_description, sanitize_item, sanitize_text, MAX_DESCRIPTION_CHARS};
pub use tree::{parse_tree, GenericNode, ATTR_PREFIX, TEXT_KEY};

use crate::FeedError;

/// Runs a fetched document through parse → extract → sanitize → order
///
/// # Arguments
///
/// * `xml` - The raw feed document
///
/// # Returns
///
/// * `Ok(Vec<FeedItem>)` - Items, newest first (possibly empty)
/// * `Err(FeedError::Parse)` - The document is not well-formed XML
///
/// # Example
///
/// ```
/// use feedrelay::feed::process_document;
///
/// let xml = r#"<rss><channel><item><title>Hi</title></item></channel></rss>"#;
/// let items = process_document(xml).unwrap();
/// assert_eq!(items[0].title, "Hi");
/// ```
pub fn process_document(xml: &str) -> Result<Vec<FeedItem>, FeedError> {
    let tree = parse_tree(xml)?;

    let mut items: Vec<FeedItem> = extract_items(&tree)
        .into_iter()
        .map(sanitize_item)
        .collect();

    order_items(&mut items);

    Ok(items)
}
