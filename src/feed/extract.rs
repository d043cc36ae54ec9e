//! Item extraction
//!
//! Walks `rss → channel → item` and maps each item element onto an
//! [`ExtractedItem`]. Every field has its own ordered fallback chain, so one
//! missing or oddly shaped field never affects another field or another item.
//!
//! | Field | Fallback order |
//! |-------|----------------|
//! | title | `<title>` → [`NO_TITLE`] |
//! | link | `<link>` text → `<link href>` → [`NO_LINK`] |
//! | pubDate | `<pubDate>` → current time (RFC 3339, millis, `Z`) |
//! | description | `<description>` → `<content:encoded>` → [`NO_DESCRIPTION`] |
//! | guid | `<guid>` text → link text → absent |
//!
//! Empty text counts as missing.

use crate::feed::item::{ExtractedItem, RawDescription, NO_DESCRIPTION, NO_LINK, NO_TITLE};
use crate::feed::tree::GenericNode;
use chrono::{DateTime, SecondsFormat, Utc};

/// Candidate tags for the description, in priority order
const DESCRIPTION_TAGS: [&str; 2] = ["description", "content:encoded"];

/// Extracts candidate items from a parsed feed tree
///
/// Returns an empty vector when the `rss`, `channel` or `item` level is
/// missing; a feed with zero items is valid.
pub fn extract_items(tree: &GenericNode) -> Vec<ExtractedItem> {
    extract_items_at(tree, Utc::now())
}

/// Same as [`extract_items`] with an explicit "now" for the publish-date fallback
pub fn extract_items_at(tree: &GenericNode, now: DateTime<Utc>) -> Vec<ExtractedItem> {
    let fallback_date = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    item_nodes(tree)
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            if !node.has_children() {
                tracing::debug!(index = index, "Item element carries no fields");
            }
            extract_item(node, &fallback_date)
        })
        .collect()
}

/// Locates the item elements, normalized to a sequence
fn item_nodes(tree: &GenericNode) -> Vec<&GenericNode> {
    tree.get("rss")
        .and_then(|rss| rss.get("channel"))
        .and_then(|channel| channel.get("item"))
        .map(GenericNode::as_seq)
        .unwrap_or_default()
}

fn extract_item(item: &GenericNode, fallback_date: &str) -> ExtractedItem {
    let link = link_of(item);

    ExtractedItem {
        title: text_of(item.get("title"))
            .unwrap_or(NO_TITLE)
            .to_string(),
        link: link.unwrap_or(NO_LINK).to_string(),
        published_at: text_of(item.get("pubDate"))
            .unwrap_or(fallback_date)
            .to_string(),
        description: description_of(item),
        guid: text_of(item.get("guid")).or(link).map(str::to_string),
    }
}

/// Non-empty text of a node; a repeated element contributes its first occurrence
fn text_of(node: Option<&GenericNode>) -> Option<&str> {
    match node? {
        GenericNode::Seq(nodes) => text_of(nodes.first()),
        other => other.text().filter(|text| !text.is_empty()),
    }
}

fn link_of(item: &GenericNode) -> Option<&str> {
    let node = item.get("link");
    text_of(node).or_else(|| {
        node.and_then(|link| link.attr("href"))
            .filter(|href| !href.is_empty())
    })
}

fn description_of(item: &GenericNode) -> RawDescription {
    DESCRIPTION_TAGS
        .iter()
        .filter_map(|tag| item.get(tag))
        .find(|node| is_present(node))
        .map(classify_description)
        .unwrap_or_else(|| RawDescription::Text(NO_DESCRIPTION.to_string()))
}

/// Whether a description candidate should win over the next one
fn is_present(node: &GenericNode) -> bool {
    match node {
        GenericNode::Text(text) => !text.is_empty(),
        GenericNode::Map(_) | GenericNode::Seq(_) => true,
    }
}

fn classify_description(node: &GenericNode) -> RawDescription {
    match node {
        GenericNode::Text(text) => RawDescription::Text(text.clone()),
        GenericNode::Map(_) if !node.has_children() => node
            .text()
            .map(|text| RawDescription::Text(text.to_string()))
            .unwrap_or(RawDescription::Structured),
        _ => RawDescription::Structured,
    }
}
