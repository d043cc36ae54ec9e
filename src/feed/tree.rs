//! Generic XML tree
//!
//! Converts a raw XML document into a [`GenericNode`] tree without any
//! knowledge of RSS. Structural tolerance is left to the extractor: the
//! parser only fails on documents that are not well-formed.
//!
//! # Shape rules
//!
//! - An element with neither children nor attributes becomes a text leaf.
//! - Attributes live under keys prefixed with [`ATTR_PREFIX`].
//! - An element's own text lives under [`TEXT_KEY`] when it also has
//!   attributes or children.
//! - Sibling elements sharing a tag name collapse into an ordered sequence.

use crate::FeedError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

/// Key prefix distinguishing attributes from child elements
pub const ATTR_PREFIX: &str = "@_";

/// Key holding an element's own text content
pub const TEXT_KEY: &str = "#text";

/// One parsed XML element (or a run of same-named siblings)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericNode {
    /// Text-only element
    Text(String),
    /// Element with attributes and/or child elements
    Map(BTreeMap<String, GenericNode>),
    /// Repeated sibling elements, in document order
    Seq(Vec<GenericNode>),
}

impl GenericNode {
    /// Looks up a child element or attribute key on a map node
    ///
    /// A sequence resolves through its first entry, so a repeated wrapper
    /// element behaves like its first occurrence.
    pub fn get(&self, key: &str) -> Option<&GenericNode> {
        match self {
            Self::Map(map) => map.get(key),
            Self::Seq(nodes) => nodes.first().and_then(|n| n.get(key)),
            Self::Text(_) => None,
        }
    }

    /// Looks up an attribute by its bare name
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self.get(&format!("{}{}", ATTR_PREFIX, name)) {
            Some(Self::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the node's text: a text leaf, or the text key of a map
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Map(map) => match map.get(TEXT_KEY) {
                Some(Self::Text(text)) => Some(text),
                _ => None,
            },
            Self::Seq(_) => None,
        }
    }

    /// Returns true if the node carries child elements (not just text and attributes)
    pub fn has_children(&self) -> bool {
        match self {
            Self::Text(_) => false,
            Self::Map(map) => map
                .keys()
                .any(|key| key != TEXT_KEY && !key.starts_with(ATTR_PREFIX)),
            Self::Seq(_) => true,
        }
    }

    /// Views the node as a sequence: a `Seq` yields its entries, anything else itself
    pub fn as_seq(&self) -> Vec<&GenericNode> {
        match self {
            Self::Seq(nodes) => nodes.iter().collect(),
            other => vec![other],
        }
    }
}

/// An element under construction
#[derive(Debug)]
struct Frame {
    name: String,
    entries: BTreeMap<String, GenericNode>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: BTreeMap::new(),
            text: String::new(),
        }
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Adds a finished child, collapsing repeated names into a sequence
    fn insert_child(&mut self, name: String, node: GenericNode) {
        match self.entries.remove(&name) {
            None => {
                self.entries.insert(name, node);
            }
            Some(GenericNode::Seq(mut nodes)) => {
                nodes.push(node);
                self.entries.insert(name, GenericNode::Seq(nodes));
            }
            Some(existing) => {
                self.entries.insert(name, GenericNode::Seq(vec![existing, node]));
            }
        }
    }

    fn finish(mut self) -> (String, GenericNode) {
        let text = self.text.trim();
        if self.entries.is_empty() {
            return (self.name, GenericNode::Text(text.to_string()));
        }
        if !text.is_empty() {
            self.entries
                .insert(TEXT_KEY.to_string(), GenericNode::Text(text.to_string()));
        }
        (self.name, GenericNode::Map(self.entries))
    }
}

/// Parses an XML document into a generic tree
///
/// The returned node is a map keyed by the document's root element name,
/// e.g. `{"rss": {...}}`. Documents without any element produce an empty map.
///
/// # Arguments
///
/// * `xml` - The raw document text
///
/// # Returns
///
/// * `Ok(GenericNode)` - The parsed tree
/// * `Err(FeedError::Parse)` - The document is not well-formed XML
///
/// # Example
///
/// ```
/// use feedrelay::feed::parse_tree;
///
/// let tree = parse_tree("<rss><channel><title>Blog</title></channel></rss>").unwrap();
/// let title = tree.get("rss").and_then(|r| r.get("channel")).and_then(|c| c.get("title"));
/// assert_eq!(title.and_then(|t| t.text()), Some("Blog"));
/// ```
pub fn parse_tree(xml: &str) -> Result<GenericNode, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Frame::new(String::new())];

    loop {
        let event = reader
            .read_event()
            .map_err(|e| parse_error(&reader, e))?;

        match event {
            Event::Start(e) => {
                let frame = open_element(&e)?;
                stack.push(frame);
            }
            Event::Empty(e) => {
                let (name, node) = open_element(&e)?.finish();
                current(&mut stack)?.insert_child(name, node);
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(FeedError::Parse("unexpected closing tag".to_string()));
                }
                let (name, node) = stack.pop().map(Frame::finish).ok_or_else(|| {
                    FeedError::Parse("unexpected closing tag".to_string())
                })?;
                current(&mut stack)?.insert_child(name, node);
            }
            Event::Text(e) => {
                let text = decode_references(&String::from_utf8_lossy(&e));
                current(&mut stack)?.push_text(&text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                current(&mut stack)?.push_text(&text);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if stack.len() != 1 {
        let open = stack.last().map(|f| f.name.clone()).unwrap_or_default();
        return Err(FeedError::Parse(format!("unclosed element <{}>", open)));
    }

    let root = stack
        .pop()
        .ok_or_else(|| FeedError::Parse("empty parser stack".to_string()))?;
    Ok(GenericNode::Map(root.entries))
}

/// Starts a frame for an opening tag, with its attributes already recorded
fn open_element(e: &BytesStart<'_>) -> Result<Frame, FeedError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut frame = Frame::new(name);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| FeedError::Parse(format!("malformed attribute: {}", e)))?;
        let key = format!(
            "{}{}",
            ATTR_PREFIX,
            String::from_utf8_lossy(attr.key.as_ref())
        );
        let value = decode_references(&String::from_utf8_lossy(&attr.value));
        frame.entries.insert(key, GenericNode::Text(value));
    }

    Ok(frame)
}

/// Resolves character and predefined entity references one at a time
///
/// Undeclared entities (`&nbsp;`) and bare ampersands are copied through
/// literally, so one of them never blocks decoding of its neighbors.
fn decode_references(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let resolved = tail.find(';').and_then(|end| {
            let name = &tail[1..end];
            if name.is_empty() || name.contains(|c: char| c == '&' || c.is_whitespace()) {
                return None;
            }
            resolve_reference(name).map(|text| (text, end + 1))
        });

        match resolved {
            Some((text, consumed)) => {
                out.push_str(&text);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn resolve_reference(name: &str) -> Option<String> {
    let Some(number) = name.strip_prefix('#') else {
        return quick_xml::escape::resolve_predefined_entity(name).map(str::to_string);
    };

    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    char::from_u32(code).map(String::from)
}

fn current(stack: &mut [Frame]) -> Result<&mut Frame, FeedError> {
    stack
        .last_mut()
        .ok_or_else(|| FeedError::Parse("empty parser stack".to_string()))
}

fn parse_error(reader: &Reader<&[u8]>, e: quick_xml::Error) -> FeedError {
    FeedError::Parse(format!("{} at byte {}", e, reader.buffer_position()))
}
