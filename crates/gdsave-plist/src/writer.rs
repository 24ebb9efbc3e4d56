//! Typed tree to save markup.

use quick_xml::events::BytesDecl;

use crate::markup::Element;
use crate::node::{Dict, Node, SaveDocument};
use crate::parser::{DICT_TAG, KEY_TAG};
use crate::{Error, Result};

/// Tag of the outer document wrapper.
pub const WRAPPER_TAG: &str = "plist";

/// Tag of the top-level dictionary inside the wrapper.
pub const ROOT_DICT_TAG: &str = "dict";

/// Serialization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Tabs per nesting level, or `None` for compact single-line output.
    pub indent: Option<usize>,
}

impl WriteOptions {
    pub fn pretty() -> Self {
        Self { indent: Some(1) }
    }
}

/// Serialize a document as compact markup.
pub fn serialize(doc: &SaveDocument) -> Result<String> {
    serialize_with(doc, WriteOptions::default())
}

/// Serialize a document with the given options.
pub fn serialize_with(doc: &SaveDocument, options: WriteOptions) -> Result<String> {
    let mut output = Vec::new();
    to_element(doc).write_document(
        &mut output,
        Some(BytesDecl::new("1.0", None, None)),
        options.indent,
    )?;

    String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
}

/// Build the markup element tree for a document, entries in tree order.
pub fn to_element(doc: &SaveDocument) -> Element {
    let mut wrapper = Element::new(WRAPPER_TAG);
    wrapper.attributes = doc.attributes.clone();
    wrapper.child(dict_element(ROOT_DICT_TAG, &doc.root))
}

fn dict_element(tag: &str, dict: &Dict) -> Element {
    let mut element = Element::new(tag);
    element.self_closing = dict.is_empty();

    for (key, value) in dict.iter() {
        element.children.push(Element::new(KEY_TAG).text(key));
        element.children.push(value_element(value));
    }

    element
}

fn value_element(node: &Node) -> Element {
    match node {
        Node::Dict(dict) => dict_element(DICT_TAG, dict),
        Node::Leaf(scalar) => {
            let mut element = Element::new(scalar.tag());
            match scalar.literal() {
                Some(literal) => element.text = literal,
                None => element.self_closing = true,
            }
            element
        }
    }
}
