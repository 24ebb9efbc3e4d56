//! Generic element tree for save markup.
//!
//! This is the untyped layer between XML text and [`SaveDocument`]: it keeps
//! element order, tags and text exactly, so it can also be used to re-emit
//! prettified markup in compact form without touching entry order.
//!
//! [`SaveDocument`]: crate::SaveDocument

use std::io::Write;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::{Error, Result};

/// An element of save markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Tag name of the element.
    pub tag: String,
    /// Attributes as key-value pairs.
    pub attributes: Vec<(String, String)>,
    /// Text content. Only kept for elements without children.
    pub text: String,
    /// Child elements.
    pub children: Vec<Element>,
    /// Whether the element was written self-closing (`<t />`).
    pub self_closing: bool,
}

impl Element {
    /// Create a new element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the text content of this element.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an attribute to this element.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Parse markup text and return its root element.
    ///
    /// Declarations and comments are skipped. Whitespace between elements is
    /// dropped; text inside childless elements is kept verbatim.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    stack.push(element_from_start(&e)?);
                }
                Ok(Event::Empty(e)) => {
                    let mut element = element_from_start(&e)?;
                    element.self_closing = true;
                    attach(&mut stack, &mut root, element);
                }
                Ok(Event::End(_)) => {
                    if let Some(mut element) = stack.pop() {
                        if !element.children.is_empty() {
                            element.text.clear();
                        }
                        attach(&mut stack, &mut root, element);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(element) = stack.last_mut() {
                        let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                        element.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::Xml(format!("XML parse error: {}", e))),
            }

            if root.is_some() {
                break;
            }
        }

        root.ok_or_else(|| Error::Xml("No root element found in XML".to_string()))
    }

    /// Write this element as a complete document with `declaration` first.
    ///
    /// With `indent` set, nested elements are placed on their own lines and
    /// indented by that many tabs per level.
    pub fn write_document<W: Write>(
        &self,
        writer: W,
        declaration: Option<BytesDecl<'_>>,
        indent: Option<usize>,
    ) -> Result<()> {
        let mut xml_writer = match indent {
            Some(size) => Writer::new_with_indent(writer, b'\t', size),
            None => Writer::new(writer),
        };

        if let Some(decl) = declaration {
            xml_writer
                .write_event(Event::Decl(decl))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }

        self.write_element(&mut xml_writer)
    }

    /// Re-emit this element as compact markup with a `version="1.0"`
    /// declaration.
    pub fn to_compact_string(&self) -> Result<String> {
        self.to_document_string(None)
    }

    /// Re-emit this element as tab-indented markup with a `version="1.0"`
    /// declaration.
    pub fn to_pretty_string(&self) -> Result<String> {
        self.to_document_string(Some(1))
    }

    fn to_document_string(&self, indent: Option<usize>) -> Result<String> {
        let mut output = Vec::new();
        self.write_document(&mut output, Some(BytesDecl::new("1.0", None, None)), indent)?;
        String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
    }

    fn write_element<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let empty = self.self_closing && self.children.is_empty() && self.text.is_empty();

        let mut start = if empty && self.attributes.is_empty() {
            // Save files write empty elements as `<t />`.
            BytesStart::from_content(format!("{} ", self.tag), self.tag.len())
        } else {
            BytesStart::new(self.tag.as_str())
        };

        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if empty {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| Error::Xml(e.to_string()));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| Error::Xml(e.to_string()))?;

        if self.children.is_empty() {
            write_text(writer, &self.text)?;
        } else {
            for child in &self.children {
                child.write_element(writer)?;
            }
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.tag.as_str())))
            .map_err(|e| Error::Xml(e.to_string()))
    }
}

/// Write escaped text content. Only `<`, `>` and `&` are escaped, as the game
/// does.
fn write_text<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    writer
        .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
        .map_err(|e| Error::Xml(e.to_string()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(tag);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else {
        *root = Some(element);
    }
}
