//! The descriptor and save documents.
//!
//! Documents are XML trees: records are elements, scalar fields are child elements holding
//! text, small tuples (spritesheets, slots, camera) are attributes. Decoding ignores unknown
//! nodes; a record with a malformed leaf is logged and skipped.

pub mod avatars;
pub mod effects;
pub mod items;
pub mod objects;
pub mod save;
pub mod skills;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use roxmltree::{Document, Node};

use crate::error::{MuralError, Result};

/// Error of a single record; the record is skipped.
pub(crate) type RecordResult<T> = std::result::Result<T, String>;

pub(crate) fn parse_document<'i>(text: &'i str, root: &str) -> Result<Document<'i>> {
    let doc = Document::parse(text).map_err(|e| MuralError::parse(root, e))?;
    let found = doc.root_element().tag_name().name();
    if found != root {
        return Err(MuralError::parse(root, format!("unexpected root element <{}>", found)));
    }
    Ok(doc)
}

/// Decodes every `record` child of the root of a `root` document.
pub(crate) fn decode_records<T>(
    text: &str,
    root: &str,
    record: &str,
    decode: impl Fn(Node) -> RecordResult<T>,
) -> Result<Vec<T>> {
    let doc = parse_document(text, root)?;
    let mut list = Vec::new();
    for (index, node) in children(doc.root_element(), record).enumerate() {
        match decode(node) {
            Ok(data) => list.push(data),
            Err(reason) => log::error!("skipping {} #{} of {} document: {}", record, index, root, reason),
        }
    }
    Ok(list)
}

pub(crate) fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|n| n.is_element() && n.tag_name().name() == name)
}

pub(crate) fn children<'a, 'i: 'a>(node: Node<'a, 'i>, name: &'a str) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Trimmed text of a child element; an absent or empty element reads as `""`.
pub(crate) fn child_text(node: Node, name: &str) -> String {
    child(node, name)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// Text of a child element exactly as written.
pub(crate) fn raw_child_text(node: Node, name: &str) -> String {
    child(node, name)
        .and_then(|n| n.text())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Text of a child element that must be present and non-empty.
pub(crate) fn required_text(node: Node, name: &str) -> RecordResult<String> {
    let text = child_text(node, name);
    if text.is_empty() {
        return Err(format!("missing <{}>", name));
    }
    Ok(text)
}

pub(crate) fn attribute(node: Node, name: &str) -> String {
    node.attribute(name).map(|v| v.trim().to_string()).unwrap_or_default()
}

pub(crate) fn parse_attribute<T: std::str::FromStr>(node: Node, name: &str) -> RecordResult<T>
where
    T::Err: std::fmt::Display,
{
    let value = node
        .attribute(name)
        .ok_or_else(|| format!("<{}> without {} attribute", node.tag_name().name(), name))?;
    value
        .trim()
        .parse()
        .map_err(|e| format!("invalid {} {:?}: {}", name, value, e))
}

/// An indenting XML writer for the documents above.
pub(crate) struct XmlWriter {
    writer: quick_xml::Writer<Vec<u8>>,
    document: &'static str,
}

impl XmlWriter {
    pub fn new(document: &'static str) -> Result<Self> {
        let mut writer = Self {
            writer: quick_xml::Writer::new_with_indent(Vec::new(), b' ', 2),
            document,
        };
        writer.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(writer)
    }

    fn write(&mut self, event: Event) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| MuralError::parse(self.document, e))
    }

    pub fn start(&mut self, name: &str) -> Result<()> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// `<name>text</name>`, kept on one line so an empty leaf reads back as `""`.
    pub fn leaf(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    /// `<name a="..." b="..."/>`
    pub fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attribute in attributes {
            start.push_attribute(*attribute);
        }
        self.write(Event::Empty(start))
    }

    pub fn finish(self) -> Result<String> {
        let document = self.document;
        String::from_utf8(self.writer.into_inner()).map_err(|e| MuralError::parse(document, e))
    }
}
