//! Owned XML element tree built on quick-xml.
//!
//! MVR documents are small, bounded scene descriptions, so the whole payload
//! is materialized as a tree of [`XmlElement`] values. Node types construct
//! themselves from borrowed elements on read and build new elements on write;
//! this module is the only place that touches the underlying event stream.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::MvrError;

/// A single XML element: tag, attributes in document order, optional text
/// content and child elements in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    /// Element tag name
    pub tag: String,
    /// Attributes in the order they appeared or were added
    pub attributes: Vec<(String, String)>,
    /// Text content, `None` when the element carries none
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        XmlElement {
            tag: tag.into(),
            ..XmlElement::default()
        }
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value for the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Find the first child element with the given tag.
    pub fn find(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Iterate over all child elements with the given tag.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Text content of the first child with the given tag, if any.
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.find(tag).and_then(|c| c.text.as_deref())
    }

    /// Append a child element.
    pub fn add_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Append a child element carrying only text content.
    pub fn add_text_child(&mut self, tag: impl Into<String>, text: impl Into<String>) {
        let mut child = XmlElement::new(tag);
        child.text = Some(text.into());
        self.children.push(child);
    }

    /// Parse an XML document into its root element.
    ///
    /// Comments, processing instructions and the declaration are skipped;
    /// surrounding whitespace in text content is trimmed.
    pub fn parse(xml: &str) -> Result<XmlElement, MvrError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    stack.push(element_from_start(&e)?);
                }
                Event::Empty(e) => {
                    let element = element_from_start(&e)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(t) => {
                    let content = t.unescape()?;
                    if let Some(open) = stack.last_mut() {
                        append_text(open, &content);
                    }
                }
                Event::CData(c) => {
                    let content = String::from_utf8_lossy(c.as_ref()).into_owned();
                    if let Some(open) = stack.last_mut() {
                        append_text(open, &content);
                    }
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        MvrError::InvalidDocument("unbalanced closing tag".into())
                    })?;
                    attach(&mut stack, &mut root, element);
                }
                Event::Eof => break,
                // declaration, comments, DOCTYPE, PI
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(MvrError::InvalidDocument(
                "unclosed element at end of document".into(),
            ));
        }
        root.ok_or_else(|| MvrError::InvalidDocument("document has no root element".into()))
    }

    /// Serialize this element as a complete UTF-8 document with an XML
    /// declaration and 4-space indentation.
    pub fn to_document_bytes(&self) -> Result<Vec<u8>, MvrError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_element(&mut writer, self)?;
        Ok(writer.into_inner())
    }
}

fn element_from_start(start: &BytesStart) -> Result<XmlElement, MvrError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(tag);
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn append_text(element: &mut XmlElement, content: &str) {
    if content.is_empty() {
        return;
    }
    match element.text.as_mut() {
        Some(existing) => existing.push_str(content),
        None => element.text = Some(content.to_string()),
    }
}

fn attach(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        // Only the first top-level element is the document root
        None if root.is_none() => *root = Some(element),
        None => {}
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), MvrError> {
    let mut start = BytesStart::new(element.tag.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    let text = element.text.as_deref().unwrap_or("");
    if text.is_empty() && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.tag.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_finds_children_and_attributes() {
        let root = XmlElement::parse(
            r#"<Scene><Layers><Layer name="Main" uuid="u-1"><Matrix>{1,0,0}</Matrix></Layer><Layer name="B"/></Layers></Scene>"#,
        )
        .unwrap();
        assert_eq!(root.tag, "Scene");
        let layers = root.find("Layers").unwrap();
        assert_eq!(layers.find_all("Layer").count(), 2);
        let layer = layers.find("Layer").unwrap();
        assert_eq!(layer.attr("name"), Some("Main"));
        assert_eq!(layer.attr("uuid"), Some("u-1"));
        assert_eq!(layer.child_text("Matrix"), Some("{1,0,0}"));
    }

    #[test]
    fn parse_unescapes_attribute_values_and_text() {
        let root =
            XmlElement::parse(r#"<Fixture name="Spot &amp; Wash"><Focus>a &lt; b</Focus></Fixture>"#)
                .unwrap();
        assert_eq!(root.attr("name"), Some("Spot & Wash"));
        assert_eq!(root.child_text("Focus"), Some("a < b"));
    }

    #[test]
    fn empty_elements_serialize_self_closed() {
        let mut root = XmlElement::new("Class");
        root.set_attr("name", "Stage");
        let bytes = root.to_document_bytes().unwrap();
        let out = String::from_utf8(bytes).unwrap();
        assert!(out.contains(r#"<Class name="Stage"/>"#));
        assert!(out.starts_with("<?xml"));
    }

    #[test]
    fn document_round_trips_through_parse() {
        let mut root = XmlElement::new("GeneralSceneDescription");
        root.set_attr("verMajor", "1");
        let mut scene = XmlElement::new("Scene");
        scene.add_text_child("Note", "a & b");
        root.add_child(scene);

        let bytes = root.to_document_bytes().unwrap();
        let reparsed = XmlElement::parse(std::str::from_utf8(&bytes).unwrap()).unwrap();
        assert_eq!(reparsed, root);
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(XmlElement::parse("<Scene><Layer></Scene>").is_err());
        assert!(XmlElement::parse("").is_err());
    }
}
