//! Minimal owned element tree built from `quick-xml` events.
//!
//! The XML families are small documents that are traversed by tag name and
//! attribute, so a full DOM is read once and then queried.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub enum XmlParseError {
    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("document has no root element")]
    NoRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("element <{0}> is never closed")]
    Unclosed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text directly inside this element, children excluded.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn first_child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first child with this tag name, or `None` when there is no such child.
    pub fn first_child_text(&self, name: &str) -> Option<String> {
        self.first_child(name).map(|c| c.text.clone())
    }

    /// Depth-first search including `self`.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

fn syntax_error(reader: &Reader<&[u8]>, err: impl Display) -> XmlParseError {
    XmlParseError::Syntax {
        position: reader.buffer_position(),
        message: err.to_string(),
    }
}

fn element_from(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<XmlElement, XmlParseError> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax_error(reader, e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| syntax_error(reader, e))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

/// Hang a finished element under its parent, or make it the document root.
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(XmlParseError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(
    stack: &mut [XmlElement],
    reader: &Reader<&[u8]>,
    text: &str,
) -> Result<(), XmlParseError> {
    match stack.last_mut() {
        Some(element) => element.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(syntax_error(reader, "text outside of the root element")),
    }
    Ok(())
}

/// Parse a whole document and return its root element.
pub fn parse_document(input: &str) -> Result<XmlElement, XmlParseError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(XmlParseError::MultipleRoots);
                }
                let element = element_from(&reader, &start)?;
                stack.push(element);
            }
            Ok(Event::Empty(start)) => {
                let element = element_from(&reader, &start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| syntax_error(&reader, "unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| syntax_error(&reader, e))?;
                push_text(&mut stack, &reader, &text)?;
            }
            Ok(Event::CData(data)) => {
                let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_text(&mut stack, &reader, &text)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(syntax_error(&reader, e)),
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlParseError::Unclosed(open.name.clone()));
    }
    root.ok_or(XmlParseError::NoRoot)
}
