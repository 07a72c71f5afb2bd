//! Generic element tree produced from XML input.
//!
//! The loader never touches `quick-xml` directly; it walks the [`Document`]
//! built here, which keeps elements and attributes in document order.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DocumentError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    root: Option<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root: Some(root) }
    }

    /// A document without a root element. The loader rejects it as invalid input.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&text)
    }

    pub fn parse_str(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut open: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => open.push(Element::from_start(&start)?),
                Ok(Event::Empty(start)) => {
                    let element = Element::from_start(&start)?;
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| DocumentError::Xml("unexpected closing tag".to_string()))?;
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::Eof) => break,
                Err(err) => {
                    return Err(DocumentError::Xml(format!(
                        "at byte {}: {err}",
                        reader.buffer_position()
                    )))
                }
                // Text, comments, declarations and processing instructions carry no layout data.
                Ok(_) => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(DocumentError::Xml(format!(
                "element <{}> is never closed",
                unclosed.name
            )));
        }

        root.map(Self::new).ok_or(DocumentError::NoRootElement)
    }

    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Every element named `name`, the root included, in document order.
    pub fn elements_by_tag(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        if let Some(root) = &self.root {
            root.collect_named(name, &mut found);
        }
        found
    }
}

fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), DocumentError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(element);
    } else if root.is_some() {
        return Err(DocumentError::Xml(format!(
            "second root element <{}>",
            element.name
        )));
    } else {
        *root = Some(element);
    }
    Ok(())
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect_named(name, found);
        }
    }

    fn from_start(start: &BytesStart) -> Result<Self, DocumentError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|err| DocumentError::Xml(format!("invalid UTF-8 in element name: {err}")))?
            .to_string();

        let mut element = Self::new(name);
        for attr in start.attributes() {
            let attr = attr.map_err(|err| DocumentError::Xml(format!("attribute error: {err}")))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|err| {
                    DocumentError::Xml(format!("invalid UTF-8 in attribute key: {err}"))
                })?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|err| DocumentError::Xml(format!("attribute '{key}': {err}")))?
                .into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }
}
