//! OLX document parser using quick-xml.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{Element, Node};

use super::options::ParseOptions;

/// Parser turning OLX XML into an [`Element`] tree.
#[derive(Debug, Clone, Default)]
pub struct OlxParser {
    options: ParseOptions,
}

impl OlxParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse a file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Element> {
        let data = fs::read(path.as_ref())?;
        self.parse_bytes(&data)
    }

    /// Parse UTF-8 bytes (a leading BOM is ignored).
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Element> {
        let content = String::from_utf8(strip_bom(data).to_vec())?;
        self.parse_str(&content)
    }

    /// Parse a string.
    pub fn parse_str(&self, content: &str) -> Result<Element> {
        let mut reader = Reader::from_str(content);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(start_element(&e)?),
                Event::Empty(e) => {
                    let element = start_element(&e)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element);
                    }
                }
                Event::Text(e) => {
                    let text = String::from_utf8_lossy(e.as_ref());
                    if self.options.trim_whitespace && text.trim().is_empty() {
                        continue;
                    }
                    if let Some(top) = stack.last_mut() {
                        top.push_text(text);
                    }
                }
                Event::CData(e) => {
                    if let Some(top) = stack.last_mut() {
                        top.push_text(String::from_utf8_lossy(&e));
                    }
                }
                Event::GeneralRef(e) => {
                    if let Some(top) = stack.last_mut() {
                        let entity = String::from_utf8_lossy(e.as_ref());
                        match resolve_entity(&entity) {
                            Some(resolved) => top.push_text(resolved),
                            None => {
                                log::debug!("Unknown entity &{};, kept verbatim", entity);
                                top.push_text(format!("&{};", entity));
                            }
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::Other(format!(
                "Unexpected end of document inside <{}>",
                open.name
            )));
        }

        let root = root.ok_or(Error::EmptyDocument)?;

        if let Some(ref expected) = self.options.expected_root {
            if &root.name != expected {
                return Err(Error::UnexpectedRoot {
                    expected: expected.clone(),
                    found: root.name,
                });
            }
        }

        Ok(root)
    }
}

fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(name);

    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape_with(&raw, named_entity)?;
        element.attributes.push((key, value.into_owned()));
    }

    Ok(element)
}

/// Attach a finished element to its parent, or make it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Strip a UTF-8 byte order mark.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

fn named_entity(name: &str) -> Option<&'static str> {
    match name {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "apos" => Some("'"),
        "quot" => Some("\""),
        "nbsp" => Some("\u{a0}"),
        _ => None,
    }
}

/// Resolve a named or numeric entity reference (without `&` and `;`).
fn resolve_entity(entity: &str) -> Option<Cow<'static, str>> {
    if let Some(value) = named_entity(entity) {
        return Some(Cow::Borrowed(value));
    }

    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };

    code.and_then(char::from_u32)
        .map(|c| Cow::Owned(c.to_string()))
}
