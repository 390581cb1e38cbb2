//! Minimal owned XML tree built on top of `quick-xml`
//!
//! The template parser needs random access to an element's attributes and
//! children, so the event stream is folded into a small tree first. Any
//! well-formedness problem stops the build and is reported as a single
//! [`XmlError`].

use crate::error::{Result, TileError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;

/// One element of a payload document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Concatenated character data directly inside this element
    pub text: String,
    /// 1-based line of the start tag
    pub line: usize,
}

impl XmlElement {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: String::new(),
            line,
        }
    }
}

impl Drop for XmlElement {
    /// Descendants are unlinked into a flat list first, so dropping an
    /// arbitrarily deep document never recurses.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// Why a document is not well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlError {
    pub message: String,
    pub line: usize,
}

impl XmlError {
    fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Converts byte offsets into line numbers, scanning forward only.
struct LineTracker<'a> {
    source: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineTracker<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        let offset = offset.min(self.source.len());
        if offset < self.offset {
            return 1 + self.source[..offset].iter().filter(|&&b| b == b'\n').count();
        }
        self.line += self.source[self.offset..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.offset = offset;
        self.line
    }
}

/// Parse a whole document into its root element.
pub fn parse_document(xml: &str) -> std::result::Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut lines = LineTracker::new(xml);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let start = reader.buffer_position() as usize;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                let line = lines.line_at(reader.error_position() as usize);
                return Err(XmlError::new(e.to_string(), line));
            }
        };
        let line = lines.line_at(start);

        match event {
            Event::Start(e) => {
                stack.push(start_element(&e, line)?);
            }
            Event::Empty(e) => {
                let element = start_element(&e, line)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // quick-xml already verified the end name matches
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::new("unexpected closing tag", line))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| XmlError::new(e.to_string(), line))?;
                push_text(&mut stack, &text, line)?;
            }
            Event::CData(c) => {
                let text = std::str::from_utf8(&c)
                    .map_err(|e| XmlError::new(format!("invalid UTF-8 in CDATA: {}", e), line))?;
                push_text(&mut stack, text, line)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::new(
            format!("element <{}> is never closed", open.name),
            open.line,
        ));
    }

    root.ok_or_else(|| XmlError::new("document has no root element", lines.line_at(xml.len())))
}

fn start_element(e: &BytesStart<'_>, line: usize) -> std::result::Result<XmlElement, XmlError> {
    let qname = e.name();
    let name = std::str::from_utf8(qname.as_ref())
        .map_err(|err| XmlError::new(format!("invalid element name: {}", err), line))?;
    let mut element = XmlElement::new(name, line);

    for attr in e.attributes() {
        let attr = attr.map_err(|err| XmlError::new(err.to_string(), line))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| XmlError::new(format!("invalid attribute name: {}", err), line))?;
        let value = attr
            .unescape_value()
            .map_err(|err| XmlError::new(err.to_string(), line))?;
        element.attributes.push((key.to_string(), value.into_owned()));
    }

    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> std::result::Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::new(
            format!("second root element <{}>", element.name),
            element.line,
        ));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: &str, line: usize) -> std::result::Result<(), XmlError> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::new("text outside of the root element", line)),
    }
}

/// Decode the raw bytes of a payload file.
///
/// UTF-16 input must carry a byte order mark. Anything else is read as
/// UTF-8, with an optional BOM.
pub fn decode_document(bytes: &[u8], file: &str) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => utf8(rest, file),
        [0xFF, 0xFE, rest @ ..] => utf16(rest, file, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16(rest, file, u16::from_be_bytes),
        _ => utf8(bytes, file),
    }
}

fn utf8(bytes: &[u8], file: &str) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| TileError::encoding(file, e.to_string()))
}

fn utf16(bytes: &[u8], file: &str, read: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(TileError::encoding(file, "odd number of bytes in UTF-16 input"));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| read([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| TileError::encoding(file, e.to_string()))
}
