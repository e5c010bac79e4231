// XML document writer
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of ippcode.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Render a document as indented XML.
//!
//! [`XmlWriter`] is a [`DocumentWriter`] atop [`quick_xml::Writer`].
//! Since attributes may follow the start of an element,
//!   an element's opening tag is held back until its content
//!   (or its end)
//!   is known:
//!
//!   - an element ended with no content is written as an empty element
//!       (`<instruction order="2" opcode="BREAK"/>`);
//!   - an element with text is written on a single line
//!       (`<arg1 type="string">hi</arg1>`),
//!         including when that text is empty
//!         (`<arg1 type="string"></arg1>`);
//!   - an element with child elements has its children indented beneath
//!       it.
//!
//! Text and attribute values are escaped as needed.
//! The document ends with a newline.
//!
//! Calls that do not form a well-formed document yield a [`WriterError`]
//!   rather than producing malformed output.

use super::XmlError;
use crate::document::DocumentWriter;
use crate::error::IoError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::{self, Display};
use std::io::{self, Write};

pub type Result<T = ()> = std::result::Result<T, WriterError>;

/// Indentation of the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    pub indent_char: u8,
    /// Number of [`Self::indent_char`] per level of nesting;
    ///   `0` disables indentation and line breaks entirely.
    pub indent_size: usize,
}

impl WriterConfig {
    /// Render the document without any indentation or line breaks
    ///   (aside from the final newline).
    pub fn compact() -> Self {
        Self {
            indent_size: 0,
            ..Default::default()
        }
    }
}

impl Default for WriterConfig {
    /// Two spaces per level.
    fn default() -> Self {
        Self {
            indent_char: b' ',
            indent_size: 2,
        }
    }
}

/// Error while writing a document.
#[derive(Debug, PartialEq)]
pub enum WriterError {
    /// Failed to write to the sink.
    Io(IoError),
    /// Propagated XML error.
    Xml(XmlError),
    /// An operation was requested that is not valid in the current state
    ///   (e.g. writing an element before the document is opened).
    UnexpectedOperation(&'static str, WriterState),
    /// An attribute was written after the opening tag of the current
    ///   element was complete.
    UnexpectedAttribute(String),
    /// The document may have only a single root element.
    MultipleRoots(String),
    /// An element end did not match the most recently started element.
    UnbalancedEnd {
        expected: Option<String>,
        found: String,
    },
    /// The document was closed while an element was still open.
    UnclosedElement(String),
}

impl Display for WriterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::Xml(e) => e.fmt(f),
            Self::UnexpectedOperation(op, st) => {
                write!(f, "unexpected `{op}` while {st}")
            }
            Self::UnexpectedAttribute(name) => write!(
                f,
                "attribute `{name}` must precede the content of its element"
            ),
            Self::MultipleRoots(name) => {
                write!(f, "element `{name}` would be a second root element")
            }
            Self::UnbalancedEnd {
                expected: Some(expected),
                found,
            } => write!(f, "expected end of `{expected}`, but got `{found}`"),
            Self::UnbalancedEnd {
                expected: None,
                found,
            } => write!(f, "unexpected end of `{found}` with no open element"),
            Self::UnclosedElement(name) => {
                write!(f, "document closed with `{name}` still open")
            }
        }
    }
}

impl std::error::Error for WriterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(IoError(e)) => Some(e),
            Self::Xml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for WriterError {
    fn from(e: io::Error) -> Self {
        Self::Io(IoError(e))
    }
}

impl From<quick_xml::Error> for WriterError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.into())
    }
}

/// Current state of an [`XmlWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// The declaration has not yet been written.
    DocumentExpected,
    /// Awaiting an element or text.
    NodeExpected,
    /// An opening tag has been started and may still receive attributes.
    NodeOpen,
    /// The document is complete.
    Closed,
}

impl Default for WriterState {
    fn default() -> Self {
        Self::DocumentExpected
    }
}

impl Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DocumentExpected => write!(f, "awaiting document"),
            Self::NodeExpected => write!(f, "awaiting node"),
            Self::NodeOpen => write!(f, "within opening tag"),
            Self::Closed => write!(f, "document closed"),
        }
    }
}

/// Indenting XML [`DocumentWriter`].
///
/// See the [module-level documentation](self) for rendering rules.
pub struct XmlWriter<W: Write> {
    writer: Writer<W>,
    state: WriterState,
    /// Opening tag held back until its content is known.
    pending: Option<BytesStart<'static>>,
    /// Names of elements that have been started but not yet ended.
    open: Vec<String>,
    seen_root: bool,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, WriterConfig::default())
    }

    pub fn with_config(sink: W, config: WriterConfig) -> Self {
        let writer = match config.indent_size {
            0 => Writer::new(sink),
            size => Writer::new_with_indent(sink, config.indent_char, size),
        };

        Self {
            writer,
            state: WriterState::default(),
            pending: None,
            open: Vec::new(),
            seen_root: false,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Fail unless the document is open for nodes.
    fn expect_body(&self, op: &'static str) -> Result {
        match self.state {
            WriterState::NodeExpected | WriterState::NodeOpen => Ok(()),
            st => Err(WriterError::UnexpectedOperation(op, st)),
        }
    }

    /// Complete any held-back opening tag,
    ///   as the element is now known to have content.
    fn flush_open(&mut self) -> Result {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
            self.state = WriterState::NodeExpected;
        }

        Ok(())
    }
}

impl<W: Write> DocumentWriter for XmlWriter<W> {
    type Error = WriterError;

    fn open_document(&mut self, version: &str, encoding: &str) -> Result {
        if self.state != WriterState::DocumentExpected {
            return Err(WriterError::UnexpectedOperation(
                "open_document",
                self.state,
            ));
        }

        self.writer.write_event(Event::Decl(BytesDecl::new(
            version,
            Some(encoding),
            None,
        )))?;

        self.state = WriterState::NodeExpected;
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result {
        self.expect_body("start_element")?;

        if self.open.is_empty() {
            if self.seen_root {
                return Err(WriterError::MultipleRoots(name.into()));
            }

            self.seen_root = true;
        }

        self.flush_open()?;

        self.pending = Some(BytesStart::new(name.to_string()));
        self.open.push(name.into());
        self.state = WriterState::NodeOpen;

        Ok(())
    }

    fn write_attribute(&mut self, name: &str, value: &str) -> Result {
        match (&mut self.pending, self.state) {
            (Some(start), WriterState::NodeOpen) => {
                start.push_attribute((name, value));
                Ok(())
            }
            (_, WriterState::NodeExpected) => {
                Err(WriterError::UnexpectedAttribute(name.into()))
            }
            (_, st) => {
                Err(WriterError::UnexpectedOperation("write_attribute", st))
            }
        }
    }

    fn text(&mut self, value: &str) -> Result {
        self.expect_body("text")?;

        if self.open.is_empty() {
            return Err(WriterError::UnexpectedOperation("text", self.state));
        }

        self.flush_open()?;
        self.writer.write_event(Event::Text(BytesText::new(value)))?;

        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result {
        self.expect_body("end_element")?;

        match self.open.last() {
            Some(expected) if expected == name => (),
            expected => {
                return Err(WriterError::UnbalancedEnd {
                    expected: expected.cloned(),
                    found: name.into(),
                })
            }
        }

        self.open.pop();

        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self.writer.write_event(Event::End(BytesEnd::new(name)))?,
        }

        self.state = WriterState::NodeExpected;
        Ok(())
    }

    fn close_document(&mut self) -> Result {
        self.expect_body("close_document")?;

        if let Some(name) = self.open.last() {
            return Err(WriterError::UnclosedElement(name.clone()));
        }

        self.writer.get_mut().write_all(b"\n")?;
        self.writer.get_mut().flush()?;

        self.state = WriterState::Closed;
        Ok(())
    }
}
