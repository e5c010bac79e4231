// XML document reader
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

//! Read a program document back from XML.
//!
//! This is the inverse of [`super::writer`],
//!   but is more lenient in what it accepts:
//!
//!   - instructions may appear in any order and are sorted by their
//!       `order` attribute,
//!         which must then be exactly `1..=N`;
//!   - operands may appear in any order and are sorted by name,
//!       which must then be contiguous from `arg1`;
//!   - opcodes and type tags are compared case-insensitively;
//!   - comments,
//!       processing instructions,
//!       unknown attributes,
//!       and whitespace between elements are ignored.
//!
//! Operand values are taken as-is;
//!   they are not revalidated against the lexical rules of the source
//!   language,
//!     though the number of operands must match the opcode.
//!
//! Exit codes of [`ReadError`] follow the conventions of tools that
//!   consume the document:
//!     malformed XML is `31` and an unexpected structure is `32`.

use super::XmlError;
use crate::catalog::{self, Opcode, ValueType};
use crate::document::{
    ProgramDocument, ATTR_LANGUAGE, ATTR_OPCODE, ATTR_ORDER, ATTR_TYPE,
    EL_ARGS, EL_INSTRUCTION, EL_PROGRAM,
};
use crate::global::{self, Order};
use crate::instr::{Args, InstructionRecord};
use crate::resolve::ResolvedArgument;
use exitcode::ExitCode;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::{self, Display};
use std::io::BufRead;

/// Error while reading a document.
#[derive(Debug, PartialEq)]
pub enum ReadError {
    /// The input is not well-formed XML.
    Xml(XmlError),
    /// Input ended within an element.
    UnexpectedEof,
    /// The input contains no root element.
    MissingRoot,
    /// An element appeared where it is not permitted.
    UnexpectedElement {
        parent: &'static str,
        found: String,
    },
    /// Non-whitespace text appeared where it is not permitted.
    UnexpectedText {
        parent: &'static str,
        text: String,
    },
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },
    /// The root `language` attribute names some other language.
    InvalidLanguage(String),
    UnknownOpcode(String),
    /// An `order` attribute is not a positive integer.
    InvalidOrder(String),
    /// Two instructions share an order.
    DuplicateOrder(Order),
    /// No instruction has the given order,
    ///   but some instruction has a greater one.
    MissingOrder(Order),
    /// An operand `type` attribute is not a known type tag.
    InvalidArgumentType(String),
    /// The same operand appears more than once in an instruction.
    DuplicateArgument(&'static str),
    /// An operand is absent but a later one is present.
    MissingArgument(&'static str),
    ArityMismatch {
        opcode: Opcode,
        expected: usize,
        actual: usize,
    },
}

impl ReadError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Xml(_) | Self::UnexpectedEof => 31,
            _ => 32,
        }
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(e) => write!(f, "malformed XML: {e}"),
            Self::UnexpectedEof => {
                write!(f, "unexpected end of input within an element")
            }
            Self::MissingRoot => {
                write!(f, "expected root element `{EL_PROGRAM}`")
            }
            Self::UnexpectedElement { parent, found } => {
                write!(f, "unexpected element `{found}` within {parent}")
            }
            Self::UnexpectedText { parent, text } => {
                write!(f, "unexpected text {text:?} within {parent}")
            }
            Self::MissingAttribute { element, attr } => {
                write!(f, "element `{element}` is missing attribute `{attr}`")
            }
            Self::InvalidLanguage(lang) => write!(
                f,
                "expected language `{}`, but got `{lang}`",
                global::LANGUAGE_TAG,
            ),
            Self::UnknownOpcode(opcode) => {
                write!(f, "unknown opcode `{opcode}`")
            }
            Self::InvalidOrder(order) => {
                write!(f, "`{order}` is not a valid instruction order")
            }
            Self::DuplicateOrder(order) => {
                write!(f, "duplicate instruction order {order}")
            }
            Self::MissingOrder(order) => {
                write!(f, "missing instruction with order {order}")
            }
            Self::InvalidArgumentType(ty) => {
                write!(f, "unknown argument type `{ty}`")
            }
            Self::DuplicateArgument(name) => {
                write!(f, "duplicate argument `{name}`")
            }
            Self::MissingArgument(name) => {
                write!(f, "missing argument `{name}`")
            }
            Self::ArityMismatch {
                opcode,
                expected,
                actual,
            } => write!(
                f,
                "expected {expected} argument(s) for opcode `{opcode}`, \
                   but got {actual}"
            ),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for ReadError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.into())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ReadError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(quick_xml::Error::from(e).into())
    }
}

/// Read an entire document from `input`.
pub fn read_document<R: BufRead>(
    input: R,
) -> Result<ProgramDocument, ReadError> {
    DocumentReader::new(input).read()
}

/// A node of interest,
///   detached from the reader's buffer.
#[derive(Debug)]
enum Node {
    Start(BytesStart<'static>),
    Empty(BytesStart<'static>),
    Text(String),
    End,
    Eof,
}

struct DocumentReader<B: BufRead> {
    reader: Reader<B>,
    /// Internal buffer for [`Reader`].
    buffer: Vec<u8>,
}

impl<B: BufRead> DocumentReader<B> {
    fn new(input: B) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(true);

        Self {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Produce the next node,
    ///   skipping those that carry no content.
    fn next_node(&mut self) -> Result<Node, ReadError> {
        loop {
            self.buffer.clear();

            let node = match self.reader.read_event_into(&mut self.buffer)? {
                Event::Start(ele) => Node::Start(ele.into_owned()),
                Event::Empty(ele) => Node::Empty(ele.into_owned()),
                Event::End(_) => Node::End,
                Event::Text(text) => Node::Text(text.unescape()?.into_owned()),
                Event::CData(data) => {
                    Node::Text(String::from_utf8_lossy(&data).into_owned())
                }
                Event::Eof => Node::Eof,
                Event::Decl(_)
                | Event::PI(_)
                | Event::Comment(_)
                | Event::DocType(_) => continue,
            };

            return Ok(node);
        }
    }

    fn read(mut self) -> Result<ProgramDocument, ReadError> {
        let mut instructions = loop {
            match self.next_node()? {
                Node::Start(ele) => {
                    expect_root(&ele)?;
                    break self.read_program()?;
                }
                Node::Empty(ele) => {
                    expect_root(&ele)?;
                    break Vec::new();
                }
                Node::Text(text) => {
                    return Err(ReadError::UnexpectedText {
                        parent: "document",
                        text,
                    })
                }
                Node::End | Node::Eof => return Err(ReadError::MissingRoot),
            }
        };

        match self.next_node()? {
            Node::Eof => (),
            Node::Start(ele) | Node::Empty(ele) => {
                return Err(ReadError::UnexpectedElement {
                    parent: "document",
                    found: name_of(&ele),
                })
            }
            Node::Text(text) => {
                return Err(ReadError::UnexpectedText {
                    parent: "document",
                    text,
                })
            }
            Node::End => return Err(ReadError::UnexpectedEof),
        }

        instructions.sort_by_key(InstructionRecord::order);
        check_orders(&instructions)?;

        Ok(ProgramDocument::new(instructions))
    }

    fn read_program(&mut self) -> Result<Vec<InstructionRecord>, ReadError> {
        let mut instructions = Vec::new();

        loop {
            match self.next_node()? {
                Node::Start(ele) => {
                    let (order, opcode) = instruction_attrs(&ele)?;
                    let args = self.read_args()?;
                    instructions.push(build_instruction(order, opcode, args)?);
                }
                Node::Empty(ele) => {
                    let (order, opcode) = instruction_attrs(&ele)?;
                    let rec = build_instruction(order, opcode, Vec::new())?;
                    instructions.push(rec);
                }
                Node::Text(text) => {
                    return Err(ReadError::UnexpectedText {
                        parent: EL_PROGRAM,
                        text,
                    })
                }
                Node::End => return Ok(instructions),
                Node::Eof => return Err(ReadError::UnexpectedEof),
            }
        }
    }

    /// Read the operand elements of an instruction,
    ///   through the end of the instruction.
    ///
    /// Each operand is paired with its 0-based position.
    fn read_args(
        &mut self,
    ) -> Result<Vec<(usize, ResolvedArgument)>, ReadError> {
        let mut args = Vec::new();

        loop {
            match self.next_node()? {
                Node::Start(ele) => {
                    let (index, ty) = arg_attrs(&ele)?;
                    let value = self.read_arg_value()?;
                    args.push((index, ResolvedArgument::new(ty, value)));
                }
                Node::Empty(ele) => {
                    let (index, ty) = arg_attrs(&ele)?;
                    args.push((index, ResolvedArgument::new(ty, "")));
                }
                Node::Text(text) => {
                    return Err(ReadError::UnexpectedText {
                        parent: EL_INSTRUCTION,
                        text,
                    })
                }
                Node::End => return Ok(args),
                Node::Eof => return Err(ReadError::UnexpectedEof),
            }
        }
    }

    /// Read the text of an operand through its end.
    fn read_arg_value(&mut self) -> Result<String, ReadError> {
        let mut value = String::new();

        loop {
            match self.next_node()? {
                Node::Text(text) => value.push_str(&text),
                Node::End => return Ok(value),
                Node::Start(ele) | Node::Empty(ele) => {
                    return Err(ReadError::UnexpectedElement {
                        parent: "argument",
                        found: name_of(&ele),
                    })
                }
                Node::Eof => return Err(ReadError::UnexpectedEof),
            }
        }
    }
}

fn name_of(ele: &BytesStart) -> String {
    String::from_utf8_lossy(ele.name().as_ref()).into_owned()
}

/// Value of the attribute `name`,
///   if present.
fn attr_value(
    ele: &BytesStart,
    name: &str,
) -> Result<Option<String>, ReadError> {
    for attr in ele.attributes() {
        let attr = attr?;

        if attr.key.as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }

    Ok(None)
}

fn require_attr(
    ele: &BytesStart,
    element: &'static str,
    attr: &'static str,
) -> Result<String, ReadError> {
    attr_value(ele, attr)?.ok_or(ReadError::MissingAttribute { element, attr })
}

fn expect_root(ele: &BytesStart) -> Result<(), ReadError> {
    if ele.name().as_ref() != EL_PROGRAM.as_bytes() {
        return Err(ReadError::UnexpectedElement {
            parent: "document",
            found: name_of(ele),
        });
    }

    let lang = require_attr(ele, EL_PROGRAM, ATTR_LANGUAGE)?;

    match lang.eq_ignore_ascii_case(global::LANGUAGE_TAG) {
        true => Ok(()),
        false => Err(ReadError::InvalidLanguage(lang)),
    }
}

fn instruction_attrs(ele: &BytesStart) -> Result<(Order, Opcode), ReadError> {
    if ele.name().as_ref() != EL_INSTRUCTION.as_bytes() {
        return Err(ReadError::UnexpectedElement {
            parent: EL_PROGRAM,
            found: name_of(ele),
        });
    }

    let order_str = require_attr(ele, EL_INSTRUCTION, ATTR_ORDER)?;
    let order = order_str
        .parse::<u32>()
        .ok()
        .and_then(Order::new)
        .ok_or(ReadError::InvalidOrder(order_str))?;

    let opcode_str = require_attr(ele, EL_INSTRUCTION, ATTR_OPCODE)?;
    let opcode = Opcode::lookup(&opcode_str.to_ascii_uppercase())
        .ok_or(ReadError::UnknownOpcode(opcode_str))?;

    Ok((order, opcode))
}

fn arg_attrs(ele: &BytesStart) -> Result<(usize, ValueType), ReadError> {
    let index = EL_ARGS
        .iter()
        .position(|name| ele.name().as_ref() == name.as_bytes())
        .ok_or_else(|| ReadError::UnexpectedElement {
            parent: EL_INSTRUCTION,
            found: name_of(ele),
        })?;

    let ty_str = require_attr(ele, EL_ARGS[index], ATTR_TYPE)?;
    let ty = ValueType::from_tag(&ty_str.to_ascii_lowercase())
        .ok_or(ReadError::InvalidArgumentType(ty_str))?;

    Ok((index, ty))
}

fn build_instruction(
    order: Order,
    opcode: Opcode,
    mut args: Vec<(usize, ResolvedArgument)>,
) -> Result<InstructionRecord, ReadError> {
    args.sort_by_key(|(index, _)| *index);

    for (expected, &(index, _)) in args.iter().enumerate() {
        if index < expected {
            return Err(ReadError::DuplicateArgument(EL_ARGS[index]));
        }

        if index > expected {
            return Err(ReadError::MissingArgument(EL_ARGS[expected]));
        }
    }

    let expected = catalog::expand(opcode.operand_kind()).len();

    if args.len() != expected {
        return Err(ReadError::ArityMismatch {
            opcode,
            expected,
            actual: args.len(),
        });
    }

    Ok(InstructionRecord::new(
        order,
        opcode,
        args.into_iter().map(|(_, arg)| arg).collect::<Args>(),
    ))
}

/// Orders of sorted `instructions` must be exactly `1..=N`.
fn check_orders(instructions: &[InstructionRecord]) -> Result<(), ReadError> {
    let mut expected = Order::MIN;

    for rec in instructions {
        if rec.order() < expected {
            return Err(ReadError::DuplicateOrder(rec.order()));
        }

        if rec.order() > expected {
            return Err(ReadError::MissingOrder(expected));
        }

        expected = expected.saturating_add(1);
    }

    Ok(())
}
