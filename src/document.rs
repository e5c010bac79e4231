// Structured program document
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

//! The validated program and its emission through a
//!   [`DocumentWriter`].
//!
//! A [`ProgramDocument`] is produced whole at the end of a successful
//!   parse and is only then handed to a writer,
//!     so that a failure late in the input never results in partial
//!     output.
//!
//! The document has the shape
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <program language="IPPcode22">
//!   <instruction order="1" opcode="MOVE">
//!     <arg1 type="var">GF@x</arg1>
//!     <arg2 type="int">5</arg2>
//!   </instruction>
//! </program>
//! ```
//!
//! though the exact rendering is up to the writer;
//!   see [`crate::xml::writer`].

use crate::global;
use crate::instr::InstructionRecord;

/// Name of the root element.
pub const EL_PROGRAM: &str = "program";
/// Attribute of the root element holding the language tag.
pub const ATTR_LANGUAGE: &str = "language";
pub const EL_INSTRUCTION: &str = "instruction";
pub const ATTR_ORDER: &str = "order";
pub const ATTR_OPCODE: &str = "opcode";
/// Operand element names by position.
pub const EL_ARGS: [&str; global::MAX_ARGS] = ["arg1", "arg2", "arg3"];
/// Attribute of an operand element holding its type tag.
pub const ATTR_TYPE: &str = "type";

/// A complete,
///   validated program.
///
/// The `order` of each instruction is exactly its 1-based index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramDocument {
    instructions: Vec<InstructionRecord>,
}

impl ProgramDocument {
    /// Construct a document from records whose orders are exactly
    ///   `1..=instructions.len()`.
    pub(crate) fn new(instructions: Vec<InstructionRecord>) -> Self {
        debug_assert!(
            instructions
                .iter()
                .enumerate()
                .all(|(i, rec)| rec.order().get() as usize == i + 1),
            "instruction orders must be contiguous from 1",
        );

        Self { instructions }
    }

    pub fn language_tag(&self) -> &'static str {
        global::LANGUAGE_TAG
    }

    /// Instructions in textual input order.
    pub fn instructions(&self) -> &[InstructionRecord] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Sink for a structured document.
///
/// Calls arrive in document order:
///   [`open_document`](Self::open_document) first,
///   [`close_document`](Self::close_document) last,
///   and element starts and ends balanced in between.
/// Attributes apply to the most recently started element and always
///   precede its content.
pub trait DocumentWriter {
    type Error;

    fn open_document(
        &mut self,
        version: &str,
        encoding: &str,
    ) -> Result<(), Self::Error>;

    fn start_element(&mut self, name: &str) -> Result<(), Self::Error>;

    fn write_attribute(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    fn text(&mut self, value: &str) -> Result<(), Self::Error>;

    fn end_element(&mut self, name: &str) -> Result<(), Self::Error>;

    fn close_document(&mut self) -> Result<(), Self::Error>;
}

/// Emit `doc` in its entirety through `writer`.
pub fn write_document<W: DocumentWriter>(
    doc: &ProgramDocument,
    writer: &mut W,
) -> Result<(), W::Error> {
    writer.open_document(global::XML_VERSION, global::XML_ENCODING)?;
    writer.start_element(EL_PROGRAM)?;
    writer.write_attribute(ATTR_LANGUAGE, doc.language_tag())?;

    for record in doc.instructions() {
        writer.start_element(EL_INSTRUCTION)?;
        writer.write_attribute(ATTR_ORDER, &record.order().to_string())?;
        writer.write_attribute(ATTR_OPCODE, record.opcode().as_str())?;

        for (arg, name) in record.args().iter().zip(EL_ARGS) {
            writer.start_element(name)?;
            writer.write_attribute(ATTR_TYPE, arg.ty().tag())?;
            writer.text(arg.value())?;
            writer.end_element(name)?;
        }

        writer.end_element(EL_INSTRUCTION)?;
    }

    writer.end_element(EL_PROGRAM)?;
    writer.close_document()
}

#[cfg(test)]
mod test;
