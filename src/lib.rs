// IPPcode22 parser
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

//! Parser for the IPPcode22 assembly-like language.
//!
//! Source programs are read one line at a time by the
//!   [`scan::Scanner`],
//!     which validates each instruction against the
//!     [instruction catalog](catalog) and produces a
//!     [`document::ProgramDocument`].
//! That document is then written as XML by [`xml::writer`] for a
//!   separate interpreter to execute.
//!
//! The first error terminates the parse;
//!   see [`error`] for the error taxonomy and its exit codes.
//!
//! ```
//! use ippcode::document::write_document;
//! use ippcode::scan::parse_str;
//! use ippcode::xml::writer::XmlWriter;
//!
//! let doc = parse_str(".IPPcode22\nWRITE string@hello\n").unwrap();
//! let mut writer = XmlWriter::new(Vec::new());
//! write_document(&doc, &mut writer).unwrap();
//!
//! let xml = String::from_utf8(writer.into_inner()).unwrap();
//! assert!(xml.contains(r#"<arg1 type="string">hello</arg1>"#));
//! ```

// We build docs for private items.
#![allow(rustdoc::private_intra_doc_links)]

pub mod global;

#[macro_use]
extern crate static_assertions;

pub mod catalog;
pub mod diagnose;
pub mod document;
pub mod error;
pub mod instr;
pub mod lex;
pub mod resolve;
pub mod scan;
pub mod span;
pub mod token;
pub mod xml;
