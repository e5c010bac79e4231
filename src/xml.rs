// XML serialization of programs
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

//! XML representation of a
//!   [`ProgramDocument`](crate::document::ProgramDocument).
//!
//! Both directions are built atop [`quick_xml`]:
//!
//!   - [`writer::XmlWriter`] is a
//!       [`DocumentWriter`](crate::document::DocumentWriter)
//!       that renders an indented document;
//!   - [`reader::read_document`] reads such a document back,
//!       validating its structure.
//!
//! The reader exists for consumers of the document and for verifying that
//!   what we write is what we meant to write.

pub mod reader;
pub mod writer;

use std::fmt::{self, Display};

/// Wrapped error type.
pub type InnerXmlError = quick_xml::Error;

/// Thin wrapper around [`quick_xml::Error`] to implement [`PartialEq`].
///
/// This will always yield `false`,
///   but allows us to derive the trait on types using [`XmlError`];
///     otherwise,
///       this madness propagates indefinitely.
#[derive(Debug)]
pub struct XmlError(pub InnerXmlError);

impl PartialEq for XmlError {
    /// [`quick_xml::Error`] does not implement [`PartialEq`] and so this
    ///   will always yield `false`.
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl From<InnerXmlError> for XmlError {
    fn from(e: InnerXmlError) -> Self {
        Self(e)
    }
}

impl Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
