// Lexical validation of operand fragments
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

//! Predicates over the fragments that make up an operand.
//!
//! These are pure functions with no knowledge of source locations;
//!   the [resolver](crate::resolve) is responsible for turning a failed
//!   predicate into an error tied to a [`Span`](crate::span::Span).
//!
//! All grammars here are ASCII-only and case-sensitive.

use crate::catalog::ValueType;
use std::fmt::{self, Display};

/// Whether `c` may begin a variable or label name.
fn is_name_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || b"_-$&%*!?".contains(&c)
}

/// Whether `c` may appear after the first character of a name.
fn is_name_continue(c: u8) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}

/// Whether `s` is a valid variable name or label name.
///
/// Both share the grammar
///   `[A-Za-z_\-$&%*!?][A-Za-z0-9_\-$&%*!?]*`,
///   matched against the entire string.
pub fn is_valid_name(s: &str) -> bool {
    match s.as_bytes().split_first() {
        Some((&first, rest)) => {
            is_name_start(first) && rest.iter().copied().all(is_name_continue)
        }
        None => false,
    }
}

/// Storage scope qualifier of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// `GF`
    Global,
    /// `TF`
    Temporary,
    /// `LF`
    Local,
}

impl Frame {
    /// Parse a frame qualifier.
    ///
    /// Frames are case-sensitive:
    ///   `gf` is not a frame.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GF" => Some(Self::Global),
            "TF" => Some(Self::Temporary),
            "LF" => Some(Self::Local),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "GF",
            Self::Temporary => "TF",
            Self::Local => "LF",
        }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `s` is exactly one of `GF`, `TF`, or `LF`.
pub fn is_valid_frame(s: &str) -> bool {
    Frame::parse(s).is_some()
}

/// Name of a data type,
///   used both as a `type` operand and as the tag prefixing a constant.
///
/// `nil` is a member of this set in both roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    Int,
    String,
    Bool,
    Nil,
}

impl TypeName {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "int" => Some(Self::Int),
            "string" => Some(Self::String),
            "bool" => Some(Self::Bool),
            "nil" => Some(Self::Nil),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        ValueType::from(self).tag()
    }
}

impl From<TypeName> for ValueType {
    fn from(ty: TypeName) -> Self {
        match ty {
            TypeName::Int => Self::Int,
            TypeName::String => Self::String,
            TypeName::Bool => Self::Bool,
            TypeName::Nil => Self::Nil,
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `s` is exactly one of `int`, `string`, `bool`, or `nil`.
pub fn is_valid_type_name(s: &str) -> bool {
    TypeName::parse(s).is_some()
}

/// Whether the constant payload `value` is a valid literal of type `ty`.
///
///   - `nil` accepts only `nil`;
///   - `bool` accepts only `true` or `false`;
///   - `int` accepts `[+-]?[0-9]+`;
///   - `string` accepts anything,
///       including the empty string.
///
/// Escape sequences within strings are not checked here;
///   they are passed through to the consumer of the document.
pub fn is_valid_constant(value: &str, ty: TypeName) -> bool {
    match ty {
        TypeName::Nil => value == "nil",
        TypeName::Bool => value == "true" || value == "false",
        TypeName::Int => {
            let digits = value
                .strip_prefix(&['+', '-'][..])
                .unwrap_or(value);

            !digits.is_empty() && digits.bytes().all(|c| c.is_ascii_digit())
        }
        TypeName::String => true,
    }
}
