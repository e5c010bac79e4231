// Operand resolution
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

//! Validation and normalization of a single operand.
//!
//! Given a [`Token`] and the [`ValueType`] that the catalog expects in its
//!   position,
//!     [`resolve`] produces a [`ResolvedArgument`] holding the operand's
//!     concrete type and the value to be written to the document.
//!
//! Resolution by expected type:
//!
//!   - [`ValueType::Label`] must be a valid name and is stored as-is;
//!   - [`ValueType::Type`] must be a valid type name and is stored as-is;
//!   - [`ValueType::Var`] must be `FRAME@name` and the _entire_ token is
//!       stored;
//!   - [`ValueType::Symbol`] is a variable if the text preceding the
//!       separator is a frame,
//!         otherwise it is a constant `type@payload`.
//!     A constant resolves to its own type and only the payload is
//!       stored.
//!
//! Errors point at the offending portion of the token
//!   (e.g. just the frame of a variable)
//!   where one can be identified.

use crate::catalog::ValueType;
use crate::error::ParseError;
use crate::global;
use crate::lex::{is_valid_constant, is_valid_name, Frame, TypeName};
use crate::span::Span;
use crate::token::Token;
use memchr::memchr;
use std::fmt::{self, Display};

/// A validated operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgument {
    ty: ValueType,
    value: String,
}

impl ResolvedArgument {
    pub fn new<S: Into<String>>(ty: ValueType, value: S) -> Self {
        Self {
            ty,
            value: value.into(),
        }
    }

    /// Concrete type of the operand.
    ///
    /// This is never [`ValueType::Symbol`] for operands produced by
    ///   [`resolve`].
    pub fn ty(&self) -> ValueType {
        self.ty
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Reason that an operand failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    /// The token contains no separator but a variable or symbol was
    ///   expected.
    MissingSeparator { token: String, expected: ValueType },
    /// A variable has nothing preceding its separator.
    MissingFrame(String),
    /// A variable has nothing following its separator.
    MissingName(String),
    /// A symbol has nothing preceding its separator.
    MissingPrefix(String),
    InvalidFrame(String),
    /// Not a valid variable or label name.
    InvalidName(String),
    InvalidTypeName(String),
    /// A constant payload is not a literal of its declared type.
    ConstantMismatch(String, TypeName),
}

impl Display for OperandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { token, expected } => {
                let what = match expected {
                    ValueType::Var => "variable",
                    _ => "symbol",
                };

                write!(f, "expected `{token}` to be a {what}")
            }
            Self::MissingFrame(token) => {
                write!(f, "missing frame name in `{token}`")
            }
            Self::MissingName(token) => {
                write!(f, "missing variable name in `{token}`")
            }
            Self::MissingPrefix(token) => {
                write!(f, "missing frame or type in `{token}`")
            }
            Self::InvalidFrame(frame) => {
                write!(f, "expected frame, but got `{frame}`")
            }
            Self::InvalidName(name) => write!(
                f,
                "`{name}` is an incorrect name for a label or variable"
            ),
            Self::InvalidTypeName(ty) => {
                write!(f, "expected type, but got `{ty}`")
            }
            Self::ConstantMismatch(value, ty) => {
                write!(f, "expected `{value}` to be {ty}")
            }
        }
    }
}

impl std::error::Error for OperandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Validate `token` against the `expected` operand type.
///
/// See the [module-level documentation](self) for the rules of each type.
pub fn resolve(
    token: &Token,
    expected: ValueType,
) -> Result<ResolvedArgument, ParseError> {
    let (text, span) = (token.text(), token.span());

    match expected {
        ValueType::Label => {
            if !is_valid_name(text) {
                let e = OperandError::InvalidName(text.into());
                return Err(invalid(e, span));
            }

            Ok(ResolvedArgument::new(ValueType::Label, text))
        }

        ValueType::Type => match TypeName::parse(text) {
            Some(_) => Ok(ResolvedArgument::new(ValueType::Type, text)),
            None => {
                let e = OperandError::InvalidTypeName(text.into());
                Err(invalid(e, span))
            }
        },

        ValueType::Var => {
            resolve_var(text, span)?;
            Ok(ResolvedArgument::new(ValueType::Var, text))
        }

        ValueType::Symbol => resolve_symbol(text, span),

        ValueType::Nil
        | ValueType::Int
        | ValueType::Bool
        | ValueType::String => {
            Err(ParseError::UnresolvableType(expected, span))
        }
    }
}

fn invalid(e: OperandError, span: Span) -> ParseError {
    ParseError::InvalidOperand(e, span)
}

/// Byte offset of the first separator within `text`.
fn separator(text: &str) -> Option<usize> {
    memchr(global::SEPARATOR, text.as_bytes())
}

/// Validate a variable of the form `FRAME@name`.
fn resolve_var(text: &str, span: Span) -> Result<(Frame, &str), ParseError> {
    let sep = separator(text).ok_or_else(|| {
        invalid(
            OperandError::MissingSeparator {
                token: text.into(),
                expected: ValueType::Var,
            },
            span,
        )
    })?;

    if sep == 0 {
        return Err(invalid(OperandError::MissingFrame(text.into()), span));
    }

    if sep == text.len() - 1 {
        return Err(invalid(OperandError::MissingName(text.into()), span));
    }

    let (frame_text, name) = (&text[..sep], &text[sep + 1..]);

    let frame = Frame::parse(frame_text).ok_or_else(|| {
        invalid(
            OperandError::InvalidFrame(frame_text.into()),
            span.slice(0, sep),
        )
    })?;

    if !is_valid_name(name) {
        return Err(invalid(
            OperandError::InvalidName(name.into()),
            span.slice(sep + 1, name.len()),
        ));
    }

    Ok((frame, name))
}

/// Validate a symbol,
///   which is either a variable or a typed constant.
fn resolve_symbol(
    text: &str,
    span: Span,
) -> Result<ResolvedArgument, ParseError> {
    let sep = separator(text).ok_or_else(|| {
        invalid(
            OperandError::MissingSeparator {
                token: text.into(),
                expected: ValueType::Symbol,
            },
            span,
        )
    })?;

    let (prefix, payload) = (&text[..sep], &text[sep + 1..]);

    if Frame::parse(prefix).is_some() {
        resolve_var(text, span)?;
        return Ok(ResolvedArgument::new(ValueType::Var, text));
    }

    if prefix.is_empty() {
        return Err(invalid(OperandError::MissingPrefix(text.into()), span));
    }

    let ty = TypeName::parse(prefix).ok_or_else(|| {
        invalid(
            OperandError::InvalidTypeName(prefix.into()),
            span.slice(0, sep),
        )
    })?;

    if !is_valid_constant(payload, ty) {
        // An empty payload has nothing to point at.
        let payload_span = match payload.len() {
            0 => span,
            len => span.slice(sep + 1, len),
        };

        return Err(invalid(
            OperandError::ConstantMismatch(payload.into(), ty),
            payload_span,
        ));
    }

    Ok(ResolvedArgument::new(ty.into(), payload))
}
