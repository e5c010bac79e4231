// Parser errors
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

//! Errors while parsing a source program.
//!
//! Every error belongs to exactly one [`ErrorKind`],
//!   and each kind maps to a fixed process exit code.
//! Those exit codes are a stable contract with the tools that invoke the
//!   parser and must not change.
//!
//! Parsing fails fast:
//!   the first error terminates the parse and no partial document is
//!   produced.

use crate::catalog::{Opcode, ValueType};
use crate::global;
use crate::resolve::OperandError;
use crate::span::Span;
use exitcode::ExitCode;
use std::fmt::{self, Display};
use std::io;

/// Category of an error,
///   determining the exit status of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid command line usage.
    InvalidArgument,
    /// The header is missing or malformed.
    InvalidHeader,
    /// The first token of an instruction line is not a known opcode.
    InvalidOpcode,
    /// Any other lexical or syntactic error.
    SyntaxError,
    /// A failure that does not originate from the source program.
    InternalError,
}

impl ErrorKind {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::InvalidArgument => 10,
            Self::InvalidHeader => 21,
            Self::InvalidOpcode => 22,
            Self::SyntaxError => 23,
            Self::InternalError => 99,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::InvalidHeader => write!(f, "invalid header"),
            Self::InvalidOpcode => write!(f, "invalid opcode"),
            Self::SyntaxError => write!(f, "syntax error"),
            Self::InternalError => write!(f, "internal error"),
        }
    }
}

/// Thin wrapper around [`io::Error`] to implement [`PartialEq`].
///
/// This will always yield `false`,
///   but allows us to derive the trait on [`ParseError`].
#[derive(Debug)]
pub struct IoError(pub io::Error);

impl PartialEq for IoError {
    /// [`io::Error`] does not implement [`PartialEq`] and so this will
    ///   always yield `false`.
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Error while parsing a source program.
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// Input ended before a header was seen.
    ///
    /// This can only be determined after the input has been exhausted.
    MissingHeader,

    /// The first non-blank,
    ///   non-comment line is not the header.
    InvalidHeader(String, Span),

    /// The first token of an instruction line is not a known opcode.
    UnknownOpcode(String, Span),

    /// An instruction was given the wrong number of operands.
    ///
    /// The span covers the opcode.
    ArityMismatch {
        opcode: Opcode,
        expected: usize,
        actual: usize,
        span: Span,
    },

    /// An operand failed validation.
    ///
    /// The span covers the offending portion of the operand.
    InvalidOperand(OperandError, Span),

    /// Bytes that are not valid UTF-8 appear outside of a comment.
    ///
    /// The span covers the first invalid sequence as it appears in the
    ///   lossily decoded line,
    ///     where it has been replaced by
    ///     [`char::REPLACEMENT_CHARACTER`].
    InvalidEncoding(Span),

    /// An operand was expected to be of a type for which no resolution
    ///   exists.
    ///
    /// The catalog never produces such an expectation,
    ///   so this represents a bug rather than an error in the source
    ///   program.
    UnresolvableType(ValueType, Span),

    /// Failed to read the source program.
    Io(IoError),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingHeader | Self::InvalidHeader(..) => {
                ErrorKind::InvalidHeader
            }
            Self::UnknownOpcode(..) => ErrorKind::InvalidOpcode,
            Self::ArityMismatch { .. }
            | Self::InvalidOperand(..)
            | Self::InvalidEncoding(_) => ErrorKind::SyntaxError,
            Self::UnresolvableType(..) | Self::Io(_) => {
                ErrorKind::InternalError
            }
        }
    }

    /// Shorthand for `self.kind().exit_code()`.
    pub fn exit_code(&self) -> ExitCode {
        self.kind().exit_code()
    }

    /// Location of the error within the source program,
    ///   if it can be attributed to one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::InvalidHeader(_, span)
            | Self::UnknownOpcode(_, span)
            | Self::ArityMismatch { span, .. }
            | Self::InvalidOperand(_, span)
            | Self::InvalidEncoding(span)
            | Self::UnresolvableType(_, span) => Some(*span),
            Self::MissingHeader | Self::Io(_) => None,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader => write!(
                f,
                "input was empty or is missing the `{}` header",
                header_display(),
            ),
            Self::InvalidHeader(found, span) => write!(
                f,
                "line {}: expected header `{}`, but got `{found}`",
                span.line(),
                header_display(),
            ),
            Self::UnknownOpcode(opcode, span) => {
                write!(f, "line {}: unknown opcode `{opcode}`", span.line())
            }
            Self::ArityMismatch {
                opcode,
                expected,
                actual,
                span,
            } => write!(
                f,
                "line {}: expected {expected} argument(s) for opcode \
                   `{opcode}`, but got {actual}",
                span.line(),
            ),
            Self::InvalidOperand(e, span) => {
                write!(f, "line {}: {e}", span.line())
            }
            Self::InvalidEncoding(span) => write!(
                f,
                "line {}: invalid UTF-8 sequence at byte {}",
                span.line(),
                span.offset() + 1,
            ),
            Self::UnresolvableType(ty, span) => write!(
                f,
                "line {}: no resolution exists for operands of type `{ty}`",
                span.line(),
            ),
            Self::Io(e) => write!(f, "failed to read input: {e}"),
        }
    }
}

/// The header as it is conventionally written,
///   with the language tag's casing.
fn header_display() -> String {
    format!(".{}", global::LANGUAGE_TAG)
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidOperand(e, _) => Some(e),
            Self::Io(IoError(e)) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(IoError(e))
    }
}
