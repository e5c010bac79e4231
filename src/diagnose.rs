// Diagnostic reports
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

//! Human-readable rendering of [`ParseError`]s.
//!
//! A [`Report`] is modeled after Rust's own error output:
//!
//! ```text
//! error: line 2: unknown opcode `FOO`
//!   --> stdin:2:1
//!    |
//!    | FOO GF@x
//!    | ^^^
//! ```
//!
//! The source line is rendered only if it is available;
//!   otherwise the report degrades to the heading and location,
//!     and errors with no location at all render only the heading.
//!
//! Columns are _display_ columns,
//!   computed from the width of each character rather than its byte
//!   length,
//!     so that the underline lines up beneath wide characters.
//!
//! Reports are only ever written to standard error,
//!   and only the exit status of the process is a stable contract;
//!     the format of a report may change without notice.

// NB: `write!` together with `\n` is preferred to `writeln!` so that there
//   is only a single sequence of characters to search for while tracking
//   down newlines.

use crate::error::ParseError;
use crate::span::Span;
use std::borrow::Cow;
use std::fmt::{self, Display};
use unicode_width::UnicodeWidthChar;

/// Name of the input as it appears in the location line of a report.
pub const INPUT_NAME: &str = "stdin";

/// Diagnostic report for a single [`ParseError`].
///
/// This implements [`Display`] and never fails to render.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    error: &'a ParseError,
    source_line: Option<&'a str>,
}

impl<'a> Report<'a> {
    /// Prepare a report for `error`,
    ///   optionally rendering the source line that caused it.
    pub fn new(error: &'a ParseError, source_line: Option<&'a str>) -> Self {
        Self { error, source_line }
    }

    pub fn error(&self) -> &'a ParseError {
        self.error
    }
}

impl<'a> Display for Report<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}\n", self.error)?;

        let span = match self.error.span() {
            Some(span) => span,
            None => return Ok(()),
        };

        match self.source_line {
            None => write!(
                f,
                "  --> {INPUT_NAME}:{}:{}\n",
                span.line(),
                span.offset() + 1,
            ),

            Some(line) => {
                let col = Column::resolve(line, span);

                let lineno = span.line();

                write!(f, "  --> {INPUT_NAME}:{lineno}:{}\n", col.start)?;
                write!(f, "   |\n")?;
                write!(f, "   | {}\n", display_line(line))?;
                write!(
                    f,
                    "   | {:pad$}{marks}\n",
                    "",
                    pad = col.start - 1,
                    marks = "^".repeat(col.width),
                )
            }
        }
    }
}

/// Display column of a span within its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Column {
    /// 1-based display column of the first character.
    start: usize,
    /// Display width of the span,
    ///   never less than 1 so that there is always something to see.
    width: usize,
}

impl Column {
    fn resolve(line: &str, span: Span) -> Self {
        let (offset, end) = (span.offset(), span.end());

        let (before, within) =
            line.char_indices()
                .fold((0, 0), |(before, within), (i, c)| match i {
                    i if i < offset => (before + char_width(c), within),
                    i if i < end => (before, within + char_width(c)),
                    _ => (before, within),
                });

        Self {
            start: before + 1,
            width: within.max(1),
        }
    }
}

/// Display width of `c` as rendered by [`display_line`].
fn char_width(c: char) -> usize {
    match c {
        '\t' => 1,
        c => c.width().unwrap_or(0),
    }
}

/// Tabs are rendered as single spaces so that columns are predictable.
fn display_line(line: &str) -> Cow<'_, str> {
    match line.contains('\t') {
        true => Cow::Owned(line.replace('\t', " ")),
        false => Cow::Borrowed(line),
    }
}
