// Program scanner
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

//! Line-by-line driver producing a [`ProgramDocument`].
//!
//! The [`Scanner`] is a small state machine:
//!
//! ```text
//!   AwaitingHeader --(header line)--> InBody --(end of input)--> Done
//! ```
//!
//! Blank lines and comment-only lines are skipped in every state.
//! While [`ScanState::AwaitingHeader`],
//!   the first remaining line must be the header and nothing else.
//! While [`ScanState::InBody`],
//!   each remaining line is [validated](crate::instr::validate) as an
//!   instruction and assigned the next order.
//! [`ScanState::Done`] is reached only through [`Scanner::finish`],
//!   which consumes the scanner;
//!     a missing header can only be distinguished from a valid empty
//!     program once input has been exhausted.
//!
//! All state is owned by the [`Scanner`] for the duration of a single
//!   parse;
//!     there is no global state,
//!     and separate scanners are entirely independent.
//!
//! Most callers will want [`parse`] or [`parse_str`],
//!   which drive a scanner over an entire input.

pub mod trace;

use crate::diagnose::Report;
use crate::document::ProgramDocument;
use crate::error::ParseError;
use crate::global::{self, LineNum, Order};
use crate::instr::{self, InstructionRecord};
use crate::span::Span;
use crate::token::{tokenize, Token};
use std::fmt::{self, Display};
use memchr::memchr;
use std::borrow::Cow;
use std::io::BufRead;
use trace::ScanTrace;

/// Trace used by [`Scanner::new`].
#[cfg(any(test, feature = "parser-trace-stderr"))]
pub type DefaultTrace = trace::HumanReadableTrace;

/// Trace used by [`Scanner::new`].
#[cfg(not(any(test, feature = "parser-trace-stderr")))]
pub type DefaultTrace = trace::VoidTrace;

/// State of a [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No header has yet been seen.
    AwaitingHeader,
    /// The header has been seen and instructions are being accepted.
    InBody,
    /// Input has been exhausted.
    Done,
}

impl Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingHeader => write!(f, "awaiting header"),
            Self::InBody => write!(f, "in program body"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Result of successfully scanning a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank or comment-only line.
    Skipped,
    /// The header was accepted.
    Header,
    /// An instruction was validated and assigned the given order.
    Instruction(Order),
}

/// Line-by-line program scanner.
///
/// Lines are provided via [`Scanner::feed_line`] and the program is
///   retrieved via [`Scanner::finish`].
/// An error from [`Scanner::feed_line`] is fatal to the parse;
///   the scanner should be discarded.
#[derive(Debug)]
pub struct Scanner<T: ScanTrace = DefaultTrace> {
    state: ScanState,
    /// Number of the most recently fed line.
    last_line: Option<LineNum>,
    /// Order to be assigned to the next valid instruction.
    next_order: Order,
    instructions: Vec<InstructionRecord>,
    trace: T,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: ScanTrace> Default for Scanner<T> {
    fn default() -> Self {
        Self {
            state: ScanState::AwaitingHeader,
            last_line: None,
            next_order: Order::MIN,
            instructions: Vec::new(),
            trace: T::default(),
        }
    }
}

impl<T: ScanTrace> Scanner<T> {
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Number of the most recently fed line,
    ///   if any.
    pub fn line(&self) -> Option<LineNum> {
        self.last_line
    }

    /// Scan the next physical line of input.
    ///
    /// `line` should not include its line terminator,
    ///   though any trailing whitespace is ignored.
    pub fn feed_line(&mut self, line: &str) -> Result<LineOutcome, ParseError> {
        let lineno = self.advance_line();

        self.trace.trace_line_begin(self.state, lineno, line);
        let result = self.scan_line(line, lineno);
        self.trace.trace_line_end(self.state, &result);

        result
    }

    /// Scan the next physical line of input from its raw bytes.
    ///
    /// Bytes that are not valid UTF-8 are tolerated within a comment,
    ///   which is discarded anyway;
    ///     anywhere else they fail with [`ParseError::InvalidEncoding`].
    /// The decoded line is returned alongside the result so that it may
    ///   be used for diagnostics.
    pub fn feed_bytes<'a>(
        &mut self,
        line: &'a [u8],
    ) -> (Cow<'a, str>, Result<LineOutcome, ParseError>) {
        let e = match std::str::from_utf8(line) {
            Ok(src) => return (Cow::Borrowed(src), self.feed_line(src)),
            Err(e) => e,
        };

        let decoded = String::from_utf8_lossy(line);
        let comment = memchr(global::COMMENT_MARKER, line);

        if comment.is_some_and(|pos| pos <= e.valid_up_to()) {
            let result = self.feed_line(&decoded);
            return (decoded, result);
        }

        let lineno = self.advance_line();
        let span = Span::new(
            lineno,
            e.valid_up_to(),
            char::REPLACEMENT_CHARACTER.len_utf8(),
        );

        self.trace.trace_line_begin(self.state, lineno, &decoded);
        let result = Err(ParseError::InvalidEncoding(span));
        self.trace.trace_line_end(self.state, &result);

        (decoded, result)
    }

    fn advance_line(&mut self) -> LineNum {
        let lineno = self
            .last_line
            .map_or(LineNum::MIN, |prev| prev.saturating_add(1));

        self.last_line = Some(lineno);
        lineno
    }

    fn scan_line(
        &mut self,
        line: &str,
        lineno: LineNum,
    ) -> Result<LineOutcome, ParseError> {
        let mut toks = tokenize(line, lineno);

        // Opcodes (and the header) are case-insensitive;
        //   all other tokens are case-sensitive.
        let mnemonic = match toks.next() {
            Some(tok) => tok.into_uppercase(),
            None => return Ok(LineOutcome::Skipped),
        };

        if self.state == ScanState::AwaitingHeader {
            return match toks.next() {
                None if mnemonic.text() == global::HEADER => {
                    self.state = ScanState::InBody;
                    Ok(LineOutcome::Header)
                }
                _ => Err(invalid_header(line, lineno)),
            };
        }

        let operands = toks.collect::<Vec<Token>>();
        let record = instr::validate(&mnemonic, &operands, self.next_order)?;
        let order = record.order();

        self.instructions.push(record);
        self.next_order = self.next_order.saturating_add(1);

        Ok(LineOutcome::Instruction(order))
    }

    /// Complete the parse,
    ///   yielding the program.
    ///
    /// This fails with [`ParseError::MissingHeader`] if no header was ever
    ///   seen,
    ///     which includes empty input.
    pub fn finish(mut self) -> Result<ProgramDocument, ParseError> {
        let result = match self.state {
            ScanState::AwaitingHeader => Err(ParseError::MissingHeader),
            ScanState::InBody | ScanState::Done => {
                self.state = ScanState::Done;
                Ok(ProgramDocument::new(self.instructions))
            }
        };

        self.trace.trace_finish(
            self.state,
            result.as_ref().map(ProgramDocument::len),
        );

        result
    }
}

/// The header line as it will be reported,
///   spanning its non-blank content.
fn invalid_header(line: &str, lineno: LineNum) -> ParseError {
    let content = crate::token::strip_comment(line);
    let trimmed = content.trim_start();
    let offset = content.len() - trimmed.len();
    let trimmed = trimmed.trim_end();

    ParseError::InvalidHeader(
        trimmed.into(),
        Span::new(lineno, offset, trimmed.len()),
    )
}

/// A [`ParseError`] along with the source line that caused it,
///   if any.
///
/// The line is retained so that a [`Report`] can be rendered after the
///   input has been discarded.
#[derive(Debug, PartialEq)]
pub struct ScanError {
    error: ParseError,
    source_line: Option<String>,
}

impl ScanError {
    pub fn new(error: ParseError, source_line: Option<String>) -> Self {
        Self { error, source_line }
    }

    pub fn error(&self) -> &ParseError {
        &self.error
    }

    pub fn source_line(&self) -> Option<&str> {
        self.source_line.as_deref()
    }

    pub fn into_error(self) -> ParseError {
        self.error
    }

    /// Diagnostic report suitable for display to the user.
    pub fn report(&self) -> Report<'_> {
        Report::new(&self.error, self.source_line())
    }
}

impl Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.error, f)
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<ParseError> for ScanError {
    fn from(error: ParseError) -> Self {
        Self::new(error, None)
    }
}

/// Scan an entire input stream.
///
/// Lines are terminated by `\n`,
///   optionally preceded by `\r`.
/// Input is read as bytes and decoded one line at a time
///   (see [`Scanner::feed_bytes`]).
///
/// Reading stops at the first error.
pub fn parse<R: BufRead>(mut input: R) -> Result<ProgramDocument, ScanError> {
    let mut scanner = Scanner::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();

        if input.read_until(b'\n', &mut buf).map_err(ParseError::from)? == 0 {
            break;
        }

        let line = strip_terminator(&buf);

        if let (decoded, Err(e)) = scanner.feed_bytes(line) {
            return Err(ScanError::new(e, Some(decoded.into_owned())));
        }
    }

    Ok(scanner.finish()?)
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Scan a program held entirely in memory.
pub fn parse_str(src: &str) -> Result<ProgramDocument, ScanError> {
    parse(src.as_bytes())
}

#[cfg(test)]
mod test;
