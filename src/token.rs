// Line tokenization
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

//! Splitting of a physical source line into [`Token`]s.
//!
//! A line is first truncated at its first
//!   [comment marker](crate::global::COMMENT_MARKER),
//!   and the remainder is split on runs of whitespace.
//! Each token retains the [`Span`] of its bytes within the original line
//!   so that errors can point back at it.

use crate::global::{self, LineNum};
use crate::span::Span;
use memchr::memchr;
use std::borrow::Cow;
use std::fmt::{self, Display};

/// A whitespace-delimited fragment of a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    text: Cow<'a, str>,
    span: Span,
}

impl<'a> Token<'a> {
    pub fn new<T: Into<Cow<'a, str>>>(text: T, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Uppercase the token's text,
    ///   retaining its original span.
    ///
    /// Only ASCII characters are affected.
    pub fn into_uppercase(self) -> Self {
        let text = match self.text {
            Cow::Borrowed(s) if !s.bytes().any(|c| c.is_ascii_lowercase()) => {
                Cow::Borrowed(s)
            }
            text => Cow::Owned(text.to_ascii_uppercase()),
        };

        Self { text, ..self }
    }
}

impl<'a> Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.text)
    }
}

/// Truncate `line` at the first comment marker,
///   if any.
pub fn strip_comment(line: &str) -> &str {
    match memchr(global::COMMENT_MARKER, line.as_bytes()) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Whether `c` separates tokens.
///
/// This is ASCII whitespace along with the vertical tab,
///   which [`u8::is_ascii_whitespace`] does not include.
fn is_separator(c: u8) -> bool {
    c.is_ascii_whitespace() || c == b'\x0b'
}

/// Split a line into tokens,
///   first discarding any trailing comment.
///
/// A line that is blank or contains only a comment yields no tokens.
pub fn tokenize(line: &str, lineno: LineNum) -> Tokens<'_> {
    Tokens {
        src: strip_comment(line),
        pos: 0,
        lineno,
    }
}

/// Iterator over the [`Token`]s of a line.
///
/// See [`tokenize`].
#[derive(Debug)]
pub struct Tokens<'a> {
    src: &'a str,
    pos: usize,
    lineno: LineNum,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.src.as_bytes();

        let start = self.pos
            + bytes[self.pos..].iter().position(|&c| !is_separator(c))?;

        let len = bytes[start..]
            .iter()
            .position(|&c| is_separator(c))
            .unwrap_or(bytes.len() - start);

        self.pos = start + len;

        // Separators are all ASCII,
        //   so these offsets always lie on character boundaries.
        Some(Token::new(
            &self.src[start..self.pos],
            Span::new(self.lineno, start, len),
        ))
    }
}

#[cfg(test)]
mod test;
