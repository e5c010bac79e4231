// Source spans
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

//! Mapping of tokens to their location in the source program.
//!
//! Source programs are processed one physical line at a time,
//!   so a [`Span`] is relative to its line:
//!     it holds the 1-based line number along with a 0-indexed byte offset
//!     and byte length within that line.
//! Spans never hold a reference to the source text;
//!   the [diagnostic system](crate::diagnose) is provided with the line
//!   separately when rendering a report.

use crate::global::LineNum;
use std::fmt::{self, Display};

/// Location of a token within a physical source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    line: LineNum,
    offset: usize,
    len: usize,
}

impl Span {
    pub fn new(line: LineNum, offset: usize, len: usize) -> Self {
        Self { line, offset, len }
    }

    /// 1-based line number.
    pub fn line(&self) -> LineNum {
        self.line
    }

    /// Byte offset of the first byte of the span within its line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset just past the last byte of the span.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Produce a new span covering a sub-range of this one.
    ///
    /// The range is relative to the beginning of this span and is clamped
    ///   so that the result never extends past the end of `self`.
    pub fn slice(&self, rel_offset: usize, len: usize) -> Self {
        let offset = rel_offset.min(self.len);
        let len = len.min(self.len - offset);

        Self::new(self.line, self.offset + offset, len)
    }
}

impl Display for Span {
    /// Formats as `line:col`,
    ///   where the column is the 1-based byte column.
    ///
    /// The [diagnostic system](crate::diagnose) computes display columns
    ///   using character widths instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.offset + 1)
    }
}

#[cfg(test)]
pub mod dummy {
    //! Spans for use in tests.

    use super::*;

    pub const L1: LineNum = match LineNum::new(1) {
        Some(n) => n,
        None => unreachable!(),
    };

    pub const L2: LineNum = match LineNum::new(2) {
        Some(n) => n,
        None => unreachable!(),
    };

    pub const S1: Span = Span {
        line: L1,
        offset: 0,
        len: 0,
    };

    pub fn line(n: u32) -> LineNum {
        LineNum::new(n).expect("line numbers are 1-based")
    }
}

#[cfg(test)]
mod test {
    use super::dummy::*;
    use super::*;

    #[test]
    fn displays_one_based_column() {
        assert_eq!("2:5", Span::new(L2, 4, 3).to_string());
    }

    #[test]
    fn slice_is_relative_to_span() {
        let span = Span::new(L1, 5, 6);

        assert_eq!(Span::new(L1, 8, 3), span.slice(3, 3));
    }

    #[test]
    fn slice_is_clamped_to_span() {
        let span = Span::new(L1, 5, 2);

        assert_eq!(Span::new(L1, 6, 1), span.slice(1, 10));
        assert_eq!(Span::new(L1, 7, 0), span.slice(9, 1));
    }

    #[test]
    fn end_follows_last_byte() {
        let span = Span::new(L1, 4, 3);

        assert_eq!(7, span.end());
        assert!(!span.is_empty());
        assert!(S1.is_empty());
    }
}
