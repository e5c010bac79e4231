// Global constants across the entirety of ippcode
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

//! System-wide static configuration.
//!
//! This module provides a system-wide configuration.
//! Subsystems should reference these values rather than defining their own
//!   and risk incompatibilities or maintenance issues as the language
//!   revision changes.
//!
//! By convention,
//!   import this entire module rather than individual members and reference
//!   them as `global::foo` to emphasize their nature and risk.

use std::num;

/// Language tag written to the `language` attribute of the document root.
pub const LANGUAGE_TAG: &str = "IPPcode22";

/// Mandatory header line,
///   compared against the uppercased first token of the first
///   non-comment, non-blank line.
pub const HEADER: &str = ".IPPCODE22";

/// Marker beginning a comment that runs to the end of the line.
pub const COMMENT_MARKER: u8 = b'#';

/// Separator between a frame and a variable name,
///   or between a type tag and a constant payload.
pub const SEPARATOR: u8 = b'@';

/// Maximum number of operands that any instruction accepts.
pub const MAX_ARGS: usize = 3;

/// XML version written to the document declaration.
pub const XML_VERSION: &str = "1.0";

/// Encoding written to the document declaration.
pub const XML_ENCODING: &str = "UTF-8";

/// A size capable of representing every physical line of a source
///   program.
pub type LineNumSize = u32;

/// A non-zero equivalent of [`LineNumSize`];
///   lines are numbered starting at 1.
pub type LineNum = num::NonZeroU32;

/// A size capable of representing the order of every instruction in a
///   program.
///
/// This must be ≤ [`LineNumSize`],
///   since no line produces more than one instruction.
pub type OrderSize = u32;

/// A non-zero equivalent of [`OrderSize`];
///   instruction orders are 1-based.
pub type Order = num::NonZeroU32;

const_assert!(
    std::mem::size_of::<OrderSize>() <= std::mem::size_of::<LineNumSize>()
);
assert_eq_size!(Option<Order>, OrderSize);
