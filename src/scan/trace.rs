// Scanner tracing
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

//! Tracing for scanning operations.
//!
//! This provides human-readable traces on standard error any time a line
//!   is fed to the [`Scanner`](super::Scanner).
//! These traces are provided automatically when `cfg(test)`,
//!   which means that they are automatically included in the output of any
//!   test failure.
//!
//! Outside of tests,
//!   this can be enabled at build time using the `parser-trace-stderr`
//!   feature flag
//!     (`cargo build --features parser-trace-stderr`).
//!
//! _These traces are not meant to be machine-readable!_
//! Do not try to parse them;
//!   the format is subject to change without notice.
//! Traces are written to standard error so that they never mix with the
//!   document on standard output.

use super::{LineOutcome, ScanState};
use crate::error::ParseError;
use crate::global::LineNum;

pub trait ScanTrace: Default {
    /// Output the upper portion of a line trace.
    ///
    /// This begins the trace with the current [`ScanState`] and the raw
    ///   line that was received.
    /// Post-transition tracing is handled by [`Self::trace_line_end`].
    ///
    /// There is no means to return an error and a failure to output the
    ///   trace should not interrupt processing.
    fn trace_line_begin(
        &mut self,
        st_orig: ScanState,
        lineno: LineNum,
        line: &str,
    );

    /// Output the lower portion of a line trace.
    ///
    /// This ends the trace with the outcome of the line and the resulting
    ///   [`ScanState`].
    fn trace_line_end(
        &mut self,
        st_new: ScanState,
        result: &Result<LineOutcome, ParseError>,
    );

    /// Output a trace for the end of input.
    fn trace_finish(
        &mut self,
        st_new: ScanState,
        result: Result<usize, &ParseError>,
    );
}

/// Perform no tracing.
///
/// This should be used by default for non-test builds.
#[derive(Debug, PartialEq, Default)]
pub struct VoidTrace;

impl ScanTrace for VoidTrace {
    fn trace_line_begin(
        &mut self,
        _st_orig: ScanState,
        _lineno: LineNum,
        _line: &str,
    ) {
        // Do nothing at all.
    }

    fn trace_line_end(
        &mut self,
        _st_new: ScanState,
        _result: &Result<LineOutcome, ParseError>,
    ) {
        // Do nothing at all.
    }

    fn trace_finish(
        &mut self,
        _st_new: ScanState,
        _result: Result<usize, &ParseError>,
    ) {
        // Do nothing at all.
    }
}

/// Human-readable [`ScanTrace`].
///
/// See [module-level](self) documentation for more information.
#[derive(Debug, PartialEq, Default)]
pub struct HumanReadableTrace;

impl HumanReadableTrace {
    fn trace_note() {
        #[allow(unused_variables)]
        let cfg = ""; // so that this compiles without matching cfg
        #[cfg(feature = "parser-trace-stderr")]
        #[allow(unused_variables)]
        let cfg = "feature = \"parser-trace-stderr\"";
        #[cfg(test)] // takes precedence if both are set
        let cfg = "test";

        eprint!(
            "= note: this trace was output as a debugging aid \
                because `cfg({cfg})`.\n\n",
        );
    }
}

impl ScanTrace for HumanReadableTrace {
    fn trace_line_begin(
        &mut self,
        st_orig: ScanState,
        lineno: LineNum,
        line: &str,
    ) {
        eprint!(
            "\
[Scanner::feed_line] (line {lineno})
| ==> Scanner before line is {st_orig}.
|  |  {st_orig:?}
|
| ==> line: {line:?}
|\n",
        );
    }

    fn trace_line_end(
        &mut self,
        st_new: ScanState,
        result: &Result<LineOutcome, ParseError>,
    ) {
        eprint!(
            "\
| ==> Scanner after line is {st_new}.
|  |  {st_new:?}\n",
        );

        match result {
            Ok(outcome) => eprint!(
                "\
|
| ==> Outcome:
|  |  {outcome:?}\n",
            ),
            Err(err) => eprint!(
                "\
|
| ==> !!! error: {err}.
|  |  {err:?}\n",
            ),
        }

        Self::trace_note();
    }

    fn trace_finish(
        &mut self,
        st_new: ScanState,
        result: Result<usize, &ParseError>,
    ) {
        eprint!(
            "\
[Scanner::finish]
| ==> Scanner after end of input is {st_new}.
|  |  {st_new:?}\n",
        );

        match result {
            Ok(n) => eprint!("|\n| ==> Program of {n} instruction(s).\n"),
            Err(err) => eprint!(
                "\
|
| ==> !!! error: {err}.
|  |  {err:?}\n",
            ),
        }

        Self::trace_note();
    }
}
