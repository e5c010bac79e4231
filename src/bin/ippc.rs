// IPPcode22 parser
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

//! This is the IPPcode22 parser.
//!
//! `ippc` reads a source program from standard input and writes its XML
//!   representation to standard output.
//! Diagnostics are written to standard error and the exit status
//!   identifies the kind of failure
//!     (see [`ippcode::error::ErrorKind`]).

extern crate ippcode;

use getopts::{Fail, Options};
use ippcode::{
    document::{write_document, ProgramDocument},
    error::ErrorKind,
    scan,
    xml::writer::{WriterError, XmlWriter},
};
use std::{
    env,
    error::Error,
    fmt::{self, Display},
    io::{self, Write},
    process,
};

/// Types of commands
#[derive(Debug, PartialEq)]
enum Command {
    Parse,
    Usage,
}

/// Parse standard input,
///   writing the document to standard output.
///
/// The document is rendered in its entirety before anything is written,
///   so a failure never results in partial output.
fn parse() -> exitcode::ExitCode {
    let doc = match scan::parse(io::stdin().lock()) {
        Ok(doc) => doc,
        Err(e) => {
            // Rendering to a string ensures that the report is written
            //   all at once.
            let report = e.report().to_string();
            eprint!("{report}");

            return e.error().exit_code();
        }
    };

    match emit(&doc) {
        Ok(()) => exitcode::OK,
        Err(e) => {
            eprintln!("error: {e}");
            ErrorKind::InternalError.exit_code()
        }
    }
}

fn emit(doc: &ProgramDocument) -> Result<(), IppcError> {
    let mut writer = XmlWriter::new(Vec::new());
    write_document(doc, &mut writer)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&writer.into_inner())?;
    stdout.flush()?;

    Ok(())
}

/// Entrypoint for the parser
pub fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("ippc");
    let opts = get_opts();
    let usage = opts.usage(&format!(
        "Usage: {program} [--help] < INPUT\n\n\
         Reads an IPPcode22 program from standard input and writes its XML \
         representation to standard output."
    ));

    match parse_options(opts, &args) {
        Ok(Command::Parse) => process::exit(parse()),
        Ok(Command::Usage) => {
            println!("{usage}");
            process::exit(exitcode::OK);
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{usage}");
            process::exit(ErrorKind::InvalidArgument.exit_code());
        }
    }
}

/// Get 'Options'
fn get_opts() -> Options {
    let mut opts = Options::new();
    opts.optflag("", "help", "print this help menu");

    opts
}

/// Option parser
///
/// `--help` is recognized only on its own.
fn parse_options(opts: Options, args: &[String]) -> Result<Command, Fail> {
    let rest = args.get(1..).unwrap_or_default();
    let matches = opts.parse(rest)?;

    if let Some(free) = matches.free.first() {
        return Err(Fail::UnrecognizedOption(free.clone()));
    }

    match (matches.opt_present("help"), rest.len()) {
        (false, 0) => Ok(Command::Parse),
        (true, 1) => Ok(Command::Usage),
        _ => Err(Fail::UnexpectedArgument(String::from(
            "--help must be used alone",
        ))),
    }
}

/// Parser (`ippc`) error.
///
/// This represents failures that occur after a program has been
///   successfully parsed;
///     errors in the program itself are reported by [`scan::ScanError`].
#[derive(Debug)]
pub enum IppcError {
    Io(io::Error),
    Writer(WriterError),
}

impl From<io::Error> for IppcError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<WriterError> for IppcError {
    fn from(e: WriterError) -> Self {
        Self::Writer(e)
    }
}

impl Display for IppcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => Display::fmt(e, f),
            Self::Writer(e) => Display::fmt(e, f),
        }
    }
}

impl Error for IppcError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Writer(e) => Some(e),
        }
    }
}
