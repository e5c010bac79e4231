// Tests for the program scanner
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

use super::*;
use crate::catalog::{Opcode, ValueType};
use crate::error::ErrorKind;
use crate::resolve::{OperandError, ResolvedArgument};
use crate::span::dummy::*;

type Sut = Scanner;

fn order(n: u32) -> Order {
    Order::new(n).unwrap()
}

fn parse_err(src: &str) -> ParseError {
    parse_str(src).expect_err("expected parse failure").into_error()
}

#[test]
fn single_move_instruction() {
    let doc = parse_str(".IPPcode22\nMOVE GF@x int@5\n").unwrap();

    assert_eq!(1, doc.len());

    let rec = &doc.instructions()[0];
    assert_eq!(order(1), rec.order());
    assert_eq!(Opcode::Move, rec.opcode());
    assert_eq!(
        &[
            ResolvedArgument::new(ValueType::Var, "GF@x"),
            ResolvedArgument::new(ValueType::Int, "5"),
        ],
        rec.args(),
    );
}

#[test]
fn missing_header() {
    let e = parse_err("MOVE GF@x int@5\n");

    assert_eq!(
        ParseError::InvalidHeader(
            "MOVE GF@x int@5".into(),
            Span::new(L1, 0, 15)
        ),
        e,
    );
    assert_eq!(21, e.exit_code());
}

#[test]
fn unknown_opcode_in_body() {
    let e = parse_err(".IPPcode22\nFOO\n");

    assert_eq!(ParseError::UnknownOpcode("FOO".into(), Span::new(L2, 0, 3)), e);
    assert_eq!(22, e.exit_code());
}

#[test]
fn defvar_arity_mismatch() {
    let e = parse_err(".IPPcode22\nDEFVAR GF@x int@5\n");

    assert!(matches!(
        e,
        ParseError::ArityMismatch {
            opcode: Opcode::DefVar,
            expected: 1,
            actual: 2,
            ..
        }
    ));
    assert_eq!(23, e.exit_code());
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let doc = parse_str(".IPPcode22\n# comment only\n\nCREATEFRAME\n").unwrap();

    assert_eq!(1, doc.len());
    assert_eq!(Opcode::CreateFrame, doc.instructions()[0].opcode());
    assert_eq!(order(1), doc.instructions()[0].order());
}

#[test]
fn empty_input_is_missing_header() {
    let e = parse_err("");

    assert_eq!(ParseError::MissingHeader, e);
    assert_eq!(ErrorKind::InvalidHeader, e.kind());
}

#[test]
fn comments_only_is_missing_header() {
    assert_eq!(
        ParseError::MissingHeader,
        parse_err("# nothing\n\n   \n# here\n"),
    );
}

#[test]
fn header_only_is_empty_program() {
    let doc = parse_str(".IPPcode22\n").unwrap();

    assert!(doc.is_empty());
    assert_eq!("IPPcode22", doc.language_tag());
}

#[test]
fn header_is_case_insensitive() {
    for header in [".IPPcode22", ".ippcode22", ".IPPCODE22", ".iPpCoDe22"] {
        assert!(parse_str(header).is_ok(), "{header}");
    }
}

#[test]
fn header_may_be_preceded_by_comments_and_followed_by_comment() {
    let src = "# leading\n\n   .IPPcode22   # trailing comment\nBREAK\n";

    assert_eq!(1, parse_str(src).unwrap().len());
}

#[test]
fn header_must_be_alone_on_its_line() {
    let e = parse_err(".IPPcode22 BREAK\n");

    assert_eq!(
        ParseError::InvalidHeader(
            ".IPPcode22 BREAK".into(),
            Span::new(L1, 0, 16)
        ),
        e,
    );
}

#[test]
fn misspelled_header() {
    let e = parse_err("  .IPPcode21  # old\nBREAK\n");

    assert_eq!(
        ParseError::InvalidHeader(".IPPcode21".into(), Span::new(L1, 2, 10)),
        e,
    );
}

#[test]
fn second_header_is_unknown_opcode() {
    assert!(matches!(
        parse_err(".IPPcode22\n.IPPcode22\n"),
        ParseError::UnknownOpcode(..),
    ));
}

#[test]
fn opcodes_are_case_insensitive() {
    let src = "\
.IPPcode22
move GF@x int@1
MOVE GF@x int@2
Move GF@x int@3
";

    let doc = parse_str(src).unwrap();

    assert!(doc
        .instructions()
        .iter()
        .all(|rec| rec.opcode() == Opcode::Move));
}

#[test]
fn operands_are_case_sensitive() {
    let e = parse_err(".IPPcode22\nMOVE gf@x int@5\n");

    assert_eq!(
        ParseError::InvalidOperand(
            OperandError::InvalidFrame("gf".into()),
            Span::new(L2, 5, 2),
        ),
        e,
    );
}

#[test]
fn orders_are_contiguous_from_one() {
    let src = "\
.IPPcode22
# setup
DEFVAR GF@a

DEFVAR GF@b   # second
MOVE GF@a int@1
   ADD GF@b GF@a int@2
WRITE GF@b
";

    let doc = parse_str(src).unwrap();
    let orders = doc
        .instructions()
        .iter()
        .map(|rec| rec.order().get())
        .collect::<Vec<_>>();

    assert_eq!(vec![1, 2, 3, 4, 5], orders);
}

#[test]
fn errors_report_physical_line() {
    let e = parse_err("# one\n.IPPcode22\n\n# four\nBREAK\nPUSHS 5\n");

    assert_eq!(Some(6), e.span().map(|span| span.line().get()));
}

#[test]
fn crlf_line_endings() {
    let doc = parse_str(".IPPcode22\r\nWRITE string@hi\r\n").unwrap();

    assert_eq!(
        &[ResolvedArgument::new(ValueType::String, "hi")],
        doc.instructions()[0].args(),
    );
}

#[test]
fn first_error_stops_parse() {
    // The second line would be an unknown opcode,
    //   but the first error is reported.
    assert!(matches!(
        parse_err(".IPPcode22\nDEFVAR\nFOO\n"),
        ParseError::ArityMismatch { .. },
    ));
}

#[test]
fn scan_error_retains_source_line() {
    let err = parse_str(".IPPcode22\n  JUMP 1abc # where\n").unwrap_err();

    assert_eq!(Some("  JUMP 1abc # where"), err.source_line());
}

#[test]
fn missing_header_has_no_source_line() {
    assert_eq!(None, parse_str("").unwrap_err().source_line());
}

#[test]
fn scanner_transitions() {
    let mut sut = Sut::new();

    assert_eq!(ScanState::AwaitingHeader, sut.state());
    assert_eq!(None, sut.line());

    assert_eq!(Ok(LineOutcome::Skipped), sut.feed_line("# hello"));
    assert_eq!(ScanState::AwaitingHeader, sut.state());

    assert_eq!(Ok(LineOutcome::Header), sut.feed_line(".IPPcode22"));
    assert_eq!(ScanState::InBody, sut.state());

    assert_eq!(Ok(LineOutcome::Skipped), sut.feed_line(""));
    assert_eq!(
        Ok(LineOutcome::Instruction(order(1))),
        sut.feed_line("PUSHFRAME")
    );
    assert_eq!(
        Ok(LineOutcome::Instruction(order(2))),
        sut.feed_line("POPFRAME")
    );
    assert_eq!(Some(5), sut.line().map(LineNum::get));

    assert_eq!(2, sut.finish().unwrap().len());
}

#[test]
fn failed_instruction_does_not_consume_order() {
    let mut sut = Sut::new();

    sut.feed_line(".IPPcode22").unwrap();
    assert!(sut.feed_line("BOGUS").is_err());
    assert_eq!(Ok(LineOutcome::Instruction(order(1))), sut.feed_line("RETURN"));
}

#[test]
fn scanners_are_independent() {
    let mut a = Sut::new();
    let mut b = Sut::new();

    a.feed_line(".IPPcode22").unwrap();
    a.feed_line("BREAK").unwrap();

    assert_eq!(ScanState::AwaitingHeader, b.state());
    assert_eq!(ParseError::MissingHeader, b.finish().unwrap_err());

    b = Sut::new();
    b.feed_line(".IPPcode22").unwrap();
    assert_eq!(Ok(LineOutcome::Instruction(order(1))), b.feed_line("BREAK"));
    assert_eq!(1, a.finish().unwrap().len());
}

#[test]
fn quiet_scanner_behaves_identically() {
    let mut sut = Scanner::<trace::VoidTrace>::default();

    sut.feed_line(".IPPcode22").unwrap();
    sut.feed_line("EXIT int@0").unwrap();

    assert_eq!(1, sut.finish().unwrap().len());
}

#[test]
fn invalid_utf8_within_comment_is_ignored() {
    let doc = parse(&b".IPPcode22\n# caf\xe9\nBREAK # na\xefve\n"[..]).unwrap();

    assert_eq!(1, doc.len());
    assert_eq!(Opcode::Break, doc.instructions()[0].opcode());
}

#[test]
fn invalid_utf8_outside_comment() {
    let err = parse(&b".IPPcode22\nWRITE string@caf\xe9 # ok\xff\n"[..])
        .unwrap_err();

    assert_eq!(&ParseError::InvalidEncoding(Span::new(L2, 16, 3)), err.error());
    assert_eq!(23, err.error().exit_code());
    assert_eq!(
        Some("WRITE string@caf\u{FFFD} # ok\u{FFFD}"),
        err.source_line(),
    );
}

#[test]
fn invalid_utf8_before_header() {
    let err = parse(&b"\xfe.IPPcode22\n"[..]).unwrap_err();

    assert_eq!(&ParseError::InvalidEncoding(Span::new(L1, 0, 3)), err.error());
}

#[test]
fn source_line_excludes_carriage_return() {
    let err = parse_str(".IPPcode22\r\nFOO GF@x\r\n").unwrap_err();

    assert_eq!(Some("FOO GF@x"), err.source_line());
}

#[test]
fn last_line_need_not_be_terminated() {
    assert_eq!(2, parse_str(".IPPcode22\nBREAK\nBREAK").unwrap().len());
}

#[test]
fn scanner_feeds_raw_bytes() {
    let mut sut = Sut::new();

    let (decoded, result) = sut.feed_bytes(b".IPPcode22 # \x80");
    assert_eq!(".IPPcode22 # \u{FFFD}", decoded);
    assert_eq!(Ok(LineOutcome::Header), result);

    let (decoded, result) = sut.feed_bytes(b"BREAK");
    assert!(matches!(decoded, Cow::Borrowed("BREAK")));
    assert_eq!(Ok(LineOutcome::Instruction(order(1))), result);

    let (_, result) = sut.feed_bytes(b"\x80");
    assert_eq!(
        Err(ParseError::InvalidEncoding(Span::new(line(3), 0, 3))),
        result,
    );
}
