// Tests for line tokenization
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
use crate::span::dummy::*;

fn texts(line: &str) -> Vec<String> {
    tokenize(line, L1).map(|tok| tok.text().to_string()).collect()
}

#[test]
fn splits_on_runs_of_whitespace() {
    assert_eq!(
        vec!["MOVE", "GF@x", "int@5"],
        texts("  MOVE \t GF@x   int@5\r"),
    );
}

#[test]
fn blank_line_yields_nothing() {
    assert!(texts("").is_empty());
    assert!(texts("   \t  ").is_empty());
    assert!(texts("\x0b\x0c").is_empty());
}

#[test]
fn comment_only_line_yields_nothing() {
    assert!(texts("# comment").is_empty());
    assert!(texts("    # indented comment").is_empty());
}

#[test]
fn trailing_comment_is_stripped() {
    assert_eq!(vec!["WRITE", "string@a"], texts("WRITE string@a#b c"));
    assert_eq!(vec!["BREAK"], texts("BREAK # stop here"));
}

#[test]
fn strip_comment_truncates_at_first_marker() {
    assert_eq!("a ", strip_comment("a # b # c"));
    assert_eq!("", strip_comment("#"));
    assert_eq!("none", strip_comment("none"));
}

#[test]
fn tokens_carry_byte_spans() {
    let toks = tokenize("  ADD  LF@x", L2).collect::<Vec<_>>();

    assert_eq!(2, toks.len());
    assert_eq!(Span::new(L2, 2, 3), toks[0].span());
    assert_eq!(Span::new(L2, 7, 4), toks[1].span());
}

#[test]
fn spans_count_bytes_of_multibyte_text() {
    let toks = tokenize("WRITE string@žluťoučký kůň", L1).collect::<Vec<_>>();

    assert_eq!(3, toks.len());
    assert_eq!("string@žluťoučký", toks[1].text());
    assert_eq!(Span::new(L1, 6, "string@žluťoučký".len()), toks[1].span());
    assert_eq!("kůň", toks[2].text());
}

#[test]
fn into_uppercase_only_affects_ascii() {
    let tok = Token::new("move", S1).into_uppercase();
    assert_eq!("MOVE", tok.text());
    assert_eq!(S1, tok.span());

    let tok = Token::new("čtení", S1).into_uppercase();
    assert_eq!("čTENí", tok.text());
}

#[test]
fn displays_quoted() {
    assert_eq!("`GF@x`", Token::new("GF@x", S1).to_string());
}
