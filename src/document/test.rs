// Tests for the structured program document
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
use crate::global::Order;
use crate::instr::Args;
use crate::resolve::ResolvedArgument;

/// Records every call as a line of text.
#[derive(Debug, Default)]
struct MockWriter {
    calls: Vec<String>,
    fail_on_text: bool,
}

impl DocumentWriter for MockWriter {
    type Error = &'static str;

    fn open_document(
        &mut self,
        version: &str,
        encoding: &str,
    ) -> Result<(), Self::Error> {
        self.calls.push(format!("open {version} {encoding}"));
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<(), Self::Error> {
        self.calls.push(format!("<{name}"));
        Ok(())
    }

    fn write_attribute(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error> {
        self.calls.push(format!("@{name}={value}"));
        Ok(())
    }

    fn text(&mut self, value: &str) -> Result<(), Self::Error> {
        if self.fail_on_text {
            return Err("text failed");
        }

        self.calls.push(format!("text {value:?}"));
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), Self::Error> {
        self.calls.push(format!("/{name}"));
        Ok(())
    }

    fn close_document(&mut self) -> Result<(), Self::Error> {
        self.calls.push("close".into());
        Ok(())
    }
}

fn record(
    order: u32,
    opcode: Opcode,
    args: &[(ValueType, &str)],
) -> InstructionRecord {
    InstructionRecord::new(
        Order::new(order).unwrap(),
        opcode,
        args.iter()
            .map(|&(ty, value)| ResolvedArgument::new(ty, value))
            .collect::<Args>(),
    )
}

#[test]
fn empty_program() {
    let doc = ProgramDocument::default();
    let mut sut = MockWriter::default();

    write_document(&doc, &mut sut).unwrap();

    assert_eq!(
        vec![
            "open 1.0 UTF-8",
            "<program",
            "@language=IPPcode22",
            "/program",
            "close",
        ],
        sut.calls,
    );
    assert!(doc.is_empty());
}

#[test]
fn instructions_with_operands() {
    let doc = ProgramDocument::new(vec![
        record(
            1,
            Opcode::Move,
            &[(ValueType::Var, "GF@x"), (ValueType::Int, "5")],
        ),
        record(2, Opcode::Break, &[]),
    ]);

    let mut sut = MockWriter::default();
    write_document(&doc, &mut sut).unwrap();

    assert_eq!(
        vec![
            "open 1.0 UTF-8",
            "<program",
            "@language=IPPcode22",
            "<instruction",
            "@order=1",
            "@opcode=MOVE",
            "<arg1",
            "@type=var",
            "text \"GF@x\"",
            "/arg1",
            "<arg2",
            "@type=int",
            "text \"5\"",
            "/arg2",
            "/instruction",
            "<instruction",
            "@order=2",
            "@opcode=BREAK",
            "/instruction",
            "/program",
            "close",
        ],
        sut.calls,
    );
    assert_eq!(2, doc.len());
}

#[test]
fn writer_failure_stops_emission() {
    let doc = ProgramDocument::new(vec![record(
        1,
        Opcode::Write,
        &[(ValueType::String, "hi")],
    )]);

    let mut sut = MockWriter {
        fail_on_text: true,
        ..Default::default()
    };

    assert_eq!(Err("text failed"), write_document(&doc, &mut sut));
    assert_eq!(Some("@type=string"), sut.calls.last().map(String::as_str));
}

#[test]
fn language_tag_is_fixed() {
    assert_eq!("IPPcode22", ProgramDocument::default().language_tag());
}
