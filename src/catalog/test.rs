// Tests for the instruction catalog
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
use crate::global;

#[test]
fn every_opcode_round_trips_through_lookup() {
    for &opcode in Opcode::ALL {
        assert_eq!(Some(opcode), Opcode::lookup(opcode.as_str()));
        assert_eq!(Some(opcode.operand_kind()), lookup(opcode.as_str()));
    }
}

#[test]
fn catalog_size() {
    assert_eq!(34, Opcode::ALL.len());
}

#[test]
fn lookup_is_exact() {
    // Callers are responsible for uppercasing.
    assert_eq!(None, lookup("move"));
    assert_eq!(None, lookup("Move"));
    assert_eq!(Some(OperandKind::VarSymbol), lookup("MOVE"));
}

#[test]
fn unknown_opcode_not_found() {
    assert_eq!(None, lookup("FOO"));
    assert_eq!(None, lookup(""));
    assert_eq!(None, lookup(global::HEADER));
}

#[test]
fn operand_kinds_of_representative_opcodes() {
    assert_eq!(Some(OperandKind::NoArgs), lookup("CREATEFRAME"));
    assert_eq!(Some(OperandKind::Var), lookup("DEFVAR"));
    assert_eq!(Some(OperandKind::Label), lookup("CALL"));
    assert_eq!(Some(OperandKind::Symbol), lookup("WRITE"));
    assert_eq!(Some(OperandKind::VarType), lookup("READ"));
    assert_eq!(Some(OperandKind::VarSymbolSymbol), lookup("ADD"));
    assert_eq!(Some(OperandKind::LabelSymbolSymbol), lookup("JUMPIFEQ"));
    assert_eq!(Some(OperandKind::NoArgs), lookup("BREAK"));
}

#[test]
fn expand_is_total_and_ordered() {
    use ValueType::*;

    assert!(expand(OperandKind::NoArgs).is_empty());
    assert_eq!(expand(OperandKind::Var), &[Var]);
    assert_eq!(expand(OperandKind::Label), &[Label]);
    assert_eq!(expand(OperandKind::Symbol), &[Symbol]);
    assert_eq!(expand(OperandKind::VarSymbol), &[Var, Symbol]);
    assert_eq!(expand(OperandKind::VarType), &[Var, Type]);
    assert_eq!(expand(OperandKind::VarSymbolSymbol), &[Var, Symbol, Symbol]);
    assert_eq!(
        expand(OperandKind::LabelSymbolSymbol),
        &[Label, Symbol, Symbol]
    );
}

#[test]
fn no_kind_exceeds_max_args() {
    for &opcode in Opcode::ALL {
        assert!(opcode.operand_kind().arity() <= global::MAX_ARGS);
    }
}

#[test]
fn value_type_tags_round_trip() {
    use ValueType::*;

    for ty in [Var, Nil, Int, Bool, String, Label, Symbol, Type] {
        assert_eq!(Some(ty), ValueType::from_tag(ty.tag()));
        assert_eq!(ty.tag(), ty.to_string());
    }

    assert_eq!(None, ValueType::from_tag("INT"));
    assert_eq!(None, ValueType::from_tag("float"));
}
