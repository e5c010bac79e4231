// IPPcode22 instruction catalog
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

//! Static table of known opcodes and the shape of their operands.
//!
//! Every [`Opcode`] maps to exactly one [`OperandKind`],
//!   which [`expand`]s into the ordered sequence of [`ValueType`]s that
//!   the instruction expects as operands.
//! The table is closed:
//!   it is fixed at compile time and is never extended at runtime.
//!
//! Opcodes are case-insensitive in source programs,
//!   but [`lookup`] compares exactly;
//!     callers uppercase the mnemonic before lookup.

use std::fmt::{self, Display};

/// Shape of the operands of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    NoArgs,
    Var,
    Label,
    Symbol,
    VarSymbol,
    VarSymbolSymbol,
    VarType,
    LabelSymbolSymbol,
}

impl OperandKind {
    /// Number of operands expected by instructions of this kind.
    pub fn arity(self) -> usize {
        expand(self).len()
    }
}

/// Type of a single operand.
///
/// Each type has a canonical tag string (see [`ValueType::tag`]) that is
///   used as the `type` attribute of operands in the structured document.
///
/// [`ValueType::Symbol`] appears only as an _expected_ type;
///   operand resolution replaces it with one of
///   [`Var`](ValueType::Var),
///   [`Nil`](ValueType::Nil),
///   [`Int`](ValueType::Int),
///   [`Bool`](ValueType::Bool),
///   or [`String`](ValueType::String).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Var,
    Nil,
    Int,
    Bool,
    String,
    Label,
    Symbol,
    Type,
}

impl ValueType {
    /// Canonical tag string.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Nil => "nil",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Label => "label",
            Self::Symbol => "symbol",
            Self::Type => "type",
        }
    }

    /// Inverse of [`ValueType::tag`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "var" => Self::Var,
            "nil" => Self::Nil,
            "int" => Self::Int,
            "bool" => Self::Bool,
            "string" => Self::String,
            "label" => Self::Label,
            "symbol" => Self::Symbol,
            "type" => Self::Type,
            _ => return None,
        })
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Declare the closed set of opcodes.
///
/// Each entry provides the variant name,
///   the uppercased mnemonic as it appears in source and output,
///   and the [`OperandKind`] of its operands.
macro_rules! opcodes {
    ($($variant:ident = $mnemonic:literal => $kind:ident,)*) => {
        /// Known instruction mnemonic.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Opcode {
            $($variant,)*
        }

        impl Opcode {
            /// Every known opcode,
            ///   in catalog order.
            pub const ALL: &'static [Opcode] = &[$(Self::$variant,)*];

            /// Uppercased mnemonic.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $mnemonic,)*
                }
            }

            pub fn operand_kind(self) -> OperandKind {
                match self {
                    $(Self::$variant => OperandKind::$kind,)*
                }
            }

            /// Look up an already-uppercased mnemonic.
            pub fn lookup(mnemonic: &str) -> Option<Self> {
                match mnemonic {
                    $($mnemonic => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

opcodes! {
    Move = "MOVE" => VarSymbol,
    CreateFrame = "CREATEFRAME" => NoArgs,
    PushFrame = "PUSHFRAME" => NoArgs,
    PopFrame = "POPFRAME" => NoArgs,
    DefVar = "DEFVAR" => Var,
    Call = "CALL" => Label,
    Return = "RETURN" => NoArgs,
    PushS = "PUSHS" => Symbol,
    PopS = "POPS" => Var,
    Add = "ADD" => VarSymbolSymbol,
    Sub = "SUB" => VarSymbolSymbol,
    Mul = "MUL" => VarSymbolSymbol,
    IDiv = "IDIV" => VarSymbolSymbol,
    Lt = "LT" => VarSymbolSymbol,
    Gt = "GT" => VarSymbolSymbol,
    Eq = "EQ" => VarSymbolSymbol,
    And = "AND" => VarSymbolSymbol,
    Or = "OR" => VarSymbolSymbol,
    Not = "NOT" => VarSymbolSymbol,
    Int2Char = "INT2CHAR" => VarSymbolSymbol,
    Str2Int = "STR2INT" => VarSymbolSymbol,
    Read = "READ" => VarType,
    Write = "WRITE" => Symbol,
    Concat = "CONCAT" => VarSymbolSymbol,
    StrLen = "STRLEN" => VarSymbol,
    GetChar = "GETCHAR" => VarSymbolSymbol,
    SetChar = "SETCHAR" => VarSymbolSymbol,
    Type = "TYPE" => VarSymbol,
    Label = "LABEL" => Label,
    Jump = "JUMP" => Label,
    JumpIfEq = "JUMPIFEQ" => LabelSymbolSymbol,
    Exit = "EXIT" => Symbol,
    DPrint = "DPRINT" => Symbol,
    Break = "BREAK" => NoArgs,
}

impl Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up the operand shape of an already-uppercased mnemonic.
///
/// [`None`] indicates an unknown opcode.
pub fn lookup(mnemonic: &str) -> Option<OperandKind> {
    Opcode::lookup(mnemonic).map(Opcode::operand_kind)
}

/// Ordered sequence of operand types expected for the given
///   [`OperandKind`].
pub fn expand(kind: OperandKind) -> &'static [ValueType] {
    use ValueType::*;

    match kind {
        OperandKind::NoArgs => &[],
        OperandKind::Var => &[Var],
        OperandKind::Label => &[Label],
        OperandKind::Symbol => &[Symbol],
        OperandKind::VarSymbol => &[Var, Symbol],
        OperandKind::VarType => &[Var, Type],
        OperandKind::VarSymbolSymbol => &[Var, Symbol, Symbol],
        OperandKind::LabelSymbolSymbol => &[Label, Symbol, Symbol],
    }
}

#[cfg(test)]
mod test;
