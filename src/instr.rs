// Instruction validation
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

//! Validation of a tokenized instruction line into an
//!   [`InstructionRecord`].
//!
//! The mnemonic is looked up in the [catalog](crate::catalog),
//!   the number of operands is checked against the opcode's arity,
//!   and each operand is [resolved](crate::resolve) against the type
//!     expected in its position.
//! The first failure aborts the instruction;
//!   no partial record is ever produced.

use crate::catalog::{self, Opcode};
use crate::error::ParseError;
use crate::global::{self, Order};
use crate::resolve::{resolve, ResolvedArgument};
use crate::token::Token;
use arrayvec::ArrayVec;

/// Operands of a single instruction.
pub type Args = ArrayVec<ResolvedArgument, { global::MAX_ARGS }>;

/// A validated instruction.
///
/// Records are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord {
    order: Order,
    opcode: Opcode,
    args: Args,
}

impl InstructionRecord {
    pub fn new(order: Order, opcode: Opcode, args: Args) -> Self {
        Self {
            order,
            opcode,
            args,
        }
    }

    /// 1-based position of the instruction within its program.
    pub fn order(&self) -> Order {
        self.order
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Operands in positional order.
    pub fn args(&self) -> &[ResolvedArgument] {
        &self.args
    }
}

/// Validate an instruction,
///   assigning it the given `order`.
///
/// `mnemonic` must already be uppercased.
pub fn validate(
    mnemonic: &Token,
    operands: &[Token],
    order: Order,
) -> Result<InstructionRecord, ParseError> {
    let opcode = Opcode::lookup(mnemonic.text()).ok_or_else(|| {
        ParseError::UnknownOpcode(mnemonic.text().into(), mnemonic.span())
    })?;

    let expected = catalog::expand(opcode.operand_kind());

    if operands.len() != expected.len() {
        return Err(ParseError::ArityMismatch {
            opcode,
            expected: expected.len(),
            actual: operands.len(),
            span: mnemonic.span(),
        });
    }

    let args = operands
        .iter()
        .zip(expected)
        .map(|(tok, &ty)| resolve(tok, ty))
        .collect::<Result<Args, _>>()?;

    Ok(InstructionRecord::new(order, opcode, args))
}
