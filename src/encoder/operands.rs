/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Operand validation shared by every format encoder: register
//! extraction, immediate range checks, and label resolution against the
//! symbol table. Small `expect_*` helpers, each returning a structured
//! error instead of panicking, so every encoder reports failures the
//! same way.

use crate::ast::Operand;
use crate::diagnostics::AssemblyError;
use crate::isa::Register;
use crate::passes::symbols::SymbolTable;

pub fn expect_register(op: &Operand, _line: usize) -> Result<Register, AssemblyError> {
    match op {
        Operand::Register(r) => Ok(*r),
        other => Err(AssemblyError::BadOperand(format!(
            "expected a register, found {other:?}"
        ))),
    }
}

pub fn expect_immediate(op: &Operand, lo: i64, hi: i64) -> Result<i32, AssemblyError> {
    let value = match op {
        Operand::Immediate(v) => *v,
        other => {
            return Err(AssemblyError::BadOperand(format!(
                "expected an immediate, found {other:?}"
            )));
        }
    };
    check_range(value as i64, lo, hi)?;
    Ok(value)
}

pub fn check_range(value: i64, lo: i64, hi: i64) -> Result<(), AssemblyError> {
    if value < lo || value > hi {
        return Err(AssemblyError::ImmediateOutOfRange { value, lo, hi });
    }
    Ok(())
}

/// Resolves a `Memory(imm, reg)` operand, the `imm(reg)` form used by
/// loads, stores, and the alternate `jalr` syntax.
pub fn expect_memory(op: &Operand) -> Result<(i32, Register), AssemblyError> {
    match op {
        Operand::Memory(imm, reg) => Ok((*imm, *reg)),
        other => Err(AssemblyError::BadOperand(format!(
            "expected imm(reg), found {other:?}"
        ))),
    }
}

/// Looks up a label and returns its byte address, or `UndefinedLabel`.
pub fn resolve_label(symbol_table: &SymbolTable, name: &str) -> Result<u32, AssemblyError> {
    symbol_table
        .get(name)
        .copied()
        .ok_or_else(|| AssemblyError::UndefinedLabel(name.to_string()))
}

/// Resolves a branch/jump target label to a PC-relative offset from
/// `current_address`, without yet checking range/alignment (callers apply
/// the format-specific bounds).
pub fn resolve_offset(
    symbol_table: &SymbolTable,
    name: &str,
    current_address: u32,
) -> Result<i64, AssemblyError> {
    let target = resolve_label(symbol_table, name)?;
    Ok(target as i64 - current_address as i64)
}
