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

use crate::ast::Operand;
use crate::diagnostics::AssemblyError;
use crate::encoder::bits::{bit, field};
use crate::encoder::operands::{expect_register, resolve_offset};
use crate::isa::Mnemonic;
use crate::passes::symbols::SymbolTable;

/// `off[20] | off[10:1] | off[11] | off[19:12] | rd | opcode`. Bit 0 of
/// `off` is not stored, matching `jal`'s word-scrambled layout — do not
/// reuse this field extraction for B-type, whose scramble differs.
pub fn encode(
    operands: &[Operand],
    current_address: u32,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<u32, AssemblyError> {
    if operands.len() != 2 {
        return Err(AssemblyError::OperandArity {
            expected: "rd, label".to_string(),
            found: operands.len(),
        });
    }

    let rd = expect_register(&operands[0], line)?;
    let label = match &operands[1] {
        Operand::Label(name) => name,
        other => return Err(AssemblyError::BadOperand(format!("{other:?}"))),
    };

    let offset = resolve_offset(symbol_table, label, current_address)?;

    if offset % 2 != 0 {
        return Err(AssemblyError::TargetMisaligned(offset));
    }
    if !(-1048576..=1048574).contains(&offset) {
        return Err(AssemblyError::TargetOutOfRange(offset));
    }
    let offset = offset as i32;

    Ok(bit(offset, 20, 31)
        | field(offset >> 1, 10, 21)
        | bit(offset, 11, 20)
        | field(offset >> 12, 8, 12)
        | field(rd.index() as i32, 5, 7)
        | field(Mnemonic::Jal.opcode() as i32, 7, 0))
}
