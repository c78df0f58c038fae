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
use crate::encoder::bits::field;
use crate::encoder::operands::{check_range, expect_register, resolve_offset};
use crate::isa::Mnemonic;
use crate::passes::symbols::SymbolTable;

/// `imm[31:12][31:12] | rd[11:7] | opcode[6:0]`. `lui` takes the literal
/// 20-bit immediate; `auipc` likewise, except when it carries a
/// `PcRelHi20` operand from `call` expansion, where the 20 bits are the
/// high half of `label - pc` instead of a literal.
pub fn encode(
    mnemonic: Mnemonic,
    operands: &[Operand],
    current_address: u32,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<u32, AssemblyError> {
    if operands.len() != 2 {
        return Err(AssemblyError::OperandArity {
            expected: "rd, imm".to_string(),
            found: operands.len(),
        });
    }

    let rd = expect_register(&operands[0], line)?;

    let imm20 = match &operands[1] {
        Operand::Immediate(v) => {
            check_range(*v as i64, 0, 0xFFFFF)?;
            *v
        }
        Operand::PcRelHi20(label) => {
            let offset = resolve_offset(symbol_table, label, current_address)?;
            let (hi20, _lo12) = crate::pseudo::split_hi_lo(offset as i32);
            hi20 & 0xFFFFF
        }
        other => return Err(AssemblyError::BadOperand(format!("{other:?}"))),
    };

    Ok(field(imm20, 20, 12)
        | field(rd.index() as i32, 5, 7)
        | field(mnemonic.opcode() as i32, 7, 0))
}
