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

//! B-type's scrambled immediate is the main encoding hazard in this
//! format: each field is pulled out as an explicit named bit range
//! rather than copy-pasted from J-type, which scrambles its offset
//! differently.

use crate::ast::Operand;
use crate::diagnostics::AssemblyError;
use crate::encoder::bits::{bit, field};
use crate::encoder::operands::{expect_register, resolve_offset};
use crate::isa::Mnemonic;
use crate::passes::symbols::SymbolTable;

/// `off[12] | off[10:5] | rs2 | rs1 | funct3 | off[4:1] | off[11] | opcode`.
/// Bit 0 of `off` is always zero and is not stored.
pub fn encode(
    mnemonic: Mnemonic,
    operands: &[Operand],
    current_address: u32,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<u32, AssemblyError> {
    if operands.len() != 3 {
        return Err(AssemblyError::OperandArity {
            expected: "rs1, rs2, label".to_string(),
            found: operands.len(),
        });
    }

    let rs1 = expect_register(&operands[0], line)?;
    let rs2 = expect_register(&operands[1], line)?;
    let label = match &operands[2] {
        Operand::Label(name) => name,
        other => return Err(AssemblyError::BadOperand(format!("{other:?}"))),
    };

    let offset = resolve_offset(symbol_table, label, current_address)?;

    if offset % 2 != 0 {
        return Err(AssemblyError::TargetMisaligned(offset));
    }
    if !(-4096..=4094).contains(&offset) {
        return Err(AssemblyError::TargetOutOfRange(offset));
    }
    let offset = offset as i32;

    let funct3 = mnemonic.funct3().expect("B-type mnemonics always carry funct3");

    Ok(bit(offset, 12, 31)
        | field(offset >> 5, 6, 25)
        | field(rs2.index() as i32, 5, 20)
        | field(rs1.index() as i32, 5, 15)
        | field(funct3 as i32, 3, 12)
        | field(offset >> 1, 4, 8)
        | bit(offset, 11, 7)
        | field(mnemonic.opcode() as i32, 7, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Register;
    use std::collections::HashMap;

    #[test]
    fn backward_branch_offset_minus_four() {
        let mut symbols = HashMap::new();
        symbols.insert("main".to_string(), 0u32);
        let ops = [
            Operand::Register(Register(1)),
            Operand::Register(Register(0)),
            Operand::Label("main".to_string()),
        ];
        // second instruction of a two-instruction loop, branching back to address 0
        let word = encode(Mnemonic::Beq, &ops, 4, &symbols, 1).unwrap();
        assert_eq!(word, 0xFE008EE3);
    }

    #[test]
    fn odd_offset_is_misaligned() {
        let mut symbols = HashMap::new();
        symbols.insert("odd".to_string(), 5u32);
        let ops = [
            Operand::Register(Register(1)),
            Operand::Register(Register(0)),
            Operand::Label("odd".to_string()),
        ];
        let err = encode(Mnemonic::Beq, &ops, 0, &symbols, 1).unwrap_err();
        assert!(matches!(err, AssemblyError::TargetMisaligned(_)));
    }

    #[test]
    fn undefined_label_is_reported() {
        let symbols = HashMap::new();
        let ops = [
            Operand::Register(Register(1)),
            Operand::Register(Register(0)),
            Operand::Label("ghost".to_string()),
        ];
        let err = encode(Mnemonic::Beq, &ops, 0, &symbols, 1).unwrap_err();
        assert!(matches!(err, AssemblyError::UndefinedLabel(_)));
    }
}
