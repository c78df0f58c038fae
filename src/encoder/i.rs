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

//! I-type covers three unrelated mnemonic classes that happen to share a
//! bit layout: arithmetic/shift-immediate, loads, and `jalr`. Each class
//! parses a different operand shape, so this module branches on mnemonic
//! class rather than the bare format tag, keeping that branch explicit
//! instead of folding it into the generic R/I/S/B/U/J dispatch.

use crate::ast::Operand;
use crate::diagnostics::AssemblyError;
use crate::encoder::bits::field;
use crate::encoder::operands::{expect_immediate, expect_memory, expect_register, resolve_offset};
use crate::isa::Mnemonic;
use crate::passes::symbols::SymbolTable;

const SHIFT_IMMEDIATE: [Mnemonic; 3] = [Mnemonic::Slli, Mnemonic::Srli, Mnemonic::Srai];
const LOADS: [Mnemonic; 5] = [
    Mnemonic::Lb,
    Mnemonic::Lh,
    Mnemonic::Lw,
    Mnemonic::Lbu,
    Mnemonic::Lhu,
];

pub fn encode(
    mnemonic: Mnemonic,
    operands: &[Operand],
    current_address: u32,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<u32, AssemblyError> {
    if mnemonic == Mnemonic::Jalr {
        return encode_jalr(operands, current_address, symbol_table, line);
    }
    if LOADS.contains(&mnemonic) {
        return encode_load(mnemonic, operands, line);
    }
    if SHIFT_IMMEDIATE.contains(&mnemonic) {
        return encode_shift(mnemonic, operands, line);
    }
    encode_arithmetic(mnemonic, operands, line)
}

fn base_word(mnemonic: Mnemonic, rd_index: u8, rs1_index: u8, imm_field: u32) -> u32 {
    let funct3 = mnemonic.funct3().expect("I-type mnemonics always carry funct3");
    imm_field
        | field(rs1_index as i32, 5, 15)
        | field(funct3 as i32, 3, 12)
        | field(rd_index as i32, 5, 7)
        | field(mnemonic.opcode() as i32, 7, 0)
}

fn encode_arithmetic(mnemonic: Mnemonic, operands: &[Operand], line: usize) -> Result<u32, AssemblyError> {
    if operands.len() != 3 {
        return Err(AssemblyError::OperandArity {
            expected: "rd, rs1, imm".to_string(),
            found: operands.len(),
        });
    }
    let rd = expect_register(&operands[0], line)?;
    let rs1 = expect_register(&operands[1], line)?;
    let imm = expect_immediate(&operands[2], -2048, 2047)?;

    Ok(base_word(mnemonic, rd.index(), rs1.index(), field(imm, 12, 20)))
}

fn encode_shift(mnemonic: Mnemonic, operands: &[Operand], line: usize) -> Result<u32, AssemblyError> {
    if operands.len() != 3 {
        return Err(AssemblyError::OperandArity {
            expected: "rd, rs1, shamt".to_string(),
            found: operands.len(),
        });
    }
    let rd = expect_register(&operands[0], line)?;
    let rs1 = expect_register(&operands[1], line)?;
    let shamt = expect_immediate(&operands[2], 0, 31)?;

    let imm_field = field(mnemonic.funct7() as i32, 7, 25) | field(shamt, 5, 20);
    Ok(base_word(mnemonic, rd.index(), rs1.index(), imm_field))
}

fn encode_load(mnemonic: Mnemonic, operands: &[Operand], line: usize) -> Result<u32, AssemblyError> {
    if operands.len() != 2 {
        return Err(AssemblyError::OperandArity {
            expected: "rd, imm(rs1)".to_string(),
            found: operands.len(),
        });
    }
    let rd = expect_register(&operands[0], line)?;
    let (imm, rs1) = expect_memory(&operands[1])?;
    crate::encoder::operands::check_range(imm as i64, -2048, 2047)?;

    Ok(base_word(mnemonic, rd.index(), rs1.index(), field(imm, 12, 20)))
}

/// Accepts `jalr rd, rs1, imm`, `jalr rd, imm(rs1)`, and the
/// `jalr ra, ra, PcRelLo12(label)` form produced by expanding `call`,
/// whose low-12 immediate is resolved against the `auipc` four bytes
/// earlier (the two instructions `call` expands to are always adjacent).
fn encode_jalr(
    operands: &[Operand],
    current_address: u32,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<u32, AssemblyError> {
    let (rd, rs1, imm) = match operands {
        [rd_op, rs1_op, Operand::PcRelLo12(label)] => {
            let rd = expect_register(rd_op, line)?;
            let rs1 = expect_register(rs1_op, line)?;
            let auipc_address = current_address.wrapping_sub(4);
            let offset = resolve_offset(symbol_table, label, auipc_address)?;
            let (_hi20, lo12) = crate::pseudo::split_hi_lo(offset as i32);
            (rd, rs1, lo12)
        }
        [rd_op, rs1_op, imm_op] => {
            let rd = expect_register(rd_op, line)?;
            let rs1 = expect_register(rs1_op, line)?;
            let imm = expect_immediate(imm_op, -2048, 2047)?;
            (rd, rs1, imm)
        }
        [rd_op, mem_op] => {
            let rd = expect_register(rd_op, line)?;
            let (imm, rs1) = expect_memory(mem_op)?;
            crate::encoder::operands::check_range(imm as i64, -2048, 2047)?;
            (rd, rs1, imm)
        }
        _ => {
            return Err(AssemblyError::OperandArity {
                expected: "rd, rs1, imm or rd, imm(rs1)".to_string(),
                found: operands.len(),
            });
        }
    };

    Ok(base_word(Mnemonic::Jalr, rd.index(), rs1.index(), field(imm, 12, 20)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Register;
    use std::collections::HashMap;

    #[test]
    fn addi_x1_x0_10() {
        let ops = [
            Operand::Register(Register(1)),
            Operand::Register(Register(0)),
            Operand::Immediate(10),
        ];
        let symbols = HashMap::new();
        assert_eq!(
            encode(Mnemonic::Addi, &ops, 0, &symbols, 1).unwrap(),
            0x00A00093
        );
    }

    #[test]
    fn immediate_overflow_is_range_error() {
        let ops = [
            Operand::Register(Register(1)),
            Operand::Register(Register(0)),
            Operand::Immediate(4096),
        ];
        let symbols = HashMap::new();
        let err = encode(Mnemonic::Addi, &ops, 0, &symbols, 1).unwrap_err();
        assert!(matches!(err, AssemblyError::ImmediateOutOfRange { .. }));
    }

    #[test]
    fn lw_accepts_unaligned_offset() {
        let ops = [
            Operand::Register(Register(1)),
            Operand::Memory(3, Register(2)),
        ];
        let symbols = HashMap::new();
        assert!(encode(Mnemonic::Lw, &ops, 0, &symbols, 1).is_ok());
    }

    #[test]
    fn jalr_accepts_both_syntaxes() {
        let three_op = [
            Operand::Register(Register(1)),
            Operand::Register(Register(2)),
            Operand::Immediate(0),
        ];
        let mem_form = [
            Operand::Register(Register(1)),
            Operand::Memory(0, Register(2)),
        ];
        let symbols = HashMap::new();
        assert_eq!(
            encode(Mnemonic::Jalr, &three_op, 0, &symbols, 1).unwrap(),
            encode(Mnemonic::Jalr, &mem_form, 0, &symbols, 1).unwrap()
        );
    }
}
