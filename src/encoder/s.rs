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
use crate::encoder::operands::{check_range, expect_memory, expect_register};
use crate::isa::Mnemonic;

/// `mnem rs2, imm(rs1)`:
/// `imm[11:5][31:25] | rs2[24:20] | rs1[19:15] | funct3[14:12] | imm[4:0][11:7] | opcode[6:0]`
pub fn encode(mnemonic: Mnemonic, operands: &[Operand], line: usize) -> Result<u32, AssemblyError> {
    if operands.len() != 2 {
        return Err(AssemblyError::OperandArity {
            expected: "rs2, imm(rs1)".to_string(),
            found: operands.len(),
        });
    }

    let rs2 = expect_register(&operands[0], line)?;
    let (imm, rs1) = expect_memory(&operands[1])?;
    check_range(imm as i64, -2048, 2047)?;

    let funct3 = mnemonic.funct3().expect("S-type mnemonics always carry funct3");

    Ok(field(imm >> 5, 7, 25)
        | field(rs2.index() as i32, 5, 20)
        | field(rs1.index() as i32, 5, 15)
        | field(funct3 as i32, 3, 12)
        | field(imm, 5, 7)
        | field(mnemonic.opcode() as i32, 7, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Register;

    #[test]
    fn sw_round_trips_immediate() {
        let ops = [
            Operand::Register(Register(5)),
            Operand::Memory(-4, Register(2)),
        ];
        let word = encode(Mnemonic::Sw, &ops, 1).unwrap();
        let hi = ((word >> 25) & 0x7F) as i32;
        let lo = ((word >> 7) & 0x1F) as i32;
        let imm = ((hi << 5) | lo) << 20 >> 20;
        assert_eq!(imm, -4);
    }
}
