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
use crate::encoder::operands::expect_register;
use crate::isa::Mnemonic;

/// `funct7[31:25] | rs2[24:20] | rs1[19:15] | funct3[14:12] | rd[11:7] | opcode[6:0]`
pub fn encode(mnemonic: Mnemonic, operands: &[Operand], line: usize) -> Result<u32, AssemblyError> {
    if operands.len() != 3 {
        return Err(AssemblyError::OperandArity {
            expected: "rd, rs1, rs2".to_string(),
            found: operands.len(),
        });
    }

    let rd = expect_register(&operands[0], line)?;
    let rs1 = expect_register(&operands[1], line)?;
    let rs2 = expect_register(&operands[2], line)?;

    let funct3 = mnemonic.funct3().expect("R-type mnemonics always carry funct3");

    Ok(field(mnemonic.funct7() as i32, 7, 25)
        | field(rs2.index() as i32, 5, 20)
        | field(rs1.index() as i32, 5, 15)
        | field(funct3 as i32, 3, 12)
        | field(rd.index() as i32, 5, 7)
        | field(mnemonic.opcode() as i32, 7, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Register;

    #[test]
    fn add_x3_x1_x2() {
        let ops = [
            Operand::Register(Register(3)),
            Operand::Register(Register(1)),
            Operand::Register(Register(2)),
        ];
        let word = encode(Mnemonic::Add, &ops, 1).unwrap();
        assert_eq!(word, 0x002081B3);
    }

    #[test]
    fn sub_sets_funct7() {
        let ops = [
            Operand::Register(Register(1)),
            Operand::Register(Register(2)),
            Operand::Register(Register(3)),
        ];
        let word = encode(Mnemonic::Sub, &ops, 1).unwrap();
        assert_eq!(word >> 25, 0b0100000);
    }
}
