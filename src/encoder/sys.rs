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
use crate::isa::Mnemonic;

/// `ecall` and `ebreak` carry no operands and differ only in bit 20;
/// `fence`'s pred/succ/fm fields are not exercised at the RV32I level this
/// assembler targets, so it encodes with all fields zeroed.
pub fn encode(mnemonic: Mnemonic, operands: &[Operand]) -> Result<u32, AssemblyError> {
    if !operands.is_empty() {
        return Err(AssemblyError::OperandArity {
            expected: "no operands".to_string(),
            found: operands.len(),
        });
    }

    let opcode = Mnemonic::Ecall.opcode();
    Ok(match mnemonic {
        Mnemonic::Ecall => opcode,
        Mnemonic::Ebreak => opcode | (1 << 20),
        Mnemonic::Fence => opcode,
        _ => unreachable!("encode_sys called with a non-SYSTEM mnemonic"),
    })
}
