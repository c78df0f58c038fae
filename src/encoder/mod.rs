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

//! Format dispatch. Every format encoder takes the same trailing
//! `(current_address, symbol_table, line)` shape even when it doesn't need
//! all three, so this function can route without matching twice.

pub mod b;
pub mod bits;
pub mod i;
pub mod j;
pub mod operands;
pub mod r;
pub mod s;
pub mod sys;
pub mod u;

use crate::ast::Operand;
use crate::diagnostics::AssemblyError;
use crate::isa::{Format, Mnemonic};
use crate::passes::symbols::SymbolTable;

pub fn encode(
    mnemonic: Mnemonic,
    operands: &[Operand],
    current_address: u32,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<u32, AssemblyError> {
    match mnemonic.format() {
        Format::R => r::encode(mnemonic, operands, line),
        Format::I => i::encode(mnemonic, operands, current_address, symbol_table, line),
        Format::S => s::encode(mnemonic, operands, line),
        Format::B => b::encode(mnemonic, operands, current_address, symbol_table, line),
        Format::U => u::encode(mnemonic, operands, current_address, symbol_table, line),
        Format::J => j::encode(operands, current_address, symbol_table, line),
        Format::Sys => sys::encode(mnemonic, operands),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Register;
    use std::collections::HashMap;

    #[test]
    fn dispatches_r_type() {
        let ops = [
            Operand::Register(Register(3)),
            Operand::Register(Register(1)),
            Operand::Register(Register(2)),
        ];
        let symbols = HashMap::new();
        assert_eq!(
            encode(Mnemonic::Add, &ops, 0, &symbols, 1).unwrap(),
            0x002081B3
        );
    }

    #[test]
    fn dispatches_sys_type() {
        let symbols = HashMap::new();
        assert_eq!(encode(Mnemonic::Ecall, &[], 0, &symbols, 1).unwrap(), 0x00000073);
    }
}
