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

//! Pass two: re-walk the lines with a complete symbol table, expanding
//! pseudos and handing each real instruction to the format dispatcher. A
//! faulty instruction does not stop assembly — it emits a zero word and
//! the byte offset still advances by one word, so every later address
//! pass one promised still lines up with where pass two actually writes.

use crate::ast::AssemblyLine;
use crate::diagnostics::DiagnosticSink;
use crate::encoder;
use crate::passes::symbols::SymbolTable;
use crate::pseudo;

pub fn encode_program(
    lines: &[AssemblyLine],
    symbol_table: &SymbolTable,
    sink: &mut DiagnosticSink,
) -> Vec<u8> {
    let mut text = Vec::new();
    let mut pc: u32 = 0;

    for line in lines {
        if line.faulted {
            text.extend_from_slice(&0u32.to_le_bytes());
            pc += 4;
            continue;
        }

        let Some(raw) = &line.raw_instruction else {
            continue;
        };

        let expanded = match pseudo::expand(&raw.mnemonic, &raw.operands, line.line_number) {
            Ok(instructions) => instructions,
            Err(err) => {
                sink.report(line.line_number, line.source.clone(), err);
                text.extend_from_slice(&0u32.to_le_bytes());
                pc += 4;
                continue;
            }
        };

        for (mnemonic, operands) in expanded {
            let word = match encoder::encode(mnemonic, &operands, pc, symbol_table, line.line_number) {
                Ok(word) => word,
                Err(err) => {
                    sink.report(line.line_number, line.source.clone(), err);
                    0
                }
            };
            text.extend_from_slice(&word.to_le_bytes());
            pc += 4;
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Operand, RawInstruction};
    use crate::isa::Register;
    use std::collections::HashMap;

    fn line(n: usize, mnemonic: &str, operands: Vec<Operand>) -> AssemblyLine {
        AssemblyLine {
            line_number: n,
            source: String::new(),
            label: None,
            directive: None,
            raw_instruction: Some(RawInstruction {
                mnemonic: mnemonic.to_string(),
                operands,
            }),
            faulted: false,
        }
    }

    #[test]
    fn encodes_addi_as_little_endian_word() {
        let lines = vec![line(
            1,
            "addi",
            vec![
                Operand::Register(Register(1)),
                Operand::Register(Register(0)),
                Operand::Immediate(10),
            ],
        )];
        let mut sink = DiagnosticSink::new();
        let bytes = encode_program(&lines, &HashMap::new(), &mut sink);
        assert_eq!(bytes, 0x00A00093u32.to_le_bytes());
        assert!(!sink.has_errors());
    }

    #[test]
    fn faulted_line_emits_zero_word_without_a_second_diagnostic() {
        let lines = vec![
            line(1, "nop", vec![]),
            AssemblyLine {
                line_number: 2,
                source: "lw x1, 3(x2".to_string(),
                label: None,
                directive: None,
                raw_instruction: None,
                faulted: true,
            },
            line(3, "nop", vec![]),
        ];
        let mut sink = DiagnosticSink::new();
        let bytes = encode_program(&lines, &HashMap::new(), &mut sink);
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[4..8], &0u32.to_le_bytes());
        assert!(!sink.has_errors());
    }

    #[test]
    fn faulty_instruction_emits_zero_word_and_advances_pc() {
        let lines = vec![
            line(
                1,
                "beq",
                vec![
                    Operand::Register(Register(1)),
                    Operand::Register(Register(0)),
                    Operand::Label("ghost".to_string()),
                ],
            ),
            line(
                2,
                "nop",
                vec![],
            ),
        ];
        let mut sink = DiagnosticSink::new();
        let bytes = encode_program(&lines, &HashMap::new(), &mut sink);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..4], &0u32.to_le_bytes());
        assert_eq!(sink.count(), 1);
    }
}
