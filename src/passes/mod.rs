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

pub mod encode;
pub mod symbols;

use crate::ast::AssemblyLine;
use crate::diagnostics::DiagnosticSink;
use crate::pseudo;
use symbols::SymbolTable;

/// Pass one: walk every line once, recording the byte address each label
/// lands at. Uses `pseudo::expansion_length` so a label's address here can
/// never drift from where pass two actually places the instructions after
/// it — both passes share the same expansion-length decision.
pub fn collect_symbols(lines: &[AssemblyLine], sink: &mut DiagnosticSink) -> SymbolTable {
    let mut table = SymbolTable::new();
    let mut pc: u32 = 0;

    for line in lines {
        if let Some(label) = &line.label {
            if table.contains_key(label) {
                sink.report(
                    line.line_number,
                    line.source.clone(),
                    crate::diagnostics::AssemblyError::DuplicateLabel(label.clone()),
                );
            } else {
                table.insert(label.clone(), pc);
            }
        }

        if line.faulted {
            pc += 4;
            continue;
        }

        if let Some(raw) = &line.raw_instruction {
            let words = match pseudo::expansion_length(&raw.mnemonic, &raw.operands, line.line_number) {
                Ok(n) => n,
                Err(err) => {
                    sink.report(line.line_number, line.source.clone(), err);
                    1
                }
            };
            pc += 4 * words as u32;
        }
    }

    table
}
