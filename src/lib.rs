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

pub mod ast;
pub mod diagnostics;
pub mod encoder;
pub mod isa;
pub mod lexer;
pub mod passes;
pub mod pseudo;

use ast::AssemblyLine;
use diagnostics::DiagnosticSink;
use passes::symbols::SymbolTable;

/// Everything `assemble` produces: the encoded text segment, the final
/// symbol table, and every diagnostic raised along the way. There is no
/// collaborator-level failure mode for this core — malformed source is
/// reported, not rejected — so this is a plain struct rather than a
/// `Result`.
#[derive(Debug)]
pub struct AssembleOutput {
    pub text: Vec<u8>,
    pub symbols: SymbolTable,
    pub diagnostics: DiagnosticSink,
}

impl AssembleOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Assembles a slice of source lines into a machine-code byte stream. Runs
/// lexing once, then pass one (symbol collection) and pass two (encoding),
/// accumulating every diagnostic into one sink instead of stopping at the
/// first problem.
pub fn assemble(lines: &[impl AsRef<str>]) -> AssembleOutput {
    let mut diagnostics = DiagnosticSink::new();
    let mut parsed: Vec<AssemblyLine> = Vec::with_capacity(lines.len());

    for (idx, raw_line) in lines.iter().enumerate() {
        let line_number = idx + 1;
        match lexer::tokenize_line(line_number, raw_line.as_ref()) {
            Ok(Some(line)) => parsed.push(line),
            Ok(None) => {}
            Err(err) => {
                diagnostics.report(line_number, raw_line.as_ref(), err);
                parsed.push(AssemblyLine {
                    line_number,
                    source: raw_line.as_ref().to_string(),
                    faulted: true,
                    ..Default::default()
                });
            }
        }
    }

    let symbols = passes::collect_symbols(&parsed, &mut diagnostics);
    let text = passes::encode::encode_program(&parsed, &symbols, &mut diagnostics);

    AssembleOutput {
        text,
        symbols,
        diagnostics,
    }
}
