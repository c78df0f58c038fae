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

use crate::isa::Register;

// Represents all possible forms an argument to an instruction can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Register(Register),
    Immediate(i32),
    Label(String),         // e.g. my_label
    Memory(i32, Register), // e.g. 4(sp)

    /// Produced only by pseudo-expansion of `call`/`jmp label` style
    /// two-instruction sequences: the high 20 bits of `label - pc` of the
    /// paired `auipc`, computed during encoding once both the symbol table
    /// and the `auipc`'s own address are known.
    PcRelHi20(String),
    /// The matching low 12 bits, resolved against the `auipc` four bytes
    /// before the instruction that carries this operand.
    PcRelLo12(String),
}

// A mnemonic plus its parsed operand list, before pseudo expansion and
// before the mnemonic string has been resolved against the ISA table.
// This directly maps to the mnemonics in the RV32I ISA.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInstruction {
    pub mnemonic: String,
    pub operands: Vec<Operand>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Text,
    Globl(String),
    Data,
}

// --- Assembly Line Structure ---

// Represents a single line of code, which can have a label, a directive,
// an instruction, any combination of the three, or none.
#[derive(Debug, Clone, Default)]
pub struct AssemblyLine {
    pub line_number: usize,
    pub source: String,
    pub label: Option<String>,
    pub directive: Option<Directive>,
    pub raw_instruction: Option<RawInstruction>,

    /// Set for a line that failed to lex (its diagnostic is already in the
    /// sink). Carries no instruction to expand or encode, but still
    /// occupies exactly one word of zeroes so later labels don't drift.
    pub faulted: bool,
}
