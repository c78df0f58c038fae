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

//! Static ISA data: registers, mnemonics, and the fixed fields (opcode,
//! funct3, funct7) that pin a mnemonic to its encoding.

use std::fmt;

/// One of the 32 integer registers, `x0..x31`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Register(pub u8);

impl Register {
    pub const X0: Register = Register(0);

    pub fn index(self) -> u8 {
        self.0
    }

    /// Parses a numeric `xN` name or an ABI alias (`zero`, `ra`, `sp`, ...).
    pub fn from_str(name: &str) -> Option<Register> {
        if let Some(digits) = name.strip_prefix('x') {
            let n: u8 = digits.parse().ok()?;
            return (n <= 31).then_some(Register(n));
        }

        let index = match name {
            "zero" => 0,
            "ra" => 1,
            "sp" => 2,
            "gp" => 3,
            "tp" => 4,
            "t0" => 5,
            "t1" => 6,
            "t2" => 7,
            "s0" | "fp" => 8,
            "s1" => 9,
            "a0" => 10,
            "a1" => 11,
            "a2" => 12,
            "a3" => 13,
            "a4" => 14,
            "a5" => 15,
            "a6" => 16,
            "a7" => 17,
            "s2" => 18,
            "s3" => 19,
            "s4" => 20,
            "s5" => 21,
            "s6" => 22,
            "s7" => 23,
            "s8" => 24,
            "s9" => 25,
            "s10" => 26,
            "s11" => 27,
            "t3" => 28,
            "t4" => 29,
            "t5" => 30,
            "t6" => 31,
            _ => return None,
        };
        Some(Register(index))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// The six RV32I encoding formats, plus the SYSTEM class (`ecall`,
/// `ebreak`, `fence`), which shares no immediate field layout with the
/// others.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    R,
    I,
    S,
    B,
    U,
    J,
    Sys,
}

/// A single closed enum of every base RV32I mnemonic this assembler
/// recognizes. Parsing a mnemonic string happens exactly once, in
/// `Mnemonic::from_str`; everything downstream matches over this enum
/// instead of re-inspecting strings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Mnemonic {
    // R-type
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    // I-type arithmetic
    Addi,
    Slti,
    Sltiu,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    // I-type loads
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    // I-type jalr
    Jalr,
    // S-type
    Sb,
    Sh,
    Sw,
    // B-type
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    // U-type
    Lui,
    Auipc,
    // J-type
    Jal,
    // SYSTEM
    Ecall,
    Ebreak,
    Fence,
}

impl Mnemonic {
    pub fn from_str(text: &str) -> Option<Mnemonic> {
        use Mnemonic::*;
        Some(match text {
            "add" => Add,
            "sub" => Sub,
            "sll" => Sll,
            "slt" => Slt,
            "sltu" => Sltu,
            "xor" => Xor,
            "srl" => Srl,
            "sra" => Sra,
            "or" => Or,
            "and" => And,
            "addi" => Addi,
            "slti" => Slti,
            "sltiu" => Sltiu,
            "xori" => Xori,
            "ori" => Ori,
            "andi" => Andi,
            "slli" => Slli,
            "srli" => Srli,
            "srai" => Srai,
            "lb" => Lb,
            "lh" => Lh,
            "lw" => Lw,
            "lbu" => Lbu,
            "lhu" => Lhu,
            "jalr" => Jalr,
            "sb" => Sb,
            "sh" => Sh,
            "sw" => Sw,
            "beq" => Beq,
            "bne" => Bne,
            "blt" => Blt,
            "bge" => Bge,
            "bltu" => Bltu,
            "bgeu" => Bgeu,
            "lui" => Lui,
            "auipc" => Auipc,
            "jal" => Jal,
            "ecall" => Ecall,
            "ebreak" => Ebreak,
            "fence" => Fence,
            _ => return None,
        })
    }

    pub fn format(self) -> Format {
        use Mnemonic::*;
        match self {
            Add | Sub | Sll | Slt | Sltu | Xor | Srl | Sra | Or | And => Format::R,
            Addi | Slti | Sltiu | Xori | Ori | Andi | Slli | Srli | Srai | Lb | Lh | Lw | Lbu
            | Lhu | Jalr => Format::I,
            Sb | Sh | Sw => Format::S,
            Beq | Bne | Blt | Bge | Bltu | Bgeu => Format::B,
            Lui | Auipc => Format::U,
            Jal => Format::J,
            Ecall | Ebreak | Fence => Format::Sys,
        }
    }

    pub fn opcode(self) -> u32 {
        use Mnemonic::*;
        match self {
            Add | Sub | Sll | Slt | Sltu | Xor | Srl | Sra | Or | And => 0b0110011,
            Addi | Slti | Sltiu | Xori | Ori | Andi | Slli | Srli | Srai => 0b0010011,
            Lb | Lh | Lw | Lbu | Lhu => 0b0000011,
            Jalr => 0b1100111,
            Sb | Sh | Sw => 0b0100011,
            Beq | Bne | Blt | Bge | Bltu | Bgeu => 0b1100011,
            Lui => 0b0110111,
            Auipc => 0b0010111,
            Jal => 0b1101111,
            Ecall | Ebreak | Fence => 0b1110011,
        }
    }

    /// `None` for mnemonics whose funct3 field is unused (`lui`, `auipc`,
    /// `jal`) or fixed by the SYSTEM encoder directly.
    pub fn funct3(self) -> Option<u32> {
        use Mnemonic::*;
        Some(match self {
            Add | Sub => 0b000,
            Sll => 0b001,
            Slt => 0b010,
            Sltu => 0b011,
            Xor => 0b100,
            Srl | Sra => 0b101,
            Or => 0b110,
            And => 0b111,
            Addi => 0b000,
            Slli => 0b001,
            Slti => 0b010,
            Sltiu => 0b011,
            Xori => 0b100,
            Srli | Srai => 0b101,
            Ori => 0b110,
            Andi => 0b111,
            Jalr => 0b000,
            Lb => 0b000,
            Lh => 0b001,
            Lw => 0b010,
            Lbu => 0b100,
            Lhu => 0b101,
            Sb => 0b000,
            Sh => 0b001,
            Sw => 0b010,
            Beq => 0b000,
            Bne => 0b001,
            Blt => 0b100,
            Bge => 0b101,
            Bltu => 0b110,
            Bgeu => 0b111,
            Lui | Auipc | Jal | Ecall | Ebreak | Fence => return None,
        })
    }

    /// funct7 for R-type instructions, and for the shift-immediate I-type
    /// forms where it occupies bits 31:25 above `shamt`.
    pub fn funct7(self) -> u32 {
        use Mnemonic::*;
        match self {
            Sub | Sra | Srai => 0b0100000,
            _ => 0b0000000,
        }
    }
}
