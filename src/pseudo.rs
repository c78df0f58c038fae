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

//! Pure pseudo-instruction expansion, shared verbatim between pass one
//! (which only needs the *count* of real instructions an expansion
//! produces) and pass two (which needs the expanded instructions
//! themselves). `li`'s length depends on its immediate's magnitude, so
//! both passes funnel through `expand`, and `expansion_length` is just
//! `expand(..).len()` — there is exactly one place that decides how many
//! words a pseudo becomes, so the address a label gets in pass one can
//! never drift from the instructions pass two actually emits.

use crate::ast::Operand;
use crate::diagnostics::AssemblyError;
use crate::isa::{Mnemonic, Register};

/// One real instruction produced by expansion.
pub type ExpandedInstruction = (Mnemonic, Vec<Operand>);

const X0: Operand = Operand::Register(Register::X0);

fn reg(op: &Operand) -> Result<Register, AssemblyError> {
    match op {
        Operand::Register(r) => Ok(*r),
        other => Err(AssemblyError::BadOperand(format!("{other:?}"))),
    }
}

fn require(operands: &[Operand], count: usize, line: usize) -> Result<(), AssemblyError> {
    if operands.len() != count {
        return Err(AssemblyError::OperandArity {
            expected: format!("{count} operand(s)"),
            found: operands.len(),
        });
    }
    let _ = line;
    Ok(())
}

/// Splits a signed 32-bit immediate into the `(hi20, lo12)` pair used by
/// `lui`/`addi` (or `auipc`/`jalr`) sequences, such that
/// `(hi20 << 12) + sign_extend(lo12) == imm`.
pub fn split_hi_lo(imm: i32) -> (i32, i32) {
    let hi20 = (imm.wrapping_add(0x800)) >> 12;
    let lo12 = imm - (hi20 << 12);
    (hi20, lo12)
}

/// Expands a mnemonic (base RV32I or pseudo) into the sequence of real
/// instructions it becomes. Base mnemonics always expand to themselves,
/// length 1; pseudo length is 1 or 2 and for `li` depends on the
/// immediate's magnitude.
pub fn expand(
    mnemonic: &str,
    operands: &[Operand],
    line: usize,
) -> Result<Vec<ExpandedInstruction>, AssemblyError> {
    if let Some(base) = Mnemonic::from_str(mnemonic) {
        return Ok(vec![(base, operands.to_vec())]);
    }

    use Mnemonic::*;
    match mnemonic {
        "nop" => {
            require(operands, 0, line)?;
            Ok(vec![(Addi, vec![X0, X0, Operand::Immediate(0)])])
        }
        "mv" => {
            require(operands, 2, line)?;
            let rd = operands[0].clone();
            let rs = operands[1].clone();
            Ok(vec![(Addi, vec![rd, rs, Operand::Immediate(0)])])
        }
        "not" => {
            require(operands, 2, line)?;
            let rd = operands[0].clone();
            let rs = operands[1].clone();
            Ok(vec![(Xori, vec![rd, rs, Operand::Immediate(-1)])])
        }
        "neg" => {
            require(operands, 2, line)?;
            let rd = operands[0].clone();
            let rs = operands[1].clone();
            Ok(vec![(Sub, vec![rd, X0, rs])])
        }
        "seqz" => {
            require(operands, 2, line)?;
            let rd = operands[0].clone();
            let rs = operands[1].clone();
            Ok(vec![(Sltiu, vec![rd, rs, Operand::Immediate(1)])])
        }
        "snez" => {
            require(operands, 2, line)?;
            let rd = operands[0].clone();
            let rs = operands[1].clone();
            Ok(vec![(Sltu, vec![rd, X0, rs])])
        }
        "sltz" => {
            require(operands, 2, line)?;
            let rd = operands[0].clone();
            let rs = operands[1].clone();
            Ok(vec![(Slt, vec![rd, rs, X0])])
        }
        "sgtz" => {
            require(operands, 2, line)?;
            let rd = operands[0].clone();
            let rs = operands[1].clone();
            Ok(vec![(Slt, vec![rd, X0, rs])])
        }
        "j" => {
            require(operands, 1, line)?;
            Ok(vec![(Jal, vec![X0, operands[0].clone()])])
        }
        "jr" => {
            require(operands, 1, line)?;
            let rs = reg(&operands[0])?;
            Ok(vec![(
                Jalr,
                vec![X0, Operand::Register(rs), Operand::Immediate(0)],
            )])
        }
        "ret" => {
            require(operands, 0, line)?;
            let ra = Register::from_str("ra").unwrap();
            Ok(vec![(
                Jalr,
                vec![X0, Operand::Register(ra), Operand::Immediate(0)],
            )])
        }
        "call" => {
            require(operands, 1, line)?;
            let label = match &operands[0] {
                Operand::Label(name) => name.clone(),
                other => return Err(AssemblyError::BadOperand(format!("{other:?}"))),
            };
            let ra = Register::from_str("ra").unwrap();
            Ok(vec![
                (Auipc, vec![Operand::Register(ra), Operand::PcRelHi20(label.clone())]),
                (
                    Jalr,
                    vec![
                        Operand::Register(ra),
                        Operand::Register(ra),
                        Operand::PcRelLo12(label),
                    ],
                ),
            ])
        }
        "beqz" | "bnez" | "bltz" | "bgez" => {
            require(operands, 2, line)?;
            let rs = operands[0].clone();
            let label = operands[1].clone();
            let base = match mnemonic {
                "beqz" => Beq,
                "bnez" => Bne,
                "bltz" => Blt,
                "bgez" => Bge,
                _ => unreachable!(),
            };
            Ok(vec![(base, vec![rs, X0, label])])
        }
        "blez" => {
            require(operands, 2, line)?;
            let rs = operands[0].clone();
            let label = operands[1].clone();
            Ok(vec![(Bge, vec![X0, rs, label])])
        }
        "bgtz" => {
            require(operands, 2, line)?;
            let rs = operands[0].clone();
            let label = operands[1].clone();
            Ok(vec![(Blt, vec![X0, rs, label])])
        }
        "li" => {
            require(operands, 2, line)?;
            let rd = operands[0].clone();
            let imm = match &operands[1] {
                Operand::Immediate(v) => *v,
                other => {
                    return Err(AssemblyError::MalformedLiImmediate(format!("{other:?}")));
                }
            };

            if (-2048..=2047).contains(&imm) {
                Ok(vec![(Addi, vec![rd, X0, Operand::Immediate(imm)])])
            } else {
                let (hi20, lo12) = split_hi_lo(imm);
                Ok(vec![
                    (Lui, vec![rd.clone(), Operand::Immediate(hi20 & 0xFFFFF)]),
                    (Addi, vec![rd.clone(), rd, Operand::Immediate(lo12)]),
                ])
            }
        }
        _ => Err(AssemblyError::UnknownPseudo(mnemonic.to_string())),
    }
}

/// The number of real instructions `mnemonic`/`operands` expands to,
/// without constructing the expansion. Used by pass one to advance `PC`;
/// delegates to `expand` so the decision logic is never duplicated.
pub fn expansion_length(
    mnemonic: &str,
    operands: &[Operand],
    line: usize,
) -> Result<usize, AssemblyError> {
    Ok(expand(mnemonic, operands, line)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(name: &str) -> Operand {
        Operand::Register(Register::from_str(name).unwrap())
    }

    #[test]
    fn nop_expands_to_addi_zero() {
        let out = expand("nop", &[], 1).unwrap();
        assert_eq!(out, vec![(Mnemonic::Addi, vec![X0, X0, Operand::Immediate(0)])]);
    }

    #[test]
    fn li_small_is_one_instruction() {
        let out = expand("li", &[r("t0"), Operand::Immediate(1234)], 1).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, Mnemonic::Addi);
    }

    #[test]
    fn li_large_is_two_instructions_that_recombine() {
        let imm = 0x12345;
        let out = expand("li", &[r("t0"), Operand::Immediate(imm)], 1).unwrap();
        assert_eq!(out.len(), 2);
        let (hi20, lo12) = split_hi_lo(imm);
        assert_eq!(out[0].1[1], Operand::Immediate(hi20 & 0xFFFFF));
        assert_eq!(out[1].1[2], Operand::Immediate(lo12));
        assert_eq!((hi20 << 12) + lo12, imm);
    }

    #[test]
    fn expansion_length_matches_expand_len() {
        let ops = [r("t0"), Operand::Immediate(-2048)];
        assert_eq!(expansion_length("li", &ops, 1).unwrap(), 1);
        let ops = [r("t0"), Operand::Immediate(2048)];
        assert_eq!(expansion_length("li", &ops, 1).unwrap(), 2);
    }

    #[test]
    fn call_expands_to_auipc_jalr_pair() {
        let out = expand("call", &[Operand::Label("f".to_string())], 1).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].0, Mnemonic::Auipc);
        assert_eq!(out[1].0, Mnemonic::Jalr);
    }

    #[test]
    fn unknown_pseudo_is_an_error() {
        let err = expand("frobnicate", &[], 1).unwrap_err();
        assert!(matches!(err, AssemblyError::UnknownPseudo(_)));
    }

    #[test]
    fn missing_li_operand_is_arity_error() {
        let err = expand("li", &[r("a0")], 1).unwrap_err();
        assert!(matches!(err, AssemblyError::OperandArity { .. }));
    }
}
