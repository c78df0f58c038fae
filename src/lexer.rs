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

//! Line-oriented tokenizer. RV32I's line grammar has no recursive
//! structure worth a PEG for, so this module is a small hand-rolled
//! scanner that keeps lexing separate from AST construction:
//! `tokenize_line` turns one normalized line into an `AssemblyLine`, and
//! `parse_operand` is the single place an operand string becomes an
//! `Operand`.

use crate::ast::{AssemblyLine, Directive, Operand, RawInstruction};
use crate::diagnostics::AssemblyError;
use crate::isa::Register;

/// Strips a `#`-to-end-of-line comment and surrounding whitespace.
pub fn strip_comment(line: &str) -> &str {
    let code = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    code.trim()
}

/// Tokenizes one normalized source line. Returns `Ok(None)` for blank
/// lines, which contribute no instruction bytes.
pub fn tokenize_line(
    line_number: usize,
    raw_line: &str,
) -> Result<Option<AssemblyLine>, AssemblyError> {
    let stripped = strip_comment(raw_line);
    if stripped.is_empty() {
        return Ok(None);
    }

    let mut line = AssemblyLine {
        line_number,
        source: raw_line.to_string(),
        ..Default::default()
    };

    let mut rest = stripped;

    if let Some((label, remainder)) = split_label(rest)? {
        line.label = Some(label);
        rest = remainder.trim();
    }

    if rest.is_empty() {
        return Ok(Some(line));
    }

    if let Some(directive) = parse_directive(rest)? {
        line.directive = Some(directive);
        return Ok(Some(line));
    }

    line.raw_instruction = Some(parse_instruction(rest)?);
    Ok(Some(line))
}

/// If `text` begins with `identifier:`, returns the identifier and the
/// remainder of the line. A label may stand alone on its line.
fn split_label(text: &str) -> Result<Option<(String, &str)>, AssemblyError> {
    let Some(colon_idx) = text.find(':') else {
        return Ok(None);
    };

    let candidate = &text[..colon_idx];
    if !is_identifier(candidate) {
        return Ok(None);
    }

    Ok(Some((candidate.to_string(), &text[colon_idx + 1..])))
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn parse_directive(text: &str) -> Result<Option<Directive>, AssemblyError> {
    let mut parts = text.splitn(2, char::is_whitespace);
    let keyword = parts.next().unwrap_or("");
    let argument = parts.next().unwrap_or("").trim();

    Ok(Some(match keyword {
        ".text" => Directive::Text,
        ".data" => Directive::Data,
        ".globl" | ".global" => {
            if argument.is_empty() {
                return Err(AssemblyError::Lexical(format!(
                    "{keyword} requires a symbol name"
                )));
            }
            Directive::Globl(argument.to_string())
        }
        _ => return Ok(None),
    }))
}

fn parse_instruction(text: &str) -> Result<RawInstruction, AssemblyError> {
    let mut parts = text.splitn(2, char::is_whitespace);
    let mnemonic = parts.next().unwrap_or("").to_string();
    let operand_text = parts.next().unwrap_or("").trim();

    let operands = if operand_text.is_empty() {
        Vec::new()
    } else {
        split_operands(operand_text)
            .into_iter()
            .map(parse_operand)
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(RawInstruction { mnemonic, operands })
}

/// Splits a comma-separated operand list, respecting parentheses so a
/// memory operand's `(reg)` suffix is never split on an internal comma
/// (there is none in this grammar, but a future `imm(reg)` extension with
/// multiple parenthesized fields would rely on this).
fn split_operands(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;

    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                out.push(text[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    out.push(text[start..].trim());
    out
}

fn parse_operand(text: &str) -> Result<Operand, AssemblyError> {
    if let Some(open) = text.find('(') {
        return parse_memory_operand(text, open);
    }

    if looks_like_numeric_register(text) {
        return Register::from_str(text)
            .map(Operand::Register)
            .ok_or_else(|| AssemblyError::UnknownRegister(text.to_string()));
    }

    if let Some(reg) = Register::from_str(text) {
        return Ok(Operand::Register(reg));
    }

    if looks_like_immediate(text) {
        return Ok(Operand::Immediate(parse_immediate(text)?));
    }

    if is_identifier(text) {
        return Ok(Operand::Label(text.to_string()));
    }

    Err(AssemblyError::BadOperand(text.to_string()))
}

/// True for `x` followed by one or more digits — the numeric register
/// shape, whether or not the index is actually in `0..=31`. A label like
/// `xyz` does not match this (its suffix isn't all digits), so it still
/// falls through to the label branch below.
fn looks_like_numeric_register(text: &str) -> bool {
    text.strip_prefix('x')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

fn parse_memory_operand(text: &str, open: usize) -> Result<Operand, AssemblyError> {
    if !text.ends_with(')') {
        return Err(AssemblyError::Lexical(format!(
            "unclosed memory operand: {text}"
        )));
    }

    let imm_part = text[..open].trim();
    let reg_part = &text[open + 1..text.len() - 1];

    let reg = Register::from_str(reg_part.trim())
        .ok_or_else(|| AssemblyError::UnknownRegister(reg_part.trim().to_string()))?;

    if imm_part.is_empty() {
        return Ok(Operand::Memory(0, reg));
    }

    if looks_like_immediate(imm_part) {
        Ok(Operand::Memory(parse_immediate(imm_part)?, reg))
    } else {
        Err(AssemblyError::BadOperand(text.to_string()))
    }
}

fn looks_like_immediate(text: &str) -> bool {
    let text = text.strip_prefix('-').unwrap_or(text);
    text.starts_with(|c: char| c.is_ascii_digit())
}

/// Parses `0x…`, `0b…`, or decimal (optionally signed) immediates.
pub fn parse_immediate(text: &str) -> Result<i32, AssemblyError> {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, text),
    };

    let magnitude: i64 = if let Some(hex) = unsigned.strip_prefix("0x").or(unsigned.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
            .map_err(|_| AssemblyError::MalformedLiImmediate(text.to_string()))?
    } else if let Some(bin) = unsigned.strip_prefix("0b").or(unsigned.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2)
            .map_err(|_| AssemblyError::MalformedLiImmediate(text.to_string()))?
    } else {
        unsigned
            .parse::<i64>()
            .map_err(|_| AssemblyError::MalformedLiImmediate(text.to_string()))?
    };

    let value = sign * magnitude;
    i32::try_from(value).map_err(|_| AssemblyError::MalformedLiImmediate(text.to_string()))
}
