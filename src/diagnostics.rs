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

//! The diagnostic sink. `AssemblyError` is never thrown out of the
//! assembler as a short-circuiting `Result` cause: every error is
//! wrapped into a `Diagnostic` and pushed onto a `DiagnosticSink`, so a
//! single run surfaces as many problems in the source as it can find
//! instead of stopping at the first one.

use serde::Serialize;
use thiserror::Error;

/// The five error-taxonomy buckets the core distinguishes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("malformed token: {0}")]
    Lexical(String),

    #[error("duplicate label definition: {0}")]
    DuplicateLabel(String),

    #[error("undefined label: {0}")]
    UndefinedLabel(String),

    #[error("unknown mnemonic: {0}")]
    UnknownMnemonic(String),

    #[error("unknown register: {0}")]
    UnknownRegister(String),

    #[error("expected {expected}, found {found}")]
    OperandArity { expected: String, found: usize },

    #[error("bad operand: {0}")]
    BadOperand(String),

    #[error("immediate {value} out of range {lo}..={hi}")]
    ImmediateOutOfRange { value: i64, lo: i64, hi: i64 },

    #[error("branch/jump target out of range: offset {0}")]
    TargetOutOfRange(i64),

    #[error("branch/jump target misaligned: offset {0} is odd")]
    TargetMisaligned(i64),

    #[error("unknown pseudo-instruction: {0}")]
    UnknownPseudo(String),

    #[error("malformed `li` immediate: {0}")]
    MalformedLiImmediate(String),
}

/// One accumulated diagnostic: the cause, plus the line it came from and
/// the original source text, so a renderer can point at the offending
/// line without re-reading the input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub source: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: AssemblyError,
}

fn serialize_error<S: serde::Serializer>(
    error: &AssemblyError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&error.to_string())
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.error, self.source.trim())
    }
}

/// Accumulates diagnostics across both passes. Never aborts assembly; the
/// renderer (plain text, JSON, ...) is the driver's concern, not the
/// sink's.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    records: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, line: usize, source: impl Into<String>, error: AssemblyError) {
        self.records.push(Diagnostic {
            line,
            source: source.into(),
            error,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.records
    }

    pub fn summary(&self) -> String {
        match self.records.len() {
            0 => "assembly succeeded with no diagnostics".to_string(),
            1 => "assembly produced 1 diagnostic".to_string(),
            n => format!("assembly produced {n} diagnostics"),
        }
    }
}
