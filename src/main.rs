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

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rv32i_as::assemble;
use serde::Serialize;

#[derive(Parser)]
#[clap(version = "0.1.0", author = "Connor Nolan")]
struct Opts {
    /// Assembly source file to read.
    #[clap(short, long)]
    input: PathBuf,
    /// Where to write the encoded text segment.
    #[clap(short, long)]
    output: PathBuf,
    /// Output encoding for the text segment.
    #[clap(short, long, value_enum, default_value = "bin")]
    format: OutputFormat,
    /// Optional path to also write a JSON report of the symbol table and
    /// every diagnostic raised during assembly.
    #[clap(long)]
    emit_json: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Bin,
    Hex,
}

#[derive(Serialize)]
struct Report<'a> {
    symbols: Vec<rv32i_as::passes::symbols::SymbolEntry>,
    diagnostics: &'a [rv32i_as::diagnostics::Diagnostic],
}

fn main() -> Result<ExitCode> {
    let opts = Opts::parse();

    let source = fs::read_to_string(&opts.input)
        .with_context(|| format!("failed to read input file: {}", opts.input.display()))?;
    let lines: Vec<&str> = source.lines().collect();

    let result = assemble(&lines);

    let encoded = match opts.format {
        OutputFormat::Bin => result.text.clone(),
        OutputFormat::Hex => hex_lines(&result.text).into_bytes(),
    };
    fs::write(&opts.output, encoded)
        .with_context(|| format!("failed to write output file: {}", opts.output.display()))?;

    if let Some(json_path) = &opts.emit_json {
        let diagnostics: Vec<_> = result.diagnostics.iter().cloned().collect();
        let report = Report {
            symbols: rv32i_as::passes::symbols::snapshot(&result.symbols),
            diagnostics: &diagnostics,
        };
        let json = serde_json::to_string_pretty(&report)
            .context("failed to serialize assembly report")?;
        fs::write(json_path, json)
            .with_context(|| format!("failed to write JSON report: {}", json_path.display()))?;
    }

    for diagnostic in result.diagnostics.iter() {
        eprintln!("{diagnostic}");
    }
    eprintln!("{}", result.diagnostics.summary());

    if result.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        println!(
            "assembled {} to {}",
            opts.input.display(),
            opts.output.display()
        );
        Ok(ExitCode::SUCCESS)
    }
}

fn hex_lines(bytes: &[u8]) -> String {
    let mut out = String::new();
    for chunk in bytes.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        out.push_str(&format!("{:08x}\n", u32::from_le_bytes(word)));
    }
    out
}
