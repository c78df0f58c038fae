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

use rv32i_as::assemble;

fn words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
        .collect()
}

#[test]
fn addi_matches_hand_encoded_word() {
    let out = assemble(&["addi x1, x0, 10"]);
    assert!(!out.has_errors());
    assert_eq!(words(&out.text), vec![0x00A00093]);
}

#[test]
fn add_matches_hand_encoded_word() {
    let out = assemble(&["add x3, x1, x2"]);
    assert!(!out.has_errors());
    assert_eq!(words(&out.text), vec![0x002081B3]);
}

#[test]
fn lui_matches_hand_encoded_word() {
    let out = assemble(&["lui x1, 0x12345"]);
    assert!(!out.has_errors());
    assert_eq!(words(&out.text), vec![0x123450B7]);
}

#[test]
fn auipc_matches_hand_encoded_word() {
    let out = assemble(&["auipc x2, 0x1"]);
    assert!(!out.has_errors());
    assert_eq!(words(&out.text), vec![0x00001117]);
}

#[test]
fn backward_branch_resolves_against_pass_one_addresses() {
    let source = ["main:", "addi x1, x0, 0", "beq x1, x0, main"];
    let out = assemble(&source);
    assert!(!out.has_errors());
    let text = words(&out.text);
    assert_eq!(text[1], 0xFE008EE3);
}

#[test]
fn forward_jump_resolves_once_the_label_is_seen() {
    let source = ["j fin", "fin:"];
    let out = assemble(&source);
    assert!(!out.has_errors());
    assert_eq!(words(&out.text)[0], 0x0040006F);
}

#[test]
fn li_expands_to_two_instructions_for_a_large_immediate() {
    let out = assemble(&["li a0, 0x123456"]);
    assert!(!out.has_errors());
    assert_eq!(out.text.len(), 8);
}

#[test]
fn li_expands_to_one_instruction_for_a_small_immediate() {
    let out = assemble(&["li a0, 5"]);
    assert!(!out.has_errors());
    assert_eq!(out.text.len(), 4);
}

#[test]
fn call_expands_to_an_adjacent_auipc_jalr_pair_that_recombines() {
    let source = ["call helper", "helper:"];
    let out = assemble(&source);
    assert!(!out.has_errors());
    let text = words(&out.text);
    assert_eq!(text.len(), 2);
    // auipc hi20 plus the sign-extended jalr lo12 must reconstruct the
    // byte offset from the auipc to the label, eight bytes ahead since
    // `call` itself occupies the first two words.
    let hi20 = (text[0] >> 12) as i32;
    let lo12 = ((text[1] as i32) >> 20) as i32;
    assert_eq!((hi20 << 12) + lo12, 8);
}

#[test]
fn ecall_and_ebreak_are_bare_system_words() {
    let out = assemble(&["ecall", "ebreak"]);
    assert!(!out.has_errors());
    assert_eq!(words(&out.text), vec![0x00000073, 0x00100073]);
}

#[test]
fn immediate_overflow_is_reported_without_aborting_assembly() {
    let out = assemble(&["addi x1, x0, 4096", "addi x2, x0, 1"]);
    assert!(out.has_errors());
    assert_eq!(out.diagnostics.count(), 1);
    // the second, valid instruction still gets encoded
    assert_eq!(out.text.len(), 8);
    assert_eq!(words(&out.text)[1], 0x00100113);
}

#[test]
fn undefined_label_is_a_diagnostic_not_a_crash() {
    let out = assemble(&["jal x0, nowhere"]);
    assert!(out.has_errors());
    assert_eq!(out.text.len(), 4);
}

#[test]
fn duplicate_labels_are_reported_once_each() {
    let source = ["start:", "nop", "start:", "nop"];
    let out = assemble(&source);
    assert!(out.has_errors());
    assert_eq!(out.diagnostics.count(), 1);
}

#[test]
fn unaligned_load_offset_is_accepted() {
    // RV32I loads/stores have no alignment requirement at the ISA level.
    let out = assemble(&["lw x1, 3(x2)"]);
    assert!(!out.has_errors());
}

#[test]
fn symbol_table_reports_final_addresses() {
    let source = ["one:", "nop", "two:", "nop"];
    let out = assemble(&source);
    assert!(!out.has_errors());
    assert_eq!(out.symbols["one"], 0);
    assert_eq!(out.symbols["two"], 4);
}

#[test]
fn blank_lines_and_comments_contribute_no_bytes() {
    let source = ["", "  # just a comment", "nop"];
    let out = assemble(&source);
    assert!(!out.has_errors());
    assert_eq!(out.text.len(), 4);
}

#[test]
fn cli_end_to_end_assembles_a_file_to_a_binary() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("loop.s");
    let output_path = dir.path().join("loop.bin");
    std::fs::write(&input_path, "main:\naddi x1, x0, 0\nbeq x1, x0, main\n").unwrap();

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_rv32i-as"))
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("failed to run rv32i-as");

    assert!(status.success());
    let bytes = std::fs::read(&output_path).unwrap();
    assert_eq!(words(&bytes), vec![0x00000093, 0xFE008EE3]);
}
