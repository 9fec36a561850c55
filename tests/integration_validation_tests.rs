//! End-to-end runs over on-disk puzzle directories, one per family.

use std::fs;
use std::path::Path;

use puzzle_checker::family::{Family, FamilyRegistry};
use puzzle_checker::report::ViolationKind;
use puzzle_checker::runner::run_directory;
use tempfile::TempDir;

fn family(name: &str) -> Family {
    FamilyRegistry::with_embedded()
        .get(name)
        .expect("embedded family")
        .clone()
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write fixture");
}

const SOLVED_SUDOKU: &str = "\
123456789
456789123
789123456
214365897
365897214
897214365
531642978
642978531
978531642
";

#[test]
fn sudoku_pair_validates_clean() {
    let dir = TempDir::new().expect("temp dir");
    let givens = SOLVED_SUDOKU.replace('5', "_");
    write(dir.path(), "puzzle1.txt", &givens);
    write(dir.path(), "puzzle1_res.txt", SOLVED_SUDOKU);

    let report = run_directory(&family("sudoku"), dir.path()).expect("run");
    assert!(!report.has_violations());
    assert_eq!(report.pairs.len(), 1);
}

#[test]
fn sudoku_duplicate_and_broken_given_are_both_reported() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "puzzle1.txt", SOLVED_SUDOKU);
    // row 1 trades its 5 for a second 1: uniqueness breaks and the given
    // at [1,5] is no longer honored
    let broken = SOLVED_SUDOKU.replacen("123456789", "123416789", 1);
    write(dir.path(), "puzzle1_res.txt", &broken);

    let report = run_directory(&family("sudoku"), dir.path()).expect("run");
    let pair = &report.pairs[0];
    assert!(
        pair.violations
            .iter()
            .any(|v| v.message.contains("too many of the same value in the row")
                && v.value == Some(1))
    );
    assert!(
        pair.violations
            .iter()
            .any(|v| v.message.contains("difference on provided input"))
    );
}

#[test]
fn sudoku_definition_without_result_is_one_gap_and_no_cross_checks() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "puzzle1.txt", SOLVED_SUDOKU);

    let report = run_directory(&family("sudoku"), dir.path()).expect("run");
    assert_eq!(report.missing_results, vec!["puzzle1.txt"]);
    assert!(report.pairs.is_empty());
    assert!(!report.has_violations());
}

#[test]
fn takuzu_unbalanced_line_is_reported_with_counts() {
    let dir = TempDir::new().expect("temp dir");
    let definition = "__________\n".repeat(10);
    write(dir.path(), "grid.txt", &definition);
    // every row is 6/4 unbalanced, every column stays balanced
    let result = "0001001011\n1110110100\n".repeat(5);
    write(dir.path(), "grid_res.txt", &result);

    let report = run_directory(&family("takuzu"), dir.path()).expect("run");
    let pair = &report.pairs[0];
    let row_zero: Vec<_> = pair
        .violations
        .iter()
        .filter(|v| v.row == Some(0) && v.message.contains("the row"))
        .collect();
    assert_eq!(row_zero.len(), 2);
    assert!(
        row_zero
            .iter()
            .any(|v| v.value == Some(0) && v.message.contains("found = 6, expected = 5"))
    );
    assert!(
        row_zero
            .iter()
            .any(|v| v.value == Some(1) && v.message.contains("found = 4, expected = 5"))
    );
}

#[test]
fn takuzu_partial_grid_is_not_judged() {
    let dir = TempDir::new().expect("temp dir");
    let definition = "__________\n".repeat(10);
    write(dir.path(), "grid.txt", &definition);
    // structurally fine, but nothing is filled: no line can be judged
    write(dir.path(), "grid_res.txt", &definition);

    let report = run_directory(&family("takuzu"), dir.path()).expect("run");
    assert!(!report.has_violations());
}

#[test]
fn nonogram_pair_validates_clean() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "small.json",
        r#"{
            "rows": [{"values": [2]}, {"values": [1]}],
            "columns": [{"values": [2]}, {"values": [1]}]
        }"#,
    );
    write(dir.path(), "small_res.txt", "11\n10\n");

    let report = run_directory(&family("nonogram"), dir.path()).expect("run");
    assert!(!report.has_violations());
    assert_eq!(report.pairs.len(), 1);
}

#[test]
fn nonogram_wrong_run_is_cited() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "small.json",
        r#"{
            "rows": [{"values": [2]}, {"values": [1]}],
            "columns": [{"values": [2]}, {"values": [1]}]
        }"#,
    );
    // row 0 encodes to [1], not the declared [2]
    write(dir.path(), "small_res.txt", "10\n10\n");

    let report = run_directory(&family("nonogram"), dir.path()).expect("run");
    let pair = &report.pairs[0];
    assert!(
        pair.violations
            .iter()
            .any(|v| v.row == Some(0) && v.message.contains("run #1 differs"))
    );
}

#[test]
fn nonogram_unreadable_definition_is_fatal_for_that_pair_only() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "broken.json", "not json at all");
    write(dir.path(), "broken_res.txt", "1\n");
    write(
        dir.path(),
        "fine.json",
        r#"{"rows": [{"values": [1]}], "columns": [{"values": [1]}]}"#,
    );
    write(dir.path(), "fine_res.txt", "1\n");

    let report = run_directory(&family("nonogram"), dir.path()).expect("run");
    let broken = report
        .definitions
        .iter()
        .find(|f| f.name == "broken.json")
        .expect("broken.json seen");
    assert_eq!(broken.violations[0].kind, ViolationKind::Fatal);

    // the healthy pair still validated
    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].definition, "fine.json");
    assert!(report.pairs[0].violations.is_empty());
}

#[test]
fn kemaru_block_coverage_and_filling() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "areas.txt", "A1,A2,B1\nB2,C1,C2\n");
    write(dir.path(), "areas_res.txt", "12\n31\n23\n");

    let report = run_directory(&family("kemaru"), dir.path()).expect("run");
    assert_eq!(report.pairs.len(), 1);
    assert!(report.definitions[0].is_clean());
    assert!(report.pairs[0].violations.is_empty());
}

#[test]
fn kemaru_misfilled_block_is_reported_with_its_cells() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "areas.txt", "A1,A2,B1\nB2,C1,C2\n");
    // the second block holds {1, 2, 2}
    write(dir.path(), "areas_res.txt", "12\n32\n21\n");

    let report = run_directory(&family("kemaru"), dir.path()).expect("run");
    let pair = &report.pairs[0];
    assert_eq!(pair.violations.len(), 1);
    assert!(
        pair.violations[0]
            .message
            .contains("wrong filling for block B2,C1,C2")
    );
}

#[test]
fn kemaru_duplicate_cell_in_definition_is_structural() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "areas.txt", "A1,A2,B1\nB2,C1,B1\n");
    write(dir.path(), "areas_res.txt", "12\n31\n23\n");

    let report = run_directory(&family("kemaru"), dir.path()).expect("run");
    let definition = &report.definitions[0];
    assert!(
        definition
            .violations
            .iter()
            .any(|v| v.message.contains("found the same cell several times (2): B1"))
    );
    assert!(
        definition
            .violations
            .iter()
            .any(|v| v.message.contains("didn't find the cell: C2"))
    );
}

const MATOKU_DEFINITION: &str = "\
A1,A2:+3
A3,A4,A5:x60
B1,C1:+5
B2,B3:-1
B4,B5:/5
C2,C3:x20
C4,C5:-1
D1,D2:+9
D3,E3:-1
D4,D5:-1
E1,E2:+6
E4,E5:+7
";

const MATOKU_RESULT: &str = "\
12345
23451
34512
45123
51234
";

#[test]
fn matoku_pair_validates_clean() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "areas.txt", MATOKU_DEFINITION);
    write(dir.path(), "areas_res.txt", MATOKU_RESULT);

    let report = run_directory(&family("matoku"), dir.path()).expect("run");
    assert!(!report.has_violations());
    assert_eq!(report.pairs.len(), 1);
}

#[test]
fn matoku_wrong_area_value_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let definition = MATOKU_DEFINITION.replacen("A1,A2:+3", "A1,A2:+4", 1);
    write(dir.path(), "areas.txt", &definition);
    write(dir.path(), "areas_res.txt", MATOKU_RESULT);

    let report = run_directory(&family("matoku"), dir.path()).expect("run");
    let pair = &report.pairs[0];
    assert_eq!(pair.violations.len(), 1);
    assert!(
        pair.violations[0]
            .message
            .contains("invalid area computed: A1,A2:+4 (found=3 v. expected=4)")
    );
}

#[test]
fn matoku_subtraction_and_division_accept_either_operand_order() {
    // same grid, but every '-' and '/' block lists its cells reversed, so
    // the reduction visits the operand values in the opposite order
    let reversed = MATOKU_DEFINITION
        .replace("B2,B3:-1", "B3,B2:-1")
        .replace("B4,B5:/5", "B5,B4:/5")
        .replace("C4,C5:-1", "C5,C4:-1")
        .replace("D3,E3:-1", "E3,D3:-1")
        .replace("D4,D5:-1", "D5,D4:-1");

    for definition in [MATOKU_DEFINITION.to_string(), reversed] {
        let dir = TempDir::new().expect("temp dir");
        write(dir.path(), "areas.txt", &definition);
        write(dir.path(), "areas_res.txt", MATOKU_RESULT);

        let report = run_directory(&family("matoku"), dir.path()).expect("run");
        assert!(!report.has_violations(), "operand order must not matter");
    }
}
