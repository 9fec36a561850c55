//! Cross validator for the tip family (nonogram).
//!
//! Every grid line is run-length encoded and compared element by element
//! against its declared tip sequence. The encoder is shared with the
//! generator, which produces tips the same way.

use crate::grid::{Grid, Value};
use crate::report::Violation;
use crate::rules::TipChart;

/// Run-length encode a line: the ordered lengths of its maximal runs of
/// filled cells. Unfilled and absent cells both break a run; zero-length
/// runs are discarded.
pub fn encode_runs(line: impl Iterator<Item = Option<Value>>) -> Vec<Value> {
    let mut runs = Vec::new();
    let mut current = 0;
    for cell in line {
        if cell == Some(1) {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}

pub fn check(chart: &TipChart, grid: &Grid) -> Vec<Violation> {
    let mut violations = Vec::new();

    if chart.rows.len() != grid.height() || chart.columns.len() != grid.width() {
        violations.push(Violation::cross_check(format!(
            "tips describe a {}x{} grid but the result grid is {}x{}",
            chart.rows.len(),
            chart.columns.len(),
            grid.height(),
            grid.width()
        )));
        return violations;
    }

    for (row, declared) in chart.rows.iter().enumerate() {
        let found = encode_runs(grid.row(row));
        compare_runs(declared, &found, true, row, &mut violations);
    }
    for (col, declared) in chart.columns.iter().enumerate() {
        let found = encode_runs(grid.column(col));
        compare_runs(declared, &found, false, col, &mut violations);
    }

    violations
}

/// Element-wise comparison of declared and observed run lengths.
fn compare_runs(
    declared: &[Value],
    found: &[Value],
    is_row: bool,
    line: usize,
    violations: &mut Vec<Violation>,
) {
    let name = if is_row { "the row" } else { "the column" };
    let locate = |violation: Violation| {
        if is_row {
            violation.at_row(line)
        } else {
            violation.at_column(line)
        }
    };

    for (index, (expected, actual)) in declared.iter().zip(found).enumerate() {
        if expected != actual {
            violations.push(locate(Violation::cross_check(format!(
                "run #{} differs in {} (declared={}, found={})",
                index + 1,
                name,
                expected,
                actual
            ))));
        }
    }
    if found.len() > declared.len() {
        violations.push(locate(Violation::cross_check(format!(
            "extra runs in {} (declared={:?}, found={:?})",
            name, declared, found
        ))));
    } else if declared.len() > found.len() {
        violations.push(locate(Violation::cross_check(format!(
            "missing runs in {} (declared={:?}, found={:?})",
            name, declared, found
        ))));
    }
}
