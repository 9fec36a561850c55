//! Cross validator for the balance family (takuzu).
//!
//! Every fully-determined line must hold each of the two values exactly half
//! the line's length; a line still containing unfilled cells is not judged.
//! The definition's givens must be preserved by the result grid.

use crate::grid::Grid;
use crate::report::Violation;
use crate::validate::{check_givens, group_positions, positions_to_string};

pub fn check(givens: &Grid, grid: &Grid) -> Vec<Violation> {
    let mut violations = Vec::new();
    let height = grid.height();
    let width = grid.width();

    for row in 0..height {
        check_line(
            grid,
            (0..width).map(|col| (row, col)),
            "the row",
            width / 2,
            &mut violations,
        );
    }
    for col in 0..width {
        check_line(
            grid,
            (0..height).map(|row| (row, col)),
            "the column",
            height / 2,
            &mut violations,
        );
    }

    check_givens(givens, grid, &mut violations);
    violations
}

fn check_line(
    grid: &Grid,
    cells: impl Iterator<Item = (usize, usize)>,
    label: &str,
    expected: usize,
    violations: &mut Vec<Violation>,
) {
    let groups = group_positions(grid, cells);
    // an unfilled cell means the line cannot be judged yet
    if groups.contains_key(&None) {
        return;
    }

    let mut unbalanced: Vec<_> = groups
        .into_iter()
        .filter_map(|(value, positions)| value.map(|value| (value, positions)))
        .filter(|(_, positions)| positions.len() != expected)
        .collect();
    unbalanced.sort_by_key(|&(value, _)| value);

    for (value, positions) in unbalanced {
        let (row, col) = positions[0];
        violations.push(
            Violation::cross_check(format!(
                "not the right amount of '{}' in {} (found = {}, expected = {}) -- {}",
                value,
                label,
                positions.len(),
                expected,
                positions_to_string(&positions)
            ))
            .at_cell(row, col)
            .for_value(value),
        );
    }
}
