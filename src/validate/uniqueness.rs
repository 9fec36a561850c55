//! Cross validator for the uniqueness family (sudoku).
//!
//! Rows, columns and boxes must each hold a value at most once; the grouping
//! collects every offending coordinate so one violation names them all. The
//! definition's givens are verified in the same pass.

use crate::family::Family;
use crate::grid::Grid;
use crate::report::Violation;
use crate::validate::{check_givens, group_positions, positions_to_string};

pub fn check(family: &Family, givens: &Grid, grid: &Grid) -> Vec<Violation> {
    let mut violations = Vec::new();
    let height = grid.height();
    let width = grid.width();

    for row in 0..height {
        check_region(
            grid,
            (0..width).map(|col| (row, col)),
            "the row",
            &mut violations,
        );
    }
    for col in 0..width {
        check_region(
            grid,
            (0..height).map(|row| (row, col)),
            "the column",
            &mut violations,
        );
    }

    if let (Some(box_rows), Some(box_cols)) = (family.grid.box_rows, family.grid.box_columns) {
        if box_rows > 0 && box_cols > 0 && height % box_rows == 0 && width % box_cols == 0 {
            let boxes_down = height / box_rows;
            let boxes_across = width / box_cols;
            for index in 0..boxes_down * boxes_across {
                let base_row = box_rows * (index / boxes_across);
                let base_col = box_cols * (index % boxes_across);
                let cells = (0..box_rows).flat_map(move |dr| {
                    (0..box_cols).map(move |dc| (base_row + dr, base_col + dc))
                });
                check_region(grid, cells, "the square", &mut violations);
            }
        }
    }

    check_givens(givens, grid, &mut violations);
    violations
}

/// Report every value occurring more than once in the region.
fn check_region(
    grid: &Grid,
    cells: impl Iterator<Item = (usize, usize)>,
    label: &str,
    violations: &mut Vec<Violation>,
) {
    let groups = group_positions(grid, cells);
    let mut duplicated: Vec<_> = groups
        .into_iter()
        .filter_map(|(value, positions)| value.map(|value| (value, positions)))
        .filter(|(_, positions)| positions.len() > 1)
        .collect();
    duplicated.sort_by_key(|&(value, _)| value);

    for (value, positions) in duplicated {
        let (row, col) = positions[0];
        violations.push(
            Violation::cross_check(format!(
                "too many of the same value in {} (found = {}) -- {}",
                label,
                positions.len(),
                positions_to_string(&positions)
            ))
            .at_cell(row, col)
            .for_value(value),
        );
    }
}
