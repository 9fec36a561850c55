//! Cross validators for the area families (range fill and arithmetic).

use std::collections::HashSet;

use crate::family::Family;
use crate::grid::{Grid, Value};
use crate::report::Violation;
use crate::rules::{Block, bounding_box};
use crate::validate::{group_positions, positions_to_string};

/// Range fill: every block must hold exactly the integers `1..block size`.
pub fn check_range_fill(blocks: &[Block], grid: &Grid) -> Vec<Violation> {
    let mut violations = Vec::new();
    if extents_disagree(blocks, grid, &mut violations) {
        return violations;
    }

    for block in blocks {
        let size = block.cells.len();
        // summary over the member values: distinct count, min, max must be
        // (size, 1, size), which pins the set to exactly 1..size
        let mut seen = HashSet::new();
        let mut min = Value::MAX;
        let mut max = Value::MIN;
        for &cell in &block.cells {
            if let Some(value) = grid.get(cell.row, cell.col) {
                seen.insert(value);
                min = min.min(value);
                max = max.max(value);
            }
        }

        if seen.len() != size || min != 1 || max != size as Value {
            violations.push(Violation::cross_check(format!(
                "wrong filling for block {} (check stats: count={}, min={}, max={})",
                block.source,
                seen.len(),
                if seen.is_empty() { 0 } else { min },
                if seen.is_empty() { 0 } else { max },
            )));
        }
    }
    violations
}

/// Arithmetic: every block's values reduce to its clue target, and every row
/// and column holds each value of the family's range exactly once.
pub fn check_arithmetic(family: &Family, blocks: &[Block], grid: &Grid) -> Vec<Violation> {
    let mut violations = Vec::new();
    if extents_disagree(blocks, grid, &mut violations) {
        return violations;
    }

    for block in blocks {
        // a block without a usable clue was already reported structurally
        let Some(target) = block.target else {
            continue;
        };

        let values: Vec<Value> = block
            .cells
            .iter()
            .filter_map(|cell| grid.get(cell.row, cell.col))
            .collect();
        if values.len() != block.cells.len() {
            violations.push(Violation::cross_check(format!(
                "block {} references unfilled cells",
                block.source
            )));
            continue;
        }

        let found = if values.len() == 1 {
            // single cell: plain equality with the target
            values[0]
        } else {
            values
                .iter()
                .fold(target.op.identity(), |acc, &value| target.op.apply(acc, value))
        };

        if found != target.value {
            violations.push(Violation::cross_check(format!(
                "invalid area computed: {} (found={} v. expected={})",
                block.source, found, target.value
            )));
        }
    }

    latin_lines(family, grid, &mut violations);
    violations
}

/// The grid the blocks describe and the result grid must have one extent.
fn extents_disagree(blocks: &[Block], grid: &Grid, violations: &mut Vec<Violation>) -> bool {
    let Some((rows, cols)) = bounding_box(blocks) else {
        return false;
    };
    if rows != grid.height() || cols != grid.width() {
        violations.push(Violation::cross_check(format!(
            "definition covers {}x{} cells but the result grid is {}x{}",
            rows,
            cols,
            grid.height(),
            grid.width()
        )));
        return true;
    }
    false
}

/// Each value of the family's range must appear exactly once per row and
/// once per column (same grouping as the balance family, generalized to a
/// fixed value range).
fn latin_lines(family: &Family, grid: &Grid, violations: &mut Vec<Violation>) {
    let range = family.grid.values;

    for row in 0..grid.height() {
        let groups = group_positions(grid, (0..grid.width()).map(|col| (row, col)));
        for value in range.min..=range.max {
            let positions = groups.get(&Some(value)).map(Vec::as_slice).unwrap_or(&[]);
            if positions.len() != 1 {
                violations.push(
                    Violation::cross_check(format!(
                        "missing or too many '{}' in the row (found = {}){}",
                        value,
                        positions.len(),
                        render_positions(positions)
                    ))
                    .at_row(row)
                    .for_value(value),
                );
            }
        }
    }

    for col in 0..grid.width() {
        let groups = group_positions(grid, (0..grid.height()).map(|row| (row, col)));
        for value in range.min..=range.max {
            let positions = groups.get(&Some(value)).map(Vec::as_slice).unwrap_or(&[]);
            if positions.len() != 1 {
                violations.push(
                    Violation::cross_check(format!(
                        "missing or too many '{}' in the column (found = {}){}",
                        value,
                        positions.len(),
                        render_positions(positions)
                    ))
                    .at_column(col)
                    .for_value(value),
                );
            }
        }
    }
}

fn render_positions(positions: &[(usize, usize)]) -> String {
    if positions.is_empty() {
        String::new()
    } else {
        format!(" -- {}", positions_to_string(positions))
    }
}
