//! Textual grid parser.
//!
//! Decodes the fixed-width text grids shared by result files and by the
//! grid-shaped definitions (sudoku and takuzu givens). Every structural
//! problem accumulates; a bad character never aborts the rest of the file.

use crate::family::schema::GridFormat;
use crate::grid::{Grid, Value};
use crate::report::Violation;

/// Parse a text grid, one row per line.
///
/// Checks: declared extents when the family fixes them, uniform line length,
/// and character legality (a digit inside the family's value range, or the
/// family's empty marker). Returns the grid as far as it could be decoded,
/// plus all structural violations found.
pub fn parse_grid(text: &str, format: &GridFormat) -> (Grid, Vec<Violation>) {
    let mut violations = Vec::new();
    let lines: Vec<&str> = text.lines().collect();

    if let Some(rows) = format.rows {
        if lines.len() != rows {
            violations.push(Violation::structural(format!(
                "not the right rows count (found={})",
                lines.len()
            )));
        }
    }

    let width = match format.columns {
        Some(columns) => {
            for (row, line) in lines.iter().enumerate() {
                let length = line.chars().count();
                if length != columns {
                    violations.push(
                        Violation::structural(format!(
                            "not the right characters count on this row (found={})",
                            length
                        ))
                        .at_row(row),
                    );
                }
            }
            columns
        }
        None => {
            // no declared width: the rows themselves must agree
            let min = lines.iter().map(|line| line.chars().count()).min().unwrap_or(0);
            let max = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
            if min != max {
                violations.push(Violation::structural(format!(
                    "not all the rows have the same length: min={}, max={}",
                    min, max
                )));
            }
            min
        }
    };
    let height = format.rows.unwrap_or(lines.len());

    let mut grid = Grid::new(height, width);
    for (row, line) in lines.iter().enumerate().take(height) {
        for (col, c) in line.chars().enumerate().take(width) {
            if format.empty == Some(c) {
                continue;
            }
            match c.to_digit(10) {
                Some(digit) => {
                    let value = digit as Value;
                    if format.values.contains(value) {
                        grid.set(row, col, Some(value));
                    } else {
                        violations.push(
                            Violation::structural(format!(
                                "value outside the accepted range {}..{} (found={})",
                                format.values.min, format.values.max, value
                            ))
                            .at_cell(row, col)
                            .for_value(value),
                        );
                    }
                }
                None => {
                    violations.push(
                        Violation::structural(format!("not an acceptable character (found={})", c))
                            .at_cell(row, col),
                    );
                }
            }
        }
    }

    (grid, violations)
}
