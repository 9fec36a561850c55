//! Nonogram instance generator.
//!
//! External collaborator of the validation core: produces a random tips
//! definition document (and optionally the matching result grid) in the
//! same formats the parsers read back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use serde::Serialize;

use crate::grid::Grid;
use crate::grid::Value;
use crate::rules::TipChart;
use crate::validate::tips::encode_runs;

#[derive(Serialize)]
struct TipDocument {
    rows: Vec<TipLine>,
    columns: Vec<TipLine>,
}

#[derive(Serialize)]
struct TipLine {
    values: Vec<Value>,
}

/// Fill an `size`x`size` binary grid from fair coin flips.
///
/// A fill leaving some row or column entirely empty is thrown away and
/// redone, at most twice; after that the grid is accepted as-is (an empty
/// line encodes to an empty tip sequence, which still validates).
pub fn generate_grid(size: usize, rng: &mut impl Rng) -> Grid {
    let mut grid = fill(size, rng);
    for _ in 0..2 {
        if !is_degenerate(&grid) {
            break;
        }
        grid = fill(size, rng);
    }
    if is_degenerate(&grid) {
        log::warn!("generated grid keeps an entirely empty line after two retries");
    }
    grid
}

fn fill(size: usize, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::new(size, size);
    for row in 0..size {
        for col in 0..size {
            grid.set(row, col, Some(rng.gen_bool(0.5) as Value));
        }
    }
    grid
}

fn is_degenerate(grid: &Grid) -> bool {
    let empty_row = (0..grid.height()).any(|row| grid.row(row).all(|cell| cell != Some(1)));
    let empty_col = (0..grid.width()).any(|col| grid.column(col).all(|cell| cell != Some(1)));
    empty_row || empty_col
}

/// Extract the tip chart of a solution grid.
pub fn tips_of(grid: &Grid) -> TipChart {
    TipChart {
        rows: (0..grid.height()).map(|row| encode_runs(grid.row(row))).collect(),
        columns: (0..grid.width())
            .map(|col| encode_runs(grid.column(col)))
            .collect(),
    }
}

/// Generate a fresh instance and write its definition document; with
/// `with_result`, also write the solved grid under the paired result name.
pub fn write_instance(
    definition_path: &Path,
    size: usize,
    with_result: bool,
    rng: &mut impl Rng,
) -> Result<TipChart> {
    let grid = generate_grid(size, rng);
    let chart = tips_of(&grid);

    let document = TipDocument {
        rows: chart.rows.iter().cloned().map(|values| TipLine { values }).collect(),
        columns: chart
            .columns
            .iter()
            .cloned()
            .map(|values| TipLine { values })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&document).context("encoding tips document")?;
    fs::write(definition_path, json)
        .with_context(|| format!("writing {}", definition_path.display()))?;

    if with_result {
        let result_path = result_path_for(definition_path);
        let mut lines = String::new();
        for row in 0..grid.height() {
            for cell in grid.row(row) {
                lines.push(if cell == Some(1) { '1' } else { '0' });
            }
            lines.push('\n');
        }
        fs::write(&result_path, lines)
            .with_context(|| format!("writing {}", result_path.display()))?;
    }

    Ok(chart)
}

/// `foo.json` pairs with `foo_res.txt`, the transform the association
/// engine applies in reverse.
fn result_path_for(definition_path: &Path) -> PathBuf {
    let stem = definition_path.with_extension("");
    PathBuf::from(format!("{}_res.txt", stem.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_tips_of_known_grid() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, Some(1));
        grid.set(0, 1, Some(1));
        grid.set(1, 0, Some(1));
        grid.set(1, 1, Some(0));

        let chart = tips_of(&grid);
        assert_eq!(chart.rows, vec![vec![2], vec![1]]);
        assert_eq!(chart.columns, vec![vec![2], vec![1]]);
    }

    #[test]
    fn test_generated_grid_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate_grid(10, &mut rng);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 10);
        assert!(grid.is_full());
        for row in 0..10 {
            for col in 0..10 {
                let value = grid.get(row, col).unwrap();
                assert!(value == 0 || value == 1);
            }
        }
    }

    #[test]
    fn test_written_instance_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let definition = dir.path().join("generated.json");
        let mut rng = StdRng::seed_from_u64(42);

        let chart = write_instance(&definition, 10, true, &mut rng).expect("write instance");

        let text = std::fs::read_to_string(&definition).expect("read back definition");
        let (parsed, violations) = crate::parser::parse_tips(&text);
        assert!(violations.is_empty());
        assert_eq!(parsed.expect("chart"), chart);

        let result_text = std::fs::read_to_string(dir.path().join("generated_res.txt"))
            .expect("read back result");
        let registry = crate::family::FamilyRegistry::with_embedded();
        let family = registry.get("nonogram").expect("nonogram");
        let (grid, violations) = crate::parser::parse_grid(&result_text, &family.grid);
        assert!(violations.is_empty());

        assert!(crate::validate::tips::check(&chart, &grid).is_empty());
    }
}
