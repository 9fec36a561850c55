//! Definition parser for the area families (range fill and arithmetic).
//!
//! One block per line: cell identifiers joined by the family's cell
//! separator, plus either per-cell pre-fill hints (`B2=3`, range fill) or a
//! trailing operator clue (`A1,A2:+8`, arithmetic). Each line is evaluated
//! independently and problems accumulate; a bad line never aborts the file.

use std::collections::HashMap;

use crate::family::schema::{AreaFormat, FamilyKind, Operator};
use crate::grid::{CellId, Value};
use crate::report::Violation;
use crate::rules::{Block, Target, bounding_box};

/// Parse every block line of a definition file and check partition coverage.
pub fn parse_blocks(
    text: &str,
    kind: FamilyKind,
    area: &AreaFormat,
) -> (Vec<Block>, Vec<Violation>) {
    let mut blocks = Vec::new();
    let mut violations = Vec::new();

    for (row, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(block) = parse_line(line, row, kind, area, &mut violations) {
            blocks.push(block);
        }
    }

    check_coverage(&blocks, &mut violations);
    (blocks, violations)
}

/// Parse a single block line. Returns `None` only when nothing usable could
/// be decoded; violations are recorded either way.
fn parse_line(
    line: &str,
    row: usize,
    kind: FamilyKind,
    area: &AreaFormat,
    violations: &mut Vec<Violation>,
) -> Option<Block> {
    let (cells_part, clue_part) = match kind {
        FamilyKind::ArithmeticArea => match line.split_once(&area.key_separator) {
            Some((cells, clue)) => (cells, Some(clue)),
            None => {
                violations.push(
                    Violation::structural(format!("missing clue segment in block: {}", line))
                        .at_row(row),
                );
                (line, None)
            }
        },
        _ => (line, None),
    };

    let mut cells = Vec::new();
    let mut prefills = Vec::new();
    for token in cells_part.split(&area.cell_separator) {
        let (id_token, prefill) = match kind {
            // range fill: a cell token may carry a "=value" hint
            FamilyKind::RangeArea => match token.split_once(&area.key_separator) {
                Some((id, value)) => (id, Some(value)),
                None => (token, None),
            },
            _ => (token, None),
        };

        let Some(cell) = CellId::parse(id_token) else {
            violations.push(
                Violation::structural(format!("not a cell identifier: '{}'", id_token)).at_row(row),
            );
            continue;
        };
        cells.push(cell);

        if let Some(raw) = prefill {
            match raw.parse::<Value>() {
                Ok(value) => prefills.push((cell, value)),
                Err(_) => violations.push(
                    Violation::structural(format!(
                        "bad pre-fill value '{}' for cell {}",
                        raw, cell
                    ))
                    .at_row(row),
                ),
            }
        }
    }

    if cells.is_empty() {
        return None;
    }

    // pre-fill hints must fit the block's own value range [1, block size]
    for &(_, value) in &prefills {
        if value < 1 || value > cells.len() as Value {
            violations.push(
                Violation::structural(format!(
                    "found a bad prefilled value ({}) for block: {}",
                    value, line
                ))
                .at_row(row)
                .for_value(value),
            );
        }
    }

    let target = clue_part.and_then(|clue| parse_clue(clue, line, row, &cells, area, violations));

    Some(Block {
        cells,
        prefills,
        target,
        source: line.to_string(),
    })
}

fn parse_clue(
    clue: &str,
    line: &str,
    row: usize,
    cells: &[CellId],
    area: &AreaFormat,
    violations: &mut Vec<Violation>,
) -> Option<Target> {
    let clue = clue.trim();
    let matched = area
        .operators
        .iter()
        .filter(|(symbol, _)| clue.starts_with(symbol.as_str()))
        .max_by_key(|(symbol, _)| symbol.len());
    let Some((symbol, &op)) = matched else {
        violations.push(
            Violation::structural(format!("unknown operator symbol in clue: '{}'", clue))
                .at_row(row),
        );
        return None;
    };

    let value = match clue[symbol.len()..].trim().parse::<Value>() {
        Ok(value) => value,
        Err(_) => {
            violations.push(
                Violation::structural(format!("bad clue value in block: {}", line)).at_row(row),
            );
            return None;
        }
    };

    // single-cell blocks carry a plain equality, nothing else makes sense
    if cells.len() == 1 && op != Operator::Equals {
        violations.push(
            Violation::structural(format!("single-cell block must use equality: {}", line))
                .at_row(row),
        );
        return None;
    }
    if cells.len() > 1 && op == Operator::Equals {
        violations.push(
            Violation::structural(format!("equality clue on a multi-cell block: {}", line))
                .at_row(row),
        );
        return None;
    }

    Some(Target { op, value })
}

/// Every cell of the bounding box must appear in exactly one block.
fn check_coverage(blocks: &[Block], violations: &mut Vec<Violation>) {
    let Some((rows, cols)) = bounding_box(blocks) else {
        return;
    };

    let mut counts: HashMap<CellId, usize> = HashMap::new();
    for cell in blocks.iter().flat_map(|block| &block.cells) {
        *counts.entry(*cell).or_insert(0) += 1;
    }

    for row in 0..rows {
        for col in 0..cols {
            let cell = CellId::new(row, col);
            match counts.get(&cell).copied().unwrap_or(0) {
                0 => violations.push(
                    Violation::structural(format!("didn't find the cell: {}", cell))
                        .at_cell(row, col),
                ),
                1 => {}
                n => violations.push(
                    Violation::structural(format!(
                        "found the same cell several times ({}): {}",
                        n, cell
                    ))
                    .at_cell(row, col),
                ),
            }
        }
    }
}
