//! Definition parser for the tip family (nonogram).
//!
//! The definition is a JSON document with two same-length arrays of tip
//! lines, one per row and one per column. A document that cannot be decoded
//! at all is fatal for this file only; everything else accumulates.

use serde::Deserialize;

use crate::grid::Value;
use crate::report::Violation;
use crate::rules::TipChart;

/// JSON document shape: `{"rows": [{"values": [2, 3]}, ...], "columns": ...}`.
#[derive(Debug, Deserialize)]
struct TipDocument {
    rows: Vec<TipLine>,
    columns: Vec<TipLine>,
}

#[derive(Debug, Deserialize)]
struct TipLine {
    values: Vec<Value>,
}

/// Parse and structurally check a tips document.
pub fn parse_tips(text: &str) -> (Option<TipChart>, Vec<Violation>) {
    let document: TipDocument = match serde_json::from_str(text) {
        Ok(document) => document,
        Err(e) => {
            return (
                None,
                vec![Violation::fatal(format!("unreadable tips document: {}", e))],
            );
        }
    };

    let chart = TipChart {
        rows: document.rows.into_iter().map(|line| line.values).collect(),
        columns: document.columns.into_iter().map(|line| line.values).collect(),
    };

    let mut violations = Vec::new();
    if chart.rows.len() != chart.columns.len() {
        violations.push(Violation::structural(format!(
            "must contain as many rows (got {}) as columns (got {})",
            chart.rows.len(),
            chart.columns.len()
        )));
    } else {
        let row_total: Value = chart.rows.iter().flatten().sum();
        let column_total: Value = chart.columns.iter().flatten().sum();
        if row_total != column_total {
            violations.push(Violation::structural(format!(
                "different global sum between rows ({}) and columns ({})",
                row_total, column_total
            )));
        }

        let size = chart.size();
        check_lines(&chart.rows, true, size, &mut violations);
        check_lines(&chart.columns, false, size, &mut violations);
    }

    (Some(chart), violations)
}

/// Per-line fit: the runs with one gap between them must fit in `size`
/// cells, and no single run may exceed `size`.
fn check_lines(lines: &[Vec<Value>], is_rows: bool, size: usize, violations: &mut Vec<Violation>) {
    let name = if is_rows { "row" } else { "column" };
    for (index, line) in lines.iter().enumerate() {
        let locate = |violation: Violation| {
            if is_rows {
                violation.at_row(index)
            } else {
                violation.at_column(index)
            }
        };

        let needed: Value = line.iter().sum::<Value>() + line.len() as Value - 1;
        if needed > size as Value {
            violations.push(locate(Violation::structural(format!(
                "too many values ({} > {}) in {}: {:?}",
                needed, size, name, line
            ))));
        }
        for &run in line {
            if run > size as Value {
                violations.push(locate(
                    Violation::structural(format!("a too big value ({}) in {}: {:?}", run, name, line))
                        .for_value(run),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(rows: &[&[Value]], columns: &[&[Value]]) -> String {
        let to_json = |lines: &[&[Value]]| {
            serde_json::Value::Array(
                lines
                    .iter()
                    .map(|values| serde_json::json!({ "values": values }))
                    .collect(),
            )
        };
        serde_json::json!({ "rows": to_json(rows), "columns": to_json(columns) }).to_string()
    }

    #[test]
    fn test_clean_document() {
        let text = document(&[&[2], &[1, 1]], &[&[2], &[2]]);
        let (chart, violations) = parse_tips(&text);
        assert!(violations.is_empty());
        let chart = chart.expect("chart parsed");
        assert_eq!(chart.size(), 2);
        assert_eq!(chart.rows, vec![vec![2], vec![1, 1]]);
    }

    #[test]
    fn test_unbalanced_counts() {
        let text = document(&[&[1]], &[&[1], &[0]]);
        let (chart, violations) = parse_tips(&text);
        assert!(chart.is_some());
        assert_eq!(violations.len(), 1);
        assert!(
            violations[0]
                .message
                .contains("as many rows (got 1) as columns (got 2)")
        );
    }

    #[test]
    fn test_different_totals() {
        let text = document(&[&[2], &[1]], &[&[1], &[1]]);
        let (_, violations) = parse_tips(&text);
        assert_eq!(violations.len(), 1);
        assert!(
            violations[0]
                .message
                .contains("different global sum between rows (3) and columns (2)")
        );
    }

    #[test]
    fn test_runs_must_fit_the_line() {
        // [1, 1] needs 3 cells on a 2-cell line
        let text = document(&[&[1, 1], &[1]], &[&[1], &[2]]);
        let (_, violations) = parse_tips(&text);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("too many values (3 > 2) in row"));
        assert_eq!(violations[0].row, Some(0));
    }

    #[test]
    fn test_oversized_run_is_reported() {
        let text = document(&[&[3], &[0]], &[&[2], &[1]]);
        let (_, violations) = parse_tips(&text);
        assert!(
            violations
                .iter()
                .any(|v| v.message.contains("a too big value (3) in row"))
        );
    }

    #[test]
    fn test_garbage_is_fatal() {
        let (chart, violations) = parse_tips("{not json");
        assert!(chart.is_none());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, crate::report::ViolationKind::Fatal);
    }
}
