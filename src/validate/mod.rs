//! Cross validators: one per puzzle family, behind a single dispatch point.
//!
//! Each validator takes a parsed rule set and a parsed result grid and
//! returns the list of cross-check violations. Nothing here touches the
//! filesystem and nothing aborts early; every independent check runs.

pub mod area;
pub mod balance;
pub mod tips;
pub mod uniqueness;

use std::collections::HashMap;

use crate::family::{Family, FamilyKind};
use crate::grid::{Grid, Value};
use crate::report::Violation;
use crate::rules::RuleSet;

/// Cross-check a rule set against a result grid.
///
/// The single dispatch point over the closed family set: the family kind
/// selects the validator, the rule-set variant carries its data.
pub fn cross_validate(family: &Family, rules: &RuleSet, grid: &Grid) -> Vec<Violation> {
    match (family.kind, rules) {
        (FamilyKind::Uniqueness, RuleSet::Givens(givens)) => {
            uniqueness::check(family, givens, grid)
        }
        (FamilyKind::Balance, RuleSet::Givens(givens)) => balance::check(givens, grid),
        (FamilyKind::Tips, RuleSet::Tips(chart)) => tips::check(chart, grid),
        (FamilyKind::RangeArea, RuleSet::Areas(blocks)) => area::check_range_fill(blocks, grid),
        (FamilyKind::ArithmeticArea, RuleSet::Areas(blocks)) => {
            area::check_arithmetic(family, blocks, grid)
        }
        _ => vec![Violation::cross_check(format!(
            "rule set does not belong to family '{}'",
            family.name
        ))],
    }
}

/// Group the cells of a region by value, keeping positions in visit order.
/// Absent cells group under `None`.
pub(crate) fn group_positions(
    grid: &Grid,
    cells: impl Iterator<Item = (usize, usize)>,
) -> HashMap<Option<Value>, Vec<(usize, usize)>> {
    let mut groups: HashMap<Option<Value>, Vec<(usize, usize)>> = HashMap::new();
    for (row, col) in cells {
        groups.entry(grid.get(row, col)).or_default().push((row, col));
    }
    groups
}

/// Render positions for messages: `[row,col]` pairs, 1-based.
pub(crate) fn positions_to_string(positions: &[(usize, usize)]) -> String {
    positions
        .iter()
        .map(|&(row, col)| format!("[{},{}]", row + 1, col + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every given of the definition grid must be preserved by the result grid.
pub(crate) fn check_givens(givens: &Grid, grid: &Grid, violations: &mut Vec<Violation>) {
    for row in 0..givens.height() {
        for col in 0..givens.width() {
            let Some(expected) = givens.get(row, col) else {
                continue;
            };
            match grid.get(row, col) {
                Some(found) if found == expected => {}
                Some(found) => violations.push(
                    Violation::cross_check(format!(
                        "difference on provided input (expected={}, found={})",
                        expected, found
                    ))
                    .at_cell(row, col)
                    .for_value(expected),
                ),
                None => violations.push(
                    Violation::cross_check(format!(
                        "a provided input was left unfilled (expected={})",
                        expected
                    ))
                    .at_cell(row, col)
                    .for_value(expected),
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_positions_tracks_absent_cells() {
        let mut grid = Grid::new(1, 3);
        grid.set(0, 0, Some(1));
        grid.set(0, 2, Some(1));

        let groups = group_positions(&grid, (0..3).map(|col| (0, col)));
        assert_eq!(groups[&Some(1)], vec![(0, 0), (0, 2)]);
        assert_eq!(groups[&None], vec![(0, 1)]);
    }

    #[test]
    fn test_positions_render_one_based() {
        assert_eq!(positions_to_string(&[(0, 0), (2, 4)]), "[1,1], [3,5]");
    }

    #[test]
    fn test_check_givens() {
        let mut givens = Grid::new(2, 2);
        givens.set(0, 0, Some(3));
        givens.set(1, 1, Some(4));

        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, Some(3));
        grid.set(1, 1, Some(2));

        let mut violations = Vec::new();
        check_givens(&givens, &grid, &mut violations);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].row, Some(1));
        assert_eq!(violations[0].column, Some(1));
        assert!(violations[0].message.contains("expected=4, found=2"));
    }
}
