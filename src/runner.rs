//! Per-directory pipeline.
//!
//! Scans a directory, parses every definition and result file eagerly,
//! pairs them by the family's naming convention, cross-validates the pairs
//! whose two sides are usable, and collects everything into a
//! [`RunReport`]. A file that cannot be read is a fatal entry for that file
//! only; the rest of the run proceeds.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::family::{Family, FamilyKind};
use crate::grid::Grid;
use crate::pairing::{associate, scan_directory};
use crate::parser;
use crate::report::{FileReport, PairReport, RunReport, Violation};
use crate::rules::RuleSet;
use crate::validate::cross_validate;

/// Parse one definition file into the family's rule set.
///
/// The dispatch point over the closed family set: grid-shaped givens for
/// uniqueness and balance, a tip chart for tips, block lines for the area
/// kinds. Returns the rule set (when anything usable was decoded) plus all
/// structural violations.
pub fn parse_definition(family: &Family, text: &str) -> (Option<RuleSet>, Vec<Violation>) {
    match family.kind {
        FamilyKind::Uniqueness | FamilyKind::Balance => {
            let (grid, violations) = parser::parse_grid(text, &family.grid);
            (Some(RuleSet::Givens(grid)), violations)
        }
        FamilyKind::Tips => {
            let (chart, violations) = parser::parse_tips(text);
            (chart.map(RuleSet::Tips), violations)
        }
        FamilyKind::RangeArea | FamilyKind::ArithmeticArea => match &family.area {
            Some(area) => {
                let (blocks, violations) = parser::parse_blocks(text, family.kind, area);
                (Some(RuleSet::Areas(blocks)), violations)
            }
            // descriptor validation makes this unreachable for loaded families
            None => (
                None,
                vec![Violation::fatal(format!(
                    "family '{}' has no block format",
                    family.name
                ))],
            ),
        },
    }
}

/// Validate every definition/result pair found in a directory.
pub fn run_directory(family: &Family, dir: &Path) -> Result<RunReport> {
    let names = scan_directory(dir)?;
    run_names(family, dir, &names)
}

fn run_names(family: &Family, dir: &Path, names: &[String]) -> Result<RunReport> {
    let pairing = associate(names, &family.naming);

    let mut report = RunReport {
        missing_results: pairing.unmatched_definitions.clone(),
        missing_definitions: pairing.unmatched_results.clone(),
        conflicts: pairing.conflicts.clone(),
        ..RunReport::default()
    };

    // parse every file eagerly, matched or not
    let mut rule_sets: HashMap<String, RuleSet> = HashMap::new();
    let definition_names = pairing
        .pairs
        .iter()
        .map(|(definition, _)| definition)
        .chain(&pairing.unmatched_definitions);
    for name in definition_names {
        let (rules, violations) = match read_file(dir, name) {
            Ok(text) => parse_definition(family, &text),
            Err(fatal) => (None, vec![fatal]),
        };
        log::debug!("parsed definition {}: {} finding(s)", name, violations.len());
        if let Some(rules) = rules {
            rule_sets.insert(name.clone(), rules);
        }
        report.definitions.push(FileReport {
            name: name.clone(),
            violations,
        });
    }

    // a result grid is kept for cross-checking only when it parsed clean;
    // a malformed grid cannot be meaningfully checked against rules
    let mut grids: HashMap<String, Grid> = HashMap::new();
    let result_names = pairing
        .pairs
        .iter()
        .map(|(_, result)| result)
        .chain(&pairing.unmatched_results);
    for name in result_names {
        let violations = match read_file(dir, name) {
            Ok(text) => {
                let (grid, violations) = parser::parse_grid(&text, &family.grid);
                if violations.is_empty() {
                    grids.insert(name.clone(), grid);
                }
                violations
            }
            Err(fatal) => vec![fatal],
        };
        log::debug!("parsed result {}: {} finding(s)", name, violations.len());
        report.results.push(FileReport {
            name: name.clone(),
            violations,
        });
    }

    for (definition, result) in &pairing.pairs {
        let (Some(rules), Some(grid)) = (rule_sets.get(definition), grids.get(result)) else {
            continue;
        };
        report.pairs.push(PairReport {
            definition: definition.clone(),
            result: result.clone(),
            violations: cross_validate(family, rules, grid),
        });
    }

    Ok(report)
}

fn read_file(dir: &Path, name: &str) -> Result<String, Violation> {
    let path = dir.join(name);
    fs::read_to_string(&path)
        .map_err(|e| Violation::fatal(format!("cannot read {}: {}", path.display(), e)))
}
