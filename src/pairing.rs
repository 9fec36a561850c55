//! File association engine.
//!
//! Pure, name-based pairing of definition files with result files via the
//! family's suffix transform. The directory scan is a thin separate helper,
//! so association itself works on an in-memory list of names.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::family::schema::NamingRule;

/// Outcome of associating one directory's file names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pairing {
    /// `(definition, result)` pairs, in definition-name order.
    pub pairs: Vec<(String, String)>,
    /// Definition files with no matching result file (gaps).
    pub unmatched_definitions: Vec<String>,
    /// Result files with no matching definition file (gaps).
    pub unmatched_results: Vec<String>,
    /// Several definitions claiming the same result file.
    pub conflicts: Vec<String>,
    /// Files matching neither naming convention.
    pub ignored: Vec<String>,
}

/// Partition names into definition and result candidates and pair them.
///
/// A result file is anything ending with the family's result suffix; a
/// definition file anything else ending with the definition extension. The
/// expected result name is the definition stem plus the result suffix.
/// Matching is purely textual.
pub fn associate(names: &[String], naming: &NamingRule) -> Pairing {
    let mut sorted: Vec<&String> = names.iter().collect();
    sorted.sort();

    let mut definitions = Vec::new();
    let mut results = Vec::new();
    let mut pairing = Pairing::default();

    for name in sorted {
        if name.ends_with(&naming.result_suffix) {
            results.push(name.clone());
        } else if let Some(stem) = name.strip_suffix(&naming.definition_extension) {
            definitions.push((name.clone(), format!("{}{}", stem, naming.result_suffix)));
        } else {
            pairing.ignored.push(name.clone());
        }
    }

    // expected result name -> definitions claiming it
    let mut claims: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (definition, expected) in definitions {
        claims.entry(expected).or_default().push(definition);
    }

    for (expected, claimants) in &claims {
        if claimants.len() > 1 {
            pairing.conflicts.push(format!(
                "several definition files map to the same result file {}: {}",
                expected,
                claimants.join(", ")
            ));
        }
        // the first claimant (name order) owns the pair
        let definition = claimants[0].clone();
        if results.contains(expected) {
            pairing.pairs.push((definition, expected.clone()));
        } else {
            pairing.unmatched_definitions.push(definition);
        }
    }

    pairing.unmatched_results = results
        .into_iter()
        .filter(|result| !claims.contains_key(result))
        .collect();

    pairing
}

/// List the plain files of a directory, sorted by name.
pub fn scan_directory(dir: &Path) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
