//! Violation model and run reporting.
//!
//! Problems are collected, never thrown: every check appends to a list and
//! carries on, so a single run surfaces everything at once. Rendering is
//! purely presentational and never fails.

use std::fmt;

use crate::grid::Value;

/// Classification of a reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A file does not conform to its declared grammar.
    Structural,
    /// A structurally valid rule set disagrees with a structurally valid grid.
    CrossCheck,
    /// A file could not be read or decoded at all; only its pair is skipped.
    Fatal,
}

/// A single reported inconsistency with an optional location.
///
/// Positions are stored 0-based and rendered 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub value: Option<Value>,
    pub message: String,
}

impl Violation {
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Structural, message)
    }

    pub fn cross_check(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::CrossCheck, message)
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Fatal, message)
    }

    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            row: None,
            column: None,
            value: None,
            message: message.into(),
        }
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn at_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn at_cell(self, row: usize, column: usize) -> Self {
        self.at_row(row).at_column(column)
    }

    pub fn for_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(row) = self.row {
            write!(f, "row {}, ", row + 1)?;
        }
        if let Some(column) = self.column {
            write!(f, "column {}, ", column + 1)?;
        }
        if let Some(value) = self.value {
            write!(f, "value {}, ", value)?;
        }
        write!(f, "{}", self.message)
    }
}

/// Parse outcome for one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub name: String,
    pub violations: Vec<Violation>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Cross-check outcome for one associated definition/result pair.
#[derive(Debug, Clone)]
pub struct PairReport {
    pub definition: String,
    pub result: String,
    pub violations: Vec<Violation>,
}

/// Everything collected from one directory run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub definitions: Vec<FileReport>,
    pub results: Vec<FileReport>,
    pub pairs: Vec<PairReport>,
    /// Definition files with no matching result file.
    pub missing_results: Vec<String>,
    /// Result files with no matching definition file.
    pub missing_definitions: Vec<String>,
    /// Association conflicts (several definitions claiming one result).
    pub conflicts: Vec<String>,
}

impl RunReport {
    /// Total number of violations across files and pairs.
    pub fn violation_count(&self) -> usize {
        self.definitions
            .iter()
            .chain(&self.results)
            .map(|file| file.violations.len())
            .sum::<usize>()
            + self.pairs.iter().map(|pair| pair.violations.len()).sum::<usize>()
    }

    pub fn has_violations(&self) -> bool {
        self.violation_count() > 0
    }

    /// Render the run in order: per-file structural findings, per-pair
    /// cross-check findings, then unmatched files in both directions.
    /// Clean and gap lines go to stdout, violations to stderr.
    pub fn print(&self) {
        println!("\n### Consistency checks ###\n");
        for file in self.definitions.iter().chain(&self.results) {
            if file.is_clean() {
                println!("{} --> OK", file.name);
            } else {
                eprintln!("{}", file.name);
                for violation in &file.violations {
                    eprintln!("\t{}", violation);
                }
            }
        }

        println!("\n### Cross-files consistency checks ###\n");
        for pair in &self.pairs {
            if pair.violations.is_empty() {
                println!("{} / {} --> OK", pair.definition, pair.result);
            } else {
                eprintln!(
                    "Issues found when comparing definition and result files: {}",
                    pair.definition
                );
                for violation in &pair.violations {
                    eprintln!("\t{}", violation);
                }
            }
        }

        println!("\n### Gap information ###\n");
        for name in &self.missing_results {
            println!("No result file for definition: {}", name);
        }
        for name in &self.missing_definitions {
            println!("No definition file for result: {}", name);
        }
        for conflict in &self.conflicts {
            eprintln!("{}", conflict);
        }
    }
}
