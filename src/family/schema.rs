//! Family descriptor schema.
//!
//! Serde types matching the family descriptor TOML files, and the validated
//! runtime [`Family`] they convert into. A descriptor carries everything the
//! parsers and validators need to know about one puzzle family: grid extents,
//! value range, empty-cell marker, block separators, operator symbol table,
//! and the filename convention pairing definitions with results.

use std::collections::HashMap;

use serde::Deserialize;

use crate::grid::Value;

/// Root descriptor file structure (matches TOML).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FamilyFile {
    pub family: FamilyMeta,
    pub format: FormatDef,
}

/// Family metadata.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FamilyMeta {
    pub name: String,
    pub description: Option<String>,
}

/// The `[format]` section of a descriptor.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FormatDef {
    pub kind: FamilyKind,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub box_rows: Option<usize>,
    pub box_columns: Option<usize>,
    pub empty: Option<char>,
    pub cell_separator: Option<String>,
    pub key_separator: Option<String>,
    pub operators: Option<OperatorSymbols>,
    pub definition_extension: String,
    pub result_suffix: String,
    pub values: Option<ValueRange>,
}

/// The closed set of puzzle families.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FamilyKind {
    /// Row/column/box uniqueness grid (sudoku).
    Uniqueness,
    /// Balanced binary grid (takuzu).
    Balance,
    /// Run-length tip grid (nonogram).
    Tips,
    /// Area partition, each block filled with `1..block size` (kemaru).
    RangeArea,
    /// Area partition with arithmetic clues (matoku).
    ArithmeticArea,
}

/// Inclusive range of legal cell values.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct ValueRange {
    pub min: Value,
    pub max: Value,
}

impl ValueRange {
    pub fn contains(&self, value: Value) -> bool {
        self.min <= value && value <= self.max
    }

    /// Number of distinct values in the range.
    pub fn span(&self) -> usize {
        (self.max - self.min + 1) as usize
    }
}

/// The `[format.operators]` symbol table of the arithmetic family.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OperatorSymbols {
    pub add: String,
    pub subtract: String,
    pub multiply: String,
    pub divide: String,
    pub equals: String,
}

/// Arithmetic clue operator with its reduction semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equals,
}

impl Operator {
    /// Identity element used as the initial accumulator of a reduction.
    pub fn identity(self) -> Value {
        match self {
            Operator::Add | Operator::Subtract | Operator::Equals => 0,
            Operator::Multiply | Operator::Divide => 1,
        }
    }

    /// One left-to-right accumulator step.
    ///
    /// Subtraction is the absolute difference and division the larger
    /// operand over the smaller, so both are order independent for two
    /// operands.
    pub fn apply(self, acc: Value, next: Value) -> Value {
        match self {
            Operator::Add => acc + next,
            Operator::Subtract => (acc - next).abs(),
            Operator::Multiply => acc * next,
            Operator::Divide => {
                let (high, low) = (acc.max(next), acc.min(next));
                // low cannot be 0 for range-checked grids; don't panic on
                // inputs that slipped past anyway
                if low == 0 { 0 } else { high / low }
            }
            Operator::Equals => acc,
        }
    }
}

/// Textual grid format shared by definition and result grids of a family.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFormat {
    /// Fixed row count, when the family prescribes one.
    pub rows: Option<usize>,
    /// Fixed column count, when the family prescribes one.
    pub columns: Option<usize>,
    /// Sub-region extent (uniqueness family only).
    pub box_rows: Option<usize>,
    pub box_columns: Option<usize>,
    pub values: ValueRange,
    /// Marker for an unfilled cell; absent when the family has none.
    pub empty: Option<char>,
}

/// Block-line format of the area families.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaFormat {
    /// Separator between cell tokens of a block line.
    pub cell_separator: String,
    /// Separator before a key/value segment: the trailing clue of an
    /// arithmetic block, or the pre-fill hint inside a cell token.
    pub key_separator: String,
    /// Symbol table mapping clue symbols to operators (arithmetic only).
    pub operators: HashMap<String, Operator>,
}

/// Filename convention tying a definition file to its result file.
#[derive(Debug, Clone, PartialEq)]
pub struct NamingRule {
    pub definition_extension: String,
    pub result_suffix: String,
}

/// Runtime family descriptor: validated, with operator symbols resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Family {
    pub name: String,
    pub description: Option<String>,
    pub kind: FamilyKind,
    pub grid: GridFormat,
    pub area: Option<AreaFormat>,
    pub naming: NamingRule,
}

impl TryFrom<FamilyFile> for Family {
    type Error = String;

    fn try_from(file: FamilyFile) -> Result<Self, String> {
        let name = file.family.name;
        let format = file.format;

        let values = format
            .values
            .ok_or_else(|| format!("family '{}': missing [format.values]", name))?;

        let grid = GridFormat {
            rows: format.rows,
            columns: format.columns,
            box_rows: format.box_rows,
            box_columns: format.box_columns,
            values,
            empty: format.empty,
        };

        let area = match format.kind {
            FamilyKind::RangeArea | FamilyKind::ArithmeticArea => {
                let cell_separator = format.cell_separator.ok_or_else(|| {
                    format!("family '{}': missing format.cell_separator", name)
                })?;
                let key_separator = format.key_separator.ok_or_else(|| {
                    format!("family '{}': missing format.key_separator", name)
                })?;
                let operators = match format.kind {
                    FamilyKind::ArithmeticArea => {
                        let symbols = format.operators.ok_or_else(|| {
                            format!("family '{}': missing [format.operators]", name)
                        })?;
                        resolve_operators(&name, symbols)?
                    }
                    _ => HashMap::new(),
                };
                Some(AreaFormat {
                    cell_separator,
                    key_separator,
                    operators,
                })
            }
            _ => None,
        };

        match format.kind {
            FamilyKind::Uniqueness | FamilyKind::Balance => {
                if grid.rows.is_none() || grid.columns.is_none() {
                    return Err(format!(
                        "family '{}': grid extents are required for this kind",
                        name
                    ));
                }
                if grid.empty.is_none() {
                    return Err(format!(
                        "family '{}': an empty-cell marker is required for this kind",
                        name
                    ));
                }
            }
            _ => {}
        }

        Ok(Family {
            name,
            description: file.family.description,
            kind: format.kind,
            grid,
            area,
            naming: NamingRule {
                definition_extension: format.definition_extension,
                result_suffix: format.result_suffix,
            },
        })
    }
}

fn resolve_operators(
    family: &str,
    symbols: OperatorSymbols,
) -> Result<HashMap<String, Operator>, String> {
    let mut table = HashMap::new();
    for (symbol, op) in [
        (symbols.add, Operator::Add),
        (symbols.subtract, Operator::Subtract),
        (symbols.multiply, Operator::Multiply),
        (symbols.divide, Operator::Divide),
        (symbols.equals, Operator::Equals),
    ] {
        if table.insert(symbol.clone(), op).is_some() {
            return Err(format!(
                "family '{}': operator symbol '{}' is bound twice",
                family, symbol
            ));
        }
    }
    Ok(table)
}

impl Family {
    /// Look up the operator bound to a clue symbol.
    pub fn operator(&self, symbol: &str) -> Option<Operator> {
        self.area.as_ref()?.operators.get(symbol).copied()
    }
}
