//! Grid model and cell addressing.
//!
//! Shared representations for every puzzle family: a rectangular grid of
//! optional cell values (absent = unfilled) and the letter+number cell
//! addressing scheme used by the area families.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Cell value type used across all families.
pub type Value = i64;

/// A rectangular grid of optional values, row-major.
///
/// Invariant: `cells.len() == width * height`. Absent entries are cells that
/// have not been filled (the textual empty marker).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<Value>>,
}

impl Grid {
    /// Create an empty grid with the given extents.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at (row, col); `None` both for unfilled cells and for addresses
    /// outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Value> {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col]
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<Value>) {
        assert!(row < self.height && col < self.width, "cell out of range");
        self.cells[row * self.width + col] = value;
    }

    /// Iterate one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Option<Value>> + '_ {
        let start = row * self.width;
        self.cells[start..start + self.width].iter().copied()
    }

    /// Iterate one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<Value>> + '_ {
        (0..self.height).map(move |row| self.cells[row * self.width + col])
    }

    /// Whether every cell holds a value.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

/// A 0-based cell address.
///
/// Rendered 1-based with the row as a letter: `B3` is row index 1,
/// column index 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

fn cell_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([A-Z])([1-9][0-9]*)$").expect("valid pattern"))
}

impl CellId {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse a `B3`-style identifier: row letter (A = first row), then the
    /// 1-based column number. Returns `None` for anything else.
    pub fn parse(token: &str) -> Option<Self> {
        let captures = cell_id_pattern().captures(token)?;
        let letter = captures[1].chars().next()?;
        let col: usize = captures[2].parse().ok()?;
        Some(Self {
            row: letter as usize - 'A' as usize,
            col: col - 1,
        })
    }

    /// The display letter for a 0-based row index (A, B, C...).
    pub fn row_letter(row: usize) -> char {
        (b'A' + row as u8) as char
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::row_letter(self.row), self.col + 1)
    }
}
