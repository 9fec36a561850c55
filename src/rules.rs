//! Parsed rule-set model.
//!
//! Pure data types produced by the definition parsers and consumed by the
//! cross validators. One variant per rule-set shape; the family kind decides
//! which checks run against it.

use crate::grid::{CellId, Grid, Value};

/// A parsed definition: the rules one result grid must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSet {
    /// A partially-filled grid of givens (sudoku, takuzu). The implicit
    /// line constraints come with the family kind, not the file.
    Givens(Grid),
    /// Row and column run-length tips (nonogram).
    Tips(TipChart),
    /// A partition of the grid into named blocks (kemaru, matoku).
    Areas(Vec<Block>),
}

/// Ordered run-length tips for every row and every column.
#[derive(Debug, Clone, PartialEq)]
pub struct TipChart {
    pub rows: Vec<Vec<Value>>,
    pub columns: Vec<Vec<Value>>,
}

impl TipChart {
    /// Grid extent implied by the chart (one tip sequence per line).
    pub fn size(&self) -> usize {
        self.rows.len()
    }
}

/// One block of an area partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Member cells in file order.
    pub cells: Vec<CellId>,
    /// Pre-fill hints attached to member cells (range-fill family).
    pub prefills: Vec<(CellId, Value)>,
    /// Arithmetic clue (arithmetic family).
    pub target: Option<Target>,
    /// The raw definition line, kept for messages.
    pub source: String,
}

/// An arithmetic clue: reduce the block's values with `op`, expect `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub op: crate::family::Operator,
    pub value: Value,
}

/// Extent of the bounding box spanned by the blocks' cells, as
/// `(rows, columns)`. `None` when no cell parsed at all.
pub fn bounding_box(blocks: &[Block]) -> Option<(usize, usize)> {
    let mut max: Option<(usize, usize)> = None;
    for cell in blocks.iter().flat_map(|block| &block.cells) {
        let (rows, cols) = max.unwrap_or((0, 0));
        max = Some((rows.max(cell.row + 1), cols.max(cell.col + 1)));
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(cells: &[(usize, usize)]) -> Block {
        Block {
            cells: cells.iter().map(|&(r, c)| CellId::new(r, c)).collect(),
            prefills: Vec::new(),
            target: None,
            source: String::new(),
        }
    }

    #[test]
    fn test_bounding_box() {
        assert_eq!(bounding_box(&[]), None);
        let blocks = vec![block(&[(0, 0), (0, 1)]), block(&[(2, 3)])];
        assert_eq!(bounding_box(&blocks), Some((3, 4)));
    }
}
