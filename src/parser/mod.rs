//! File parsers: textual grids, area block lines, and tip documents.
//!
//! All parsers share one discipline: decode what can be decoded, record a
//! [`Violation`](crate::report::Violation) for what cannot, never abort the
//! file on a single bad line.

pub mod area;
pub mod grid;
pub mod tips;

pub use area::parse_blocks;
pub use grid::parse_grid;
pub use tips::parse_tips;
