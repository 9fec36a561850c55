//! Puzzle family descriptors: schema, runtime types, and registry.

pub mod registry;
pub mod schema;

pub use registry::FamilyRegistry;
pub use schema::{Family, FamilyKind, Operator};
