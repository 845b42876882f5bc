//! Core contracts for flatfuzz.
//!
//! This crate defines the canonical type model for generated schemas (the
//! five-variant [`TypeDef`] tree) and the run-scoped name allocator shared
//! by the generator and the emitters.

pub mod names;
pub mod types;

pub use names::NamePool;
pub use types::{PrimitiveKind, StructDef, TableDef, TypeDef, UnionDef};
