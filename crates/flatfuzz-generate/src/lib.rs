//! Randomized generation for flatfuzz.
//!
//! This crate turns a seeded RNG into a depth-bounded random type tree
//! ([`typegen`]) and into concrete data instances whose shape mirrors a
//! given tree ([`datagen`]). The small samplers shared by both live in
//! [`sample`].

pub mod datagen;
pub mod sample;
pub mod typegen;

pub use datagen::{DataValue, sample as sample_data, sample_table};
pub use typegen::TypeGen;
