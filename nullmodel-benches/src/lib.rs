//! Benchmark support crate for nullmodel.
//!
//! Provides seeded synthetic degree sequences and observed graphs used by the
//! Criterion benchmarks for stub matching and the null-model trial runner.

pub mod error;
pub mod params;
pub mod source;
