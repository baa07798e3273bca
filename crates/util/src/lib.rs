//! persistent-segtree-util - Test-data generation for persistent-segtree
//!
//! Provides a seeded [`Fuzzer`] so randomized tests can replay a failing run
//! from its printed seed.

pub mod fuzzer;

pub use fuzzer::{Fuzzer, UpdateOp};
