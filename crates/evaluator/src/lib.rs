//! # AHP Matrix Evaluator
//!
//! This crate turns a single pairwise-comparison matrix into its priority
//! vector and consistency statistics.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   configuration or output formats. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `MatrixEvaluator` holds no state between calls.
//!   The same matrix always yields the same `MatrixReport`, which makes it safe to
//!   call from many threads at once.
//!
//! ## Public API
//!
//! - `MatrixEvaluator`: Runs the eigen-decomposition and consistency calculation.
//! - `MatrixReport`: Principal eigenvalue, CI, CR and the normalized priority vector.
//! - `random_index`: Lookup into the random consistency index table.
//! - `EvaluatorError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod consistency;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use consistency::{random_index, RANDOM_CONSISTENCY_INDEX};
pub use engine::MatrixEvaluator;
pub use error::EvaluatorError;
pub use report::MatrixReport;
