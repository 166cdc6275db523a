//! # AHP Problem Store
//!
//! This crate is the file-backed boundary of the engine: it reads decision
//! problems in and writes evaluation results out.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All file-format knowledge lives here. The evaluator and
//!   aggregator only ever see `DecisionProblem` and `EvaluationResult`.
//! - **Format by Extension:** Problem documents are TOML or JSON, parsed through
//!   the `config` crate; results are always pretty-printed JSON.
//!
//! ## Public API
//!
//! - `ProblemRepository`: Loads problems and single matrices, saves and loads results.
//! - `StoreError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use repository::ProblemRepository;
