//! Step execution orchestration.

pub mod install;

pub use install::{validate_unique_names, PieceOutcome, RunOptions, RunReport, Runner};
