//! Command Line Interface (CLI) layer for WATERCLASS.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `thresholds` and `pixel`
//! commands, wiring user options to `waterclass::api` and `waterclass::core`.
//!
//! If you are embedding the classifier into another application, prefer the
//! library API over calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
