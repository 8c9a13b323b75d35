//! The `solverbench` command: suite presets, settings and the run loop.
#![allow(missing_docs, clippy::missing_errors_doc)]

pub use self::{
    run::{RunError, run, run_with_sink},
    settings::{PuzzleMode, RunConfig, RunSettings},
    suite::{Suite, SuiteKind, SuiteSection},
};

pub mod cli;
mod run;
mod settings;
pub mod suite;
pub mod version;
