//! Tillprobe CLI library
//!
//! Command-line interface over the tillprobe scenario runner.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{
    Cli, ColorArg, Commands, FormatArg, HarnessArgs, RunArgs, SimulateArgs, ValidateArgs,
};
pub use config::{resolve_harness, resolve_harness_with, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_text, OutputFormat, Reporter};
pub use runner::{load_catalog, load_scenarios, BatchRunner, RunSummary};
