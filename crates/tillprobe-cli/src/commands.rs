//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tillprobe: replay point-of-sale sale scenarios and verify what the screen computes
#[derive(Parser, Debug)]
#[command(name = "tillprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Report format
    #[arg(long, default_value = "text", global = true)]
    pub format: FormatArg,

    #[command(flatten)]
    pub harness: HarnessArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the harness configuration
#[derive(Args, Debug, Clone, Default)]
pub struct HarnessArgs {
    /// Harness configuration file (YAML)
    #[arg(long, global = true, value_name = "YAML")]
    pub config: Option<PathBuf>,

    /// Base URL of the point-of-sale application
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Settle window after field interactions, in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub field_settle_ms: Option<u64>,

    /// Settle window after navigation, in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub navigation_settle_ms: Option<u64>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against a real browser
    Run(RunArgs),

    /// Run scenarios against the in-memory till
    Simulate(SimulateArgs),

    /// Parse and validate scenario files without running them
    Validate(ValidateArgs),

    /// Print the resolved harness configuration
    Config,
}

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Scenario files (YAML)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Disable the Chromium sandbox (containers/CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Stop after the first failing scenario
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the simulate command
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Scenario files (YAML)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Catalog of products and customers (YAML); built-in sample when absent
    #[arg(long, value_name = "YAML")]
    pub catalog: Option<PathBuf>,

    /// Stop after the first failing scenario
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the validate command
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Scenario files (YAML)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Color argument
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum ColorArg {
    /// Automatic detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Report format argument
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON report per scenario
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use crate::output::OutputFormat;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_simulate() {
        let cli = parse(&[
            "tillprobe",
            "simulate",
            "a.yaml",
            "b.yaml",
            "--catalog",
            "catalog.yaml",
            "--fail-fast",
        ]);
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.catalog, Some(PathBuf::from("catalog.yaml")));
                assert!(args.fail_fast);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = parse(&["tillprobe", "run", "sale.yaml", "--headed", "--no-sandbox"]);
        match cli.command {
            Commands::Run(args) => {
                assert!(args.headed);
                assert!(args.no_sandbox);
                assert!(!args.fail_fast);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = parse(&[
            "tillprobe",
            "validate",
            "sale.yaml",
            "--base-url",
            "http://till.local:8080",
            "--field-settle-ms",
            "0",
            "-vv",
            "--format",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.harness.base_url.as_deref(),
            Some("http://till.local:8080")
        );
        assert_eq!(cli.harness.field_settle_ms, Some(0));
        assert_eq!(cli.harness.navigation_settle_ms, None);
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Json);
    }

    #[test]
    fn test_files_required() {
        assert!(Cli::try_parse_from(["tillprobe", "simulate"]).is_err());
        assert!(Cli::try_parse_from(["tillprobe", "validate"]).is_err());
    }

    #[test]
    fn test_color_arg_conversion() {
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
    }
}
