//! Tillprobe CLI: replay sale scenarios against a point-of-sale screen
//!
//! ## Usage
//!
//! ```bash
//! tillprobe validate scenarios/*.yaml            # Check scenario files
//! tillprobe simulate scenarios/*.yaml            # Replay against the in-memory till
//! tillprobe run scenarios/cash_sale.yaml --headed
//! tillprobe config --base-url http://till.local  # Show the resolved configuration
//! ```

use clap::Parser;
use std::process::ExitCode;
use tillprobe_cli::{
    load_catalog, load_scenarios, resolve_harness, BatchRunner, Cli, CliConfig, CliError,
    CliResult, ColorChoice, Commands, OutputFormat, Reporter, Verbosity,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    match &cli.command {
        Commands::Validate(args) => {
            let reporter = reporter(&config);
            for scenario in load_scenarios(&args.files)? {
                reporter.valid(&scenario.name, scenario.steps.len());
            }
            Ok(())
        }
        Commands::Config => {
            let harness = resolve_harness(&cli.harness)?;
            print!("{}", harness.to_yaml()?);
            Ok(())
        }
        Commands::Simulate(args) => {
            let harness = resolve_harness(&cli.harness)?;
            let scenarios = load_scenarios(&args.files)?;
            let catalog = load_catalog(args.catalog.as_deref())?;
            let config = config.with_fail_fast(args.fail_fast);
            let reporter = reporter(&config);
            let batch = BatchRunner::new(harness, config.fail_fast);
            let summary = runtime()?.block_on(batch.simulate(&scenarios, &catalog, &reporter))?;
            reporter.summary(summary.passed, summary.total);
            summary.into_result()
        }
        Commands::Run(args) => run_browser(&cli, config, args),
    }
}

#[cfg(feature = "browser")]
fn run_browser(cli: &Cli, config: CliConfig, args: &tillprobe_cli::RunArgs) -> CliResult<()> {
    let harness = resolve_harness(&cli.harness)?.with_headless(!args.headed);
    let scenarios = load_scenarios(&args.files)?;
    let mut options = tillprobe::ChromiumOptions::from_config(&harness);
    if args.no_sandbox {
        options = options.with_no_sandbox();
    }
    let config = config.with_fail_fast(args.fail_fast);
    let reporter = reporter(&config);
    let batch = BatchRunner::new(harness, config.fail_fast);
    let summary = runtime()?.block_on(batch.run_browser(&scenarios, &options, &reporter))?;
    reporter.summary(summary.passed, summary.total);
    summary.into_result()
}

#[cfg(not(feature = "browser"))]
fn run_browser(_cli: &Cli, _config: CliConfig, _args: &tillprobe_cli::RunArgs) -> CliResult<()> {
    Err(CliError::invalid_argument(
        "browser support not enabled. Rebuild with --features browser",
    ))
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(ColorChoice::from(cli.color))
        .with_format(OutputFormat::from(cli.format))
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn reporter(config: &CliConfig) -> Reporter {
    Reporter::new(
        config.format,
        config.color.should_color(),
        config.verbosity.is_quiet(),
    )
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::config(format!("failed to start async runtime: {e}")))
}
