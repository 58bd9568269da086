//! Loading scenario files and replaying them

use std::path::{Path, PathBuf};

use tillprobe::{
    Catalog, GroupedCurrency, HarnessConfig, MockTill, Scenario, ScenarioReport, ScenarioRunner,
};

use crate::error::{CliError, CliResult};
use crate::output::Reporter;

/// Parse and validate every file, failing on the first bad one
pub fn load_scenarios(files: &[PathBuf]) -> CliResult<Vec<Scenario>> {
    files
        .iter()
        .map(|path| Scenario::from_yaml_file(path).map_err(|e| CliError::scenario(path, e)))
        .collect()
}

/// Catalog for simulation: the given file, or the built-in sample
pub fn load_catalog(path: Option<&Path>) -> CliResult<Catalog> {
    match path {
        Some(path) => Catalog::from_yaml_file(path)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display()))),
        None => Ok(Catalog::sample()),
    }
}

/// Pass/fail tally of a batch of scenarios
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub total: usize,
}

impl RunSummary {
    fn record(&mut self, report: &ScenarioReport) {
        self.total += 1;
        if report.passed() {
            self.passed += 1;
        }
    }

    /// `Err` when anything failed
    pub const fn into_result(self) -> CliResult<()> {
        if self.passed == self.total {
            Ok(())
        } else {
            Err(CliError::ScenarioFailed {
                failed: self.total - self.passed,
                total: self.total,
            })
        }
    }
}

/// Replays scenarios against one kind of driver
#[derive(Debug)]
pub struct BatchRunner {
    runner: ScenarioRunner,
    fail_fast: bool,
}

impl BatchRunner {
    #[must_use]
    pub const fn new(config: HarnessConfig, fail_fast: bool) -> Self {
        Self {
            runner: ScenarioRunner::new(config),
            fail_fast,
        }
    }

    /// Replay every scenario against a fresh in-memory till
    pub async fn simulate(
        &self,
        scenarios: &[Scenario],
        catalog: &Catalog,
        reporter: &Reporter,
    ) -> CliResult<RunSummary> {
        let config = self.runner.config();
        let mut summary = RunSummary::default();
        for scenario in scenarios {
            let till = MockTill::new(catalog.clone())
                .with_entry_paths(&config.cash_sale_path, &config.credit_sale_path)
                .with_currency(GroupedCurrency::new(&config.currency_code, 0));
            let report = self.runner.run(scenario, till).await?;
            reporter.report(&report)?;
            summary.record(&report);
            if self.fail_fast && !report.passed() {
                break;
            }
        }
        Ok(summary)
    }

    /// Replay every scenario in its own Chromium instance
    #[cfg(feature = "browser")]
    pub async fn run_browser(
        &self,
        scenarios: &[Scenario],
        options: &tillprobe::ChromiumOptions,
        reporter: &Reporter,
    ) -> CliResult<RunSummary> {
        let mut summary = RunSummary::default();
        for scenario in scenarios {
            let driver = tillprobe::ChromiumDriver::launch(options.clone()).await?;
            let (report, driver) = self.runner.run_keeping_driver(scenario, driver).await?;
            if let Err(e) = driver.close().await {
                tracing::warn!(error = %e, "chromium did not close cleanly");
            }
            reporter.report(&report)?;
            summary.record(&report);
            if self.fail_fast && !report.passed() {
                break;
            }
        }
        Ok(summary)
    }
}
