//! Report rendering

use console::{style, Term};
use serde::{Deserialize, Serialize};
use tillprobe::{ProbeResult, ScenarioReport};

/// Output format for scenario reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Writes scenario reports to stdout
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    format: OutputFormat,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            format,
            use_color,
            quiet,
        }
    }

    /// Emit one finished scenario
    pub fn report(&self, report: &ScenarioReport) -> ProbeResult<()> {
        match self.format {
            OutputFormat::Json => self.line(&report.to_json()?),
            OutputFormat::Text => {
                if self.quiet && report.passed() {
                    return Ok(());
                }
                self.line(&render_text(report, self.use_color));
            }
        }
        Ok(())
    }

    /// Emit the closing tally (text only)
    pub fn summary(&self, passed: usize, total: usize) {
        if self.format != OutputFormat::Text || self.quiet {
            return;
        }
        let failed = total - passed;
        let text = format!("{passed} passed, {failed} failed");
        let text = if !self.use_color {
            text
        } else if failed == 0 {
            style(text).green().bold().to_string()
        } else {
            style(text).red().bold().to_string()
        };
        self.line(&text);
    }

    /// Confirm a file parsed cleanly (text only)
    pub fn valid(&self, name: &str, steps: usize) {
        if self.format != OutputFormat::Text || self.quiet {
            return;
        }
        let mark = if self.use_color {
            style("✓").green().to_string()
        } else {
            "✓".to_string()
        };
        self.line(&format!("{mark} {name} ({steps} steps)"));
    }

    fn line(&self, text: &str) {
        // A closed stdout is not worth failing the run over
        let _ = self.term.write_line(text);
    }
}

/// One report as a text block, marked pass or fail
#[must_use]
pub fn render_text(report: &ScenarioReport, use_color: bool) -> String {
    let mark = match (report.passed(), use_color) {
        (true, true) => style("✓").green().to_string(),
        (false, true) => style("✗").red().to_string(),
        (true, false) => "✓".to_string(),
        (false, false) => "✗".to_string(),
    };
    format!("{mark} {report}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tillprobe::{Catalog, HarnessConfig, MockTill, Scenario, ScenarioRunner, SettleConfig};

    async fn report_for(yaml: &str) -> ScenarioReport {
        let scenario = Scenario::from_yaml_str(yaml).unwrap();
        let config = HarnessConfig::default().with_settle(SettleConfig::immediate());
        ScenarioRunner::new(config)
            .run(&scenario, MockTill::new(Catalog::sample()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_render_passed_report() {
        let report = report_for(
            "name: quick\nvariant: cash_sale\nsteps:\n  - action: enter_paid_amount\n    amount: 0\n",
        )
        .await;
        let text = render_text(&report, false);
        assert!(text.starts_with("✓ quick [cash_sale]"));
    }

    #[tokio::test]
    async fn test_render_failed_report() {
        let report = report_for(
            "name: wrong\nvariant: cash_sale\nsteps:\n  - action: assert_balance_amount\n    amount: 99\n",
        )
        .await;
        let text = render_text(&report, false);
        assert!(text.starts_with("✗ wrong"));
        assert!(text.contains("assert_balance_amount"));
    }
}
