//! CLI configuration

use serde::{Deserialize, Serialize};
use tillprobe::{HarnessConfig, ProbeResult};

use crate::commands::HarnessArgs;
use crate::output::OutputFormat;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Level from the `-v` count and `-q` flag; quiet wins
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default `tracing` filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Report format
    pub format: OutputFormat,
    /// Stop after the first failing scenario
    pub fail_fast: bool,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set report format
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set fail fast mode
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Resolve the harness configuration: defaults, then the config file, then
/// `TILLPROBE_*` variables, then command-line flags.
pub fn resolve_harness(args: &HarnessArgs) -> ProbeResult<HarnessConfig> {
    resolve_harness_with(args, |key| std::env::var(key).ok())
}

/// [`resolve_harness`] with an explicit variable lookup
pub fn resolve_harness_with(
    args: &HarnessArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> ProbeResult<HarnessConfig> {
    let base = match &args.config {
        Some(path) => HarnessConfig::from_yaml_file(path)?,
        None => HarnessConfig::default(),
    };
    let mut config = base.apply_vars(lookup)?;
    if let Some(url) = &args.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(ms) = args.field_settle_ms {
        config.settle.field_ms = ms;
    }
    if let Some(ms) = args.navigation_settle_ms {
        config.settle.navigation_ms = ms;
    }
    config.validate()?;
    tracing::debug!(base_url = %config.base_url, "harness configuration resolved");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(3, false), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(2, true), Verbosity::Quiet);
        assert!(Verbosity::Quiet.is_quiet());
        assert!(Verbosity::Debug.is_verbose());
        assert_eq!(Verbosity::Normal.filter_directive(), "warn");
    }

    #[test]
    fn test_color_choice() {
        assert!(ColorChoice::Always.should_color());
        assert!(!ColorChoice::Never.should_color());
    }

    #[test]
    fn test_cli_config_builder() {
        let config = CliConfig::new()
            .with_verbosity(Verbosity::Verbose)
            .with_color(ColorChoice::Never)
            .with_format(OutputFormat::Json)
            .with_fail_fast(true);
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.fail_fast);
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = resolve_harness_with(&HarnessArgs::default(), no_env).unwrap();
        assert_eq!(config.settle.field_ms, 500);
        assert_eq!(config.settle.navigation_ms, 1000);
    }

    #[test]
    fn test_precedence_file_env_flags() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url: http://file.local\nsettle:\n  field_ms: 100\n  navigation_ms: 200"
        )
        .unwrap();

        let args = HarnessArgs {
            config: Some(file.path().to_path_buf()),
            base_url: None,
            field_settle_ms: Some(5),
            navigation_settle_ms: None,
        };
        let env = |key: &str| match key {
            "TILLPROBE_BASE_URL" => Some("http://env.local".to_string()),
            "TILLPROBE_NAVIGATION_SETTLE_MS" => Some("300".to_string()),
            _ => None,
        };
        let config = resolve_harness_with(&args, env).unwrap();
        assert_eq!(config.base_url, "http://env.local");
        assert_eq!(config.settle.field_ms, 5);
        assert_eq!(config.settle.navigation_ms, 300);
    }

    #[test]
    fn test_flag_base_url_is_validated() {
        let args = HarnessArgs {
            base_url: Some("till.local".to_string()),
            ..HarnessArgs::default()
        };
        assert!(resolve_harness_with(&args, no_env).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let args = HarnessArgs {
            config: Some("/nonexistent/tillprobe.yaml".into()),
            ..HarnessArgs::default()
        };
        assert!(resolve_harness_with(&args, no_env).is_err());
    }
}
