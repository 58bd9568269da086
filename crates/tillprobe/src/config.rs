//! Harness configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! `TILLPROBE_*` environment variables. The CLI applies its flags last.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assertion::MatchMode;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::SettleConfig;
use crate::workflow::SaleVariant;

/// Default application address
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Cash sale entry screen (new receipt)
pub const CASH_SALE_PATH: &str = "/sales/new-receipt";

/// Credit sale entry screen (new invoice)
pub const CREDIT_SALE_PATH: &str = "/sales/new-invoice";

/// Configuration shared by every workflow in a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Application base URL
    pub base_url: String,
    /// Path of the cash sale screen
    pub cash_sale_path: String,
    /// Path of the credit sale screen
    pub credit_sale_path: String,
    /// Settle windows
    pub settle: SettleConfig,
    /// How rendered values are compared
    pub match_mode: MatchMode,
    /// Currency code used for formatted amounts
    pub currency_code: String,
    /// Run the browser headless
    pub headless: bool,
    /// Path to the chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cash_sale_path: CASH_SALE_PATH.to_string(),
            credit_sale_path: CREDIT_SALE_PATH.to_string(),
            settle: SettleConfig::default(),
            match_mode: MatchMode::default(),
            currency_code: "UGX".to_string(),
            headless: true,
            chromium_path: None,
        }
    }
}

impl HarnessConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a YAML file, keeping defaults for absent keys
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Parse from YAML text
    pub fn from_yaml_str(text: &str) -> ProbeResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `TILLPROBE_*` environment variables
    pub fn apply_env(self) -> ProbeResult<Self> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values from a variable lookup
    pub fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> ProbeResult<Self> {
        if let Some(url) = lookup("TILLPROBE_BASE_URL") {
            self.base_url = url;
        }
        if let Some(ms) = lookup("TILLPROBE_FIELD_SETTLE_MS") {
            self.settle.field_ms = parse_ms("TILLPROBE_FIELD_SETTLE_MS", &ms)?;
        }
        if let Some(ms) = lookup("TILLPROBE_NAVIGATION_SETTLE_MS") {
            self.settle.navigation_ms = parse_ms("TILLPROBE_NAVIGATION_SETTLE_MS", &ms)?;
        }
        if let Some(flag) = lookup("TILLPROBE_HEADLESS") {
            self.headless = !matches!(flag.as_str(), "0" | "false" | "no");
        }
        if let Some(path) = lookup("CHROMIUM_PATH") {
            self.chromium_path = Some(path);
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the config is usable
    pub fn validate(&self) -> ProbeResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProbeError::config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        for path in [&self.cash_sale_path, &self.credit_sale_path] {
            if !path.starts_with('/') {
                return Err(ProbeError::config(format!(
                    "entry path must start with '/', got {path:?}"
                )));
            }
        }
        if self.currency_code.trim().is_empty() {
            return Err(ProbeError::config("currency_code must not be empty"));
        }
        Ok(())
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the settle windows
    #[must_use]
    pub const fn with_settle(mut self, settle: SettleConfig) -> Self {
        self.settle = settle;
        self
    }

    /// Set the match mode
    #[must_use]
    pub const fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Entry screen URL for a variant
    #[must_use]
    pub fn entry_url(&self, variant: SaleVariant) -> String {
        let path = match variant {
            SaleVariant::CashSale => &self.cash_sale_path,
            SaleVariant::CreditSale => &self.credit_sale_path,
        };
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> ProbeResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

fn parse_ms(key: &str, value: &str) -> ProbeResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| ProbeError::config(format!("{key} must be milliseconds, got {value:?}")))
}
