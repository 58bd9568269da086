//! Session: the single mutator of one live UI session.
//!
//! Every interaction follows the same discipline. The locator must resolve
//! first (otherwise [`ProbeError::ElementUnavailable`]), the verb is
//! dispatched, and then the session settles for the configured window before
//! control returns. Reads compare first and settle after a successful match.

use std::fmt::Display;
use std::sync::Arc;

use crate::assertion::{Expectation, MatchMode};
use crate::config::HarnessConfig;
use crate::currency::{CurrencyFormatter, GroupedCurrency};
use crate::driver::UiDriver;
use crate::locator::Selector;
use crate::result::{ProbeError, ProbeResult};
use crate::typeahead;
use crate::wait::{SettleConfig, SettleKind};

/// Driver plus the policies applied around every interaction
#[derive(Debug)]
pub struct Session<D> {
    driver: D,
    settle: SettleConfig,
    match_mode: MatchMode,
    currency: Arc<dyn CurrencyFormatter>,
}

impl<D: UiDriver> Session<D> {
    /// Create a session with explicit settle windows
    #[must_use]
    pub fn new(driver: D, settle: SettleConfig) -> Self {
        Self {
            driver,
            settle,
            match_mode: MatchMode::default(),
            currency: Arc::new(GroupedCurrency::ugx()),
        }
    }

    /// Create a session from harness configuration
    #[must_use]
    pub fn from_config(driver: D, config: &HarnessConfig) -> Self {
        Self::new(driver, config.settle)
            .with_match_mode(config.match_mode)
            .with_currency(GroupedCurrency::new(config.currency_code.clone(), 0))
    }

    /// Set the match mode
    #[must_use]
    pub const fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set the currency formatter
    #[must_use]
    pub fn with_currency(mut self, formatter: impl CurrencyFormatter + 'static) -> Self {
        self.currency = Arc::new(formatter);
        self
    }

    /// Settle windows
    #[must_use]
    pub const fn settle_config(&self) -> &SettleConfig {
        &self.settle
    }

    /// Match mode
    #[must_use]
    pub const fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Currency formatter
    #[must_use]
    pub fn currency(&self) -> &dyn CurrencyFormatter {
        self.currency.as_ref()
    }

    /// Underlying driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Underlying driver, mutably
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give the driver back
    #[must_use]
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Wait out a settle window
    pub async fn settle(&self, kind: SettleKind) {
        let window = self.settle.window(kind);
        tracing::trace!(%kind, ms = window.as_millis() as u64, "settle");
        self.driver.pause(window).await;
    }

    /// Fail with `ElementUnavailable` unless the selector resolves
    pub async fn require(&self, selector: &Selector) -> ProbeResult<()> {
        if self.driver.exists(selector).await? {
            Ok(())
        } else {
            Err(ProbeError::unavailable(selector.to_string()))
        }
    }

    /// Load an entry screen and wait out the navigation window
    pub async fn visit(&mut self, url: &str) -> ProbeResult<()> {
        tracing::info!(url, "navigate");
        self.driver.navigate(url).await.map_err(|e| match e {
            ProbeError::NavigationFailure { .. } => e,
            other => ProbeError::NavigationFailure {
                url: url.to_string(),
                message: other.to_string(),
            },
        })?;
        self.settle(SettleKind::Navigation).await;
        Ok(())
    }

    /// Click a control
    pub async fn click(&mut self, selector: &Selector) -> ProbeResult<()> {
        self.require(selector).await?;
        tracing::debug!(%selector, "click");
        self.driver.click(selector).await?;
        self.settle(SettleKind::Field).await;
        Ok(())
    }

    /// Tick a checkbox
    pub async fn check(&mut self, selector: &Selector) -> ProbeResult<()> {
        self.require(selector).await?;
        tracing::debug!(%selector, "check");
        self.driver.check(selector).await?;
        self.settle(SettleKind::Field).await;
        Ok(())
    }

    /// Choose an option of a native select
    pub async fn select_option(&mut self, selector: &Selector, value: &str) -> ProbeResult<()> {
        self.require(selector).await?;
        tracing::debug!(%selector, value, "select");
        self.driver.select_option(selector, value).await?;
        self.settle(SettleKind::Field).await;
        Ok(())
    }

    /// Clear an input, then type `value` into it
    pub async fn fill(&mut self, selector: &Selector, value: impl Display) -> ProbeResult<()> {
        self.require(selector).await?;
        let text = value.to_string();
        tracing::debug!(%selector, text = %text, "fill");
        self.driver.clear(selector).await?;
        self.settle(SettleKind::Field).await;
        self.driver.type_text(selector, &text).await?;
        self.settle(SettleKind::Field).await;
        Ok(())
    }

    /// Search a typeahead for `key` and choose the option it resolves to
    pub async fn pick(&mut self, selector: &Selector, key: &str) -> ProbeResult<String> {
        self.require(selector).await?;
        tracing::debug!(%selector, key, "pick");
        self.driver.clear(selector).await?;
        self.driver.type_text(selector, key).await?;
        self.settle(SettleKind::Field).await;

        let candidates = self.driver.options().await?;
        let Some(label) = typeahead::resolve(key, &candidates).map(str::to_string) else {
            return Err(ProbeError::SelectionNotFound {
                locator: selector.to_string(),
                key: key.to_string(),
                candidates,
            });
        };
        self.driver.choose_option(&label).await?;
        self.settle(SettleKind::Field).await;
        Ok(label)
    }

    /// Rendered value of a control
    pub async fn read(&self, selector: &Selector) -> ProbeResult<String> {
        self.require(selector).await?;
        self.driver.read_value(selector).await
    }

    /// Number of elements matching a selector
    pub async fn count(&self, selector: &Selector) -> ProbeResult<usize> {
        self.driver.count(selector).await
    }

    /// Read a control and compare it with an expectation
    pub async fn expect(&self, selector: &Selector, expectation: Expectation) -> ProbeResult<()> {
        let actual = self.read(selector).await?;
        let expectation = expectation.with_text_mode(self.match_mode);
        tracing::debug!(%selector, expected = expectation.expected(), actual = %actual, "expect");
        expectation.verify(&actual)?;
        self.settle(SettleKind::Field).await;
        Ok(())
    }
}
