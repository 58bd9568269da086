//! UiDriver - Abstract Automation Engine Trait
//!
//! The harness never queries the DOM itself. Everything it does to a live
//! screen goes through one of the verbs below, addressed by a [`Selector`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  SaleWorkflow ──► RowTable ──► Session ──► UiDriver (trait)      │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌─────────────────────┐            ┌─────────────────────┐     │
//! │   │  ChromiumDriver     │            │  MockTill           │     │
//! │   │  (feature browser)  │            │  (in-memory screen) │     │
//! │   │  CDP via            │            │  unit/integration   │     │
//! │   │  chromiumoxide      │            │  tests, simulate    │     │
//! │   └─────────────────────┘            └─────────────────────┘     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations report a locator that resolves to nothing as
//! [`ProbeError::ElementUnavailable`](crate::ProbeError::ElementUnavailable)
//! and a `select_option` value that is not offered as
//! [`ProbeError::SelectionNotFound`](crate::ProbeError::SelectionNotFound).

use async_trait::async_trait;
use std::time::Duration;

use crate::locator::Selector;
use crate::result::ProbeResult;

/// Abstract driver trait for the automation engine
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Navigate to URL
    async fn navigate(&mut self, url: &str) -> ProbeResult<()>;

    /// Get current URL
    async fn current_url(&self) -> ProbeResult<String>;

    /// Number of elements matching a selector
    async fn count(&self, selector: &Selector) -> ProbeResult<usize>;

    /// Whether a selector resolves to at least one element
    async fn exists(&self, selector: &Selector) -> ProbeResult<bool> {
        Ok(self.count(selector).await? > 0)
    }

    /// Click element
    async fn click(&mut self, selector: &Selector) -> ProbeResult<()>;

    /// Clear the value of an input
    async fn clear(&mut self, selector: &Selector) -> ProbeResult<()>;

    /// Type text into element, appending to its current value
    async fn type_text(&mut self, selector: &Selector, text: &str) -> ProbeResult<()>;

    /// Tick a checkbox
    async fn check(&mut self, selector: &Selector) -> ProbeResult<()>;

    /// Choose an option of a native `<select>`
    async fn select_option(&mut self, selector: &Selector, value: &str) -> ProbeResult<()>;

    /// Rendered value of an input, or text of any other element
    async fn read_value(&self, selector: &Selector) -> ProbeResult<String>;

    /// Labels of the currently open typeahead option list
    async fn options(&self) -> ProbeResult<Vec<String>>;

    /// Choose an option of the open typeahead list by its label
    async fn choose_option(&mut self, label: &str) -> ProbeResult<()>;

    /// Bounded wait primitive used for settling
    async fn pause(&self, window: Duration) {
        if !window.is_zero() {
            tokio::time::sleep(window).await;
        }
    }
}
