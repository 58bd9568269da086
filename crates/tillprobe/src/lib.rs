//! Tillprobe: chainable page objects for point-of-sale sale screens
//!
//! Tillprobe drives the cash and credit sale entry screens of a point-of-sale
//! web application and interleaves interactions with assertions on the
//! values the screen computes (line totals, balances, credit limits).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    TILLPROBE Architecture                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ SaleWork-  │    │ RowTable   │    │ Session    │            │
//! │   │ flow<V,D>  │───►│ (rows)     │───►│ settle +   │──► UiDriver│
//! │   │ cash/credit│    │            │    │ require    │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tillprobe::{CashSale, Catalog, HarnessConfig, MockTill, Product};
//!
//! let mut sale = CashSale::from_config(MockTill::new(Catalog::sample()), &HarnessConfig::default());
//! sale.visit().await?
//!     .select_product(&Product::named("Paracetamol"), 0).await?
//!     .select_batch_no("B100", 0).await?
//!     .enter_sold_quantity(2, 0).await?
//!     .enter_product_rate(1000, 0).await?
//!     .assert_total_rate(2000, 0).await?
//!     .select_payment_method(Some("Cash")).await?
//!     .enter_paid_amount(2000).await?
//!     .assert_balance_amount(0).await?
//!     .click_submit().await?;
//! ```

#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod assertion;
mod currency;
mod data;
mod driver;
mod locator;
mod result;
mod session;
mod table;
mod typeahead;

pub mod config;
pub mod wait;

/// In-memory sale screen for tests and dry runs
pub mod mock;

/// YAML scenarios and their runner
#[allow(clippy::missing_errors_doc)]
pub mod scenario;

/// Sale workflows (cash and credit)
#[allow(clippy::missing_errors_doc)]
pub mod workflow;

/// Real browser control (requires the `browser` feature)
#[cfg(feature = "browser")]
#[allow(clippy::missing_errors_doc)]
pub mod cdp;

pub use assertion::{AssertionResult, Expectation, MatchMode};
#[cfg(feature = "browser")]
pub use cdp::{ChromiumDriver, ChromiumOptions};
pub use config::{HarnessConfig, CASH_SALE_PATH, CREDIT_SALE_PATH, DEFAULT_BASE_URL};
pub use currency::{plain_number, CurrencyFormatter, GroupedCurrency};
pub use data::{Customer, Keyed, Product};
pub use driver::UiDriver;
pub use locator::{parse_row_test_id, row_or_default, HeaderField, RowField, Selector, DEFAULT_ROW};
pub use mock::{Batch, Catalog, CatalogCustomer, CatalogProduct, Interaction, MockTill, Verb};
pub use result::{ErrorKind, ProbeError, ProbeResult};
pub use scenario::{Scenario, ScenarioReport, ScenarioRunner, Step};
pub use session::Session;
pub use table::RowTable;
pub use typeahead::{matching as matching_options, resolve as resolve_option};
pub use wait::{SettleConfig, SettleKind, DEFAULT_FIELD_SETTLE_MS, DEFAULT_NAVIGATION_SETTLE_MS};
pub use workflow::{
    CashSale, CashSaleScreen, CreditSale, CreditSaleScreen, SaleScreen, SaleVariant, SaleWorkflow,
    WorkflowState,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        CashSale, Catalog, CreditSale, Customer, ErrorKind, HarnessConfig, MockTill, ProbeError,
        ProbeResult, Product, RowField, SaleVariant, Session, SettleConfig, UiDriver,
        WorkflowState,
    };
}
