//! Sale workflows: header fields and submission around the line-item table.
//!
//! A [`SaleWorkflow`] holds a [`RowTable`] and exposes its row operations by
//! delegation. The cash and credit screens share everything except a small
//! set of header fields and the terminal save control; that difference is
//! captured by the [`SaleScreen`] marker types and the variant-specific
//! `impl` blocks in [`cash`] and [`credit`].
//!
//! ```text
//! Uninitialized ──visit──► Navigated ──any op──► Populating ──click_submit──► Submitted
//!                              │                                                  ▲
//!                              └──────────────────click_submit────────────────────┘
//! ```

pub mod cash;
pub mod credit;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::marker::PhantomData;
use tracing::Instrument;

use crate::assertion::Expectation;
use crate::config::HarnessConfig;
use crate::currency::{plain_number, CurrencyFormatter};
use crate::data::Keyed;
use crate::driver::UiDriver;
use crate::locator::{HeaderField, RowField};
use crate::result::ProbeResult;
use crate::session::Session;
use crate::table::RowTable;

/// Transaction type of an entry screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleVariant {
    /// Receipt paid at the till
    CashSale,
    /// Invoice charged to a customer account
    CreditSale,
}

impl SaleVariant {
    /// Both variants
    pub const ALL: [Self; 2] = [Self::CashSale, Self::CreditSale];

    /// Save control that commits a record of this variant
    #[must_use]
    pub const fn submit_field(self) -> HeaderField {
        match self {
            Self::CashSale => HeaderField::SaveSale,
            Self::CreditSale => HeaderField::SaveInvoice,
        }
    }
}

impl Display for SaleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CashSale => "cash_sale",
            Self::CreditSale => "credit_sale",
        })
    }
}

/// Lifecycle of one workflow instance. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Entry screen not loaded yet
    #[default]
    Uninitialized,
    /// Entry screen loaded
    Navigated,
    /// At least one header or row operation has succeeded
    Populating,
    /// Save control clicked
    Submitted,
}

impl Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Navigated => "navigated",
            Self::Populating => "populating",
            Self::Submitted => "submitted",
        })
    }
}

/// The header operations that differ in target between entry screens
pub trait SaleScreen: Send + Sync + 'static {
    /// Variant this screen belongs to
    const VARIANT: SaleVariant;

    /// Field the customer's credit limit renders into
    const CREDIT_LIMIT: HeaderField;

    /// How the screen renders a credit limit amount
    fn render_credit_limit(amount: f64, currency: &dyn CurrencyFormatter) -> String;

    /// Save control
    #[must_use]
    fn submit_field() -> HeaderField {
        Self::VARIANT.submit_field()
    }
}

/// Cash sale entry screen
#[derive(Debug, Clone, Copy, Default)]
pub struct CashSaleScreen;

impl SaleScreen for CashSaleScreen {
    const VARIANT: SaleVariant = SaleVariant::CashSale;
    const CREDIT_LIMIT: HeaderField = HeaderField::CreditLimit;

    fn render_credit_limit(amount: f64, _currency: &dyn CurrencyFormatter) -> String {
        plain_number(amount)
    }
}

/// Credit sale entry screen
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditSaleScreen;

impl SaleScreen for CreditSaleScreen {
    const VARIANT: SaleVariant = SaleVariant::CreditSale;
    const CREDIT_LIMIT: HeaderField = HeaderField::CreditLimitFormatted;

    fn render_credit_limit(amount: f64, currency: &dyn CurrencyFormatter) -> String {
        currency.format(amount)
    }
}

/// Cash sale workflow
pub type CashSale<D> = SaleWorkflow<CashSaleScreen, D>;

/// Credit sale workflow
pub type CreditSale<D> = SaleWorkflow<CreditSaleScreen, D>;

/// Chainable workflow over one sale entry screen
#[derive(Debug)]
pub struct SaleWorkflow<V, D> {
    table: RowTable<D>,
    entry_url: String,
    state: WorkflowState,
    screen: PhantomData<V>,
}

impl<V: SaleScreen, D: UiDriver> SaleWorkflow<V, D> {
    /// Create a workflow that will load `entry_url` on [`visit`](Self::visit)
    #[must_use]
    pub fn new(session: Session<D>, entry_url: impl Into<String>) -> Self {
        Self {
            table: RowTable::new(session),
            entry_url: entry_url.into(),
            state: WorkflowState::Uninitialized,
            screen: PhantomData,
        }
    }

    /// Create a workflow from harness configuration
    #[must_use]
    pub fn from_config(driver: D, config: &HarnessConfig) -> Self {
        Self::new(
            Session::from_config(driver, config),
            config.entry_url(V::VARIANT),
        )
    }

    #[must_use]
    pub const fn state(&self) -> WorkflowState {
        self.state
    }

    #[must_use]
    pub const fn variant(&self) -> SaleVariant {
        V::VARIANT
    }

    #[must_use]
    pub fn entry_url(&self) -> &str {
        &self.entry_url
    }

    #[must_use]
    pub const fn table(&self) -> &RowTable<D> {
        &self.table
    }

    #[must_use]
    pub const fn session(&self) -> &Session<D> {
        self.table.session()
    }

    pub fn session_mut(&mut self) -> &mut Session<D> {
        self.table.session_mut()
    }

    /// Give the session back
    #[must_use]
    pub fn into_session(self) -> Session<D> {
        self.table.into_session()
    }

    // Operations after submit are issued anyway; the screen decides what
    // happens to them.
    fn begin(&self, op: &'static str) {
        if self.state == WorkflowState::Submitted {
            tracing::warn!(op, variant = %V::VARIANT, "operation issued after submit");
        }
    }

    fn populated(&mut self) -> &mut Self {
        if self.state == WorkflowState::Navigated {
            self.state = WorkflowState::Populating;
        }
        self
    }

    pub(crate) async fn fill_header(
        &mut self,
        op: &'static str,
        field: HeaderField,
        value: impl Display,
    ) -> ProbeResult<&mut Self> {
        self.begin(op);
        self.session_mut()
            .fill(&field.selector(), value)
            .instrument(tracing::debug_span!("sale_op", op))
            .await?;
        Ok(self.populated())
    }

    pub(crate) async fn expect_header(
        &mut self,
        op: &'static str,
        field: HeaderField,
        expected: impl Display,
    ) -> ProbeResult<&mut Self> {
        self.begin(op);
        let mut expectation = Expectation::header(field.test_id(), expected.to_string());
        if field.is_amount() {
            expectation = expectation.amount();
        }
        self.session()
            .expect(&field.selector(), expectation)
            .instrument(tracing::debug_span!("sale_op", op))
            .await?;
        Ok(self.populated())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Load the entry screen and wait out the navigation window
    pub async fn visit(&mut self) -> ProbeResult<&mut Self> {
        self.begin("visit");
        let url = self.entry_url.clone();
        self.table.session_mut().visit(&url).await?;
        if self.state == WorkflowState::Uninitialized {
            self.state = WorkflowState::Navigated;
        }
        Ok(self)
    }

    /// Click the variant's save control. Terminal.
    pub async fn click_submit(&mut self) -> ProbeResult<&mut Self> {
        self.begin("click_submit");
        let field = V::submit_field();
        self.session_mut().click(&field.selector()).await?;
        tracing::info!(variant = %V::VARIANT, control = %field, "sale submitted");
        self.state = WorkflowState::Submitted;
        Ok(self)
    }

    // =========================================================================
    // Shared header
    // =========================================================================

    pub async fn click_quick_add_customer(&mut self) -> ProbeResult<&mut Self> {
        self.begin("click_quick_add_customer");
        self.session_mut()
            .click(&HeaderField::QuickAddCustomer.selector())
            .await?;
        Ok(self.populated())
    }

    /// Pick a customer from the customer typeahead
    pub async fn enter_customer(
        &mut self,
        customer: &(impl Keyed + ?Sized),
    ) -> ProbeResult<&mut Self> {
        self.begin("enter_customer");
        self.session_mut()
            .pick(&HeaderField::Customer.selector(), customer.key())
            .instrument(tracing::debug_span!("sale_op", op = "enter_customer"))
            .await?;
        Ok(self.populated())
    }

    pub async fn assert_customer(&mut self, customer: impl Display) -> ProbeResult<&mut Self> {
        self.expect_header("assert_customer", HeaderField::Customer, customer)
            .await
    }

    /// Assert the selected customer's credit limit as this screen renders it
    pub async fn assert_credit_limit(&mut self, amount: f64) -> ProbeResult<&mut Self> {
        let rendered = V::render_credit_limit(amount, self.session().currency());
        self.expect_header("assert_credit_limit", V::CREDIT_LIMIT, rendered)
            .await
    }

    // =========================================================================
    // Line items, delegated to the row table
    // =========================================================================

    pub async fn select_product(
        &mut self,
        product: &(impl Keyed + ?Sized),
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("select_product");
        self.table.select_product(product, row).await?;
        Ok(self.populated())
    }

    pub async fn select_batch_no(
        &mut self,
        batch_no: &str,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("select_batch_no");
        self.table.select_batch_no(batch_no, row).await?;
        Ok(self.populated())
    }

    pub async fn assert_available_quantity(
        &mut self,
        qty: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("assert_available_quantity");
        self.table.assert_available_quantity(qty, row).await?;
        Ok(self.populated())
    }

    pub async fn assert_product_expiry_date(
        &mut self,
        date: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("assert_product_expiry_date");
        self.table.assert_product_expiry_date(date, row).await?;
        Ok(self.populated())
    }

    pub async fn assert_product_unit(
        &mut self,
        unit: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("assert_product_unit");
        self.table.assert_product_unit(unit, row).await?;
        Ok(self.populated())
    }

    pub async fn enter_sold_quantity(
        &mut self,
        qty: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("enter_sold_quantity");
        self.table.enter_sold_quantity(qty, row).await?;
        Ok(self.populated())
    }

    pub async fn assert_sold_quantity(
        &mut self,
        qty: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("assert_sold_quantity");
        self.table.assert_sold_quantity(qty, row).await?;
        Ok(self.populated())
    }

    pub async fn enter_product_rate(
        &mut self,
        rate: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("enter_product_rate");
        self.table.enter_product_rate(rate, row).await?;
        Ok(self.populated())
    }

    pub async fn assert_product_rate(
        &mut self,
        rate: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("assert_product_rate");
        self.table.assert_product_rate(rate, row).await?;
        Ok(self.populated())
    }

    pub async fn enter_product_discount(
        &mut self,
        discount: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("enter_product_discount");
        self.table.enter_product_discount(discount, row).await?;
        Ok(self.populated())
    }

    pub async fn assert_product_discount(
        &mut self,
        discount: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("assert_product_discount");
        self.table.assert_product_discount(discount, row).await?;
        Ok(self.populated())
    }

    pub async fn assert_total_rate(
        &mut self,
        total: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.begin("assert_total_rate");
        self.table.assert_total_rate(total, row).await?;
        Ok(self.populated())
    }

    pub async fn add_row(&mut self) -> ProbeResult<&mut Self> {
        self.begin("add_row");
        self.table.add_row().await?;
        Ok(self.populated())
    }

    pub async fn delete_row(&mut self, row: impl Into<Option<usize>>) -> ProbeResult<&mut Self> {
        self.begin("delete_row");
        self.table.delete_row(row).await?;
        Ok(self.populated())
    }

    /// Number of rendered rows
    pub async fn row_count(&self) -> ProbeResult<usize> {
        self.table.row_count().await
    }

    /// Raw rendered value of a row field
    pub async fn read_field(
        &self,
        field: RowField,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<String> {
        self.table.read_field(field, row).await
    }
}
