//! YAML sale scenarios.
//!
//! A scenario names the entry screen and lists workflow operations in the
//! order they are chained:
//!
//! ```yaml
//! name: cash sale of paracetamol
//! variant: cash_sale
//! steps:
//!   - action: select_product
//!     product: Paracetamol
//!   - action: select_batch_no
//!     batch_no: B100
//!   - action: enter_sold_quantity
//!     quantity: 2
//!   - action: assert_total_rate
//!     total: 2000
//!   - action: click_submit
//! ```
//!
//! `row` is optional on every line-item step and defaults to 0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

use crate::config::HarnessConfig;
use crate::driver::UiDriver;
use crate::result::{ErrorKind, ProbeError, ProbeResult};
use crate::workflow::{CashSale, CreditSale, SaleScreen, SaleVariant, SaleWorkflow, WorkflowState};

/// A scalar written into or expected from a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One workflow operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    // shared header
    ClickQuickAddCustomer,
    EnterCustomer {
        customer: String,
    },
    AssertCustomer {
        customer: Literal,
    },
    AssertCreditLimit {
        amount: f64,
    },

    // line items
    SelectProduct {
        product: String,
        #[serde(default)]
        row: Option<usize>,
    },
    SelectBatchNo {
        batch_no: String,
        #[serde(default)]
        row: Option<usize>,
    },
    AssertAvailableQuantity {
        quantity: Literal,
        #[serde(default)]
        row: Option<usize>,
    },
    AssertProductExpiryDate {
        date: Literal,
        #[serde(default)]
        row: Option<usize>,
    },
    AssertProductUnit {
        unit: Literal,
        #[serde(default)]
        row: Option<usize>,
    },
    EnterSoldQuantity {
        quantity: Literal,
        #[serde(default)]
        row: Option<usize>,
    },
    AssertSoldQuantity {
        quantity: Literal,
        #[serde(default)]
        row: Option<usize>,
    },
    EnterProductRate {
        rate: Literal,
        #[serde(default)]
        row: Option<usize>,
    },
    AssertProductRate {
        rate: Literal,
        #[serde(default)]
        row: Option<usize>,
    },
    EnterProductDiscount {
        discount: Literal,
        #[serde(default)]
        row: Option<usize>,
    },
    AssertProductDiscount {
        discount: Literal,
        #[serde(default)]
        row: Option<usize>,
    },
    AssertTotalRate {
        total: Literal,
        #[serde(default)]
        row: Option<usize>,
    },
    AddRow,
    DeleteRow {
        #[serde(default)]
        row: Option<usize>,
    },

    // cash sale
    EnterDate {
        date: Literal,
    },
    AssertDate {
        date: Literal,
    },
    SelectPaymentMethod {
        #[serde(default)]
        method: Option<String>,
    },
    AssertTotalBillAmount {
        amount: Literal,
    },
    EnterPaidAmount {
        amount: Literal,
    },
    AssertBalanceAmount {
        amount: Literal,
    },
    AssertDueAmount {
        amount: Literal,
    },

    // credit sale
    AssertOutstandingBalance {
        amount: Literal,
    },
    EnterAccountName {
        name: String,
    },
    CheckAddCardNumber,
    EnterCardNumber {
        number: Literal,
    },
    EnterInvoiceDate {
        date: Literal,
    },
    AssertInvoiceDate {
        date: Literal,
    },
    AssertGrandTotalAmount {
        amount: Literal,
    },
    AssertNetTotalAmount {
        amount: Literal,
    },
    EnterInvoiceMemo {
        memo: String,
    },

    ClickSubmit,
}

impl Step {
    /// The `action` tag of this step
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::ClickQuickAddCustomer => "click_quick_add_customer",
            Self::EnterCustomer { .. } => "enter_customer",
            Self::AssertCustomer { .. } => "assert_customer",
            Self::AssertCreditLimit { .. } => "assert_credit_limit",
            Self::SelectProduct { .. } => "select_product",
            Self::SelectBatchNo { .. } => "select_batch_no",
            Self::AssertAvailableQuantity { .. } => "assert_available_quantity",
            Self::AssertProductExpiryDate { .. } => "assert_product_expiry_date",
            Self::AssertProductUnit { .. } => "assert_product_unit",
            Self::EnterSoldQuantity { .. } => "enter_sold_quantity",
            Self::AssertSoldQuantity { .. } => "assert_sold_quantity",
            Self::EnterProductRate { .. } => "enter_product_rate",
            Self::AssertProductRate { .. } => "assert_product_rate",
            Self::EnterProductDiscount { .. } => "enter_product_discount",
            Self::AssertProductDiscount { .. } => "assert_product_discount",
            Self::AssertTotalRate { .. } => "assert_total_rate",
            Self::AddRow => "add_row",
            Self::DeleteRow { .. } => "delete_row",
            Self::EnterDate { .. } => "enter_date",
            Self::AssertDate { .. } => "assert_date",
            Self::SelectPaymentMethod { .. } => "select_payment_method",
            Self::AssertTotalBillAmount { .. } => "assert_total_bill_amount",
            Self::EnterPaidAmount { .. } => "enter_paid_amount",
            Self::AssertBalanceAmount { .. } => "assert_balance_amount",
            Self::AssertDueAmount { .. } => "assert_due_amount",
            Self::AssertOutstandingBalance { .. } => "assert_outstanding_balance",
            Self::EnterAccountName { .. } => "enter_account_name",
            Self::CheckAddCardNumber => "check_add_card_number",
            Self::EnterCardNumber { .. } => "enter_card_number",
            Self::EnterInvoiceDate { .. } => "enter_invoice_date",
            Self::AssertInvoiceDate { .. } => "assert_invoice_date",
            Self::AssertGrandTotalAmount { .. } => "assert_grand_total_amount",
            Self::AssertNetTotalAmount { .. } => "assert_net_total_amount",
            Self::EnterInvoiceMemo { .. } => "enter_invoice_memo",
            Self::ClickSubmit => "click_submit",
        }
    }

    /// The only screen this step exists on, or `None` when both have it
    #[must_use]
    pub const fn variant(&self) -> Option<SaleVariant> {
        match self {
            Self::EnterDate { .. }
            | Self::AssertDate { .. }
            | Self::SelectPaymentMethod { .. }
            | Self::AssertTotalBillAmount { .. }
            | Self::EnterPaidAmount { .. }
            | Self::AssertBalanceAmount { .. }
            | Self::AssertDueAmount { .. } => Some(SaleVariant::CashSale),
            Self::AssertOutstandingBalance { .. }
            | Self::EnterAccountName { .. }
            | Self::CheckAddCardNumber
            | Self::EnterCardNumber { .. }
            | Self::EnterInvoiceDate { .. }
            | Self::AssertInvoiceDate { .. }
            | Self::AssertGrandTotalAmount { .. }
            | Self::AssertNetTotalAmount { .. }
            | Self::EnterInvoiceMemo { .. } => Some(SaleVariant::CreditSale),
            _ => None,
        }
    }

    fn available_on(&self, variant: SaleVariant) -> bool {
        self.variant().map_or(true, |v| v == variant)
    }
}

/// A named sequence of steps against one entry screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub variant: SaleVariant,
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse and validate a scenario
    pub fn from_yaml_str(yaml: &str) -> ProbeResult<Self> {
        let scenario: Self = serde_yaml_ng::from_str(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load and validate a scenario file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
            .map_err(|e| ProbeError::scenario(format!("{}: {e}", path.display())))
    }

    /// Reject empty scenarios, steps foreign to the screen and steps after submit
    pub fn validate(&self) -> ProbeResult<()> {
        if self.steps.is_empty() {
            return Err(ProbeError::scenario(format!(
                "scenario {:?} has no steps",
                self.name
            )));
        }
        let mut submitted_at = None;
        for (i, step) in self.steps.iter().enumerate() {
            if let Some(at) = submitted_at {
                return Err(ProbeError::scenario(format!(
                    "step {i} ({}) follows click_submit at step {at}",
                    step.action()
                )));
            }
            if !step.available_on(self.variant) {
                return Err(ProbeError::scenario(format!(
                    "step {i} ({}) is not available on the {} screen",
                    step.action(),
                    self.variant
                )));
            }
            if *step == Step::ClickSubmit {
                submitted_at = Some(i);
            }
        }
        Ok(())
    }
}

// =============================================================================
// Runner
// =============================================================================

/// Where and why a run stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    /// Zero-based step index; `None` when the entry screen failed to load
    pub step: Option<usize>,
    pub action: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// Outcome of one scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub run_id: Uuid,
    pub scenario: String,
    pub variant: SaleVariant,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps_total: usize,
    pub steps_executed: usize,
    pub final_state: WorkflowState,
    pub failure: Option<StepFailure>,
}

impl ScenarioReport {
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Wall-clock time of the run
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    pub fn to_json(&self) -> ProbeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}/{} steps, {} ({} ms)",
            self.scenario,
            self.variant,
            self.steps_executed,
            self.steps_total,
            self.final_state,
            self.elapsed_ms()
        )?;
        if let Some(failure) = &self.failure {
            match failure.step {
                Some(i) => write!(f, "\n  step {i} {}: {}", failure.action, failure.message)?,
                None => write!(f, "\n  {}: {}", failure.action, failure.message)?,
            }
        }
        Ok(())
    }
}

/// Replays scenarios against a driver
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: HarnessConfig,
}

impl ScenarioRunner {
    #[must_use]
    pub const fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Visit the scenario's screen and replay its steps, stopping at the
    /// first failure. Only an invalid scenario is an `Err`.
    pub async fn run<D: UiDriver>(&self, scenario: &Scenario, driver: D) -> ProbeResult<ScenarioReport> {
        self.run_keeping_driver(scenario, driver)
            .await
            .map(|(report, _)| report)
    }

    /// Like [`run`](Self::run), handing the driver back for reuse or shutdown
    pub async fn run_keeping_driver<D: UiDriver>(
        &self,
        scenario: &Scenario,
        driver: D,
    ) -> ProbeResult<(ScenarioReport, D)> {
        scenario.validate()?;
        tracing::info!(scenario = %scenario.name, variant = %scenario.variant, "run scenario");
        let started_at = Utc::now();
        let (steps_executed, final_state, failure, driver) = match scenario.variant {
            SaleVariant::CashSale => {
                let mut sale = CashSale::from_config(driver, &self.config);
                let (executed, failure) = replay(&mut sale, &scenario.steps).await;
                let state = sale.state();
                (executed, state, failure, sale.into_session().into_driver())
            }
            SaleVariant::CreditSale => {
                let mut sale = CreditSale::from_config(driver, &self.config);
                let (executed, failure) = replay(&mut sale, &scenario.steps).await;
                let state = sale.state();
                (executed, state, failure, sale.into_session().into_driver())
            }
        };
        if let Some(failure) = &failure {
            tracing::warn!(
                scenario = %scenario.name,
                action = %failure.action,
                kind = ?failure.kind,
                "scenario failed"
            );
        }
        let report = ScenarioReport {
            run_id: Uuid::new_v4(),
            scenario: scenario.name.clone(),
            variant: scenario.variant,
            started_at,
            finished_at: Utc::now(),
            steps_total: scenario.steps.len(),
            steps_executed,
            final_state,
            failure,
        };
        Ok((report, driver))
    }
}

fn failure(step: Option<usize>, action: &str, err: &ProbeError) -> StepFailure {
    StepFailure {
        step,
        action: action.to_string(),
        kind: err.kind(),
        message: err.to_string(),
    }
}

/// A workflow that scenario steps can be replayed on
trait Replay {
    async fn visit(&mut self) -> ProbeResult<()>;

    async fn apply(&mut self, step: &Step) -> ProbeResult<()>;
}

async fn replay(sale: &mut impl Replay, steps: &[Step]) -> (usize, Option<StepFailure>) {
    if let Err(e) = sale.visit().await {
        return (0, Some(failure(None, "visit", &e)));
    }
    for (i, step) in steps.iter().enumerate() {
        tracing::debug!(step = i, action = step.action(), "replay");
        if let Err(e) = sale.apply(step).await {
            return (i, Some(failure(Some(i), step.action(), &e)));
        }
    }
    (steps.len(), None)
}

/// Apply a step both screens share; `Ok(false)` when it is not shared
async fn apply_shared<V: SaleScreen, D: UiDriver>(
    sale: &mut SaleWorkflow<V, D>,
    step: &Step,
) -> ProbeResult<bool> {
    match step {
        Step::ClickQuickAddCustomer => sale.click_quick_add_customer().await?,
        Step::EnterCustomer { customer } => sale.enter_customer(customer.as_str()).await?,
        Step::AssertCustomer { customer } => sale.assert_customer(customer).await?,
        Step::AssertCreditLimit { amount } => sale.assert_credit_limit(*amount).await?,
        Step::SelectProduct { product, row } => sale.select_product(product.as_str(), *row).await?,
        Step::SelectBatchNo { batch_no, row } => sale.select_batch_no(batch_no, *row).await?,
        Step::AssertAvailableQuantity { quantity, row } => {
            sale.assert_available_quantity(quantity, *row).await?
        }
        Step::AssertProductExpiryDate { date, row } => {
            sale.assert_product_expiry_date(date, *row).await?
        }
        Step::AssertProductUnit { unit, row } => sale.assert_product_unit(unit, *row).await?,
        Step::EnterSoldQuantity { quantity, row } => {
            sale.enter_sold_quantity(quantity, *row).await?
        }
        Step::AssertSoldQuantity { quantity, row } => {
            sale.assert_sold_quantity(quantity, *row).await?
        }
        Step::EnterProductRate { rate, row } => sale.enter_product_rate(rate, *row).await?,
        Step::AssertProductRate { rate, row } => sale.assert_product_rate(rate, *row).await?,
        Step::EnterProductDiscount { discount, row } => {
            sale.enter_product_discount(discount, *row).await?
        }
        Step::AssertProductDiscount { discount, row } => {
            sale.assert_product_discount(discount, *row).await?
        }
        Step::AssertTotalRate { total, row } => sale.assert_total_rate(total, *row).await?,
        Step::AddRow => sale.add_row().await?,
        Step::DeleteRow { row } => sale.delete_row(*row).await?,
        Step::ClickSubmit => sale.click_submit().await?,
        _ => return Ok(false),
    };
    Ok(true)
}

fn foreign(step: &Step, variant: SaleVariant) -> ProbeError {
    ProbeError::scenario(format!(
        "{} is not available on the {variant} screen",
        step.action()
    ))
}

impl<D: UiDriver> Replay for CashSale<D> {
    async fn visit(&mut self) -> ProbeResult<()> {
        SaleWorkflow::visit(self).await.map(|_| ())
    }

    async fn apply(&mut self, step: &Step) -> ProbeResult<()> {
        if apply_shared(self, step).await? {
            return Ok(());
        }
        match step {
            Step::EnterDate { date } => self.enter_date(date).await?,
            Step::AssertDate { date } => self.assert_date(date).await?,
            Step::SelectPaymentMethod { method } => {
                self.select_payment_method(method.as_deref()).await?
            }
            Step::AssertTotalBillAmount { amount } => self.assert_total_bill_amount(amount).await?,
            Step::EnterPaidAmount { amount } => self.enter_paid_amount(amount).await?,
            Step::AssertBalanceAmount { amount } => self.assert_balance_amount(amount).await?,
            Step::AssertDueAmount { amount } => self.assert_due_amount(amount).await?,
            other => return Err(foreign(other, SaleVariant::CashSale)),
        };
        Ok(())
    }
}

impl<D: UiDriver> Replay for CreditSale<D> {
    async fn visit(&mut self) -> ProbeResult<()> {
        SaleWorkflow::visit(self).await.map(|_| ())
    }

    async fn apply(&mut self, step: &Step) -> ProbeResult<()> {
        if apply_shared(self, step).await? {
            return Ok(());
        }
        match step {
            Step::AssertOutstandingBalance { amount } => {
                self.assert_outstanding_balance(amount).await?
            }
            Step::EnterAccountName { name } => self.enter_account_name(name).await?,
            Step::CheckAddCardNumber => self.check_add_card_number().await?,
            Step::EnterCardNumber { number } => self.enter_card_number(number).await?,
            Step::EnterInvoiceDate { date } => self.enter_invoice_date(date).await?,
            Step::AssertInvoiceDate { date } => self.assert_invoice_date(date).await?,
            Step::AssertGrandTotalAmount { amount } => {
                self.assert_grand_total_amount(amount).await?
            }
            Step::AssertNetTotalAmount { amount } => self.assert_net_total_amount(amount).await?,
            Step::EnterInvoiceMemo { memo } => self.enter_invoice_memo(memo).await?,
            other => return Err(foreign(other, SaleVariant::CreditSale)),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Catalog, MockTill};
    use crate::wait::SettleConfig;

    const CASH: &str = r"
name: cash sale
variant: cash_sale
steps:
  - action: select_product
    product: Paracetamol
  - action: select_batch_no
    batch_no: B100
    row: 0
  - action: enter_sold_quantity
    quantity: 2
  - action: enter_product_rate
    rate: 1000
  - action: assert_total_rate
    total: 2000
  - action: select_payment_method
  - action: enter_paid_amount
    amount: 2000
  - action: assert_balance_amount
    amount: 0
  - action: click_submit
";

    fn runner() -> ScenarioRunner {
        ScenarioRunner::new(HarnessConfig::default().with_settle(SettleConfig::immediate()))
    }

    mod schema_tests {
        use super::*;

        #[test]
        fn test_parse_defaults_row_and_method() {
            let scenario = Scenario::from_yaml_str(CASH).unwrap();
            assert_eq!(scenario.variant, SaleVariant::CashSale);
            assert_eq!(
                scenario.steps[0],
                Step::SelectProduct {
                    product: "Paracetamol".to_string(),
                    row: None
                }
            );
            assert_eq!(scenario.steps[5], Step::SelectPaymentMethod { method: None });
            assert_eq!(
                scenario.steps[2],
                Step::EnterSoldQuantity {
                    quantity: Literal::Int(2),
                    row: None
                }
            );
        }

        #[test]
        fn test_literals_render_as_typed() {
            let lits: Vec<Literal> = serde_yaml_ng::from_str("[2000, 12.5, 2027-06-30, Tablet]").unwrap();
            let shown: Vec<String> = lits.iter().map(ToString::to_string).collect();
            assert_eq!(shown, vec!["2000", "12.5", "2027-06-30", "Tablet"]);
        }

        #[test]
        fn test_rejects_empty() {
            let err = Scenario::from_yaml_str("name: x\nvariant: cash_sale\nsteps: []\n").unwrap_err();
            assert!(err.to_string().contains("no steps"));
        }

        #[test]
        fn test_rejects_foreign_step() {
            let yaml = "name: x\nvariant: cash_sale\nsteps:\n  - action: enter_invoice_memo\n    memo: hi\n";
            let err = Scenario::from_yaml_str(yaml).unwrap_err();
            assert!(err.to_string().contains("enter_invoice_memo"));
            assert!(err.to_string().contains("cash_sale"));
        }

        #[test]
        fn test_rejects_steps_after_submit() {
            let yaml = "name: x\nvariant: credit_sale\nsteps:\n  - action: click_submit\n  - action: add_row\n";
            let err = Scenario::from_yaml_str(yaml).unwrap_err();
            assert!(err.to_string().contains("follows click_submit"));
        }

        #[test]
        fn test_unknown_action_is_a_parse_error() {
            let yaml = "name: x\nvariant: cash_sale\nsteps:\n  - action: refund\n";
            assert!(matches!(
                Scenario::from_yaml_str(yaml),
                Err(ProbeError::Yaml(_))
            ));
        }

        #[test]
        fn test_file_errors_name_the_path() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("empty.yaml");
            std::fs::write(&path, "name: x\nvariant: cash_sale\nsteps: []\n").unwrap();
            let err = Scenario::from_yaml_file(&path).unwrap_err();
            assert!(err.to_string().contains("empty.yaml"));
        }

        #[test]
        fn test_step_variants() {
            assert_eq!(Step::AddRow.variant(), None);
            assert_eq!(Step::CheckAddCardNumber.variant(), Some(SaleVariant::CreditSale));
            assert_eq!(Step::ClickSubmit.action(), "click_submit");
        }
    }

    mod runner_tests {
        use super::*;

        #[tokio::test]
        async fn test_cash_scenario_passes() {
            let scenario = Scenario::from_yaml_str(CASH).unwrap();
            let report = runner()
                .run(&scenario, MockTill::new(Catalog::sample()))
                .await
                .unwrap();
            assert!(report.passed(), "{report}");
            assert_eq!(report.steps_executed, 9);
            assert_eq!(report.final_state, WorkflowState::Submitted);
        }

        #[tokio::test]
        async fn test_stops_at_first_failure() {
            let yaml = r"
name: credit limit
variant: credit_sale
steps:
  - action: enter_customer
    customer: Acme Ltd
  - action: assert_credit_limit
    amount: 400000
  - action: click_submit
";
            let scenario = Scenario::from_yaml_str(yaml).unwrap();
            let report = runner()
                .run(&scenario, MockTill::new(Catalog::sample()))
                .await
                .unwrap();
            let failure = report.failure.clone().unwrap();
            assert_eq!(failure.step, Some(1));
            assert_eq!(failure.kind, ErrorKind::AssertionMismatch);
            assert!(failure.message.contains("creditLimit"));
            assert_eq!(report.steps_executed, 1);
            assert_eq!(report.final_state, WorkflowState::Populating);
        }

        #[tokio::test]
        async fn test_navigation_failure_is_reported() {
            let scenario = Scenario::from_yaml_str(CASH).unwrap();
            let till = MockTill::new(Catalog::sample()).with_entry_paths("/a", "/b");
            let report = runner().run(&scenario, till).await.unwrap();
            let failure = report.failure.unwrap();
            assert_eq!(failure.step, None);
            assert_eq!(failure.kind, ErrorKind::NavigationFailure);
            assert_eq!(report.final_state, WorkflowState::Uninitialized);
        }

        #[tokio::test]
        async fn test_report_json() {
            let scenario = Scenario::from_yaml_str(CASH).unwrap();
            let report = runner()
                .run(&scenario, MockTill::new(Catalog::sample()))
                .await
                .unwrap();
            let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
            assert_eq!(json["variant"], "cash_sale");
            assert_eq!(json["final_state"], "submitted");
            assert!(json["failure"].is_null());
        }
    }
}
