//! Cash sale header: date, payment method, paid amount and the
//! balance/due split.

use std::fmt::Display;

use super::{CashSaleScreen, SaleWorkflow};
use crate::driver::UiDriver;
use crate::locator::HeaderField;
use crate::result::ProbeResult;

/// Payment method chosen when none is given
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

impl<D: UiDriver> SaleWorkflow<CashSaleScreen, D> {
    pub async fn enter_date(&mut self, date: impl Display) -> ProbeResult<&mut Self> {
        self.fill_header("enter_date", HeaderField::Date, date).await
    }

    pub async fn assert_date(&mut self, date: impl Display) -> ProbeResult<&mut Self> {
        self.expect_header("assert_date", HeaderField::Date, date)
            .await
    }

    /// Choose a payment method; the select lists methods in upper case.
    pub async fn select_payment_method(&mut self, method: Option<&str>) -> ProbeResult<&mut Self> {
        self.begin("select_payment_method");
        let value = method.unwrap_or(DEFAULT_PAYMENT_METHOD).to_uppercase();
        self.session_mut()
            .select_option(&HeaderField::PaymentMethod.selector(), &value)
            .await?;
        Ok(self.populated())
    }

    /// Sum of the line totals
    pub async fn assert_total_bill_amount(&mut self, amount: impl Display) -> ProbeResult<&mut Self> {
        self.expect_header("assert_total_bill_amount", HeaderField::TotalAmount, amount)
            .await
    }

    pub async fn enter_paid_amount(&mut self, amount: impl Display) -> ProbeResult<&mut Self> {
        self.fill_header("enter_paid_amount", HeaderField::PaidAmount, amount)
            .await
    }

    /// Change owed to the customer
    pub async fn assert_balance_amount(&mut self, amount: impl Display) -> ProbeResult<&mut Self> {
        self.expect_header("assert_balance_amount", HeaderField::BalanceAmount, amount)
            .await
    }

    /// Amount still owed by the customer
    pub async fn assert_due_amount(&mut self, amount: impl Display) -> ProbeResult<&mut Self> {
        self.expect_header("assert_due_amount", HeaderField::DueAmount, amount)
            .await
    }
}
