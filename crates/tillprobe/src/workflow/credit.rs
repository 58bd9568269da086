//! Credit sale header: account, optional card number, invoice fields and
//! totals.

use std::fmt::Display;

use super::{CreditSaleScreen, SaleWorkflow};
use crate::driver::UiDriver;
use crate::locator::HeaderField;
use crate::result::ProbeResult;

impl<D: UiDriver> SaleWorkflow<CreditSaleScreen, D> {
    pub async fn assert_outstanding_balance(
        &mut self,
        amount: impl Display,
    ) -> ProbeResult<&mut Self> {
        self.expect_header(
            "assert_outstanding_balance",
            HeaderField::OutstandingBalance,
            amount,
        )
        .await
    }

    pub async fn enter_account_name(&mut self, name: impl Display) -> ProbeResult<&mut Self> {
        self.fill_header("enter_account_name", HeaderField::AccountName, name)
            .await
    }

    /// Opt in to a card number; the card input only renders afterwards
    pub async fn check_add_card_number(&mut self) -> ProbeResult<&mut Self> {
        self.begin("check_add_card_number");
        self.session_mut()
            .check(&HeaderField::AddCardNumber.selector())
            .await?;
        Ok(self.populated())
    }

    pub async fn enter_card_number(&mut self, number: impl Display) -> ProbeResult<&mut Self> {
        self.fill_header("enter_card_number", HeaderField::CardNumber, number)
            .await
    }

    pub async fn enter_invoice_date(&mut self, date: impl Display) -> ProbeResult<&mut Self> {
        self.fill_header("enter_invoice_date", HeaderField::InvoiceDate, date)
            .await
    }

    pub async fn assert_invoice_date(&mut self, date: impl Display) -> ProbeResult<&mut Self> {
        self.expect_header("assert_invoice_date", HeaderField::InvoiceDate, date)
            .await
    }

    /// Sum before discounts
    pub async fn assert_grand_total_amount(
        &mut self,
        amount: impl Display,
    ) -> ProbeResult<&mut Self> {
        self.expect_header("assert_grand_total_amount", HeaderField::GrandTotal, amount)
            .await
    }

    /// Sum after discounts
    pub async fn assert_net_total_amount(
        &mut self,
        amount: impl Display,
    ) -> ProbeResult<&mut Self> {
        self.expect_header("assert_net_total_amount", HeaderField::NetTotal, amount)
            .await
    }

    pub async fn enter_invoice_memo(&mut self, memo: impl Display) -> ProbeResult<&mut Self> {
        self.fill_header("enter_invoice_memo", HeaderField::InvoiceMemo, memo)
            .await
    }
}
