//! Line-item table controller.
//!
//! Exposes one chainable operation per logical field of a line-item row,
//! each addressed by a zero-based row index (`None` means row 0), plus the
//! add/delete row mutations.
//!
//! Row indices are positions, not identities: deleting row `k` moves every
//! later row down by one. The controller keeps no row bookkeeping of its own
//! and addresses whatever row is rendered at the index it is given.
//!
//! # Example
//!
//! ```ignore
//! table
//!     .select_product(&Product::named("Paracetamol"), 0).await?
//!     .select_batch_no("B100", 0).await?
//!     .enter_sold_quantity(2, 0).await?
//!     .enter_product_rate(1000, 0).await?
//!     .assert_total_rate(2000, 0).await?;
//! ```

use std::fmt::Display;
use tracing::Instrument;

use crate::assertion::Expectation;
use crate::data::Keyed;
use crate::driver::UiDriver;
use crate::locator::{row_or_default, HeaderField, RowField};
use crate::result::ProbeResult;
use crate::session::Session;

/// Chainable controller over the line-item rows of a sale screen
#[derive(Debug)]
pub struct RowTable<D> {
    session: Session<D>,
}

impl<D: UiDriver> RowTable<D> {
    /// Create a table controller over a session
    #[must_use]
    pub const fn new(session: Session<D>) -> Self {
        Self { session }
    }

    /// The session this table drives
    #[must_use]
    pub const fn session(&self) -> &Session<D> {
        &self.session
    }

    /// The session this table drives, mutably
    pub fn session_mut(&mut self) -> &mut Session<D> {
        &mut self.session
    }

    /// Give the session back
    #[must_use]
    pub fn into_session(self) -> Session<D> {
        self.session
    }

    async fn expect_row(
        &self,
        field: RowField,
        row: usize,
        expected: impl Display,
    ) -> ProbeResult<()> {
        let mut expectation = Expectation::row(field.stem(), row, expected.to_string());
        if field.is_amount() {
            expectation = expectation.amount();
        }
        self.session.expect(&field.at(row), expectation).await
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a catalog product into a row
    pub async fn select_product(
        &mut self,
        product: &(impl Keyed + ?Sized),
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        let row = row_or_default(row);
        self.session
            .pick(&RowField::Product.at(row), product.key())
            .instrument(tracing::debug_span!("select_product", row))
            .await?;
        Ok(self)
    }

    /// Select a batch of the row's product.
    ///
    /// Batch options are scoped to the product already selected in the row,
    /// so calling this first yields `SelectionNotFound`.
    pub async fn select_batch_no(
        &mut self,
        batch_no: &str,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        let row = row_or_default(row);
        self.session
            .pick(&RowField::Batch.at(row), batch_no)
            .instrument(tracing::debug_span!("select_batch_no", row))
            .await?;
        Ok(self)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Enter the quantity sold
    pub async fn enter_sold_quantity(
        &mut self,
        qty: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        let row = row_or_default(row);
        self.session.fill(&RowField::Quantity.at(row), qty).await?;
        Ok(self)
    }

    /// Enter the unit rate
    pub async fn enter_product_rate(
        &mut self,
        rate: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        let row = row_or_default(row);
        self.session.fill(&RowField::Rate.at(row), rate).await?;
        Ok(self)
    }

    /// Enter the discount
    pub async fn enter_product_discount(
        &mut self,
        discount: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        let row = row_or_default(row);
        self.session.fill(&RowField::Discount.at(row), discount).await?;
        Ok(self)
    }

    // =========================================================================
    // Assertions
    // =========================================================================

    pub async fn assert_available_quantity(
        &mut self,
        qty: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.expect_row(RowField::AvailableQuantity, row_or_default(row), qty)
            .await?;
        Ok(self)
    }

    pub async fn assert_product_expiry_date(
        &mut self,
        date: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.expect_row(RowField::ExpiryDate, row_or_default(row), date)
            .await?;
        Ok(self)
    }

    pub async fn assert_product_unit(
        &mut self,
        unit: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.expect_row(RowField::Unit, row_or_default(row), unit).await?;
        Ok(self)
    }

    pub async fn assert_sold_quantity(
        &mut self,
        qty: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.expect_row(RowField::Quantity, row_or_default(row), qty)
            .await?;
        Ok(self)
    }

    pub async fn assert_product_rate(
        &mut self,
        rate: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.expect_row(RowField::Rate, row_or_default(row), rate).await?;
        Ok(self)
    }

    pub async fn assert_product_discount(
        &mut self,
        discount: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.expect_row(RowField::Discount, row_or_default(row), discount)
            .await?;
        Ok(self)
    }

    /// Assert the computed line total
    pub async fn assert_total_rate(
        &mut self,
        total: impl Display,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<&mut Self> {
        self.expect_row(RowField::TotalPrice, row_or_default(row), total)
            .await?;
        Ok(self)
    }

    // =========================================================================
    // Table shape
    // =========================================================================

    /// Append an empty row; its index is the previous row count
    pub async fn add_row(&mut self) -> ProbeResult<&mut Self> {
        self.session.click(&HeaderField::AddRow.selector()).await?;
        Ok(self)
    }

    /// Remove a row, shifting later rows down by one
    pub async fn delete_row(&mut self, row: impl Into<Option<usize>>) -> ProbeResult<&mut Self> {
        let row = row_or_default(row);
        self.session.click(&RowField::Delete.at(row)).await?;
        Ok(self)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of rendered rows
    pub async fn row_count(&self) -> ProbeResult<usize> {
        self.session.count(&RowField::Delete.every_row()).await
    }

    /// Raw rendered value of a row field
    pub async fn read_field(
        &self,
        field: RowField,
        row: impl Into<Option<usize>>,
    ) -> ProbeResult<String> {
        self.session.read(&field.at(row_or_default(row))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Product;
    use crate::mock::{Catalog, MockTill};
    use crate::result::{ErrorKind, ProbeError};
    use crate::wait::SettleConfig;

    async fn table() -> RowTable<MockTill> {
        let mut session = Session::new(MockTill::new(Catalog::sample()), SettleConfig::immediate());
        session
            .visit("http://localhost:3000/sales/new-receipt")
            .await
            .unwrap();
        RowTable::new(session)
    }

    mod selection_tests {
        use super::*;

        #[tokio::test]
        async fn test_batch_populates_dependent_fields() {
            let mut t = table().await;
            t.select_product(&Product::named("Paracetamol"), 0)
                .await
                .unwrap()
                .select_batch_no("B100", 0)
                .await
                .unwrap()
                .assert_available_quantity(120, 0)
                .await
                .unwrap()
                .assert_product_expiry_date("2027-06-30", 0)
                .await
                .unwrap()
                .assert_product_unit("Tablet", 0)
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_batch_before_product_is_not_found() {
            let mut t = table().await;
            let err = t.select_batch_no("B100", 0).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::SelectionNotFound);
        }

        #[tokio::test]
        async fn test_batch_of_other_product_is_not_found() {
            let mut t = table().await;
            t.select_product("Amoxicillin", None).await.unwrap();
            let err = t.select_batch_no("B100", None).await.unwrap_err();
            match err {
                ProbeError::SelectionNotFound { candidates, .. } => assert!(candidates.is_empty()),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    mod input_tests {
        use super::*;

        #[tokio::test]
        async fn test_rate_round_trip() {
            let mut t = table().await;
            t.enter_product_rate(5000, 0)
                .await
                .unwrap()
                .assert_product_rate(5000, 0)
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_rate_is_cleared_before_typing() {
            let mut t = table().await;
            t.enter_product_rate(5000, 0)
                .await
                .unwrap()
                .enter_product_rate(7000, 0)
                .await
                .unwrap()
                .assert_product_rate(7000, 0)
                .await
                .unwrap();
            let rendered = t.read_field(RowField::Rate, 0).await.unwrap();
            assert!(!rendered.contains("5000"));
        }

        #[tokio::test]
        async fn test_discount_entry_and_assertion() {
            let mut t = table().await;
            t.select_product("Paracetamol", 0)
                .await
                .unwrap()
                .select_batch_no("B100", 0)
                .await
                .unwrap()
                .enter_sold_quantity(3, 0)
                .await
                .unwrap()
                .enter_product_rate(1000, 0)
                .await
                .unwrap()
                .enter_product_discount(500, 0)
                .await
                .unwrap()
                .assert_product_discount(500, 0)
                .await
                .unwrap()
                .assert_total_rate(2500, 0)
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_invalid_value_surfaces_downstream() {
            let mut t = table().await;
            t.enter_sold_quantity("two", 0).await.unwrap();
            t.enter_product_rate(1000, 0).await.unwrap();
            let err = t.assert_total_rate(2000, 0).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::AssertionMismatch);
        }
    }

    mod shape_tests {
        use super::*;

        #[tokio::test]
        async fn test_add_row_appends_at_previous_count() {
            let mut t = table().await;
            assert_eq!(t.row_count().await.unwrap(), 1);
            t.add_row().await.unwrap();
            assert_eq!(t.row_count().await.unwrap(), 2);
            t.enter_product_rate(300, 1)
                .await
                .unwrap()
                .assert_product_rate(300, 1)
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_delete_shifts_rows_down() {
            let mut t = table().await;
            t.add_row().await.unwrap().add_row().await.unwrap();
            t.select_product("Paracetamol", 0).await.unwrap();
            t.select_batch_no("B100", 0).await.unwrap();
            t.select_product("Amoxicillin", 1).await.unwrap();
            t.select_batch_no("AMX-7", 1).await.unwrap();
            t.select_product("Cough Syrup", 2).await.unwrap();
            t.select_batch_no("CS-1", 2).await.unwrap();

            t.delete_row(0).await.unwrap();
            assert_eq!(t.row_count().await.unwrap(), 2);
            t.assert_product_unit("Capsule", 0)
                .await
                .unwrap()
                .assert_product_unit("Bottle", 1)
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_row_past_end_is_unavailable() {
            let mut t = table().await;
            for result in [
                t.enter_product_rate(1, 3).await.map(|_| ()),
                t.assert_product_rate(1, 1).await.map(|_| ()),
                t.delete_row(2).await.map(|_| ()),
                t.select_product("Paracetamol", 1).await.map(|_| ()),
            ] {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::ElementUnavailable);
            }
        }

        #[tokio::test]
        async fn test_stale_index_after_delete() {
            let mut t = table().await;
            t.add_row().await.unwrap();
            t.delete_row(1).await.unwrap();
            let err = t.enter_product_discount(10, 1).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ElementUnavailable);
        }
    }
}
