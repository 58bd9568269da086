//! End-to-end sale chains against the in-memory till.

use std::sync::Once;

use tillprobe::prelude::*;
use tillprobe::{HeaderField, Verb};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn config() -> HarnessConfig {
    HarnessConfig::default().with_settle(SettleConfig::immediate())
}

async fn cash_sale() -> CashSale<MockTill> {
    init_tracing();
    let mut sale = CashSale::from_config(MockTill::new(Catalog::sample()), &config());
    sale.visit().await.unwrap();
    sale
}

async fn credit_sale() -> CreditSale<MockTill> {
    init_tracing();
    let mut sale = CreditSale::from_config(MockTill::new(Catalog::sample()), &config());
    sale.visit().await.unwrap();
    sale
}

#[tokio::test]
async fn cash_sale_of_paracetamol_submits() {
    let mut sale = cash_sale().await;
    sale.select_product(&Product::named("Paracetamol"), 0)
        .await
        .unwrap()
        .select_batch_no("B100", 0)
        .await
        .unwrap()
        .enter_sold_quantity(2, 0)
        .await
        .unwrap()
        .enter_product_rate(1000, 0)
        .await
        .unwrap()
        .assert_total_rate(2000, 0)
        .await
        .unwrap()
        .select_payment_method(Some("Cash"))
        .await
        .unwrap()
        .enter_paid_amount(2000)
        .await
        .unwrap()
        .assert_balance_amount(0)
        .await
        .unwrap()
        .click_submit()
        .await
        .unwrap();

    assert_eq!(sale.state(), WorkflowState::Submitted);
    let till = sale.session().driver();
    assert!(till.submitted());
    let last = till.history().last().unwrap();
    assert_eq!(last.verb, Verb::Click);
    assert!(last.target.contains("save_sale"));
}

#[tokio::test]
async fn credit_limit_mismatch_names_credit_limit_field() {
    let mut sale = credit_sale().await;
    sale.enter_customer(&Customer::named("Acme Ltd"))
        .await
        .unwrap()
        .assert_credit_limit(500_000.0)
        .await
        .unwrap();

    let err = sale.assert_credit_limit(5_000.0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AssertionMismatch);
    assert!(err.to_string().contains("creditLimit"));
    assert!(err.to_string().contains("UGX 5,000"));
}

#[tokio::test]
async fn delete_row_shifts_later_rows_down() {
    let mut sale = cash_sale().await;
    sale.add_row().await.unwrap().add_row().await.unwrap();
    for (row, product, batch) in [
        (0, "Paracetamol", "B100"),
        (1, "Amoxicillin", "AMX-7"),
        (2, "Cough Syrup", "CS-1"),
    ] {
        sale.select_product(product, row)
            .await
            .unwrap()
            .select_batch_no(batch, row)
            .await
            .unwrap();
    }

    sale.delete_row(0)
        .await
        .unwrap()
        .assert_product_unit("Capsule", 0)
        .await
        .unwrap()
        .assert_product_unit("Bottle", 1)
        .await
        .unwrap();
    assert_eq!(sale.row_count().await.unwrap(), 2);
    assert_eq!(
        sale.read_field(RowField::Product, 0).await.unwrap(),
        "Amoxicillin"
    );
}

#[tokio::test]
async fn re_entering_rate_leaves_no_residue() {
    let mut sale = cash_sale().await;
    sale.enter_product_rate(5000, 0)
        .await
        .unwrap()
        .assert_product_rate(5000, 0)
        .await
        .unwrap()
        .enter_product_rate(7000, 0)
        .await
        .unwrap()
        .assert_product_rate(7000, 0)
        .await
        .unwrap();
    let rendered = sale.read_field(RowField::Rate, 0).await.unwrap();
    assert!(!rendered.contains("5000"), "residue in {rendered:?}");
}

#[tokio::test]
async fn appended_rate_fails_the_rate_assertion() {
    let mut sale = cash_sale().await;
    sale.enter_product_rate(5000, 0).await.unwrap();
    sale.session_mut()
        .driver_mut()
        .type_text(&RowField::Rate.at(0), "7000")
        .await
        .unwrap();
    assert_eq!(sale.read_field(RowField::Rate, 0).await.unwrap(), "50007000");

    let err = sale.assert_product_rate(7000, 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AssertionMismatch);
}

#[tokio::test]
async fn batch_before_product_is_selection_not_found() {
    let mut sale = credit_sale().await;
    let err = sale.select_batch_no("B100", 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SelectionNotFound);

    sale.select_product("Paracetamol", 0).await.unwrap();
    sale.select_batch_no("B100", 0).await.unwrap();
}

#[tokio::test]
async fn row_past_the_end_is_element_unavailable() {
    let mut sale = cash_sale().await;
    sale.add_row().await.unwrap();
    assert_eq!(sale.row_count().await.unwrap(), 2);

    let err = sale.enter_sold_quantity(1, 3).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ElementUnavailable);
    let err = sale.assert_total_rate(0, 2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ElementUnavailable);
    let err = sale.delete_row(5).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ElementUnavailable);
}

#[tokio::test]
async fn added_row_is_addressed_by_previous_count() {
    let mut sale = cash_sale().await;
    let before = sale.row_count().await.unwrap();
    sale.add_row()
        .await
        .unwrap()
        .select_product("Amoxicillin", before)
        .await
        .unwrap()
        .select_batch_no("AMX-7", before)
        .await
        .unwrap()
        .assert_available_quantity(60, before)
        .await
        .unwrap()
        .assert_product_expiry_date("2026-12-31", before)
        .await
        .unwrap();
}

#[tokio::test]
async fn credit_invoice_with_card_and_memo() {
    let mut sale = credit_sale().await;
    sale.click_quick_add_customer()
        .await
        .unwrap()
        .enter_customer("Acme Ltd")
        .await
        .unwrap()
        .assert_outstanding_balance(120_000)
        .await
        .unwrap()
        .enter_account_name("Acme Receivables")
        .await
        .unwrap()
        .check_add_card_number()
        .await
        .unwrap()
        .enter_card_number("4111 1111 1111 1111")
        .await
        .unwrap()
        .enter_invoice_date("2026-10-18")
        .await
        .unwrap()
        .select_product("Paracetamol", 0)
        .await
        .unwrap()
        .select_batch_no("B200", 0)
        .await
        .unwrap()
        .enter_sold_quantity(5, 0)
        .await
        .unwrap()
        .enter_product_rate(1100, 0)
        .await
        .unwrap()
        .enter_product_discount(500, 0)
        .await
        .unwrap()
        .assert_product_discount(500, 0)
        .await
        .unwrap()
        .assert_grand_total_amount(5500)
        .await
        .unwrap()
        .assert_net_total_amount(5000)
        .await
        .unwrap()
        .enter_invoice_memo("net 30")
        .await
        .unwrap()
        .click_submit()
        .await
        .unwrap();
    assert_eq!(sale.state(), WorkflowState::Submitted);
    assert!(sale
        .session()
        .read(&HeaderField::CardNumber.selector())
        .await
        .unwrap()
        .starts_with("4111"));
}

#[tokio::test]
async fn failure_stops_the_chain() {
    let mut sale = cash_sale().await;
    let result = async {
        sale.enter_sold_quantity(2, 0)
            .await?
            .enter_product_rate(1000, 0)
            .await?
            .assert_total_rate(9999, 0)
            .await?
            .click_submit()
            .await?;
        Ok::<_, ProbeError>(())
    }
    .await;
    assert_eq!(result.unwrap_err().kind(), ErrorKind::AssertionMismatch);
    assert_eq!(sale.state(), WorkflowState::Populating);
    assert!(!sale.session().driver().submitted());
}
