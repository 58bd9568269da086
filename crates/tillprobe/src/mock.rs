//! MockTill: an in-memory sale screen.
//!
//! Models the cash and credit entry screens well enough to drive every
//! workflow operation without a browser. Values are rendered the way the
//! live screens render them:
//!
//! - `total_price = quantity * rate - discount` per row
//! - header totals are the sum of row totals
//! - cash balance is `max(paid - total, 0)`, due is `max(total - paid, 0)`
//! - credit limit is a plain number on the cash screen and
//!   currency-formatted on the credit screen
//!
//! Batch options are scoped to the product selected in the same row, and
//! the card-number input only renders once its opt-in checkbox is ticked.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{CASH_SALE_PATH, CREDIT_SALE_PATH};
use crate::currency::{plain_number, CurrencyFormatter, GroupedCurrency};
use crate::driver::UiDriver;
use crate::locator::{parse_row_test_id, HeaderField, RowField, Selector};
use crate::result::{ProbeError, ProbeResult};
use crate::workflow::SaleVariant;

// =============================================================================
// Catalog
// =============================================================================

/// One stocked batch of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub batch_no: String,
    pub available_quantity: f64,
    pub expiry_date: String,
    pub unit: String,
    #[serde(default)]
    pub rate: f64,
}

/// A sellable product and its batches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub name: String,
    #[serde(default)]
    pub batches: Vec<Batch>,
}

/// A customer account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCustomer {
    pub name: String,
    #[serde(default)]
    pub credit_limit: f64,
    #[serde(default)]
    pub outstanding_balance: f64,
}

fn default_payment_methods() -> Vec<String> {
    ["CASH", "CHEQUE", "MOBILE MONEY", "BANK"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Reference data behind the mock screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
    #[serde(default)]
    pub customers: Vec<CatalogCustomer>,
    #[serde(default = "default_payment_methods")]
    pub payment_methods: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            customers: Vec::new(),
            payment_methods: default_payment_methods(),
        }
    }
}

impl Catalog {
    /// A small pharmacy catalog
    #[must_use]
    pub fn sample() -> Self {
        let batch = |no: &str, qty: f64, expiry: &str, unit: &str, rate: f64| Batch {
            batch_no: no.to_string(),
            available_quantity: qty,
            expiry_date: expiry.to_string(),
            unit: unit.to_string(),
            rate,
        };
        let customer = |name: &str, limit: f64, outstanding: f64| CatalogCustomer {
            name: name.to_string(),
            credit_limit: limit,
            outstanding_balance: outstanding,
        };
        Self {
            products: vec![
                CatalogProduct {
                    name: "Paracetamol".to_string(),
                    batches: vec![
                        batch("B100", 120.0, "2027-06-30", "Tablet", 1000.0),
                        batch("B200", 45.0, "2026-11-30", "Tablet", 1100.0),
                    ],
                },
                CatalogProduct {
                    name: "Amoxicillin".to_string(),
                    batches: vec![batch("AMX-7", 60.0, "2026-12-31", "Capsule", 2500.0)],
                },
                CatalogProduct {
                    name: "Cough Syrup".to_string(),
                    batches: vec![batch("CS-1", 40.0, "2027-01-15", "Bottle", 4500.0)],
                },
            ],
            customers: vec![
                customer("Acme Ltd", 500_000.0, 120_000.0),
                customer("Kampala Pharmacy", 250_000.0, 0.0),
            ],
            payment_methods: default_payment_methods(),
        }
    }

    /// Parse a catalog from YAML
    pub fn from_yaml_str(yaml: &str) -> ProbeResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a catalog from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    #[must_use]
    pub fn product(&self, name: &str) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn customer(&self, name: &str) -> Option<&CatalogCustomer> {
        self.customers.iter().find(|c| c.name == name)
    }

    fn batch(&self, product: &str, batch_no: &str) -> Option<&Batch> {
        self.product(product)?
            .batches
            .iter()
            .find(|b| b.batch_no == batch_no)
    }
}

// =============================================================================
// Interaction history
// =============================================================================

/// Kind of recorded interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Navigate,
    Click,
    Clear,
    Type,
    Check,
    Select,
    Choose,
}

/// One mutating call received by the mock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub verb: Verb,
    /// Locator, or the URL for navigation
    pub target: String,
    pub value: Option<String>,
}

// =============================================================================
// Screen model
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Row(RowField, usize),
    Header(HeaderField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListOwner {
    Customer,
    Product(usize),
    Batch(usize),
}

#[derive(Debug, Clone)]
struct OpenList {
    owner: ListOwner,
    options: Vec<String>,
}

#[derive(Debug, Clone, Default)]
struct Row {
    product_text: String,
    product: Option<String>,
    batch_text: String,
    batch: Option<String>,
    quantity: String,
    rate: String,
    discount: String,
}

impl Row {
    fn gross(&self) -> f64 {
        parse_amount(&self.quantity) * parse_amount(&self.rate)
    }

    fn total(&self) -> f64 {
        self.gross() - parse_amount(&self.discount)
    }
}

#[derive(Debug, Clone)]
struct Screen {
    variant: SaleVariant,
    rows: Vec<Row>,
    customer_text: String,
    customer: Option<String>,
    date: String,
    payment_method: String,
    paid: String,
    account_name: String,
    card_opt_in: bool,
    card_number: String,
    invoice_date: String,
    memo: String,
    quick_add_clicks: usize,
    submitted: bool,
    open_list: Option<OpenList>,
}

impl Screen {
    fn new(variant: SaleVariant) -> Self {
        Self {
            variant,
            rows: vec![Row::default()],
            customer_text: String::new(),
            customer: None,
            date: String::new(),
            payment_method: String::new(),
            paid: String::new(),
            account_name: String::new(),
            card_opt_in: false,
            card_number: String::new(),
            invoice_date: String::new(),
            memo: String::new(),
            quick_add_clicks: 0,
            submitted: false,
            open_list: None,
        }
    }

    fn has(&self, element: Element) -> bool {
        use HeaderField as H;
        match element {
            Element::Row(_, row) => row < self.rows.len(),
            Element::Header(field) => match field {
                H::QuickAddCustomer | H::AddRow | H::Customer => true,
                H::Date
                | H::CreditLimit
                | H::PaymentMethod
                | H::TotalAmount
                | H::PaidAmount
                | H::BalanceAmount
                | H::DueAmount
                | H::SaveSale => self.variant == SaleVariant::CashSale,
                H::CardNumber => self.variant == SaleVariant::CreditSale && self.card_opt_in,
                H::CreditLimitFormatted
                | H::OutstandingBalance
                | H::AccountName
                | H::AddCardNumber
                | H::InvoiceDate
                | H::GrandTotal
                | H::NetTotal
                | H::InvoiceMemo
                | H::SaveInvoice => self.variant == SaleVariant::CreditSale,
            },
        }
    }

    fn net_total(&self) -> f64 {
        self.rows.iter().map(Row::total).sum()
    }

    fn gross_total(&self) -> f64 {
        self.rows.iter().map(Row::gross).sum()
    }

    fn text_mut(&mut self, element: Element) -> Option<&mut String> {
        use HeaderField as H;
        Some(match element {
            Element::Row(field, row) => {
                let r = self.rows.get_mut(row)?;
                match field {
                    RowField::Product => &mut r.product_text,
                    RowField::Batch => &mut r.batch_text,
                    RowField::Quantity => &mut r.quantity,
                    RowField::Rate => &mut r.rate,
                    RowField::Discount => &mut r.discount,
                    _ => return None,
                }
            }
            Element::Header(field) => match field {
                H::Customer => &mut self.customer_text,
                H::Date => &mut self.date,
                H::PaidAmount => &mut self.paid,
                H::AccountName => &mut self.account_name,
                H::CardNumber => &mut self.card_number,
                H::InvoiceDate => &mut self.invoice_date,
                H::InvoiceMemo => &mut self.memo,
                _ => return None,
            },
        })
    }

    // Editing a typeahead input drops the selection it held.
    fn forget_selection(&mut self, element: Element) {
        match element {
            Element::Row(RowField::Product, row) => {
                if let Some(r) = self.rows.get_mut(row) {
                    r.product = None;
                    r.batch = None;
                    r.batch_text.clear();
                }
            }
            Element::Row(RowField::Batch, row) => {
                if let Some(r) = self.rows.get_mut(row) {
                    r.batch = None;
                }
            }
            Element::Header(HeaderField::Customer) => self.customer = None,
            _ => {}
        }
    }
}

/// Parse a rendered amount; anything unparsable counts as zero
fn parse_amount(text: &str) -> f64 {
    text.trim().replace(',', "").parse().unwrap_or(0.0)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

fn resolve(selector: &Selector) -> Option<Element> {
    let id = selector.test_id_value()?;
    parse_row_test_id(id)
        .map(|(field, row)| Element::Row(field, row))
        .or_else(|| HeaderField::from_test_id(id).map(Element::Header))
}

// =============================================================================
// MockTill
// =============================================================================

/// In-memory sale screen implementing [`UiDriver`]
#[derive(Debug)]
pub struct MockTill {
    catalog: Catalog,
    cash_path: String,
    credit_path: String,
    currency: GroupedCurrency,
    url: String,
    screen: Option<Screen>,
    history: Vec<Interaction>,
}

impl MockTill {
    /// Create a mock over a catalog, serving the default entry paths
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cash_path: CASH_SALE_PATH.to_string(),
            credit_path: CREDIT_SALE_PATH.to_string(),
            currency: GroupedCurrency::ugx(),
            url: String::from("about:blank"),
            screen: None,
            history: Vec::new(),
        }
    }

    /// Serve the entry screens at other paths
    #[must_use]
    pub fn with_entry_paths(mut self, cash: impl Into<String>, credit: impl Into<String>) -> Self {
        self.cash_path = cash.into();
        self.credit_path = credit.into();
        self
    }

    /// Formatter used for the credit screen's credit limit
    #[must_use]
    pub fn with_currency(mut self, currency: GroupedCurrency) -> Self {
        self.currency = currency;
        self
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Every mutating call received so far, in order
    #[must_use]
    pub fn history(&self) -> &[Interaction] {
        &self.history
    }

    /// Screen currently loaded, if any
    #[must_use]
    pub fn variant(&self) -> Option<SaleVariant> {
        self.screen.as_ref().map(|s| s.variant)
    }

    /// Whether the loaded screen's save control has been clicked
    #[must_use]
    pub fn submitted(&self) -> bool {
        self.screen.as_ref().is_some_and(|s| s.submitted)
    }

    /// Number of clicks on the quick-add-customer control
    #[must_use]
    pub fn quick_add_clicks(&self) -> usize {
        self.screen.as_ref().map_or(0, |s| s.quick_add_clicks)
    }

    fn record(&mut self, verb: Verb, target: impl ToString, value: Option<&str>) {
        self.history.push(Interaction {
            verb,
            target: target.to_string(),
            value: value.map(str::to_string),
        });
    }

    fn locate(&self, selector: &Selector) -> ProbeResult<(&Screen, Element)> {
        let unavailable = || ProbeError::unavailable(selector.to_string());
        let screen = self.screen.as_ref().ok_or_else(unavailable)?;
        let element = resolve(selector).ok_or_else(unavailable)?;
        if screen.has(element) {
            Ok((screen, element))
        } else {
            Err(unavailable())
        }
    }

    fn locate_mut(&mut self, selector: &Selector) -> ProbeResult<(&mut Screen, Element)> {
        let (_, element) = self.locate(selector)?;
        let screen = self
            .screen
            .as_mut()
            .ok_or_else(|| ProbeError::unavailable(selector.to_string()))?;
        Ok((screen, element))
    }

    fn options_for(&self, screen: &Screen, owner: ListOwner, text: &str) -> Vec<String> {
        let labels: Vec<String> = match owner {
            ListOwner::Customer => self.catalog.customers.iter().map(|c| c.name.clone()).collect(),
            ListOwner::Product(_) => self.catalog.products.iter().map(|p| p.name.clone()).collect(),
            ListOwner::Batch(row) => screen
                .rows
                .get(row)
                .and_then(|r| r.product.as_deref())
                .and_then(|name| self.catalog.product(name))
                .map(|p| p.batches.iter().map(|b| b.batch_no.clone()).collect())
                .unwrap_or_default(),
        };
        labels
            .into_iter()
            .filter(|label| contains_ignore_case(label, text))
            .collect()
    }

    fn render(&self, screen: &Screen, element: Element) -> String {
        use HeaderField as H;
        match element {
            Element::Row(field, row) => {
                let Some(r) = screen.rows.get(row) else {
                    return String::new();
                };
                let batch = r
                    .product
                    .as_deref()
                    .zip(r.batch.as_deref())
                    .and_then(|(p, b)| self.catalog.batch(p, b));
                match field {
                    RowField::Product => r.product_text.clone(),
                    RowField::Batch => r.batch_text.clone(),
                    RowField::AvailableQuantity => batch
                        .map(|b| plain_number(b.available_quantity))
                        .unwrap_or_default(),
                    RowField::ExpiryDate => batch.map(|b| b.expiry_date.clone()).unwrap_or_default(),
                    RowField::Unit => batch.map(|b| b.unit.clone()).unwrap_or_default(),
                    RowField::Quantity => r.quantity.clone(),
                    RowField::Rate => r.rate.clone(),
                    RowField::Discount => r.discount.clone(),
                    RowField::TotalPrice => plain_number(r.total()),
                    RowField::Delete => "Delete".to_string(),
                }
            }
            Element::Header(field) => {
                let customer = screen
                    .customer
                    .as_deref()
                    .and_then(|name| self.catalog.customer(name));
                let total = screen.net_total();
                let paid = parse_amount(&screen.paid);
                match field {
                    H::QuickAddCustomer => "Quick Add Customer".to_string(),
                    H::AddRow => "Add Row".to_string(),
                    H::SaveSale | H::SaveInvoice => "Save".to_string(),
                    H::Customer => screen.customer_text.clone(),
                    H::Date => screen.date.clone(),
                    H::CreditLimit => customer
                        .map(|c| plain_number(c.credit_limit))
                        .unwrap_or_default(),
                    H::CreditLimitFormatted => customer
                        .map(|c| self.currency.format(c.credit_limit))
                        .unwrap_or_default(),
                    H::OutstandingBalance => customer
                        .map(|c| plain_number(c.outstanding_balance))
                        .unwrap_or_default(),
                    H::PaymentMethod => screen.payment_method.clone(),
                    H::TotalAmount | H::NetTotal => plain_number(total),
                    H::GrandTotal => plain_number(screen.gross_total()),
                    H::PaidAmount => screen.paid.clone(),
                    H::BalanceAmount => plain_number((paid - total).max(0.0)),
                    H::DueAmount => plain_number((total - paid).max(0.0)),
                    H::AccountName => screen.account_name.clone(),
                    H::AddCardNumber => screen.card_opt_in.to_string(),
                    H::CardNumber => screen.card_number.clone(),
                    H::InvoiceDate => screen.invoice_date.clone(),
                    H::InvoiceMemo => screen.memo.clone(),
                }
            }
        }
    }
}

fn not_editable(selector: &Selector) -> ProbeError {
    ProbeError::driver(format!("{selector} is not an editable input"))
}

#[async_trait]
impl UiDriver for MockTill {
    async fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        self.record(Verb::Navigate, url, None);
        let path = url.split(['?', '#']).next().unwrap_or(url).trim_end_matches('/');
        let variant = if path.ends_with(self.cash_path.trim_end_matches('/')) {
            SaleVariant::CashSale
        } else if path.ends_with(self.credit_path.trim_end_matches('/')) {
            SaleVariant::CreditSale
        } else {
            return Err(ProbeError::NavigationFailure {
                url: url.to_string(),
                message: "no entry screen at this address".to_string(),
            });
        };
        self.url = url.to_string();
        self.screen = Some(Screen::new(variant));
        Ok(())
    }

    async fn current_url(&self) -> ProbeResult<String> {
        Ok(self.url.clone())
    }

    async fn count(&self, selector: &Selector) -> ProbeResult<usize> {
        let Some(screen) = &self.screen else {
            return Ok(0);
        };
        if let Selector::TestIdPrefix(prefix) = selector {
            let stem = prefix.trim_end_matches('-');
            return Ok(if RowField::from_stem(stem).is_some() {
                screen.rows.len()
            } else {
                0
            });
        }
        Ok(resolve(selector).map_or(0, |e| usize::from(screen.has(e))))
    }

    async fn click(&mut self, selector: &Selector) -> ProbeResult<()> {
        self.record(Verb::Click, selector, None);
        let (screen, element) = self.locate_mut(selector)?;
        match element {
            Element::Header(HeaderField::AddRow) => screen.rows.push(Row::default()),
            Element::Row(RowField::Delete, row) => {
                screen.rows.remove(row);
                screen.open_list = None;
            }
            Element::Header(HeaderField::QuickAddCustomer) => screen.quick_add_clicks += 1,
            Element::Header(HeaderField::SaveSale | HeaderField::SaveInvoice) => {
                screen.submitted = true;
            }
            _ => {}
        }
        Ok(())
    }

    async fn clear(&mut self, selector: &Selector) -> ProbeResult<()> {
        self.record(Verb::Clear, selector, None);
        let (screen, element) = self.locate_mut(selector)?;
        screen.forget_selection(element);
        screen.open_list = None;
        screen
            .text_mut(element)
            .ok_or_else(|| not_editable(selector))?
            .clear();
        Ok(())
    }

    async fn type_text(&mut self, selector: &Selector, text: &str) -> ProbeResult<()> {
        self.record(Verb::Type, selector, Some(text));
        let (screen, element) = self.locate_mut(selector)?;
        screen.forget_selection(element);
        let field = screen.text_mut(element).ok_or_else(|| not_editable(selector))?;
        field.push_str(text);
        let typed = field.clone();

        let owner = match element {
            Element::Row(RowField::Product, row) => Some(ListOwner::Product(row)),
            Element::Row(RowField::Batch, row) => Some(ListOwner::Batch(row)),
            Element::Header(HeaderField::Customer) => Some(ListOwner::Customer),
            _ => None,
        };
        let open_list = owner.map(|owner| {
            let screen = self.screen.as_ref();
            OpenList {
                owner,
                options: screen
                    .map(|s| self.options_for(s, owner, &typed))
                    .unwrap_or_default(),
            }
        });
        if let Some(screen) = self.screen.as_mut() {
            screen.open_list = open_list;
        }
        Ok(())
    }

    async fn check(&mut self, selector: &Selector) -> ProbeResult<()> {
        self.record(Verb::Check, selector, None);
        let (screen, element) = self.locate_mut(selector)?;
        if element == Element::Header(HeaderField::AddCardNumber) {
            screen.card_opt_in = true;
            Ok(())
        } else {
            Err(ProbeError::driver(format!("{selector} is not a checkbox")))
        }
    }

    async fn select_option(&mut self, selector: &Selector, value: &str) -> ProbeResult<()> {
        self.record(Verb::Select, selector, Some(value));
        let methods = self.catalog.payment_methods.clone();
        let (screen, element) = self.locate_mut(selector)?;
        if element != Element::Header(HeaderField::PaymentMethod) {
            return Err(ProbeError::driver(format!("{selector} is not a select")));
        }
        if !methods.iter().any(|m| m == value) {
            return Err(ProbeError::SelectionNotFound {
                locator: selector.to_string(),
                key: value.to_string(),
                candidates: methods,
            });
        }
        screen.payment_method = value.to_string();
        Ok(())
    }

    async fn read_value(&self, selector: &Selector) -> ProbeResult<String> {
        let (screen, element) = self.locate(selector)?;
        Ok(self.render(screen, element))
    }

    async fn options(&self) -> ProbeResult<Vec<String>> {
        Ok(self
            .screen
            .as_ref()
            .and_then(|s| s.open_list.as_ref())
            .map(|list| list.options.clone())
            .unwrap_or_default())
    }

    async fn choose_option(&mut self, label: &str) -> ProbeResult<()> {
        self.record(Verb::Choose, "[role=\"option\"]", Some(label));
        let screen = self
            .screen
            .as_mut()
            .ok_or_else(|| ProbeError::unavailable("[role=\"option\"]"))?;
        let list = screen
            .open_list
            .take()
            .filter(|list| list.options.iter().any(|o| o == label))
            .ok_or_else(|| ProbeError::SelectionNotFound {
                locator: "[role=\"option\"]".to_string(),
                key: label.to_string(),
                candidates: Vec::new(),
            })?;
        let label = label.to_string();
        match list.owner {
            ListOwner::Customer => {
                screen.customer_text.clone_from(&label);
                screen.customer = Some(label);
            }
            ListOwner::Product(row) => {
                if let Some(r) = screen.rows.get_mut(row) {
                    r.product_text.clone_from(&label);
                    r.product = Some(label);
                    r.batch = None;
                    r.batch_text.clear();
                }
            }
            ListOwner::Batch(row) => {
                if let Some(r) = screen.rows.get_mut(row) {
                    r.batch_text.clone_from(&label);
                    r.batch = Some(label);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn cash() -> MockTill {
        let mut till = MockTill::new(Catalog::sample());
        till.navigate("http://localhost:3000/sales/new-receipt")
            .await
            .unwrap();
        till
    }

    async fn credit() -> MockTill {
        let mut till = MockTill::new(Catalog::sample());
        till.navigate("http://localhost:3000/sales/new-invoice?draft=1")
            .await
            .unwrap();
        till
    }

    mod catalog_tests {
        use super::*;

        #[test]
        fn test_sample_lookup() {
            let catalog = Catalog::sample();
            assert_eq!(catalog.customer("Acme Ltd").unwrap().credit_limit, 500_000.0);
            assert!(catalog.product("Quinine").is_none());
            assert_eq!(catalog.batch("Paracetamol", "B100").unwrap().unit, "Tablet");
        }

        #[test]
        fn test_yaml_defaults_payment_methods() {
            let catalog = Catalog::from_yaml_str(
                "products:\n  - name: Zinc\n    batches:\n      - batch_no: Z1\n        available_quantity: 5\n        expiry_date: 2028-01-01\n        unit: Tablet\n",
            )
            .unwrap();
            assert_eq!(catalog.products[0].batches[0].rate, 0.0);
            assert!(catalog.payment_methods.contains(&"CASH".to_string()));
            assert!(catalog.customers.is_empty());
        }

        #[test]
        fn test_yaml_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("catalog.yaml");
            std::fs::write(&path, serde_yaml_ng::to_string(&Catalog::sample()).unwrap()).unwrap();
            assert_eq!(Catalog::from_yaml_file(&path).unwrap(), Catalog::sample());
        }
    }

    mod screen_tests {
        use super::*;

        #[tokio::test]
        async fn test_nothing_resolves_before_navigation() {
            let till = MockTill::new(Catalog::sample());
            assert_eq!(till.count(&RowField::Rate.at(0)).await.unwrap(), 0);
            let err = till.read_value(&RowField::Rate.at(0)).await.unwrap_err();
            assert!(matches!(err, ProbeError::ElementUnavailable { .. }));
        }

        #[tokio::test]
        async fn test_variant_specific_headers() {
            let cash = cash().await;
            let credit = credit().await;
            assert_eq!(cash.variant(), Some(SaleVariant::CashSale));
            assert_eq!(credit.variant(), Some(SaleVariant::CreditSale));
            assert!(cash.exists(&HeaderField::SaveSale.selector()).await.unwrap());
            assert!(!cash.exists(&HeaderField::SaveInvoice.selector()).await.unwrap());
            assert!(credit.exists(&HeaderField::GrandTotal.selector()).await.unwrap());
            assert!(!credit.exists(&HeaderField::BalanceAmount.selector()).await.unwrap());
        }

        #[tokio::test]
        async fn test_card_number_needs_opt_in() {
            let mut till = credit().await;
            let card = HeaderField::CardNumber.selector();
            assert!(!till.exists(&card).await.unwrap());
            till.check(&HeaderField::AddCardNumber.selector()).await.unwrap();
            assert!(till.exists(&card).await.unwrap());
            assert_eq!(
                till.read_value(&HeaderField::AddCardNumber.selector())
                    .await
                    .unwrap(),
                "true"
            );
        }

        #[tokio::test]
        async fn test_line_and_header_totals() {
            let mut till = cash().await;
            till.click(&HeaderField::AddRow.selector()).await.unwrap();
            for (row, qty, rate, discount) in [(0, "2", "1000", "0"), (1, "3", "500", "100")] {
                till.type_text(&RowField::Quantity.at(row), qty).await.unwrap();
                till.type_text(&RowField::Rate.at(row), rate).await.unwrap();
                till.type_text(&RowField::Discount.at(row), discount).await.unwrap();
            }
            assert_eq!(till.read_value(&RowField::TotalPrice.at(1)).await.unwrap(), "1400");
            assert_eq!(
                till.read_value(&HeaderField::TotalAmount.selector()).await.unwrap(),
                "3400"
            );
            till.type_text(&HeaderField::PaidAmount.selector(), "5000").await.unwrap();
            assert_eq!(
                till.read_value(&HeaderField::BalanceAmount.selector()).await.unwrap(),
                "1600"
            );
            assert_eq!(
                till.read_value(&HeaderField::DueAmount.selector()).await.unwrap(),
                "0"
            );
        }

        #[tokio::test]
        async fn test_type_appends_without_clear() {
            let mut till = cash().await;
            let rate = RowField::Rate.at(0);
            till.type_text(&rate, "5000").await.unwrap();
            till.type_text(&rate, "7000").await.unwrap();
            assert_eq!(till.read_value(&rate).await.unwrap(), "50007000");
        }

        #[tokio::test]
        async fn test_read_only_fields_reject_typing() {
            let mut till = cash().await;
            let err = till
                .type_text(&RowField::TotalPrice.at(0), "9")
                .await
                .unwrap_err();
            assert!(matches!(err, ProbeError::Driver { .. }));
        }
    }

    mod typeahead_tests {
        use super::*;

        #[tokio::test]
        async fn test_batch_options_follow_product() {
            let mut till = cash().await;
            till.type_text(&RowField::Batch.at(0), "B").await.unwrap();
            assert!(till.options().await.unwrap().is_empty());

            till.type_text(&RowField::Product.at(0), "para").await.unwrap();
            assert_eq!(till.options().await.unwrap(), vec!["Paracetamol"]);
            till.choose_option("Paracetamol").await.unwrap();

            till.clear(&RowField::Batch.at(0)).await.unwrap();
            till.type_text(&RowField::Batch.at(0), "B").await.unwrap();
            assert_eq!(till.options().await.unwrap(), vec!["B100", "B200"]);
        }

        #[tokio::test]
        async fn test_choose_requires_open_list() {
            let mut till = cash().await;
            let err = till.choose_option("Paracetamol").await.unwrap_err();
            assert!(matches!(err, ProbeError::SelectionNotFound { .. }));
        }

        #[tokio::test]
        async fn test_credit_limit_rendering_differs() {
            for (mut till, field, expected) in [
                (cash().await, HeaderField::CreditLimit, "500000"),
                (credit().await, HeaderField::CreditLimitFormatted, "UGX 500,000"),
            ] {
                till.type_text(&HeaderField::Customer.selector(), "Acme").await.unwrap();
                till.choose_option("Acme Ltd").await.unwrap();
                assert_eq!(till.read_value(&field.selector()).await.unwrap(), expected);
            }
        }

        #[tokio::test]
        async fn test_payment_method_must_be_offered() {
            let mut till = cash().await;
            let select = HeaderField::PaymentMethod.selector();
            till.select_option(&select, "CASH").await.unwrap();
            let err = till.select_option(&select, "Cash").await.unwrap_err();
            assert!(matches!(err, ProbeError::SelectionNotFound { .. }));
            assert_eq!(till.read_value(&select).await.unwrap(), "CASH");
        }
    }

    #[tokio::test]
    async fn test_history_records_mutations_only() {
        let mut till = cash().await;
        till.click(&HeaderField::SaveSale.selector()).await.unwrap();
        let _ = till.read_value(&RowField::Rate.at(0)).await.unwrap();
        let verbs: Vec<Verb> = till.history().iter().map(|i| i.verb).collect();
        assert_eq!(verbs, vec![Verb::Navigate, Verb::Click]);
        assert!(till.submitted());
    }

    #[tokio::test]
    async fn test_unknown_path_fails_navigation() {
        let mut till = MockTill::new(Catalog::sample())
            .with_entry_paths("/pos/cash", "/pos/credit");
        assert!(till.navigate("http://x/sales/new-receipt").await.is_err());
        till.navigate("http://x/pos/credit/").await.unwrap();
        assert_eq!(till.current_url().await.unwrap(), "http://x/pos/credit/");
    }
}
