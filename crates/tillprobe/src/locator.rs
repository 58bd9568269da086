//! Locator abstraction for the sale screens.
//!
//! Every control the harness touches carries a `data-testid`. Line-item
//! controls append the zero-based row index (`product_rate-0`), header
//! controls use a bare id (`balance_amount`). Typeahead and date pickers wrap
//! the real `<input>` in a container, so a selector can descend into it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// Test ID selector (data-testid attribute)
    TestId(String),
    /// Elements whose data-testid starts with a prefix
    TestIdPrefix(String),
    /// Descendant of another selector (e.g., the `input` inside a typeahead)
    Within {
        /// Container selector
        parent: Box<Selector>,
        /// CSS selector applied inside the container
        css: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a test ID selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Narrow this selector to a descendant
    #[must_use]
    pub fn find(self, css: impl Into<String>) -> Self {
        Self::Within {
            parent: Box::new(self),
            css: css.into(),
        }
    }

    /// The data-testid this selector is anchored on, if any
    #[must_use]
    pub fn test_id_value(&self) -> Option<&str> {
        match self {
            Self::TestId(id) => Some(id),
            Self::Within { parent, .. } => parent.test_id_value(),
            Self::Css(_) | Self::TestIdPrefix(_) => None,
        }
    }

    /// Convert to a CSS selector string
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Css(s) => s.clone(),
            Self::TestId(id) => format!("[data-testid={id:?}]"),
            Self::TestIdPrefix(prefix) => format!("[data-testid^={prefix:?}]"),
            Self::Within { parent, css } => format!("{} {css}", parent.to_css()),
        }
    }

    /// Convert to a JavaScript expression yielding the first match
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("document.querySelector({:?})", self.to_css())
    }

    /// Convert to a JavaScript expression counting matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("document.querySelectorAll({:?}).length", self.to_css())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Row index used when a row operation is given `None`
pub const DEFAULT_ROW: usize = 0;

/// Resolve an optional row argument
#[must_use]
pub fn row_or_default(row: impl Into<Option<usize>>) -> usize {
    row.into().unwrap_or(DEFAULT_ROW)
}

/// Per-row controls of the line-item table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    /// Product typeahead
    Product,
    /// Batch typeahead
    Batch,
    /// Available quantity of the chosen batch (read-only)
    AvailableQuantity,
    /// Expiry date of the chosen batch (read-only)
    ExpiryDate,
    /// Unit of the chosen batch (read-only)
    Unit,
    /// Quantity sold
    Quantity,
    /// Unit rate
    Rate,
    /// Discount
    Discount,
    /// Line total (read-only)
    TotalPrice,
    /// Delete-row button
    Delete,
}

impl RowField {
    /// All row fields
    pub const ALL: [Self; 10] = [
        Self::Product,
        Self::Batch,
        Self::AvailableQuantity,
        Self::ExpiryDate,
        Self::Unit,
        Self::Quantity,
        Self::Rate,
        Self::Discount,
        Self::TotalPrice,
        Self::Delete,
    ];

    /// data-testid stem; the rendered id is `{stem}-{row}`
    #[must_use]
    pub const fn stem(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Batch => "product_batch",
            Self::AvailableQuantity => "available_quantity",
            Self::ExpiryDate => "expiry_date",
            Self::Unit => "product_unit",
            Self::Quantity => "product_quantity",
            Self::Rate => "product_rate",
            Self::Discount => "discount",
            Self::TotalPrice => "total_price",
            Self::Delete => "delete",
        }
    }

    /// Whether the field renders a number that must match as a whole
    #[must_use]
    pub const fn is_amount(self) -> bool {
        matches!(
            self,
            Self::AvailableQuantity
                | Self::Quantity
                | Self::Rate
                | Self::Discount
                | Self::TotalPrice
        )
    }

    /// Look a field up by its stem
    #[must_use]
    pub fn from_stem(stem: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.stem() == stem)
    }

    /// Whether the control is a typeahead wrapping an `input`
    #[must_use]
    pub const fn is_typeahead(self) -> bool {
        matches!(self, Self::Product | Self::Batch)
    }

    /// Selector for this field in `row`
    #[must_use]
    pub fn at(self, row: usize) -> Selector {
        let sel = Selector::test_id(format!("{}-{row}", self.stem()));
        if self.is_typeahead() {
            sel.find("input")
        } else {
            sel
        }
    }

    /// Selector matching this control in every row
    #[must_use]
    pub fn every_row(self) -> Selector {
        Selector::TestIdPrefix(format!("{}-", self.stem()))
    }
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// Split a rendered row test id (`product_rate-3`) into field and row
#[must_use]
pub fn parse_row_test_id(id: &str) -> Option<(RowField, usize)> {
    let (stem, row) = id.rsplit_once('-')?;
    let field = RowField::from_stem(stem)?;
    let row = row.parse().ok()?;
    Some((field, row))
}

/// Header-level controls of both entry screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderField {
    QuickAddCustomer,
    AddRow,
    Customer,
    Date,
    /// Credit limit as rendered on the cash screen
    CreditLimit,
    /// Credit limit as rendered on the credit screen
    CreditLimitFormatted,
    PaymentMethod,
    TotalAmount,
    PaidAmount,
    BalanceAmount,
    DueAmount,
    SaveSale,
    OutstandingBalance,
    AccountName,
    AddCardNumber,
    CardNumber,
    InvoiceDate,
    GrandTotal,
    NetTotal,
    InvoiceMemo,
    SaveInvoice,
}

impl HeaderField {
    /// All header fields
    pub const ALL: [Self; 21] = [
        Self::QuickAddCustomer,
        Self::AddRow,
        Self::Customer,
        Self::Date,
        Self::CreditLimit,
        Self::CreditLimitFormatted,
        Self::PaymentMethod,
        Self::TotalAmount,
        Self::PaidAmount,
        Self::BalanceAmount,
        Self::DueAmount,
        Self::SaveSale,
        Self::OutstandingBalance,
        Self::AccountName,
        Self::AddCardNumber,
        Self::CardNumber,
        Self::InvoiceDate,
        Self::GrandTotal,
        Self::NetTotal,
        Self::InvoiceMemo,
        Self::SaveInvoice,
    ];

    /// Rendered data-testid
    #[must_use]
    pub const fn test_id(self) -> &'static str {
        match self {
            Self::QuickAddCustomer => "quick_add_customer",
            Self::AddRow => "add-row",
            Self::Customer => "customer",
            Self::Date => "date",
            Self::CreditLimit => "credit_limit",
            Self::CreditLimitFormatted => "creditLimit",
            Self::PaymentMethod => "payment_method",
            Self::TotalAmount => "total_amount",
            Self::PaidAmount => "amount_amount",
            Self::BalanceAmount => "balance_amount",
            Self::DueAmount => "due_amount",
            Self::SaveSale => "save_sale",
            Self::OutstandingBalance => "outstanding_balance",
            Self::AccountName => "account_name",
            Self::AddCardNumber => "add_card_number",
            Self::CardNumber => "card_number",
            Self::InvoiceDate => "invoice_date",
            Self::GrandTotal => "grand_total_price",
            Self::NetTotal => "net_total",
            Self::InvoiceMemo => "invoice_memo",
            Self::SaveInvoice => "save_invoice",
        }
    }

    /// Whether the field renders an amount that must match as a whole
    #[must_use]
    pub const fn is_amount(self) -> bool {
        matches!(
            self,
            Self::CreditLimit
                | Self::CreditLimitFormatted
                | Self::TotalAmount
                | Self::PaidAmount
                | Self::BalanceAmount
                | Self::DueAmount
                | Self::OutstandingBalance
                | Self::GrandTotal
                | Self::NetTotal
        )
    }

    /// Look a field up by its rendered data-testid
    #[must_use]
    pub fn from_test_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.test_id() == id)
    }

    /// Selector for this field
    #[must_use]
    pub fn selector(self) -> Selector {
        let sel = Selector::test_id(self.test_id());
        if self == Self::Customer {
            sel.find("input")
        } else {
            sel
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.test_id())
    }
}
