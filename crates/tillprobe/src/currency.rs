//! Currency display formatting.
//!
//! Header amounts such as the credit limit are rendered with a currency code
//! and thousands separators (`UGX 500,000`); assertions against them compare
//! with the formatted text, never the raw number.

use std::fmt::Debug;

/// Turns a raw amount into its on-screen representation
pub trait CurrencyFormatter: Debug + Send + Sync {
    /// Format an amount for display
    fn format(&self, amount: f64) -> String;
}

/// Code-prefixed amount with comma-grouped thousands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCurrency {
    code: String,
    decimals: u8,
}

impl GroupedCurrency {
    /// Create a formatter for a currency code
    #[must_use]
    pub fn new(code: impl Into<String>, decimals: u8) -> Self {
        Self {
            code: code.into(),
            decimals,
        }
    }

    /// Ugandan shilling, no minor units
    #[must_use]
    pub fn ugx() -> Self {
        Self::new("UGX", 0)
    }

    /// Currency code
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Default for GroupedCurrency {
    fn default() -> Self {
        Self::ugx()
    }
}

impl CurrencyFormatter for GroupedCurrency {
    fn format(&self, amount: f64) -> String {
        let rendered = format!("{:.*}", usize::from(self.decimals), amount.abs());
        let (whole, frac) = rendered
            .split_once('.')
            .map_or((rendered.as_str(), None), |(w, f)| (w, Some(f)));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if let Some(frac) = frac {
            grouped.push('.');
            grouped.push_str(frac);
        }

        let negative = amount < 0.0 && grouped.chars().any(|c| c.is_ascii_digit() && c != '0');
        if negative {
            format!("{} -{grouped}", self.code)
        } else {
            format!("{} {grouped}", self.code)
        }
    }
}

/// Render a number the way a text input receives it: integers without a
/// fractional part, other values with their shortest representation.
#[must_use]
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
