//! Comparison of rendered values against expectations.

use serde::{Deserialize, Serialize};

use crate::result::ProbeError;

/// How a rendered value is compared with the expected one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Rendered value contains the expected text
    #[default]
    Contains,
    /// Rendered value equals the expected text after trimming
    Exact,
    /// Same number once grouping separators and spaces are dropped; a
    /// currency code, if any, must match too
    Amount,
}

fn normalize_amount(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}

fn same_amount(actual: &str, expected: &str) -> bool {
    let actual = normalize_amount(actual);
    let expected = normalize_amount(expected);
    match (actual.parse::<f64>(), expected.parse::<f64>()) {
        (Ok(a), Ok(e)) => (a - e).abs() < 1e-9,
        _ => actual == expected,
    }
}

/// Result of an assertion
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

/// An expected rendered value for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    field: String,
    row: Option<usize>,
    expected: String,
    mode: MatchMode,
}

impl Expectation {
    /// Expect `expected` in a header field
    #[must_use]
    pub fn header(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            row: None,
            expected: expected.into(),
            mode: MatchMode::default(),
        }
    }

    /// Expect `expected` in a line-item field
    #[must_use]
    pub fn row(field: impl Into<String>, row: usize, expected: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            row: Some(row),
            expected: expected.into(),
            mode: MatchMode::default(),
        }
    }

    /// Set the match mode
    #[must_use]
    pub const fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Compare as a whole amount, whatever mode is applied later
    #[must_use]
    pub const fn amount(mut self) -> Self {
        self.mode = MatchMode::Amount;
        self
    }

    /// Apply a text match mode unless this is an amount expectation
    #[must_use]
    pub const fn with_text_mode(mut self, mode: MatchMode) -> Self {
        if !matches!(self.mode, MatchMode::Amount) {
            self.mode = mode;
        }
        self
    }

    /// Expected text
    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Compare a rendered value
    #[must_use]
    pub fn check(&self, actual: &str) -> AssertionResult {
        let passed = match self.mode {
            MatchMode::Contains => actual.contains(&self.expected),
            MatchMode::Exact => actual.trim() == self.expected.trim(),
            MatchMode::Amount => same_amount(actual, &self.expected),
        };
        if passed {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!(
                "expected {:?} to {} {:?}",
                actual,
                match self.mode {
                    MatchMode::Contains => "contain",
                    MatchMode::Exact => "equal",
                    MatchMode::Amount => "be the amount",
                },
                self.expected
            ))
        }
    }

    /// Compare a rendered value, producing an [`ProbeError::AssertionMismatch`]
    pub fn verify(&self, actual: &str) -> Result<(), ProbeError> {
        if self.check(actual).passed {
            Ok(())
        } else {
            Err(ProbeError::AssertionMismatch {
                field: self.field.clone(),
                row: self.row,
                expected: self.expected.clone(),
                actual: actual.to_string(),
            })
        }
    }
}
