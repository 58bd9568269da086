//! Test-data records passed into selection operations.
//!
//! Generators live outside the harness; it only needs the text a record is
//! searched by.

use serde::{Deserialize, Serialize};

/// A record that can be picked from a typeahead by its key
pub trait Keyed {
    /// Text typed into the typeahead and matched against its options
    fn key(&self) -> &str;
}

impl Keyed for str {
    fn key(&self) -> &str {
        self
    }
}

impl Keyed for String {
    fn key(&self) -> &str {
        self
    }
}

impl<T: Keyed + ?Sized> Keyed for &T {
    fn key(&self) -> &str {
        (**self).key()
    }
}

/// Product to select into a line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name
    pub name: String,
    /// Catalog identifier, when the generator supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Product {
    /// Product known only by name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: None,
        }
    }

    /// Attach a catalog identifier
    #[must_use]
    pub fn with_identifier(mut self, id: impl Into<String>) -> Self {
        self.identifier = Some(id.into());
        self
    }
}

impl Keyed for Product {
    fn key(&self) -> &str {
        &self.name
    }
}

/// Customer or account holder for the sale header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Display name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Customer {
    /// Customer known only by name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: None,
        }
    }
}

impl Keyed for Customer {
    fn key(&self) -> &str {
        &self.name
    }
}
