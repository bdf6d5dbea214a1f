//! Order records and the form data they are built from.

use std::collections::BTreeMap;
use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BoardError, Result};

/// Unique order identifier, mirrored in the card's `data-id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generate a fresh UUID v4 identifier
    pub fn generate() -> Self {
        OrderId(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        OrderId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        OrderId(s.to_string())
    }
}

/// A customer order on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub title: String,
    /// Table-size label
    pub table: String,
    /// Workflow column the order currently sits in
    pub column: String,
    pub created: Timestamp,
}

/// Flat mapping of form field names to submitted values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub const TITLE: &'static str = "title";
    pub const TABLE: &'static str = "table";
    pub const COLUMN: &'static str = "column";
    pub const ID: &'static str = "id";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value of a field that must be present and non-blank
    fn required(&self, name: &str) -> Result<String> {
        match self.get(name).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(BoardError::MissingField(name.to_string())),
        }
    }

    /// Value of an optional field, treating blank as absent
    fn optional(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// Build an order from submitted form fields.
///
/// `title` and `table` are required. `column` falls back to
/// `default_column` and `id` to a freshly generated one.
pub fn create_order_data(fields: &FormFields, default_column: &str) -> Result<Order> {
    let title = fields.required(FormFields::TITLE)?;
    let table = fields.required(FormFields::TABLE)?;
    let column = fields
        .optional(FormFields::COLUMN)
        .unwrap_or_else(|| default_column.to_string());
    let id = fields
        .optional(FormFields::ID)
        .map(OrderId::new)
        .unwrap_or_else(OrderId::generate);

    Ok(Order {
        id,
        title,
        table,
        column,
        created: Timestamp::now(),
    })
}
