use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Item entity - one entry of the persisted catalog document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier, assigned by the server
    pub id: u64,
    /// Display name, searched by `q`
    pub name: String,
    /// Catalog category
    pub category: String,
    /// Unit price, always greater than zero
    pub price: f64,
}

/// Candidate item as submitted by a client.
///
/// Fields are kept as raw JSON so that a wrong type (`"name": 123`) is
/// reported against the field instead of failing body parsing. Unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(required, custom(function = "non_blank_string"))]
    #[schema(value_type = String, example = "Wireless Mouse")]
    pub name: Option<Value>,
    #[validate(required, custom(function = "non_blank_string"))]
    #[schema(value_type = String, example = "Electronics")]
    pub category: Option<Value>,
    #[validate(required, custom(function = "positive_number"))]
    #[schema(value_type = f64, example = 49.99)]
    pub price: Option<Value>,
}

/// Order in which candidate fields are checked; the first failure wins.
pub const VALIDATION_ORDER: [&str; 3] = ["name", "category", "price"];

fn non_blank_string(value: &Value) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::new("non_blank_string")),
    }
}

fn positive_number(value: &Value) -> Result<(), ValidationError> {
    match value.as_f64() {
        Some(n) if value.is_number() && n > 0.0 => Ok(()),
        _ => Err(ValidationError::new("positive_number")),
    }
}

/// A candidate that passed validation, waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl CreateItem {
    /// Builds a candidate from plain values.
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            category: Some(Value::String(category.into())),
            price: Some(Value::from(price)),
        }
    }

    /// First field, in [`VALIDATION_ORDER`], that fails validation.
    pub fn first_invalid_field(&self) -> Option<&'static str> {
        let errors = self.validate().err()?;
        let fields = errors.field_errors();
        VALIDATION_ORDER
            .into_iter()
            .find(|field| fields.contains_key(*field))
    }

    /// Typed values of a candidate; `None` when any field is missing or
    /// has the wrong JSON type.
    pub fn into_new_item(self) -> Option<NewItem> {
        Some(NewItem {
            name: self.name?.as_str()?.to_string(),
            category: self.category?.as_str()?.to_string(),
            price: self.price?.as_f64()?,
        })
    }
}

impl NewItem {
    pub fn with_id(self, id: u64) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
        }
    }
}

/// Query parameters for listing items.
///
/// `page` and `limit` are taken as raw strings; anything that does not
/// parse as an integer falls back to the default.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    /// Case-insensitive substring matched against item names
    pub q: Option<String>,
    /// 1-based page number (default 1)
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
    /// Page size (default 20, clamped to 1..=100)
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemPage {
    pub items: Vec<Item>,
    /// Number of items matching the search, across all pages
    pub total: usize,
    pub page: u64,
    pub limit: u64,
}

/// Aggregate statistics over the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    /// Mean price, 0 for an empty collection
    pub average_price: f64,
}

impl Stats {
    pub fn from_items(items: &[Item]) -> Self {
        let total = items.len();
        let average_price = if total == 0 {
            0.0
        } else {
            items.iter().map(|item| item.price).sum::<f64>() / total as f64
        };

        Self {
            total,
            average_price,
        }
    }
}
