use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use catalog_core::{DomainError, DomainResult};

use crate::category::Category;

/// Product identifier (store-assigned surrogate key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

catalog_core::impl_int_id!(ProductId, "ProductId");

/// Maximum length of a product name, in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length of a product description, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 250;

/// Prices are stored as NUMERIC(14, 2).
const PRICE_SCALE: u32 = 2;
const PRICE_INTEGER_DIGITS: u32 = 12;

/// Validated product fields, without an identity.
///
/// A draft is what a client sends on create and update: the whole record is
/// replaced by it, so every field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl ProductDraft {
    /// Validate a JSON product document.
    ///
    /// Any `id` member is ignored: identity is owned by the store.
    pub fn from_json(data: &Value) -> DomainResult<Self> {
        let Some(obj) = data.as_object() else {
            return Err(DomainError::validation(
                "Invalid product: body of request contained bad or no data",
            ));
        };

        let name = string_field(obj, "name", NAME_MAX_LEN)?;
        let description = string_field(obj, "description", DESCRIPTION_MAX_LEN)?;
        let price = parse_price(required(obj, "price")?)?;

        let available = match required(obj, "available")? {
            Value::Bool(b) => *b,
            other => {
                return Err(DomainError::validation(format!(
                    "Invalid type for boolean [available]: {}",
                    json_type_name(other)
                )));
            }
        };

        let category = match required(obj, "category")? {
            Value::String(s) => s.parse::<Category>()?,
            other => {
                return Err(DomainError::validation(format!("Invalid attribute: {other}")));
            }
        };

        Ok(Self {
            name,
            description,
            price,
            available,
            category,
        })
    }
}

/// A stored product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    #[serde(with = "rust_decimal::serde::str")]
    price: Decimal,
    available: bool,
    category: Category,
}

impl Product {
    /// Attach a store-assigned id to a validated draft.
    pub fn new(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: normalize_price(draft.price),
            available: draft.available,
            category: draft.category,
        }
    }

    /// Full replace of every field except the id.
    pub fn replace(&mut self, draft: ProductDraft) {
        *self = Self::new(self.id, draft);
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The fields of this record as a draft (used to re-submit edits).
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            available: self.available,
            category: self.category,
        }
    }
}

fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> DomainResult<&'a Value> {
    obj.get(key)
        .ok_or_else(|| DomainError::validation(format!("Invalid product: missing {key}")))
}

fn string_field(obj: &Map<String, Value>, key: &str, max_len: usize) -> DomainResult<String> {
    let Value::String(s) = required(obj, key)? else {
        return Err(DomainError::validation(format!("Invalid type for string [{key}]")));
    };
    if s.chars().count() > max_len {
        return Err(DomainError::validation(format!(
            "Invalid product: {key} exceeds {max_len} characters"
        )));
    }
    Ok(s.clone())
}

fn parse_price(value: &Value) -> DomainResult<Decimal> {
    let parsed = match value {
        Value::String(s) => parse_decimal(s.trim()),
        Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    };
    let price = parsed.ok_or_else(|| DomainError::validation(format!("Invalid price: {value}")))?;

    let limit = Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS));
    if price.abs() >= limit {
        return Err(DomainError::validation(format!("Invalid price: {value} is out of range")));
    }
    Ok(normalize_price(price))
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn normalize_price(price: Decimal) -> Decimal {
    let mut p = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    p.rescale(PRICE_SCALE);
    p
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
