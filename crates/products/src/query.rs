//! List filters.

use crate::{Category, Product};

/// Conjunctive filter over products. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Exact name match.
    pub name: Option<String>,
    pub category: Option<Category>,
    pub available: Option<bool>,
}

impl ProductQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.name.as_deref().is_none_or(|n| product.name() == n)
            && self.category.is_none_or(|c| product.category() == c)
            && self.available.is_none_or(|a| product.available() == a)
    }
}

/// Interpret an `available` query-string value.
///
/// `true`, `1` and `yes` (any case) are truthy; every other value is falsy.
pub fn parse_available_flag(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}
