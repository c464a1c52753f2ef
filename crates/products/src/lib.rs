//! Products domain module.
//!
//! This crate contains the product record, its category enumeration, and the
//! validation rules applied to incoming product documents. It performs no IO.

pub mod category;
pub mod product;
pub mod query;

pub use category::Category;
pub use product::{Product, ProductDraft, ProductId, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
pub use query::{ProductQuery, parse_available_flag};
