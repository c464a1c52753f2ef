//! `catalog-core`: error model and id primitives shared by the catalog crates.
//!
//! No I/O lives here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
