//! Product catalog module.
//!
//! Contains the product snapshot and the category sum type.

mod category;
mod product;

pub use category::{Category, CategoryFilter, ALL_CATEGORIES_SLUG};
pub use product::{Product, ProductSpecs};
