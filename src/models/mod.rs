//! Data models
//!
//! Rust structs for products, meal lines, and meal records.

mod meal;
mod nutrition;

pub use meal::{MealLine, MealRecord};
pub use nutrition::{round2, Nutrition};
