//! Nutrition calculation module
//!
//! Turns user-entered meal lines plus the catalog into summed BJU totals.

pub mod aggregator;

pub use aggregator::{aggregate, AggregateError, MealTotals};
