//! Meal aggregation
//!
//! Pure function over an explicit list of (name, weight) lines and a loaded
//! catalog. Per-100g values are scaled by weight/100 and summed in f64; rounding
//! happens only at the presentation boundary.

use thiserror::Error;

use crate::models::{MealLine, Nutrition};
use crate::store::{lookup, normalize_name, ProductMap};

/// Validation failures while aggregating a meal. Any failure aborts the whole
/// aggregation; no partial totals are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// Exactly one of name/weight was filled in
    #[error("row {row} is incomplete: name '{name}', weight '{weight}' - both are required")]
    IncompleteRow {
        row: usize,
        name: String,
        weight: String,
    },

    /// Weight text does not parse as a non-negative number
    #[error("invalid weight '{weight}' for product '{name}'")]
    InvalidWeight { name: String, weight: String },

    /// Product is not in the catalog
    #[error("product '{name}' is not in the catalog; add it first")]
    UnknownProduct { name: String },

    /// Every line was empty or nothing contributed
    #[error("no valid product entered")]
    NoValidLines,
}

/// Result of a successful aggregation: summed totals plus the contributing
/// lines as typed (the ledger renders them verbatim).
#[derive(Debug, Clone, PartialEq)]
pub struct MealTotals {
    pub totals: Nutrition,
    pub lines: Vec<MealLine>,
}

/// Aggregate meal lines against the catalog.
///
/// Fully empty rows are skipped. A row with only one of name/weight, an
/// unparseable or negative weight, or a name with no catalog match aborts with
/// the corresponding error. Zero contributing rows is itself an error.
pub fn aggregate(products: &ProductMap, lines: &[MealLine]) -> Result<MealTotals, AggregateError> {
    let mut totals = Nutrition::zero();
    let mut echoed = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let name = normalize_name(&line.name);
        let weight_text = line.weight.trim();

        if name.is_empty() && weight_text.is_empty() {
            continue;
        }
        if name.is_empty() || weight_text.is_empty() {
            return Err(AggregateError::IncompleteRow {
                row: idx + 1,
                name: line.name.trim().to_string(),
                weight: weight_text.to_string(),
            });
        }

        let weight: f64 = weight_text
            .parse()
            .map_err(|_| AggregateError::InvalidWeight {
                name: name.clone(),
                weight: weight_text.to_string(),
            })?;
        if weight < 0.0 || !weight.is_finite() {
            return Err(AggregateError::InvalidWeight {
                name: name.clone(),
                weight: weight_text.to_string(),
            });
        }

        let per_100g = lookup(products, &name)
            .ok_or_else(|| AggregateError::UnknownProduct { name: name.clone() })?;

        totals = totals + per_100g.scale(weight / 100.0);
        echoed.push(line.clone());
    }

    if echoed.is_empty() {
        return Err(AggregateError::NoValidLines);
    }

    Ok(MealTotals {
        totals,
        lines: echoed,
    })
}
