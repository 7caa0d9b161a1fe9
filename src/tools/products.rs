//! Product catalog tools
//!
//! Add a product (upsert semantics) and list the catalog.

use serde::Serialize;

use crate::models::Nutrition;
use crate::store::Catalog;

/// Response for add_product
#[derive(Debug, Serialize)]
pub struct AddProductResponse {
    pub name: String,
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
    /// Whether an existing record was replaced
    pub replaced: bool,
}

/// One catalog entry in a listing
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
}

/// Response for list_products
#[derive(Debug, Serialize)]
pub struct ListProductsResponse {
    pub products: Vec<ProductSummary>,
    pub total: usize,
}

/// Add or replace a product record in the catalog.
///
/// Values are grams per 100 g of product. Re-saving an existing name replaces
/// its record instead of duplicating it.
pub fn add_product(
    catalog: &Catalog,
    name: &str,
    protein: f64,
    fat: f64,
    carb: f64,
) -> Result<AddProductResponse, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Product name cannot be empty".to_string());
    }
    if protein < 0.0 {
        return Err("protein cannot be negative".to_string());
    }
    if fat < 0.0 {
        return Err("fat cannot be negative".to_string());
    }
    if carb < 0.0 {
        return Err("carb cannot be negative".to_string());
    }

    let existing = catalog
        .load()
        .map_err(|e| format!("Failed to load catalog: {}", e))?;
    let replaced = existing.contains_key(&crate::store::normalize_name(trimmed));

    let stored = catalog
        .upsert(trimmed, Nutrition::new(protein, fat, carb))
        .map_err(|e| format!("Failed to save product: {}", e))?;

    tracing::info!(name = %stored, replaced, "Product saved");

    Ok(AddProductResponse {
        name: stored,
        protein,
        fat,
        carb,
        replaced,
    })
}

/// List all catalog entries, sorted by name
pub fn list_products(catalog: &Catalog) -> Result<ListProductsResponse, String> {
    let products = catalog
        .load()
        .map_err(|e| format!("Failed to load catalog: {}", e))?;

    let summaries: Vec<ProductSummary> = products
        .iter()
        .map(|(name, n)| ProductSummary {
            name: name.clone(),
            protein: n.protein,
            fat: n.fat,
            carb: n.carb,
        })
        .collect();
    let total = summaries.len();

    Ok(ListProductsResponse {
        products: summaries,
        total,
    })
}
