//! Product catalog store
//!
//! One product per line: `name,protein,fat,carb` (values per 100 g, name stored
//! lowercase). Lines that do not split into exactly four fields are skipped on
//! read; a field that fails numeric parsing aborts the whole load. The only
//! mutation is an upsert that drops any prior line for the key and appends a
//! fresh one.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::Nutrition;

use super::{StoreError, StoreResult};

/// Full catalog mapping, rebuilt from disk on every load
pub type ProductMap = BTreeMap<String, Nutrition>;

/// Seed records written when the backing file is absent
const SEED_PRODUCTS: &[(&str, f64, f64, f64)] = &[
    ("apple", 0.3, 0.2, 14.0),
    ("chicken breast", 31.0, 3.6, 0.0),
    ("buckwheat", 12.6, 3.3, 68.0),
];

/// Normalize a product name for use as a catalog key
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Look up a product by an already-normalized name
pub fn lookup<'a>(products: &'a ProductMap, name: &str) -> Option<&'a Nutrition> {
    products.get(name)
}

/// The product catalog, backed by a text file at an injected path
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
}

impl Catalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the backing file into a product map.
    ///
    /// A missing file yields an empty map. A line with a field count other than
    /// four is skipped; a bad numeric field fails the entire load.
    pub fn load(&self) -> StoreResult<ProductMap> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProductMap::new()),
            Err(e) => return Err(e.into()),
        };

        let mut products = ProductMap::new();
        for (idx, line) in text.lines().enumerate() {
            let parts: Vec<&str> = line.trim().split(',').collect();
            if parts.len() != 4 {
                continue;
            }
            let name = normalize_name(parts[0]);
            let protein = parse_field(parts[1], idx + 1)?;
            let fat = parse_field(parts[2], idx + 1)?;
            let carb = parse_field(parts[3], idx + 1)?;
            products.insert(name, Nutrition::new(protein, fat, carb));
        }
        Ok(products)
    }

    /// Insert or replace a product record.
    ///
    /// Drops any existing line for the normalized name and appends a fresh line
    /// at the end, then rewrites the file in a single write. Lines that do not
    /// parse as records are carried through verbatim. Returns the normalized
    /// name actually stored.
    pub fn upsert(&self, name: &str, nutrition: Nutrition) -> StoreResult<String> {
        let key = normalize_name(name);

        let existing = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        let mut out = String::new();
        for line in existing.lines() {
            let parts: Vec<&str> = line.trim().split(',').collect();
            if parts.len() == 4 && normalize_name(parts[0]) == key {
                continue;
            }
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!(
            "{},{},{},{}\n",
            key, nutrition.protein, nutrition.fat, nutrition.carb
        ));

        fs::write(&self.path, out)?;
        Ok(key)
    }

    /// Seed the catalog with the default products when the file is absent.
    /// Returns true if seeding happened.
    pub fn bootstrap(&self) -> StoreResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        let mut out = String::new();
        for (name, protein, fat, carb) in SEED_PRODUCTS {
            out.push_str(&format!("{},{},{},{}\n", name, protein, fat, carb));
        }
        fs::write(&self.path, out)?;
        Ok(true)
    }

    /// Raw file contents for display, or None when the file does not exist
    pub fn read_raw(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_field(raw: &str, line: usize) -> StoreResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| StoreError::InvalidNumber {
            line,
            value: raw.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog_in(dir: &TempDir) -> Catalog {
        Catalog::new(dir.path().join("products.txt"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_in(&dir);
        assert!(catalog.load().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_in(&dir);

        let key = catalog
            .upsert("  Apple ", Nutrition::new(0.3, 0.2, 14.0))
            .unwrap();
        assert_eq!(key, "apple");

        let products = catalog.load().unwrap();
        let n = lookup(&products, "apple").unwrap();
        assert!((n.protein - 0.3).abs() < 1e-9);
        assert!((n.fat - 0.2).abs() < 1e-9);
        assert!((n.carb - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_upsert_same_name_replaces() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_in(&dir);

        catalog.upsert("apple", Nutrition::new(0.3, 0.2, 14.0)).unwrap();
        catalog.upsert("APPLE", Nutrition::new(1.0, 1.0, 10.0)).unwrap();

        let products = catalog.load().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(*lookup(&products, "apple").unwrap(), Nutrition::new(1.0, 1.0, 10.0));
    }

    #[test]
    fn test_malformed_line_skipped_on_load() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_in(&dir);
        fs::write(
            catalog.path(),
            "apple,0.3,0.2,14\nnot a record\nshort,1,2\nbuckwheat,12.6,3.3,68\n",
        )
        .unwrap();

        let products = catalog.load().unwrap();
        assert_eq!(products.len(), 2);
        assert!(lookup(&products, "apple").is_some());
        assert!(lookup(&products, "buckwheat").is_some());
    }

    #[test]
    fn test_bad_number_aborts_load() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_in(&dir);
        fs::write(catalog.path(), "apple,0.3,oops,14\n").unwrap();

        match catalog.load() {
            Err(StoreError::InvalidNumber { line, value }) => {
                assert_eq!(line, 1);
                assert_eq!(value, "oops");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_upsert_preserves_unrelated_lines() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_in(&dir);
        fs::write(catalog.path(), "apple,0.3,0.2,14\njunk line\n").unwrap();

        catalog.upsert("apple", Nutrition::new(0.5, 0.5, 15.0)).unwrap();

        let raw = catalog.read_raw().unwrap().unwrap();
        assert!(raw.contains("junk line\n"));
        // replaced record moves to the end
        assert!(raw.trim_end().ends_with("apple,0.5,0.5,15"));
    }

    #[test]
    fn test_bootstrap_seeds_three_defaults() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_in(&dir);

        assert!(catalog.bootstrap().unwrap());
        let products = catalog.load().unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(*lookup(&products, "apple").unwrap(), Nutrition::new(0.3, 0.2, 14.0));
        assert_eq!(
            *lookup(&products, "chicken breast").unwrap(),
            Nutrition::new(31.0, 3.6, 0.0)
        );
        assert_eq!(
            *lookup(&products, "buckwheat").unwrap(),
            Nutrition::new(12.6, 3.3, 68.0)
        );

        // second call is a no-op
        assert!(!catalog.bootstrap().unwrap());
    }
}
