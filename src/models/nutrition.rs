//! Shared nutrition data structure
//!
//! Used across catalog entries, meal aggregation, and ledger records.

use serde::{Deserialize, Serialize};

/// Macro-nutrient triple, grams per 100 g of product (Б/Ж/У order)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
}

impl Nutrition {
    pub fn new(protein: f64, fat: f64, carb: f64) -> Self {
        Self { protein, fat, carb }
    }

    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            protein: self.protein * multiplier,
            fat: self.fat * multiplier,
            carb: self.carb * multiplier,
        }
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carb: self.carb + other.carb,
        }
    }

    /// Round each field to two decimal places (presentation boundary only)
    pub fn rounded(&self) -> Self {
        Self {
            protein: round2(self.protein),
            fat: round2(self.fat),
            carb: round2(self.carb),
        }
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        let n = Nutrition::new(0.3, 0.2, 14.0);
        let scaled = n.scale(2.0);
        assert_eq!(scaled, Nutrition::new(0.6, 0.4, 28.0));
    }

    #[test]
    fn test_sum() {
        let total: Nutrition = [Nutrition::new(1.0, 2.0, 3.0), Nutrition::new(0.5, 0.5, 0.5)]
            .into_iter()
            .sum();
        assert_eq!(total, Nutrition::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(28.0), 28.0);
    }
}
