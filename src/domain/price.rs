// src/domain/price.rs

use std::str::FromStr;

use thiserror::Error;

use crate::domain::listing::ListingType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceRangeError {
    #[error("price range must look like `min-max`, got {0:?}")]
    Shape(String),
    #[error("price bound {0:?} is not a non-negative number")]
    Bound(String),
    #[error("price range minimum is greater than its maximum")]
    Inverted,
}

/// Inclusive `[min, max]` bound on a listing's discounted price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl FromStr for PriceRange {
    type Err = PriceRangeError;

    /// Parses the hyphen-delimited option value, e.g. `"8000-10000"`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (min, max) = raw
            .trim()
            .split_once('-')
            .ok_or_else(|| PriceRangeError::Shape(raw.to_string()))?;

        let min = parse_bound(min)?;
        let max = parse_bound(max)?;
        if min > max {
            return Err(PriceRangeError::Inverted);
        }
        Ok(Self { min, max })
    }
}

fn parse_bound(raw: &str) -> Result<f64, PriceRangeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| PriceRangeError::Bound(raw.to_string()))
}

/// One entry of the price `<select>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceOption {
    pub label: &'static str,
    pub value: &'static str,
}

const fn opt(label: &'static str, value: &'static str) -> PriceOption {
    PriceOption { label, value }
}

pub const RENT_PRICE_OPTIONS: &[PriceOption] = &[
    opt("₹8,000 - ₹10,000", "8000-10000"),
    opt("₹10,000 - ₹12,000", "10000-12000"),
    opt("₹12,000 - ₹15,000", "12000-15000"),
    opt("₹15,000 - ₹18,000", "15000-18000"),
    opt("₹18,000 - ₹20,000", "18000-20000"),
];

pub const SALE_PRICE_OPTIONS: &[PriceOption] = &[
    opt("Below ₹1,00,00,000", "0-10000000"),
    opt("Above ₹1,00,00,000", "10000000-1000000000"),
];

/// Selectable ranges for a property type. No selection shows the rental set.
pub fn price_range_options(property_type: Option<ListingType>) -> &'static [PriceOption] {
    match property_type {
        Some(ListingType::Sale) => SALE_PRICE_OPTIONS,
        _ => RENT_PRICE_OPTIONS,
    }
}
