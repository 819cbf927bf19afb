// src/domain/filter.rs

use thiserror::Error;

use crate::domain::listing::{Listing, ListingDoc, ListingType};
use crate::domain::price::{PriceRange, PriceRangeError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterInputError {
    #[error("unknown property type {0:?} (expected `rent` or `sale`)")]
    UnknownType(String),
    #[error(transparent)]
    Price(#[from] PriceRangeError),
}

/// The three optional search predicates. `None` means "match everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub location: Option<String>,
    pub price_range: Option<PriceRange>,
    pub property_type: Option<ListingType>,
}

impl SearchFilters {
    /// Build filters from raw form input. Blank inputs are inactive.
    pub fn parse(
        location: Option<&str>,
        property_type: Option<&str>,
        price_range: Option<&str>,
    ) -> Result<Self, FilterInputError> {
        let location = non_blank(location).map(str::to_string);

        let property_type = match non_blank(property_type) {
            Some(raw) => Some(
                ListingType::parse(raw)
                    .ok_or_else(|| FilterInputError::UnknownType(raw.to_string()))?,
            ),
            None => None,
        };

        let price_range = match non_blank(price_range) {
            Some(raw) => Some(raw.parse::<PriceRange>()?),
            None => None,
        };

        Ok(Self {
            location,
            price_range,
            property_type,
        })
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Derive the filtered view of a snapshot.
///
/// Single eager pass; snapshot order is preserved and a listing is kept only
/// when every active predicate accepts it.
pub fn apply_filters(snapshot: &[ListingDoc], filters: &SearchFilters) -> Vec<ListingDoc> {
    let needle = filters.location.as_deref().map(str::to_lowercase);

    snapshot
        .iter()
        .filter(|doc| passes(&doc.data, needle.as_deref(), filters))
        .cloned()
        .collect()
}

fn passes(listing: &Listing, needle: Option<&str>, filters: &SearchFilters) -> bool {
    if let Some(needle) = needle {
        match &listing.address {
            Some(address) if address.to_lowercase().contains(needle) => {}
            _ => return false,
        }
    }

    if let Some(range) = &filters.price_range {
        match listing.discounted_price {
            Some(price) if range.contains(price) => {}
            _ => return false,
        }
    }

    if let Some(wanted) = filters.property_type {
        // `Other` is never a valid filter input, so it can't match here either.
        if listing.listing_type != wanted {
            return false;
        }
    }

    true
}
