pub mod filter;
pub mod listing;
pub mod price;

pub use filter::{apply_filters, SearchFilters};
pub use listing::{Listing, ListingDoc, ListingType};
pub use price::{price_range_options, PriceOption, PriceRange};
