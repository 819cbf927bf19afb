use maud::{html, Markup};

pub mod card;
pub mod error;
pub mod search_form;

pub use card::listing_card;
pub use error::error_page;
pub use search_form::search_form;

use crate::domain::ListingDoc;

pub fn listing_grid(listings: &[ListingDoc]) -> Markup {
    html! {
        ul class="listing-grid" {
            @for doc in listings {
                (listing_card(doc))
            }
        }
    }
}
