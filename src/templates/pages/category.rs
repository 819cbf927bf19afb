use crate::domain::ListingDoc;
use crate::fetcher::{Slot, SlotStatus};
use crate::templates::components::listing_grid;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn category_page(title: &str, slot: &Slot<Vec<ListingDoc>>) -> Markup {
    desktop_layout(
        title,
        html! {
            main class="container category" {
                h1 { (title) }
                @match slot.renderable() {
                    Some(listings) => (listing_grid(listings)),
                    None => {
                        @if slot.status() == SlotStatus::Failed {
                            p class="category__empty" { "Listings could not be loaded right now." }
                        } @else {
                            p class="category__empty" { "There are no listings here yet." }
                        }
                    },
                }
            }
        },
    )
}
