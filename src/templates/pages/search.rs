use crate::templates::components::{listing_grid, search_form};
use crate::templates::desktop_layout;
use crate::views::SearchState;
use maud::{html, Markup};

pub fn search_page(state: &SearchState) -> Markup {
    let visible = state.visible();

    desktop_layout(
        "Search",
        html! {
            main class="container search" {
                (search_form(&state.form))

                @if state.is_filtered {
                    p class="search__summary" { (visible.len()) " matching listings" }
                    @if visible.is_empty() {
                        p class="search__empty" { "No listings match your search." }
                    }
                }
                (listing_grid(visible))
            }
        },
    )
}
