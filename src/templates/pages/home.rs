// templates/pages/home.rs

use crate::templates::{components::listing_grid, desktop_layout};
use crate::views::{HomeSection, HomeSlots};
use maud::{html, Markup};

pub fn home_page(slots: &HomeSlots) -> Markup {
    desktop_layout(
        "Home",
        html! {
            main class="container home" {
                @for section in HomeSection::ALL {
                    // Unloaded, failed and empty sections all stay off the page.
                    @if let Some(listings) = slots.slot(section).renderable() {
                        section class="home-section" id=(format!("section-{}", section_id(section))) {
                            h2 { (section.title()) }
                            a href=(section.more_href()) class="home-section__more" {
                                (section.more_label())
                            }
                            (listing_grid(listings))
                        }
                    }
                }
            }
        },
    )
}

fn section_id(section: HomeSection) -> &'static str {
    match section {
        HomeSection::Offers => "offers",
        HomeSection::Rentals => "rent",
        HomeSection::Sales => "sale",
    }
}
