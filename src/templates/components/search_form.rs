use maud::{html, Markup};

use crate::domain::ListingType;
use crate::views::search::SearchForm;

pub fn search_form(form: &SearchForm) -> Markup {
    let selected_type = form.property_type;

    html! {
        form class="search-form" method="get" action="/search" {
            label class="search-form__field" {
                "Location"
                input type="text" name="location" value=(form.location);
            }
            label class="search-form__field" {
                "Property Type"
                select name="type" id="property-type" {
                    option value="" selected[selected_type.is_none()] { "Select Type" }
                    option value="rent" selected[selected_type == Some(ListingType::Rent)] { "Rent" }
                    option value="sale" selected[selected_type == Some(ListingType::Sale)] { "Sale" }
                }
            }
            label class="search-form__field" {
                "Price"
                select name="price" id="price-filter" {
                    option value="" selected[form.price_range.is_empty()] { "Any price" }
                    @for opt in form.price_options {
                        option value=(opt.value) selected[form.price_range == opt.value] {
                            (opt.label)
                        }
                    }
                }
            }
            button type="submit" class="primary" { "Search Here" }
        }
    }
}
