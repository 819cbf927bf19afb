use maud::{html, Markup};

use crate::domain::{ListingDoc, ListingType};

/// One listing as a grid card.
pub fn listing_card(doc: &ListingDoc) -> Markup {
    let listing = &doc.data;
    let title = listing.name.as_deref().unwrap_or("Untitled listing");

    html! {
        li class="listing-card" data-listing-id=(doc.id) {
            @if let Some(img) = listing.img_urls.first() {
                img class="listing-card__image" src=(img) alt=(title) loading="lazy";
            }
            div class="listing-card__body" {
                @if listing.offer {
                    span class="badge badge--offer" { "Offer" }
                }
                p class="listing-card__address" {
                    (listing.address.as_deref().unwrap_or("Address not provided"))
                }
                h3 class="listing-card__title" { (title) }
                p class="listing-card__price" {
                    @match listing.display_price() {
                        Some(price) => {
                            (format_rupees(price))
                            @if listing.listing_type == ListingType::Rent { " / month" }
                        },
                        None => "Price on request",
                    }
                }
                p class="listing-card__meta" {
                    @if let Some(beds) = listing.bedrooms {
                        span { (beds) @if beds == 1 { " Bed" } @else { " Beds" } }
                    }
                    @if let Some(baths) = listing.bathrooms {
                        span { (baths) @if baths == 1 { " Bath" } @else { " Baths" } }
                    }
                }
            }
        }
    }
}

/// Indian digit grouping: `12500.0` -> `₹12,500`, `10000000.0` -> `₹1,00,00,000`.
pub fn format_rupees(amount: f64) -> String {
    let digits = (amount.round() as u64).to_string();
    let (head, last_three) = digits.split_at(digits.len().saturating_sub(3));

    let mut out = String::with_capacity(digits.len() + digits.len() / 2 + 3);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if !head.is_empty() {
        out.push(',');
    }
    out.push_str(last_three);
    format!("₹{out}")
}
