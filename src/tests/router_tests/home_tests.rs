// src/tests/router_tests/home_tests.rs

use crate::store::{FieldValue, ListingQuery};
use crate::tests::router_tests::{app_with, body_string, get};
use crate::tests::utils::{doc, listing_body, sample_docs, MemoryStore};

#[test]
fn home_renders_all_three_sections() {
    let app = app_with(MemoryStore::new(sample_docs()));
    let mut resp = get(&app, "/");
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Recent offers"));
    assert!(body.contains("Places for rent"));
    assert!(body.contains("Places for sale"));
    assert!(body.contains("href=\"/category/rent\""));
    assert!(body.contains("4 Park Street, Kolkata"));
}

#[test]
fn empty_and_failed_sections_are_left_out() {
    // No sale listings, and the offers query is down.
    let store = MemoryStore::new(vec![doc("r1", listing_body("12 MG Road, Pune", "rent", 9000.0, false, 1))])
        .fail_when(
            |q: &ListingQuery| q.filters.iter().any(|(f, v)| f == "offer" && *v == FieldValue::Bool(true)),
            "offers index missing",
        );
    let app = app_with(store);

    let mut resp = get(&app, "/");
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Places for rent"));
    assert!(!body.contains("Recent offers"));
    assert!(!body.contains("Places for sale"));
}

#[test]
fn unknown_path_is_not_found() {
    let app = app_with(MemoryStore::new(Vec::new()));
    let mut resp = get(&app, "/create-listing");
    assert_eq!(resp.status(), 404);
    assert!(body_string(&mut resp).contains("Not Found"));
}
