// src/tests/router_tests/search_tests.rs

use crate::tests::router_tests::{app_with, body_string, get};
use crate::tests::utils::{sample_docs, MemoryStore};

#[test]
fn bare_search_shows_whole_snapshot() {
    let app = app_with(MemoryStore::new(sample_docs()));
    let mut resp = get(&app, "/search");
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert_eq!(body.matches("class=\"listing-card\"").count(), 5);
    assert!(!body.contains("matching listings"));
}

#[test]
fn query_parameters_filter_the_grid() {
    let app = app_with(MemoryStore::new(sample_docs()));
    let mut resp = get(&app, "/search?location=Marine%20Drive&type=sale");
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert_eq!(body.matches("class=\"listing-card\"").count(), 1);
    assert!(body.contains("88 Marine Drive, Mumbai"));
    assert!(body.contains("1 matching listings"));
    // Sale selected: sale price options are offered.
    assert!(body.contains("Above ₹1,00,00,000"));
}

#[test]
fn empty_parameters_still_count_as_a_submission() {
    let app = app_with(MemoryStore::new(sample_docs()));
    let mut resp = get(&app, "/search?location=&type=&price=");
    let body = body_string(&mut resp);
    assert!(body.contains("5 matching listings"));
}

#[test]
fn submission_goes_through_the_form() {
    let app = app_with(MemoryStore::new(sample_docs()));
    let mut resp = get(&app, "/search?type=rent&price=8000-12000");
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert_eq!(body.matches("class=\"listing-card\"").count(), 2);
    assert!(body.contains("12 MG Road, Pune"));
    assert!(body.contains("21 Residency Road, Bengaluru"));
    // Type stays selected, the price select is reset to "Any price".
    assert!(body.contains("value=\"rent\" selected"));
    assert!(!body.contains("value=\"8000-10000\" selected"));
}

#[test]
fn bad_filter_input_is_a_bad_request() {
    let app = app_with(MemoryStore::new(sample_docs()));
    assert_eq!(get(&app, "/search?price=cheap").status(), 400);
    assert_eq!(get(&app, "/search?type=lease").status(), 400);
}

#[test]
fn store_outage_renders_an_empty_page_not_an_error() {
    let app = app_with(MemoryStore::new(sample_docs()).fail_when(|_| true, "unreachable"));
    let mut resp = get(&app, "/search");
    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(&mut resp).matches("class=\"listing-card\"").count(), 0);
}
