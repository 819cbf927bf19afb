// src/tests/router_tests/category_tests.rs

use crate::tests::router_tests::{app_with, body_string, get};
use crate::tests::utils::{sample_docs, MemoryStore};

#[test]
fn category_pages_show_only_their_type() {
    let app = app_with(MemoryStore::new(sample_docs()));

    let mut rent = get(&app, "/category/rent");
    assert_eq!(rent.status(), 200);
    let body = body_string(&mut rent);
    assert_eq!(body.matches("class=\"listing-card\"").count(), 3);
    assert!(!body.contains("Marine Drive"));

    let mut offers = get(&app, "/offers");
    let body = body_string(&mut offers);
    assert_eq!(body.matches("class=\"listing-card\"").count(), 2);
}

#[test]
fn failed_category_fetch_says_so() {
    let app = app_with(MemoryStore::new(sample_docs()).fail_when(|_| true, "unreachable"));
    let mut resp = get(&app, "/category/sale");
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("could not be loaded"));
}
