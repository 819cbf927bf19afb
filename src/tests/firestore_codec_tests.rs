// src/tests/firestore_codec_tests.rs

use serde_json::json;

use crate::domain::ListingType;
use crate::store::firestore_codec::{decode_error, decode_run_query, decode_value, encode_query};
use crate::store::{Direction, ListingQuery, StoreError};
use crate::views::HomeSection;

#[test]
fn home_section_query_encodes_as_structured_query() {
    let body = encode_query(&HomeSection::Rentals.query(4));
    assert_eq!(
        body,
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": "listings" }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "type" },
                        "op": "EQUAL",
                        "value": { "stringValue": "rent" }
                    }
                },
                "orderBy": [{ "field": { "fieldPath": "timestamp" }, "direction": "DESCENDING" }],
                "limit": 4
            }
        })
    );
}

#[test]
fn several_filters_become_an_and_composite() {
    let query = ListingQuery::listings()
        .where_eq("offer", true)
        .where_eq("bedrooms", 2i64)
        .order_by("timestamp", Direction::Ascending);
    let body = encode_query(&query);

    let composite = &body["structuredQuery"]["where"]["compositeFilter"];
    assert_eq!(composite["op"], "AND");
    assert_eq!(composite["filters"][0]["fieldFilter"]["value"], json!({ "booleanValue": true }));
    assert_eq!(composite["filters"][1]["fieldFilter"]["value"], json!({ "integerValue": "2" }));
    assert_eq!(body["structuredQuery"]["orderBy"][0]["direction"], "ASCENDING");
    assert!(body["structuredQuery"].get("limit").is_none());
}

#[test]
fn unconstrained_query_has_no_where_clause() {
    let body = encode_query(&ListingQuery::listings());
    assert_eq!(body, json!({ "structuredQuery": { "from": [{ "collectionId": "listings" }] } }));
}

#[test]
fn typed_values_decode_to_plain_json() {
    let value = json!({
        "mapValue": {
            "fields": {
                "price": { "integerValue": "9000" },
                "ratio": { "doubleValue": 0.5 },
                "offer": { "booleanValue": true },
                "when": { "timestampValue": "2024-03-01T10:00:00Z" },
                "nothing": { "nullValue": null },
                "pics": { "arrayValue": { "values": [{ "stringValue": "a.jpg" }] } },
                "empty": { "arrayValue": {} },
                "geo": { "geoPointValue": { "latitude": 18.5, "longitude": 73.8 } }
            }
        }
    });

    assert_eq!(
        decode_value(&value),
        json!({
            "price": 9000,
            "ratio": 0.5,
            "offer": true,
            "when": "2024-03-01T10:00:00Z",
            "nothing": null,
            "pics": ["a.jpg"],
            "empty": [],
            "geo": { "lat": 18.5, "lng": 73.8 }
        })
    );
}

#[test]
fn run_query_response_keeps_order_and_skips_read_time_markers() {
    let body = json!([
        {
            "document": {
                "name": "projects/p/databases/(default)/documents/listings/newest",
                "fields": {
                    "address": { "stringValue": "12 MG Road, Pune" },
                    "type": { "stringValue": "rent" },
                    "discountedPrice": { "integerValue": "9000" },
                    "offer": { "booleanValue": false }
                }
            },
            "readTime": "2024-03-01T10:00:00Z"
        },
        {
            "document": {
                "name": "projects/p/databases/(default)/documents/listings/older",
                "fields": { "type": { "stringValue": "sale" } }
            }
        },
        { "readTime": "2024-03-01T10:00:00Z" }
    ])
    .to_string();

    let docs = decode_run_query(&body).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id, "newest");
    assert_eq!(docs[0].data.discounted_price, Some(9000.0));
    assert_eq!(docs[0].data.listing_type, ListingType::Rent);
    assert_eq!(docs[1].id, "older");
    assert_eq!(docs[1].data.listing_type, ListingType::Sale);
}

#[test]
fn empty_result_is_empty_not_an_error() {
    let docs = decode_run_query(r#"[{"readTime":"2024-03-01T10:00:00Z"}]"#).unwrap();
    assert!(docs.is_empty());
}

#[test]
fn garbage_body_is_a_decode_error() {
    assert!(matches!(
        decode_run_query("<html>oops</html>"),
        Err(StoreError::Decode(_))
    ));
}

#[test]
fn error_envelopes_in_both_shapes() {
    let object = r#"{"error":{"code":400,"message":"The query requires an index.","status":"FAILED_PRECONDITION"}}"#;
    let array = format!("[{object}]");

    for body in [object.to_string(), array] {
        let err = decode_error(&body).unwrap();
        assert_eq!(err.status, "FAILED_PRECONDITION");
        assert!(err.message.contains("requires an index"));
    }
    assert!(decode_error("not json").is_none());
}
