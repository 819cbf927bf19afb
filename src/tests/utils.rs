// src/tests/utils.rs

use async_trait::async_trait;
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Notify;

use crate::db::{init_db, Database};
use crate::domain::{Listing, ListingDoc};
use crate::fetcher::ListingFetcher;
use crate::store::{Direction, FieldValue, ListingQuery, ListingStore, StoreError};

type FailRule = (Box<dyn Fn(&ListingQuery) -> bool + Send + Sync>, String);

/// In-memory stand-in for the remote listing store.
///
/// Answers equality/order/limit queries over raw JSON bodies, records every
/// query it sees, can fail chosen queries and can hold answers until released.
pub struct MemoryStore {
    docs: Vec<(String, Value)>,
    fail_rules: Vec<FailRule>,
    gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<ListingQuery>>,
}

impl MemoryStore {
    pub fn new(docs: Vec<(String, Value)>) -> Self {
        Self {
            docs,
            fail_rules: Vec::new(),
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail matching queries with a transport error.
    pub fn fail_when<F>(mut self, rule: F, message: &str) -> Self
    where
        F: Fn(&ListingQuery) -> bool + Send + Sync + 'static,
    {
        self.fail_rules.push((Box::new(rule), message.to_string()));
        self
    }

    /// Park every query until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<ListingQuery> {
        self.calls.lock().unwrap().clone()
    }

    fn run(&self, query: &ListingQuery) -> Vec<ListingDoc> {
        let mut hits: Vec<&(String, Value)> = self
            .docs
            .iter()
            .filter(|(_, body)| {
                query
                    .filters
                    .iter()
                    .all(|(field, want)| body.get(field).is_some_and(|v| eq(v, want)))
            })
            .collect();

        if let Some((field, direction)) = &query.order_by {
            // Like the hosted store, ordering drops documents without the field.
            hits.retain(|(_, body)| body.get(field).is_some());
            hits.sort_by(|a, b| {
                let ord = cmp(&a.1[field.as_str()], &b.1[field.as_str()]);
                match direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        let limit = query.limit.map(|n| n as usize).unwrap_or(usize::MAX);
        hits.into_iter()
            .take(limit)
            .map(|(id, body)| ListingDoc::from_raw(id.clone(), body.clone()))
            .collect()
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn query(&self, query: &ListingQuery) -> Result<Vec<ListingDoc>, StoreError> {
        self.calls.lock().unwrap().push(query.clone());
        query.validate()?;

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if let Some((_, message)) = self.fail_rules.iter().find(|(rule, _)| rule(query)) {
            return Err(StoreError::Transport(message.clone()));
        }
        Ok(self.run(query))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

fn eq(value: &Value, want: &FieldValue) -> bool {
    match (value, want) {
        (Value::Bool(a), FieldValue::Bool(b)) => a == b,
        (Value::String(a), FieldValue::Text(b)) => a == b,
        (Value::Number(a), FieldValue::Int(b)) => a.as_i64() == Some(*b),
        (Value::Number(a), FieldValue::Float(b)) => a.as_f64() == Some(*b),
        _ => false,
    }
}

fn cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Raw listing body with the fields the views and filters look at.
pub fn listing_body(address: &str, kind: &str, price: f64, offer: bool, minutes: i64) -> Value {
    json!({
        "name": format!("Home on {address}"),
        "address": address,
        "type": kind,
        "discountedPrice": price,
        "regularPrice": price,
        "offer": offer,
        "timestamp": format!("2024-03-01T10:{:02}:00Z", minutes),
        "bedrooms": 2,
        "bathrooms": 1,
        "imgUrls": ["https://img.example/1.jpg"],
    })
}

pub fn doc(id: &str, body: Value) -> (String, Value) {
    (id.to_string(), body)
}

pub fn decoded(id: &str, body: Value) -> ListingDoc {
    ListingDoc::new(id, Listing::from_value(body))
}

pub fn ids(docs: &[ListingDoc]) -> Vec<&str> {
    docs.iter().map(|d| d.id.as_str()).collect()
}

pub fn fetcher_for(store: Arc<MemoryStore>) -> ListingFetcher {
    ListingFetcher::new(store)
}

/// A small mixed catalogue: offers, rentals and sales.
pub fn sample_docs() -> Vec<(String, Value)> {
    vec![
        doc("r1", listing_body("12 MG Road, Pune", "rent", 9000.0, false, 1)),
        doc("r2", listing_body("4 Park Street, Kolkata", "rent", 15000.0, true, 2)),
        doc("s1", listing_body("88 Marine Drive, Mumbai", "sale", 9_500_000.0, false, 3)),
        doc("s2", listing_body("7 Baner Road, PUNE", "sale", 25_000_000.0, true, 4)),
        doc("r3", listing_body("21 Residency Road, Bengaluru", "rent", 12000.0, false, 5)),
    ]
}

/// Fresh SQLite database in the temp dir with the bundled schema applied.
pub fn init_test_db(prefix: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "{prefix}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}
