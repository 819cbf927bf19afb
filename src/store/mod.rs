// src/store/mod.rs

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ListingDoc;

pub mod firestore;
pub(crate) mod firestore_codec;

pub use firestore::FirestoreStore;

pub const LISTINGS_COLLECTION: &str = "listings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Transport(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("query rejected by store: {0}")]
    Rejected(String),
    #[error("malformed query: {0}")]
    InvalidQuery(String),
    #[error("could not decode store response: {0}")]
    Decode(String),
    #[error("database error: {0}")]
    Database(String),
}

/// Read-only access to a document collection of listings.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Run one query. Results keep the store's ordering.
    async fn query(&self, query: &ListingQuery) -> Result<Vec<ListingDoc>, StoreError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(v) => write!(f, "{v:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Equality filters, optional ordering and optional limit over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub collection: String,
    pub filters: Vec<(String, FieldValue)>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<u32>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::collection(LISTINGS_COLLECTION)
    }
}

impl ListingQuery {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    /// Unconstrained query over `listings`.
    pub fn listings() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// Reject queries no backend can run. Backends call this before any I/O.
    pub fn validate(&self) -> Result<(), StoreError> {
        if !is_valid_field_path(&self.collection) || self.collection.contains('.') {
            return Err(StoreError::InvalidQuery(format!(
                "bad collection name {:?}",
                self.collection
            )));
        }
        for (field, _) in &self.filters {
            if !is_valid_field_path(field) {
                return Err(StoreError::InvalidQuery(format!("bad filter field {field:?}")));
            }
        }
        if let Some((field, _)) = &self.order_by {
            if !is_valid_field_path(field) {
                return Err(StoreError::InvalidQuery(format!("bad order field {field:?}")));
            }
        }
        if self.limit == Some(0) {
            return Err(StoreError::InvalidQuery("limit must be positive".into()));
        }
        Ok(())
    }
}

impl fmt::Display for ListingQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection)?;
        for (field, value) in &self.filters {
            write!(f, " where {field} == {value}")?;
        }
        if let Some((field, dir)) = &self.order_by {
            let dir = match dir {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            write!(f, " order by {field} {dir}")?;
        }
        if let Some(n) = self.limit {
            write!(f, " limit {n}")?;
        }
        Ok(())
    }
}

/// Dotted path of identifier segments, e.g. `timestamp` or `geolocation.lat`.
fn is_valid_field_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
