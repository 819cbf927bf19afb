// src/fetcher.rs

use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::domain::ListingDoc;
use crate::store::{ListingQuery, ListingStore, StoreError};

/// Issues read-only queries against an injected store.
#[derive(Clone)]
pub struct ListingFetcher {
    store: Arc<dyn ListingStore>,
}

impl ListingFetcher {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }

    /// One round-trip, no retry. Failures are logged here and handed back.
    pub async fn fetch(&self, query: &ListingQuery) -> Result<Vec<ListingDoc>, StoreError> {
        let started = Instant::now();
        match self.store.query(query).await {
            Ok(docs) => {
                debug!(
                    store = self.store.name(),
                    %query,
                    count = docs.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "fetched listings"
                );
                Ok(docs)
            }
            Err(e) => {
                warn!(store = self.store.name(), %query, error = %e, "listing fetch failed");
                Err(e)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Unloaded,
    Loaded,
    Failed,
}

/// Holder for one fetch's result.
///
/// "Unloaded" and "loaded but empty" are different states. A failed fetch
/// records the error and leaves whatever value was there before untouched.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    value: Option<T>,
    last_error: Option<String>,
    writes: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            last_error: None,
            writes: 0,
        }
    }
}

impl<T> Slot<T> {
    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn failure(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Outcome of the most recent completion.
    pub fn status(&self) -> SlotStatus {
        match (&self.value, &self.last_error) {
            (_, Some(_)) => SlotStatus::Failed,
            (Some(_), None) => SlotStatus::Loaded,
            (None, None) => SlotStatus::Unloaded,
        }
    }

    /// Number of completions applied so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn set(&mut self, value: T) {
        self.value = Some(value);
        self.last_error = None;
        self.writes += 1;
    }

    pub fn fail(&mut self, error: impl Display) {
        self.last_error = Some(error.to_string());
        self.writes += 1;
    }

    pub fn apply<E: Display>(&mut self, result: Result<T, E>) {
        match result {
            Ok(value) => self.set(value),
            Err(e) => self.fail(e),
        }
    }
}

impl Slot<Vec<ListingDoc>> {
    /// Listings worth rendering a section for: loaded and non-empty.
    pub fn renderable(&self) -> Option<&[ListingDoc]> {
        self.value
            .as_deref()
            .filter(|listings| !listings.is_empty())
    }
}
