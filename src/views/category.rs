// src/views/category.rs

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::domain::{ListingDoc, ListingType};
use crate::fetcher::{ListingFetcher, Slot};
use crate::store::{Direction, ListingQuery};
use crate::views::{deliver, lock, ViewLifetime};

/// "Show more" page: one category, newest first, bounded.
pub struct CategoryView {
    fetcher: ListingFetcher,
    title: &'static str,
    query: ListingQuery,
    slot: Arc<Mutex<Slot<Vec<ListingDoc>>>>,
    lifetime: ViewLifetime,
}

impl CategoryView {
    pub fn offers(fetcher: ListingFetcher, limit: u32) -> Self {
        Self::new(
            fetcher,
            "Offers",
            ListingQuery::listings().where_eq("offer", true),
            limit,
        )
    }

    pub fn of_type(fetcher: ListingFetcher, listing_type: ListingType, limit: u32) -> Self {
        let title = match listing_type {
            ListingType::Sale => "Places for sale",
            _ => "Places for rent",
        };
        Self::new(
            fetcher,
            title,
            ListingQuery::listings().where_eq("type", listing_type.as_str()),
            limit,
        )
    }

    fn new(fetcher: ListingFetcher, title: &'static str, query: ListingQuery, limit: u32) -> Self {
        Self {
            fetcher,
            title,
            query: query.order_by("timestamp", Direction::Descending).limit(limit),
            slot: Arc::new(Mutex::new(Slot::default())),
            lifetime: ViewLifetime::default(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn load(&self) -> impl Future<Output = ()> + Send + 'static {
        let fetcher = self.fetcher.clone();
        let query = self.query.clone();
        let slot = Arc::clone(&self.slot);
        let lifetime = self.lifetime.clone();

        async move {
            let result = fetcher.fetch(&query).await;
            deliver(&lifetime, &slot, "category", |s| s.apply(result));
        }
    }

    pub fn slot(&self) -> Slot<Vec<ListingDoc>> {
        lock(&self.slot).clone()
    }

    pub fn teardown(&self) {
        self.lifetime.end(&self.slot);
    }
}
