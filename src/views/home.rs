// src/views/home.rs

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::domain::ListingDoc;
use crate::fetcher::{ListingFetcher, Slot};
use crate::store::{Direction, ListingQuery};
use crate::views::{deliver, lock, ViewLifetime};

pub const DEFAULT_SECTION_LIMIT: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeSection {
    Offers,
    Rentals,
    Sales,
}

impl HomeSection {
    pub const ALL: [HomeSection; 3] = [HomeSection::Offers, HomeSection::Rentals, HomeSection::Sales];

    /// Most recent listings of this category, newest first.
    pub fn query(self, limit: u32) -> ListingQuery {
        let query = match self {
            HomeSection::Offers => ListingQuery::listings().where_eq("offer", true),
            HomeSection::Rentals => ListingQuery::listings().where_eq("type", "rent"),
            HomeSection::Sales => ListingQuery::listings().where_eq("type", "sale"),
        };
        query.order_by("timestamp", Direction::Descending).limit(limit)
    }

    pub fn title(self) -> &'static str {
        match self {
            HomeSection::Offers => "Recent offers",
            HomeSection::Rentals => "Places for rent",
            HomeSection::Sales => "Places for sale",
        }
    }

    pub fn more_label(self) -> &'static str {
        match self {
            HomeSection::Offers => "Show more offers",
            HomeSection::Rentals => "Show more places for rent",
            HomeSection::Sales => "Show more places for sale",
        }
    }

    pub fn more_href(self) -> &'static str {
        match self {
            HomeSection::Offers => "/offers",
            HomeSection::Rentals => "/category/rent",
            HomeSection::Sales => "/category/sale",
        }
    }

    fn key(self) -> &'static str {
        match self {
            HomeSection::Offers => "offers",
            HomeSection::Rentals => "rentals",
            HomeSection::Sales => "sales",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HomeSlots {
    pub offers: Slot<Vec<ListingDoc>>,
    pub rentals: Slot<Vec<ListingDoc>>,
    pub sales: Slot<Vec<ListingDoc>>,
}

impl HomeSlots {
    pub fn slot(&self, section: HomeSection) -> &Slot<Vec<ListingDoc>> {
        match section {
            HomeSection::Offers => &self.offers,
            HomeSection::Rentals => &self.rentals,
            HomeSection::Sales => &self.sales,
        }
    }

    fn slot_mut(&mut self, section: HomeSection) -> &mut Slot<Vec<ListingDoc>> {
        match section {
            HomeSection::Offers => &mut self.offers,
            HomeSection::Rentals => &mut self.rentals,
            HomeSection::Sales => &mut self.sales,
        }
    }
}

/// Home page logic: three independent, bounded category fetches.
pub struct HomeView {
    fetcher: ListingFetcher,
    limit: u32,
    slots: Arc<Mutex<HomeSlots>>,
    lifetime: ViewLifetime,
}

impl HomeView {
    pub fn new(fetcher: ListingFetcher, limit: u32) -> Self {
        Self {
            fetcher,
            limit,
            slots: Arc::new(Mutex::new(HomeSlots::default())),
            lifetime: ViewLifetime::default(),
        }
    }

    /// Issue all three fetches concurrently.
    ///
    /// Each completion lands in its own slot; a failure in one section leaves
    /// the other two alone. The returned future owns everything it touches, so
    /// it can outlive `self` and is harmless after [`HomeView::teardown`].
    pub fn load(&self) -> impl Future<Output = ()> + Send + 'static {
        let [offers, rentals, sales] = HomeSection::ALL.map(|section| {
            load_section(
                self.fetcher.clone(),
                section,
                self.limit,
                Arc::clone(&self.slots),
                self.lifetime.clone(),
            )
        });

        async move {
            tokio::join!(offers, rentals, sales);
        }
    }

    pub fn slots(&self) -> HomeSlots {
        lock(&self.slots).clone()
    }

    pub fn teardown(&self) {
        self.lifetime.end(&self.slots);
    }
}

async fn load_section(
    fetcher: ListingFetcher,
    section: HomeSection,
    limit: u32,
    slots: Arc<Mutex<HomeSlots>>,
    lifetime: ViewLifetime,
) {
    let result = fetcher.fetch(&section.query(limit)).await;
    deliver(&lifetime, &slots, section.key(), |s| s.slot_mut(section).apply(result));
}
