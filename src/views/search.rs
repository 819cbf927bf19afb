// src/views/search.rs

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::domain::filter::FilterInputError;
use crate::domain::{
    apply_filters, price_range_options, ListingDoc, ListingType, PriceOption, SearchFilters,
};
use crate::fetcher::{ListingFetcher, Slot};
use crate::store::ListingQuery;
use crate::views::{deliver, lock, ViewLifetime};

/// Raw form inputs, as the user typed/selected them.
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub location: String,
    pub property_type: Option<ListingType>,
    pub price_range: String,
    pub price_options: &'static [PriceOption],
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            location: String::new(),
            property_type: None,
            price_range: String::new(),
            price_options: price_range_options(None),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Full, unconstrained store content.
    pub snapshot: Slot<Vec<ListingDoc>>,
    pub filtered: Vec<ListingDoc>,
    /// Set by the first submission and never cleared.
    pub is_filtered: bool,
    pub form: SearchForm,
}

impl SearchState {
    /// What the card grid shows: the filtered set once anything was submitted,
    /// the raw snapshot before that.
    pub fn visible(&self) -> &[ListingDoc] {
        if self.is_filtered {
            &self.filtered
        } else {
            self.snapshot.get().map(Vec::as_slice).unwrap_or_default()
        }
    }
}

/// Search page logic: one snapshot fetch, then in-memory filtering.
pub struct SearchView {
    fetcher: ListingFetcher,
    state: Arc<Mutex<SearchState>>,
    lifetime: ViewLifetime,
}

impl SearchView {
    pub fn new(fetcher: ListingFetcher) -> Self {
        Self {
            fetcher,
            state: Arc::new(Mutex::new(SearchState::default())),
            lifetime: ViewLifetime::default(),
        }
    }

    pub fn load(&self) -> impl Future<Output = ()> + Send + 'static {
        let fetcher = self.fetcher.clone();
        let state = Arc::clone(&self.state);
        let lifetime = self.lifetime.clone();

        async move {
            let result = fetcher.fetch(&ListingQuery::listings()).await;
            deliver(&lifetime, &state, "search snapshot", |s| s.snapshot.apply(result));
        }
    }

    pub fn set_location(&self, location: &str) {
        lock(&self.state).form.location = location.to_string();
    }

    /// Switch the property type and its price option set.
    ///
    /// A previously chosen range is kept even if the new set doesn't offer it.
    /// `Other` is not selectable and clears the selection.
    pub fn select_property_type(&self, property_type: Option<ListingType>) {
        let property_type = property_type.filter(|t| *t != ListingType::Other);
        let mut state = lock(&self.state);
        state.form.property_type = property_type;
        state.form.price_range_options_for(property_type);
    }

    pub fn set_price_range(&self, value: &str) {
        lock(&self.state).form.price_range = value.to_string();
    }

    /// Filter with the current form inputs.
    ///
    /// Bad input leaves the state untouched.
    pub fn submit(&self) -> Result<(), FilterInputError> {
        let mut state = lock(&self.state);
        let filters = SearchFilters::parse(
            Some(state.form.location.as_str()),
            state.form.property_type.map(|t| t.as_str()),
            Some(state.form.price_range.as_str()),
        )?;
        run_filters(&mut state, &filters);
        Ok(())
    }

    pub fn state(&self) -> SearchState {
        lock(&self.state).clone()
    }

    pub fn teardown(&self) {
        self.lifetime.end(&self.state);
    }
}

impl SearchForm {
    fn price_range_options_for(&mut self, property_type: Option<ListingType>) {
        self.price_options = price_range_options(property_type);
    }
}

// An all-empty submission still lands in filtered mode, showing everything.
fn run_filters(state: &mut SearchState, filters: &SearchFilters) {
    let snapshot = state.snapshot.get().map(Vec::as_slice).unwrap_or_default();
    state.filtered = apply_filters(snapshot, filters);
    state.is_filtered = true;

    // Location and price inputs reset after each search; the type stays.
    state.form.location.clear();
    state.form.price_range.clear();
}
