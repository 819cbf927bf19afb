// src/state.rs

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::config::{Config, StoreBackend};
use crate::db::listings::seed_from_file;
use crate::db::{init_db, Database, SqliteListingStore};
use crate::fetcher::ListingFetcher;
use crate::store::{FirestoreStore, ListingStore, StoreError, LISTINGS_COLLECTION};

/// Everything a request handler needs, shared across astra workers.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: ListingFetcher,
    runtime: Arc<Runtime>,
    pub home_section_limit: u32,
    pub category_page_limit: u32,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ListingStore>,
        runtime: Arc<Runtime>,
        home_section_limit: u32,
        category_page_limit: u32,
    ) -> Self {
        Self {
            fetcher: ListingFetcher::new(store),
            runtime,
            home_section_limit,
            category_page_limit,
        }
    }

    /// Drive a view load to completion from a (blocking) astra worker thread.
    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }
}

/// Runtime backing the HTTP client's I/O. View futures themselves are polled
/// on the calling worker thread by `block_on`.
pub fn build_runtime() -> std::io::Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("homefinder-io")
        .enable_all()
        .build()
}

pub fn build_store(config: &Config) -> Result<Arc<dyn ListingStore>, StoreError> {
    match &config.store {
        StoreBackend::Sqlite { path, seed_path } => {
            let db = Database::new(path.to_string_lossy().into_owned());
            init_db(&db)?;
            if let Some(seed) = seed_path {
                seed_from_file(&db, LISTINGS_COLLECTION, seed)?;
            }
            Ok(Arc::new(SqliteListingStore::new(db)))
        }
        StoreBackend::Firestore {
            project_id,
            api_key,
            base_url,
        } => Ok(Arc::new(FirestoreStore::new(
            project_id,
            api_key.clone(),
            base_url.as_deref(),
            config.store_timeout,
        )?)),
    }
}
