// src/views/mod.rs

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::debug;

pub mod category;
pub mod home;
pub mod search;

pub use category::CategoryView;
pub use home::{HomeSection, HomeSlots, HomeView};
pub use search::{SearchState, SearchView};

/// Done/alive token shared between a view and its in-flight completions.
#[derive(Debug, Clone, Default)]
pub struct ViewLifetime {
    token: CancellationToken,
}

impl ViewLifetime {
    pub fn is_alive(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// End the view while holding its state lock, so no completion that
    /// already passed the alive check in [`deliver`] can write afterwards.
    pub(crate) fn end<S>(&self, state: &Mutex<S>) {
        let _guard = lock(state);
        self.token.cancel();
    }
}

/// Apply a completion to view state unless the view has been torn down.
///
/// Returns whether the update ran.
pub(crate) fn deliver<S>(
    lifetime: &ViewLifetime,
    state: &Mutex<S>,
    what: &str,
    update: impl FnOnce(&mut S),
) -> bool {
    let mut guard = lock(state);
    if !lifetime.is_alive() {
        debug!(what, "view torn down, dropping late result");
        return false;
    }
    update(&mut guard);
    true
}

pub(crate) fn lock<S>(state: &Mutex<S>) -> MutexGuard<'_, S> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
