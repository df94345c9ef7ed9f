//! Application state shared across handlers

use std::sync::Arc;

use crate::store::WishStore;

/// Shared application state
///
/// Holds the one store handle built at startup; handlers reach persistence
/// only through it.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn WishStore>,
}

impl AppState {
    pub fn new<S>(store: S) -> Self
    where
        S: WishStore + 'static,
    {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &dyn WishStore {
        self.store.as_ref()
    }
}
