use std::sync::Arc;

use shared::domain::Catalog;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{error::CatalogError, CatalogSource};

#[derive(Debug, Clone)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded(Arc<Catalog>),
    Failed(CatalogError),
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Fetches the catalog at most once per store lifetime and memoizes the outcome.
///
/// A failed load is terminal: later calls return the recorded error without
/// touching the network again.
pub struct CatalogStore<S: CatalogSource> {
    source: S,
    // Held across the fetch so concurrent `load` calls wait for the first one.
    load_gate: Mutex<()>,
    state: Mutex<LoadState>,
}

impl<S: CatalogSource> CatalogStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            load_gate: Mutex::new(()),
            state: Mutex::new(LoadState::NotLoaded),
        }
    }

    pub async fn load(&self) -> Result<Arc<Catalog>, CatalogError> {
        let _gate = self.load_gate.lock().await;

        {
            let mut state = self.state.lock().await;
            match &*state {
                LoadState::Loaded(catalog) => return Ok(Arc::clone(catalog)),
                LoadState::Failed(err) => return Err(err.clone()),
                LoadState::NotLoaded | LoadState::Loading => {}
            }
            *state = LoadState::Loading;
        }

        let outcome = self.source.fetch_catalog().await.map(|payload| {
            Arc::new(Catalog::assemble(
                payload.configuration,
                payload.genres,
                payload.movies,
            ))
        });

        let mut state = self.state.lock().await;
        match outcome {
            Ok(catalog) => {
                info!(
                    genres = catalog.genres.len(),
                    movies = catalog.movies.len(),
                    "catalog loaded"
                );
                *state = LoadState::Loaded(Arc::clone(&catalog));
                Ok(catalog)
            }
            Err(err) => {
                error!(error = %err, "catalog load failed");
                *state = LoadState::Failed(err.clone());
                Err(err)
            }
        }
    }

    pub async fn state(&self) -> LoadState {
        self.state.lock().await.clone()
    }

    pub async fn loaded(&self) -> Option<Arc<Catalog>> {
        match &*self.state.lock().await {
            LoadState::Loaded(catalog) => Some(Arc::clone(catalog)),
            _ => None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
