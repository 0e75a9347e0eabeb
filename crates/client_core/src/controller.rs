//! Glue between presentation events, the catalog store and the filter state.

use std::sync::Arc;

use shared::domain::{Catalog, GenreId, Movie};
use tracing::{debug, warn};

use crate::{
    error::CatalogError,
    filter::FilterState,
    sort::{sorted_movies, SortDirection, SortField},
    store::CatalogStore,
    view::{self, FiltersView, ListingKind, ListingView, DEFAULT_POSTER_SIZE},
    CatalogSource,
};

/// Events emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    RatingChanged(f64),
    GenreToggled(GenreId),
    FiltersReset,
    ListingTypeChanged(ListingKind),
    FiltersVisibilityToggled,
}

impl UiEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::RatingChanged(_) => "rating_changed",
            Self::GenreToggled(_) => "genre_toggled",
            Self::FiltersReset => "filters_reset",
            Self::ListingTypeChanged(_) => "listing_type_changed",
            Self::FiltersVisibilityToggled => "filters_visibility_toggled",
        }
    }
}

pub trait Presenter {
    fn present_filters(&mut self, filters: &FiltersView);
    fn present_listing(&mut self, listing: &ListingView);
}

pub struct ViewController<S: CatalogSource, P: Presenter> {
    store: CatalogStore<S>,
    presenter: P,
    filters: FilterState,
    listing_kind: ListingKind,
    filters_visible: bool,
    poster_size: String,
    catalog: Option<Arc<Catalog>>,
    sorted: Vec<Movie>,
}

impl<S: CatalogSource, P: Presenter> ViewController<S, P> {
    pub fn new(store: CatalogStore<S>, presenter: P) -> Self {
        Self {
            store,
            presenter,
            filters: FilterState::default(),
            listing_kind: ListingKind::default(),
            filters_visible: true,
            poster_size: DEFAULT_POSTER_SIZE.to_string(),
            catalog: None,
            sorted: Vec::new(),
        }
    }

    pub fn with_poster_size(mut self, poster_size: impl Into<String>) -> Self {
        self.poster_size = poster_size.into();
        self
    }

    /// Loads the catalog (once), sorts by popularity and renders both filters and listing.
    pub async fn render_default(&mut self) -> Result<(), CatalogError> {
        let catalog = self.store.load().await?;

        if !catalog.configuration.poster_sizes.is_empty()
            && !catalog.configuration.supports_poster_size(&self.poster_size)
        {
            warn!(
                poster_size = %self.poster_size,
                "poster size not advertised by image configuration"
            );
        }

        self.sorted = sorted_movies(
            &catalog.movies,
            SortField::Popularity,
            SortDirection::Descending,
        );
        let page = view::render_page(
            &catalog.configuration,
            &self.poster_size,
            &catalog.genres,
            &self.visible_movies(),
            &self.filters,
            self.listing_kind,
            self.filters_visible,
        );
        self.catalog = Some(catalog);

        self.presenter.present_filters(&page.filters);
        self.presenter.present_listing(&page.listing);
        Ok(())
    }

    pub async fn handle(&mut self, event: UiEvent) -> Result<(), CatalogError> {
        debug!(event = event.name(), "handling ui event");

        match event {
            UiEvent::RatingChanged(value) => {
                self.filters.set_rating_filter(value);
                self.render_listing()
            }
            UiEvent::GenreToggled(genre_id) => {
                self.filters.toggle_genre_filter(genre_id);
                self.render_listing()
            }
            UiEvent::FiltersReset => {
                self.filters.reset();
                self.render_default().await
            }
            UiEvent::ListingTypeChanged(kind) => {
                if kind == self.listing_kind {
                    return Ok(());
                }
                self.listing_kind = kind;
                self.render_listing()
            }
            UiEvent::FiltersVisibilityToggled => {
                self.filters_visible = !self.filters_visible;
                self.render_filters()
            }
        }
    }

    /// Movies that pass the current filters, in display order.
    pub fn visible_movies(&self) -> Vec<Movie> {
        self.filters.apply(&self.sorted)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn listing_kind(&self) -> ListingKind {
        self.listing_kind
    }

    pub fn filters_visible(&self) -> bool {
        self.filters_visible
    }

    pub fn store(&self) -> &CatalogStore<S> {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    fn loaded_catalog(&self) -> Result<Arc<Catalog>, CatalogError> {
        match &self.catalog {
            Some(catalog) => Ok(Arc::clone(catalog)),
            None => {
                warn!("render requested before catalog was loaded; skipping");
                Err(CatalogError::NotLoaded)
            }
        }
    }

    fn render_filters(&mut self) -> Result<(), CatalogError> {
        let catalog = self.loaded_catalog()?;
        let filters = view::render_filters(&catalog.genres, &self.filters, self.filters_visible);
        self.presenter.present_filters(&filters);
        Ok(())
    }

    fn render_listing(&mut self) -> Result<(), CatalogError> {
        let catalog = self.loaded_catalog()?;
        let movies = self.visible_movies();
        debug!(
            shown = movies.len(),
            total = self.sorted.len(),
            min_rating = self.filters.min_rating(),
            "rendering listing"
        );
        let listing = view::render_listing(
            &catalog.configuration,
            &self.poster_size,
            &movies,
            self.listing_kind,
        );
        self.presenter.present_listing(&listing);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
