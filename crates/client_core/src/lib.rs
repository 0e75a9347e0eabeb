use async_trait::async_trait;
use shared::protocol::{ConfigurationResponse, GenreRecord, MovieRecord};

pub mod controller;
pub mod error;
pub mod filter;
pub mod sort;
pub mod store;
pub mod transport;
pub mod view;

pub use controller::{Presenter, UiEvent, ViewController};
pub use error::CatalogError;
pub use filter::{FilterState, DEFAULT_MIN_RATING};
pub use sort::{sort_movies, SortDirection, SortField};
pub use store::{CatalogStore, LoadState};
pub use transport::{TmdbClient, TmdbSettings};
pub use view::{
    FiltersView, GenreOption, ListingKind, ListingView, MovieCard, PageView, RatingOption,
};

/// Raw payloads of the three catalog resources, joined after a batched fetch.
#[derive(Debug, Clone)]
pub struct CatalogPayload {
    pub configuration: ConfigurationResponse,
    pub genres: Vec<GenreRecord>,
    pub movies: Vec<MovieRecord>,
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CatalogPayload, CatalogError>;
}
