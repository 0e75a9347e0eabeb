//! Pure view model: what the presentation layer should show for a given catalog and filter state.

use std::{fmt, str::FromStr};

use shared::domain::{Genre, GenreId, ImageConfiguration, Movie, MovieId};

use crate::filter::FilterState;

pub const DEFAULT_POSTER_SIZE: &str = "w342";
pub const RATING_STEP: f64 = 0.5;
pub const MAX_RATING: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingKind {
    #[default]
    Gallery,
    List,
}

impl ListingKind {
    /// Overview, rating, release date and popularity only show in the list layout.
    pub fn shows_details(self) -> bool {
        self == Self::List
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gallery => f.write_str("gallery"),
            Self::List => f.write_str("list"),
        }
    }
}

impl FromStr for ListingKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gallery" | "grid" => Ok(Self::Gallery),
            "list" => Ok(Self::List),
            other => Err(format!("unknown listing type '{other}' (expected gallery or list)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingOption {
    pub value: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreOption {
    pub id: GenreId,
    pub name: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FiltersView {
    pub rating_options: Vec<RatingOption>,
    pub genres: Vec<GenreOption>,
    pub visible: bool,
}

impl FiltersView {
    pub fn selected_rating(&self) -> Option<f64> {
        self.rating_options
            .iter()
            .find(|option| option.selected)
            .map(|option| option.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub genre_label: String,
    pub overview: String,
    pub rating_percent: f64,
    pub release_date: Option<String>,
    pub popularity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub kind: ListingKind,
    pub cards: Vec<MovieCard>,
}

impl ListingView {
    pub fn shows_details(&self) -> bool {
        self.kind.shows_details()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub filters: FiltersView,
    pub listing: ListingView,
}

pub fn rating_options(selected: f64) -> Vec<RatingOption> {
    let steps = (MAX_RATING / RATING_STEP) as u32;
    (0..=steps)
        .map(|step| {
            let value = f64::from(step) * RATING_STEP;
            RatingOption {
                value,
                selected: (value - selected).abs() < f64::EPSILON,
            }
        })
        .collect()
}

pub fn render_filters(genres: &[Genre], filters: &FilterState, visible: bool) -> FiltersView {
    FiltersView {
        rating_options: rating_options(filters.min_rating()),
        genres: genres
            .iter()
            .map(|genre| GenreOption {
                id: genre.id,
                name: genre.name.clone(),
                checked: filters.is_genre_selected(genre.id),
            })
            .collect(),
        visible,
    }
}

pub fn render_card(
    configuration: &ImageConfiguration,
    poster_size: &str,
    movie: &Movie,
) -> MovieCard {
    MovieCard {
        id: movie.id,
        title: movie.title.clone(),
        poster_url: movie
            .poster_path
            .as_deref()
            .map(|path| configuration.poster_url(poster_size, path)),
        genre_label: movie.genre_label.clone(),
        overview: movie.overview.clone(),
        rating_percent: movie.rating_percent(),
        release_date: movie.release_date.map(|date| date.format("%Y-%m-%d").to_string()),
        popularity: movie.popularity,
    }
}

pub fn render_listing(
    configuration: &ImageConfiguration,
    poster_size: &str,
    movies: &[Movie],
    kind: ListingKind,
) -> ListingView {
    ListingView {
        kind,
        cards: movies
            .iter()
            .map(|movie| render_card(configuration, poster_size, movie))
            .collect(),
    }
}

pub fn render_page(
    configuration: &ImageConfiguration,
    poster_size: &str,
    genres: &[Genre],
    movies: &[Movie],
    filters: &FilterState,
    kind: ListingKind,
    filters_visible: bool,
) -> PageView {
    PageView {
        filters: render_filters(genres, filters, filters_visible),
        listing: render_listing(configuration, poster_size, movies, kind),
    }
}
