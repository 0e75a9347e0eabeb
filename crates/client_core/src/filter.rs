use std::collections::BTreeSet;

use shared::domain::{GenreId, Movie};

pub const DEFAULT_MIN_RATING: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    min_rating: f64,
    required_genres: BTreeSet<GenreId>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            min_rating: DEFAULT_MIN_RATING,
            required_genres: BTreeSet::new(),
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    pub fn required_genres(&self) -> &BTreeSet<GenreId> {
        &self.required_genres
    }

    pub fn is_genre_selected(&self, genre_id: GenreId) -> bool {
        self.required_genres.contains(&genre_id)
    }

    /// No bounds check; the rating picker only offers 0..=10 anyway.
    pub fn set_rating_filter(&mut self, value: f64) {
        self.min_rating = value;
    }

    pub fn toggle_genre_filter(&mut self, genre_id: GenreId) {
        if !self.required_genres.remove(&genre_id) {
            self.required_genres.insert(genre_id);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn filter_by_rating(&self, movies: &[Movie]) -> Vec<Movie> {
        movies
            .iter()
            .filter(|movie| movie.rating >= self.min_rating)
            .cloned()
            .collect()
    }

    /// Keeps movies tagged with every required genre. An empty requirement keeps everything.
    pub fn filter_by_genres(&self, movies: &[Movie]) -> Vec<Movie> {
        if self.required_genres.is_empty() {
            return movies.to_vec();
        }

        movies
            .iter()
            .filter(|movie| movie.has_all_genres(&self.required_genres))
            .cloned()
            .collect()
    }

    /// Rating first, then genres.
    pub fn apply(&self, movies: &[Movie]) -> Vec<Movie> {
        let by_rating = self.filter_by_rating(movies);
        self.filter_by_genres(&by_rating)
    }
}
