use std::{fmt, str::FromStr};

use shared::domain::Movie;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Popularity,
    Rating,
    Id,
}

impl SortField {
    fn key(self, movie: &Movie) -> f64 {
        match self {
            Self::Popularity => movie.popularity,
            Self::Rating => movie.rating,
            Self::Id => movie.id.0 as f64,
        }
    }
}

/// `Ascending` puts the smallest value first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortDirection(pub String);

impl fmt::Display for UnknownSortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort direction '{}' (expected asc or desc)", self.0)
    }
}

impl std::error::Error for UnknownSortDirection {}

impl FromStr for SortDirection {
    type Err = UnknownSortDirection;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(UnknownSortDirection(raw.to_string())),
        }
    }
}

/// Stable numeric sort; movies with equal keys keep their relative order.
pub fn sort_movies(movies: &mut [Movie], field: SortField, direction: SortDirection) {
    movies.sort_by(|left, right| {
        let ordering = field.key(left).total_cmp(&field.key(right));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

pub fn sorted_movies(movies: &[Movie], field: SortField, direction: SortDirection) -> Vec<Movie> {
    let mut sorted = movies.to_vec();
    sort_movies(&mut sorted, field, direction);
    sorted
}
