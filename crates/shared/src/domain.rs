use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::protocol::{ConfigurationResponse, GenreRecord, MovieRecord};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(MovieId);
id_newtype!(GenreId);

const NO_BREAK_SPACE: char = '\u{a0}';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfiguration {
    pub base_url: String,
    pub secure_base_url: String,
    pub poster_sizes: Vec<String>,
}

impl ImageConfiguration {
    /// Prefers the https base when the API provides one.
    pub fn image_base(&self) -> &str {
        if self.secure_base_url.is_empty() {
            &self.base_url
        } else {
            &self.secure_base_url
        }
    }

    pub fn poster_url(&self, size: &str, poster_path: &str) -> String {
        format!("{}{size}{poster_path}", self.image_base())
    }

    pub fn supports_poster_size(&self, size: &str) -> bool {
        self.poster_sizes.iter().any(|candidate| candidate == size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub rating: f64,
    pub popularity: f64,
    pub release_date: Option<NaiveDate>,
    pub genre_ids: Vec<GenreId>,
    /// Names of the genre ids that resolved against the loaded genre list.
    pub genre_names: Vec<String>,
    /// Display label; names keep their inner spaces unbreakable.
    pub genre_label: String,
}

impl Movie {
    pub fn has_all_genres<'a>(&self, required: impl IntoIterator<Item = &'a GenreId>) -> bool {
        required
            .into_iter()
            .all(|genre_id| self.genre_ids.contains(genre_id))
    }

    pub fn rating_percent(&self) -> f64 {
        self.rating * 10.0
    }

    fn from_record(record: MovieRecord) -> Self {
        let release_date = record
            .release_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

        Self {
            id: record.id,
            title: record.title,
            overview: record.overview,
            poster_path: record.poster_path,
            rating: record.vote_average,
            popularity: record.popularity,
            release_date,
            genre_ids: record.genre_ids,
            genre_names: Vec::new(),
            genre_label: String::new(),
        }
    }

    fn resolve_genres(&mut self, names_by_id: &HashMap<GenreId, &str>) {
        self.genre_names = self
            .genre_ids
            .iter()
            .filter_map(|genre_id| names_by_id.get(genre_id))
            .map(|name| name.to_string())
            .collect();
        self.genre_label = genre_label(&self.genre_names);
    }
}

/// Joins genre names for display so that multi-word names never wrap mid-name.
pub fn genre_label(names: &[String]) -> String {
    names
        .iter()
        .map(|name| name.replace(' ', &NO_BREAK_SPACE.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub configuration: ImageConfiguration,
    pub genres: Vec<Genre>,
    pub movies: Vec<Movie>,
}

impl Catalog {
    /// Builds the catalog from the three API payloads and resolves every movie's genre names.
    pub fn assemble(
        configuration: ConfigurationResponse,
        genres: Vec<GenreRecord>,
        movies: Vec<MovieRecord>,
    ) -> Self {
        let genres: Vec<Genre> = genres
            .into_iter()
            .map(|record| Genre {
                id: record.id,
                name: record.name,
            })
            .collect();

        let names_by_id: HashMap<GenreId, &str> = genres
            .iter()
            .map(|genre| (genre.id, genre.name.as_str()))
            .collect();

        let movies = movies
            .into_iter()
            .map(|record| {
                let mut movie = Movie::from_record(record);
                movie.resolve_genres(&names_by_id);
                movie
            })
            .collect();

        Self {
            configuration: ImageConfiguration {
                base_url: configuration.images.base_url,
                secure_base_url: configuration.images.secure_base_url,
                poster_sizes: configuration.images.poster_sizes,
            },
            genres,
            movies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ImagesRecord;

    fn record(id: i64, genre_ids: &[i64]) -> MovieRecord {
        MovieRecord {
            id: MovieId(id),
            title: format!("movie-{id}"),
            overview: String::new(),
            poster_path: Some(format!("/poster-{id}.jpg")),
            vote_average: 6.5,
            popularity: 12.0,
            release_date: Some("2024-03-01".into()),
            genre_ids: genre_ids.iter().copied().map(GenreId).collect(),
        }
    }

    fn configuration() -> ConfigurationResponse {
        ConfigurationResponse {
            images: ImagesRecord {
                base_url: "http://image.tmdb.org/t/p/".into(),
                secure_base_url: "https://image.tmdb.org/t/p/".into(),
                poster_sizes: vec!["w342".into(), "original".into()],
            },
        }
    }

    fn genres() -> Vec<GenreRecord> {
        vec![
            GenreRecord {
                id: GenreId(28),
                name: "Action".into(),
            },
            GenreRecord {
                id: GenreId(878),
                name: "Science Fiction".into(),
            },
        ]
    }

    #[test]
    fn assemble_resolves_genre_names_in_movie_order() {
        let catalog = Catalog::assemble(configuration(), genres(), vec![record(1, &[878, 28])]);

        let movie = &catalog.movies[0];
        assert_eq!(movie.genre_names, vec!["Science Fiction", "Action"]);
        assert_eq!(movie.genre_label, "Science\u{a0}Fiction, Action");
    }

    #[test]
    fn assemble_ignores_unknown_genre_ids() {
        let catalog = Catalog::assemble(configuration(), genres(), vec![record(1, &[99, 28])]);

        let movie = &catalog.movies[0];
        assert_eq!(movie.genre_ids, vec![GenreId(99), GenreId(28)]);
        assert_eq!(movie.genre_names, vec!["Action"]);
        assert_eq!(movie.genre_label, "Action");
    }

    #[test]
    fn malformed_release_date_becomes_none() {
        let mut bad = record(2, &[]);
        bad.release_date = Some(String::new());
        let catalog = Catalog::assemble(configuration(), genres(), vec![record(1, &[]), bad]);

        assert_eq!(
            catalog.movies[0].release_date,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(catalog.movies[1].release_date, None);
    }

    #[test]
    fn poster_url_prefers_secure_base() {
        let catalog = Catalog::assemble(configuration(), genres(), Vec::new());
        assert_eq!(
            catalog.configuration.poster_url("w342", "/abc.jpg"),
            "https://image.tmdb.org/t/p/w342/abc.jpg"
        );
        assert!(catalog.configuration.supports_poster_size("original"));
        assert!(!catalog.configuration.supports_poster_size("w92"));
    }

    #[test]
    fn has_all_genres_requires_every_id() {
        let catalog = Catalog::assemble(configuration(), genres(), vec![record(1, &[1, 2])]);
        let movie = &catalog.movies[0];

        assert!(movie.has_all_genres(&[GenreId(1), GenreId(2)]));
        assert!(!movie.has_all_genres(&[GenreId(1), GenreId(3)]));
        assert!(movie.has_all_genres(&[]));
    }
}
