use super::*;
use async_trait::async_trait;
use shared::{
    domain::{GenreId, MovieId},
    error::ErrorCode,
    protocol::{ConfigurationResponse, GenreRecord, ImagesRecord, MovieRecord},
};
use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use crate::CatalogPayload;

struct CountingSource {
    calls: Arc<AtomicUsize>,
    fail_with: Option<CatalogError>,
    delay: Option<Duration>,
}

impl CountingSource {
    fn ok() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            fail_with: None,
            delay: None,
        }
    }

    fn failing(err: CatalogError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::ok()
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::ok()
        }
    }
}

fn payload() -> CatalogPayload {
    CatalogPayload {
        configuration: ConfigurationResponse {
            images: ImagesRecord {
                base_url: "http://image.tmdb.org/t/p/".into(),
                secure_base_url: "https://image.tmdb.org/t/p/".into(),
                poster_sizes: vec!["w342".into()],
            },
        },
        genres: vec![
            GenreRecord {
                id: GenreId(18),
                name: "Drama".into(),
            },
            GenreRecord {
                id: GenreId(10752),
                name: "War Movie".into(),
            },
        ],
        movies: vec![MovieRecord {
            id: MovieId(1),
            title: "Dunkirk".into(),
            overview: String::new(),
            poster_path: None,
            vote_average: 7.4,
            popularity: 40.0,
            release_date: Some("2017-07-19".into()),
            genre_ids: vec![GenreId(10752), GenreId(18), GenreId(36)],
        }],
    }
}

#[async_trait]
impl CatalogSource for CountingSource {
    async fn fetch_catalog(&self) -> Result<CatalogPayload, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(payload()),
        }
    }
}

#[tokio::test]
async fn load_fetches_once_and_memoizes() {
    let store = CatalogStore::new(CountingSource::ok());
    assert!(matches!(store.state().await, LoadState::NotLoaded));
    assert!(store.loaded().await.is_none());

    let first = store.load().await.expect("first load");
    let second = store.load().await.expect("second load");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(store.source().calls.load(Ordering::SeqCst), 1);
    assert!(store.state().await.is_loaded());
}

#[tokio::test]
async fn load_attaches_whitespace_safe_genre_label() {
    let store = CatalogStore::new(CountingSource::ok());
    let catalog = store.load().await.expect("load");

    let movie = &catalog.movies[0];
    assert_eq!(movie.genre_names, vec!["War Movie", "Drama"]);
    assert_eq!(movie.genre_label, "War\u{a0}Movie, Drama");
}

#[tokio::test]
async fn concurrent_loads_share_a_single_fetch() {
    let store = Arc::new(CatalogStore::new(CountingSource::slow(
        Duration::from_millis(50),
    )));

    let (a, b) = tokio::join!(store.load(), store.load());
    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(store.source().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn loading_state_is_visible_during_fetch() {
    let store = Arc::new(CatalogStore::new(CountingSource::slow(
        Duration::from_millis(200),
    )));

    let loader = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.load().await.map(|_| ()) })
    };

    let mut saw_loading = false;
    for _ in 0..50 {
        if matches!(store.state().await, LoadState::Loading) {
            saw_loading = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    loader.await.expect("join").expect("load");
    assert!(saw_loading);
    assert!(store.state().await.is_loaded());
}

#[tokio::test]
async fn failed_load_is_recorded_and_not_retried() {
    let store = CatalogStore::new(CountingSource::failing(CatalogError::Status {
        endpoint: "configuration".into(),
        code: ErrorCode::Unauthorized,
        status: 401,
        message: "Invalid API key".into(),
    }));

    let err = store.load().await.expect_err("first load fails");
    assert_eq!(err.code(), Some(ErrorCode::Unauthorized));
    assert!(matches!(store.state().await, LoadState::Failed(_)));

    let again = store.load().await.expect_err("still failed");
    assert!(matches!(again, CatalogError::Status { status: 401, .. }));
    assert_eq!(store.source().calls.load(Ordering::SeqCst), 1);
    assert!(store.loaded().await.is_none());
}
