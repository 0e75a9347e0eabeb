//! HTTP access to the catalog API: one GET per resource, batched into a single concurrent fetch.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    error::{ErrorCode, TmdbStatus},
    protocol::{ConfigurationResponse, GenreListResponse, GenreRecord, NowPlayingResponse},
};
use tracing::{debug, info};
use url::Url;

use crate::{error::CatalogError, CatalogPayload, CatalogSource};

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_REGION: &str = "GB";

const CONFIGURATION_ENDPOINT: &str = "configuration";
const GENRES_ENDPOINT: &str = "genre/movie/list";
const NOW_PLAYING_ENDPOINT: &str = "movie/now_playing";

#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub base_url: String,
    pub api_key: String,
    pub language: String,
    pub region: String,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            api_key: String::new(),
            language: DEFAULT_LANGUAGE.into(),
            region: DEFAULT_REGION.into(),
        }
    }
}

pub struct TmdbClient {
    http: Client,
    base_url: Url,
    api_key: String,
    language: String,
    region: String,
}

impl TmdbClient {
    pub fn new(settings: TmdbSettings) -> Result<Self, CatalogError> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(&settings.base_url)?,
            api_key: settings.api_key,
            language: settings.language,
            region: settings.region,
        })
    }

    pub async fn fetch_configuration(&self) -> Result<ConfigurationResponse, CatalogError> {
        self.get_json(CONFIGURATION_ENDPOINT, &[]).await
    }

    pub async fn fetch_genres(&self) -> Result<Vec<GenreRecord>, CatalogError> {
        let response: GenreListResponse = self
            .get_json(GENRES_ENDPOINT, &[("language", self.language.as_str())])
            .await?;
        Ok(response.genres)
    }

    pub async fn fetch_now_playing(&self) -> Result<NowPlayingResponse, CatalogError> {
        self.get_json(
            NOW_PLAYING_ENDPOINT,
            &[
                ("language", self.language.as_str()),
                ("region", self.region.as_str()),
            ],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|_| CatalogError::InvalidBaseUrl(self.base_url.to_string()))?;
        debug!(endpoint, "requesting catalog resource");

        let response = self
            .http
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|err| CatalogError::transport(endpoint, err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| CatalogError::transport(endpoint, err))?;

        if !status.is_success() {
            let message = TmdbStatus::parse(&body)
                .map(|parsed| parsed.status_message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(CatalogError::Status {
                endpoint: endpoint.to_string(),
                code: ErrorCode::from_http_status(status.as_u16()),
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|err| CatalogError::decode(endpoint, err))
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    async fn fetch_catalog(&self) -> Result<CatalogPayload, CatalogError> {
        let (configuration, genres, now_playing) = futures::try_join!(
            self.fetch_configuration(),
            self.fetch_genres(),
            self.fetch_now_playing()
        )?;

        info!(
            genres = genres.len(),
            movies = now_playing.results.len(),
            total_results = now_playing.total_results,
            "fetched catalog resources"
        );

        Ok(CatalogPayload {
            configuration,
            genres,
            movies: now_playing.results,
        })
    }
}

/// `Url::join` drops the last path segment unless the base ends with a slash.
fn normalize_base_url(raw: &str) -> Result<Url, CatalogError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|_| CatalogError::InvalidBaseUrl(raw.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(CatalogError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
