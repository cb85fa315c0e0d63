use reqwest::{Client, StatusCode};
use tracing::{debug, error};

use crate::config::TmdbConfig;
use crate::shows::dto::{PopularResponse, Show, ShowDetails};

/// Thin client for the upstream metadata API. One request per call; no
/// caching, no retries.
#[derive(Clone)]
pub struct TmdbClient {
    http: Client,
    base_url: String,
    api_key: String,
    language: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("show not found upstream")]
    NotFound,
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(StatusCode),
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        }
    }

    /// Fetch the first page of popular shows.
    pub async fn popular(&self) -> Result<Vec<Show>, TmdbError> {
        let response = self
            .http
            .get(format!("{}/tv/popular", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
                ("page", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "upstream popular request failed");
            return Err(TmdbError::Status(status));
        }

        let body: PopularResponse = response.json().await?;
        debug!(count = body.results.len(), "fetched popular shows");
        Ok(body.results)
    }

    /// Fetch details for a single show. Upstream 404 becomes `NotFound`.
    pub async fn details(&self, id: i64) -> Result<ShowDetails, TmdbError> {
        let response = self
            .http
            .get(format!("{}/tv/{}", self.base_url, id))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TmdbError::NotFound);
        }
        if !status.is_success() {
            error!(%status, show_id = id, "upstream detail request failed");
            return Err(TmdbError::Status(status));
        }

        Ok(response.json().await?)
    }
}
