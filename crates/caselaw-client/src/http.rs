//! HTTP implementation of [`CaseApi`] over reqwest.

use async_trait::async_trait;
use caselaw_core::{BrowseParams, CaseDetail, CaseSummary, SearchParams, SearchResult, Topic};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use url::Url;

use crate::{ApiConfig, ApiError, CaseApi, ConfigError, Operation};

/// Similar-case count requested when the caller gives none.
pub const DEFAULT_SIMILAR_LIMIT: u32 = 5;

const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the case-summary API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with no API key and no timeout.
    ///
    /// `base_url` should be like `http://localhost:8000/api` (a trailing slash
    /// is trimmed).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: trim_base(base_url.into()),
        }
    }

    /// Create a client from full connection settings.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(key).map_err(|_| ConfigError::InvalidApiKey)?;
            value.set_sensitive(true);
            let mut headers = HeaderMap::new();
            headers.insert(API_KEY_HEADER, value);
            builder = builder.default_headers(headers);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: trim_base(config.base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for `path` with exactly the given query pairs.
    ///
    /// No `?` is appended when `pairs` is empty.
    pub fn endpoint_url(&self, path: &str, pairs: &[(&str, String)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|source| ApiError::InvalidUrl { url: raw, source })?;
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    pub fn search_url(&self, params: &SearchParams) -> Result<Url, ApiError> {
        self.endpoint_url("/search", &params.to_query_pairs())
    }

    pub fn browse_url(&self, params: &BrowseParams) -> Result<Url, ApiError> {
        self.endpoint_url("/cases", &params.to_query_pairs())
    }

    pub fn case_url(&self, id: i64) -> Result<Url, ApiError> {
        self.endpoint_url(&format!("/cases/{id}"), &[])
    }

    pub fn similar_url(&self, id: i64, limit: Option<u32>) -> Result<Url, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_SIMILAR_LIMIT);
        self.endpoint_url(
            &format!("/cases/{id}/similar"),
            &[("limit", limit.to_string())],
        )
    }

    pub fn topics_url(&self) -> Result<Url, ApiError> {
        self.endpoint_url("/topics", &[])
    }

    /// Run a semantic search. An empty result list is a success.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<SearchResult>, ApiError> {
        let url = self.search_url(params)?;
        let results: Vec<SearchResult> = self.get_json(Operation::Search, url).await?;
        info!(count = results.len(), "search complete");
        Ok(results)
    }

    /// Fetch one case. Any non-success status, 404 or otherwise, is reported
    /// as "Case not found".
    pub async fn get_case(&self, id: i64) -> Result<CaseDetail, ApiError> {
        let url = self.case_url(id)?;
        self.get_json(Operation::GetCase, url).await
    }

    /// Fetch cases related to `id`, most similar first (server-ordered).
    pub async fn get_similar_cases(
        &self,
        id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<SearchResult>, ApiError> {
        let url = self.similar_url(id, limit)?;
        let results: Vec<SearchResult> = self.get_json(Operation::SimilarCases, url).await?;
        info!(case_id = id, count = results.len(), "similar cases fetched");
        Ok(results)
    }

    /// Fetch the full topic vocabulary in one call.
    pub async fn get_topics(&self) -> Result<Vec<Topic>, ApiError> {
        let url = self.topics_url()?;
        let topics: Vec<Topic> = self.get_json(Operation::Topics, url).await?;
        info!(count = topics.len(), "topics fetched");
        Ok(topics)
    }

    /// List cases by filter only, without similarity ranking.
    pub async fn browse_cases(&self, params: &BrowseParams) -> Result<Vec<CaseSummary>, ApiError> {
        let url = self.browse_url(params)?;
        let cases: Vec<CaseSummary> = self.get_json(Operation::Browse, url).await?;
        info!(count = cases.len(), "browse complete");
        Ok(cases)
    }

    async fn get_json<T: DeserializeOwned>(&self, op: Operation, url: Url) -> Result<T, ApiError> {
        info!(url = %url, op = op.name(), "requesting");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport { op, source })?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(op = op.name(), status = status.as_u16(), body = %body, "request failed");
            return Err(ApiError::Status {
                op,
                status: status.as_u16(),
            });
        }
        resp.json::<T>()
            .await
            .map_err(|source| ApiError::Decode { op, source })
    }
}

#[async_trait]
impl CaseApi for ApiClient {
    async fn search(&self, params: &SearchParams) -> Result<Vec<SearchResult>, ApiError> {
        ApiClient::search(self, params).await
    }

    async fn get_case(&self, id: i64) -> Result<CaseDetail, ApiError> {
        ApiClient::get_case(self, id).await
    }

    async fn get_similar_cases(
        &self,
        id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<SearchResult>, ApiError> {
        ApiClient::get_similar_cases(self, id, limit).await
    }

    async fn get_topics(&self) -> Result<Vec<Topic>, ApiError> {
        ApiClient::get_topics(self).await
    }

    async fn browse_cases(&self, params: &BrowseParams) -> Result<Vec<CaseSummary>, ApiError> {
        ApiClient::browse_cases(self, params).await
    }
}

fn trim_base(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}
