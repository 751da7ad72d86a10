use async_trait::async_trait;
use caselaw_core::{BrowseParams, CaseDetail, CaseSummary, SearchParams, SearchResult, Topic};

use crate::ApiError;

/// The read-only operations the case-summary API offers.
///
/// [`ApiClient`](crate::ApiClient) is the HTTP implementation; controllers are
/// generic over this trait.
#[async_trait]
pub trait CaseApi: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Result<Vec<SearchResult>, ApiError>;

    async fn get_case(&self, id: i64) -> Result<CaseDetail, ApiError>;

    /// `limit` defaults to [`DEFAULT_SIMILAR_LIMIT`](crate::DEFAULT_SIMILAR_LIMIT).
    async fn get_similar_cases(
        &self,
        id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<SearchResult>, ApiError>;

    async fn get_topics(&self) -> Result<Vec<Topic>, ApiError>;

    async fn browse_cases(&self, params: &BrowseParams) -> Result<Vec<CaseSummary>, ApiError>;
}
