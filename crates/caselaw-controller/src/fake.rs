//! Scripted in-memory `CaseApi` for controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use caselaw_client::{ApiError, CaseApi, Operation};
use caselaw_core::{BrowseParams, CaseDetail, CaseSummary, SearchParams, SearchResult, Topic};

#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    search_outcomes: VecDeque<Result<Vec<SearchResult>, ApiError>>,
    search_calls: Vec<SearchParams>,
    cases: HashMap<i64, CaseDetail>,
    similar: HashMap<i64, Vec<SearchResult>>,
    similar_status: Option<u16>,
    case_calls: Vec<i64>,
}

impl FakeApi {
    pub fn push_search(&self, outcome: Result<Vec<SearchResult>, ApiError>) {
        self.inner.lock().unwrap().search_outcomes.push_back(outcome);
    }

    pub fn insert_case(&self, detail: CaseDetail, similar: Vec<SearchResult>) {
        let mut inner = self.inner.lock().unwrap();
        inner.similar.insert(detail.id, similar);
        inner.cases.insert(detail.id, detail);
    }

    pub fn fail_similar(&self, status: u16) {
        self.inner.lock().unwrap().similar_status = Some(status);
    }

    pub fn search_calls(&self) -> Vec<SearchParams> {
        self.inner.lock().unwrap().search_calls.clone()
    }

    pub fn case_calls(&self) -> Vec<i64> {
        self.inner.lock().unwrap().case_calls.clone()
    }
}

#[async_trait]
impl CaseApi for FakeApi {
    async fn search(&self, params: &SearchParams) -> Result<Vec<SearchResult>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.search_calls.push(params.clone());
        inner
            .search_outcomes
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_case(&self, id: i64) -> Result<CaseDetail, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.case_calls.push(id);
        inner.cases.get(&id).cloned().ok_or(ApiError::Status {
            op: Operation::GetCase,
            status: 404,
        })
    }

    async fn get_similar_cases(
        &self,
        id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<SearchResult>, ApiError> {
        let inner = self.inner.lock().unwrap();
        if let Some(status) = inner.similar_status {
            return Err(ApiError::Status {
                op: Operation::SimilarCases,
                status,
            });
        }
        let limit = limit.unwrap_or(caselaw_client::DEFAULT_SIMILAR_LIMIT) as usize;
        let mut similar = inner.similar.get(&id).cloned().unwrap_or_default();
        similar.truncate(limit);
        Ok(similar)
    }

    async fn get_topics(&self) -> Result<Vec<Topic>, ApiError> {
        Ok(Vec::new())
    }

    async fn browse_cases(&self, _params: &BrowseParams) -> Result<Vec<CaseSummary>, ApiError> {
        Ok(Vec::new())
    }
}

pub fn summary(id: i64) -> CaseSummary {
    CaseSummary {
        id,
        case_name: format!("Case {id} v. State"),
        citation: format!("({}) 1 SCC {id}", 1950 + id),
        year: 1950 + id as i32,
        bench: None,
        snippet: None,
        similarity: None,
    }
}

/// `n` results with descending similarity.
pub fn results(n: usize) -> Vec<SearchResult> {
    (0..n)
        .map(|i| SearchResult {
            case: summary(i as i64 + 1),
            similarity: Some(1.0 - i as f64 * 0.05),
        })
        .collect()
}

pub fn detail(id: i64) -> CaseDetail {
    CaseDetail {
        id,
        case_name: format!("Case {id} v. State"),
        citation: format!("({}) 1 SCC {id}", 1950 + id),
        year: 1950 + id as i32,
        bench: Some("Constitution Bench".into()),
        facts: Some("The petitioner challenged the order.".into()),
        legal_issues: None,
        judgment: Some("Appeal allowed.".into()),
        ratio_decidendi: None,
        key_principles: vec!["Due process".into()],
        source_url: None,
    }
}
