//! Case detail screen: one case plus its most similar cases.

use caselaw_client::{ApiError, CaseApi};
use caselaw_core::{CaseDetail, SearchResult, ValidationError, parse_case_id};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct CasePage {
    pub detail: CaseDetail,
    pub similar: Vec<SearchResult>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CaseState {
    #[default]
    Loading,
    Loaded(CasePage),
    Failed {
        message: String,
    },
}

impl From<Result<CasePage, LoadError>> for CaseState {
    fn from(outcome: Result<CasePage, LoadError>) -> Self {
        match outcome {
            Ok(page) => CaseState::Loaded(page),
            Err(err) => CaseState::Failed {
                message: err.to_string(),
            },
        }
    }
}

/// Load the detail page for a raw identifier taken from navigation input.
///
/// The identifier is checked before any request is made. The case and its
/// similar cases are fetched concurrently; if either fails the load fails.
pub async fn load_case<A: CaseApi + ?Sized>(api: &A, raw_id: &str) -> Result<CasePage, LoadError> {
    let id = parse_case_id(raw_id)?;
    debug!(case_id = id, "loading case page");
    let (detail, similar) = futures::try_join!(api.get_case(id), api.get_similar_cases(id, None))?;
    Ok(CasePage { detail, similar })
}
