use std::fmt;

use thiserror::Error;

/// Which API call a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    GetCase,
    SimilarCases,
    Topics,
    Browse,
}

impl Operation {
    /// Short name used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::GetCase => "get_case",
            Operation::SimilarCases => "similar_cases",
            Operation::Topics => "topics",
            Operation::Browse => "browse",
        }
    }

    /// The fixed user-facing message for a failed call.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Search => "Search failed",
            Operation::GetCase => "Case not found",
            Operation::SimilarCases => "Failed to fetch similar cases",
            Operation::Topics => "Failed to fetch topics",
            Operation::Browse => "Browse failed",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_message())
    }
}

/// A failed API call.
///
/// The message is the same for every failure of a given operation: a 404 and
/// a 500 from `/cases/{id}` both read "Case not found". Callers that need to
/// tell them apart use [`ApiError::status`].
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{op}")]
    Status { op: Operation, status: u16 },

    #[error("{op}")]
    Transport {
        op: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{op}")]
    Decode {
        op: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid API URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    /// HTTP status of a non-success response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            ApiError::Status { op, .. }
            | ApiError::Transport { op, .. }
            | ApiError::Decode { op, .. } => Some(*op),
            ApiError::InvalidUrl { .. } => None,
        }
    }
}
