//! HTTP client for the case-summary API: search, browse, case detail, similar cases, topics.

mod api;
mod config;
mod error;
mod http;

pub use api::CaseApi;
pub use config::{ApiConfig, ConfigError, Target};
pub use error::{ApiError, Operation};
pub use http::{ApiClient, DEFAULT_SIMILAR_LIMIT};
