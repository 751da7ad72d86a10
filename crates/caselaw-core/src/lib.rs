pub mod case;
pub mod params;
pub mod validate;

pub use case::{CaseDetail, CaseSummary, SearchResult, Topic};
pub use params::{BrowseParams, SearchParams};
pub use validate::{ValidationError, parse_case_id, parse_year};
