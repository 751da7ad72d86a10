//! Front-end state shared by every Caselaw presentation layer: the search
//! controller and the case detail loader.

pub mod detail;
pub mod search;

#[cfg(test)]
mod fake;

pub use detail::{CasePage, CaseState, LoadError, load_case};
pub use search::{
    Completion, Filters, MAX_PAGE_INDEX, RESULTS_PER_PAGE, SearchController, SearchState,
    SearchTicket,
};
