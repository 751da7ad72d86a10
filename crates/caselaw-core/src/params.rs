//! Query parameters for the `/search` and `/cases` endpoints.
//!
//! Unset fields are left out of the query string entirely. `Some(0)` is a
//! real value and is sent; only `None` (or an empty string/list) means
//! "no filter".

/// Parameters for a semantic search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: Option<String>,
    /// Sent comma-joined as `topic_ids`.
    pub topic_ids: Vec<i64>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Parameters for the filter-only browse listing. Same as search minus `q`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseParams {
    pub topic_ids: Vec<i64>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl SearchParams {
    /// Key/value pairs for exactly the fields that are set, in wire order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_string()));
        }
        push_filters(
            &mut pairs,
            &self.topic_ids,
            self.year_from,
            self.year_to,
            self.limit,
            self.offset,
        );
        pairs
    }
}

impl BrowseParams {
    /// Key/value pairs for exactly the fields that are set, in wire order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_filters(
            &mut pairs,
            &self.topic_ids,
            self.year_from,
            self.year_to,
            self.limit,
            self.offset,
        );
        pairs
    }
}

fn push_filters(
    pairs: &mut Vec<(&'static str, String)>,
    topic_ids: &[i64],
    year_from: Option<i32>,
    year_to: Option<i32>,
    limit: Option<u32>,
    offset: Option<u32>,
) {
    if !topic_ids.is_empty() {
        let joined = topic_ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        pairs.push(("topic_ids", joined));
    }
    if let Some(y) = year_from {
        pairs.push(("year_from", y.to_string()));
    }
    if let Some(y) = year_to {
        pairs.push(("year_to", y.to_string()));
    }
    if let Some(n) = limit {
        pairs.push(("limit", n.to_string()));
    }
    if let Some(n) = offset {
        pairs.push(("offset", n.to_string()));
    }
}
