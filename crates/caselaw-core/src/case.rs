//! Case types returned by the case-summary API.
//!
//! All of these are read-only views: they are deserialized from a response,
//! rendered, and dropped when the owning screen moves on.

use serde::{Deserialize, Deserializer, Serialize};

/// One case in a result list or browse page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: i64,
    pub case_name: String,
    pub citation: String,
    pub year: i32,
    #[serde(default)]
    pub bench: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    /// Only populated in search contexts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

/// Full case record for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDetail {
    pub id: i64,
    pub case_name: String,
    pub citation: String,
    pub year: i32,
    #[serde(default)]
    pub bench: Option<String>,
    #[serde(default)]
    pub facts: Option<String>,
    #[serde(default)]
    pub legal_issues: Option<String>,
    #[serde(default)]
    pub judgment: Option<String>,
    #[serde(default)]
    pub ratio_decidendi: Option<String>,
    /// Display order as returned by the server. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub key_principles: Vec<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl CaseDetail {
    /// True if any of the long-form analysis fields carry text.
    pub fn has_analysis(&self) -> bool {
        [
            &self.facts,
            &self.legal_issues,
            &self.judgment,
            &self.ratio_decidendi,
        ]
        .iter()
        .any(|f| f.as_deref().is_some_and(|s| !s.is_empty()))
            || !self.key_principles.is_empty()
    }
}

/// A filter tag. Topics are flat; there is no hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// A case paired with its similarity score.
///
/// `similarity` is `None` when the result was not similarity-ranked
/// (e.g. a filter-only search with no query text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub case: CaseSummary,
    #[serde(default)]
    pub similarity: Option<f64>,
}

impl SearchResult {
    /// Similarity as a whole percentage for the "NN% match" badge.
    pub fn match_percent(&self) -> Option<u8> {
        self.similarity
            .filter(|s| s.is_finite())
            .map(|s| (s.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
