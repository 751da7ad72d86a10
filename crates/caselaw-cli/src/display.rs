//! Text rendering for search results, case cards, and topic lists.
//!
//! Every view is a `Display` wrapper over borrowed state, so the same state
//! always renders the same text.

use std::fmt;

use caselaw_controller::{CasePage, CaseState, Filters, RESULTS_PER_PAGE, SearchState};
use caselaw_core::{CaseDetail, CaseSummary, SearchResult, Topic};

const MAX_SNIPPET_CHARS: usize = 200;
const DISCLAIMER: &str = "AI-generated summary. Verify with official judgment.";

// ── Search ──

/// The search screen for one controller state.
pub struct SearchView<'a> {
    pub state: &'a SearchState,
    pub has_more: bool,
}

impl fmt::Display for SearchView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            SearchState::Idle => {
                writeln!(f, "Enter a query to search Supreme Court cases.")
            }
            SearchState::Loading { .. } => writeln!(f, "Searching..."),
            SearchState::Failed { message } => {
                writeln!(f, "{message}")?;
                writeln!(f, "Type `retry` to try again.")
            }
            SearchState::Loaded { results, .. } if results.is_empty() => {
                writeln!(f, "No cases found. Try a different query.")
            }
            SearchState::Loaded { results, page } => {
                writeln!(
                    f,
                    "{} result{} (page {})",
                    results.len(),
                    if results.len() == 1 { "" } else { "s" },
                    u64::from(*page) + 1
                )?;
                writeln!(f)?;
                let first = u64::from(*page) * u64::from(RESULTS_PER_PAGE) + 1;
                for (n, r) in (first..).zip(results) {
                    write_result(f, n, r)?;
                }
                write_pager(f, *page, self.has_more)
            }
        }
    }
}

fn write_result(f: &mut fmt::Formatter<'_>, n: u64, r: &SearchResult) -> fmt::Result {
    writeln!(f, "{:>3}. {}  [#{}]", n, r.case.case_name, r.case.id)?;
    write!(f, "     {} · {}", r.case.citation, r.case.year)?;
    if let Some(pct) = r.match_percent() {
        write!(f, "  ({pct}% match)")?;
    }
    writeln!(f)?;
    if let Some(snippet) = r.case.snippet.as_deref().filter(|s| !s.is_empty()) {
        writeln!(f, "     {}", shorten(snippet, MAX_SNIPPET_CHARS))?;
    }
    writeln!(f)
}

fn write_pager(f: &mut fmt::Formatter<'_>, page: u32, has_more: bool) -> fmt::Result {
    let mut parts = Vec::new();
    if page > 0 {
        parts.push(format!("prev → page {}", page));
    }
    if has_more {
        parts.push(format!("next → page {}", u64::from(page) + 2));
    }
    if !parts.is_empty() {
        writeln!(f, "{}", parts.join("  |  "))?;
    }
    Ok(())
}

// ── Browse ──

/// A plain list of cases with no similarity, numbered from `offset`.
pub struct BrowseView<'a> {
    pub cases: &'a [CaseSummary],
    pub offset: u32,
}

impl fmt::Display for BrowseView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cases.is_empty() {
            return writeln!(f, "No cases match these filters.");
        }
        for (i, case) in self.cases.iter().enumerate() {
            writeln!(
                f,
                "{:>3}. {}  [#{}]",
                self.offset as usize + i + 1,
                case.case_name,
                case.id
            )?;
            writeln!(f, "     {} · {}", case.citation, case.year)?;
        }
        Ok(())
    }
}

// ── Case card ──

/// The case detail screen.
pub struct CaseView<'a>(pub &'a CaseState);

impl fmt::Display for CaseView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            CaseState::Loading => writeln!(f, "Loading..."),
            CaseState::Failed { message } => writeln!(f, "{message}"),
            CaseState::Loaded(page) => write_case_page(f, page),
        }
    }
}

fn write_case_page(f: &mut fmt::Formatter<'_>, page: &CasePage) -> fmt::Result {
    let case = &page.detail;
    writeln!(f, "=== {} ===", case.case_name)?;
    write!(f, "{} · {}", case.citation, case.year)?;
    if let Some(bench) = case.bench.as_deref().filter(|b| !b.is_empty()) {
        write!(f, " · {bench}")?;
    }
    writeln!(f)?;
    writeln!(f)?;
    writeln!(f, "! {DISCLAIMER}")?;
    writeln!(f)?;

    write_analysis(f, case)?;

    if let Some(url) = case.source_url.as_deref() {
        writeln!(f, "Source: {url}")?;
        writeln!(f)?;
    }

    if !page.similar.is_empty() {
        writeln!(f, "Similar Cases")?;
        write!(f, "{}", SimilarList(&page.similar))?;
    }
    Ok(())
}

fn write_analysis(f: &mut fmt::Formatter<'_>, case: &CaseDetail) -> fmt::Result {
    let sections = [
        ("Facts", &case.facts),
        ("Legal Issues", &case.legal_issues),
        ("Judgment", &case.judgment),
        ("Ratio Decidendi", &case.ratio_decidendi),
    ];
    for (header, body) in sections {
        if let Some(text) = body.as_deref().filter(|t| !t.is_empty()) {
            writeln!(f, "{header}")?;
            writeln!(f, "  {text}")?;
            writeln!(f)?;
        }
    }
    if !case.key_principles.is_empty() {
        writeln!(f, "Key Principles")?;
        for (i, p) in case.key_principles.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, p)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// Cases related to another case, most similar first.
pub struct SimilarList<'a>(pub &'a [SearchResult]);

impl fmt::Display for SimilarList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No similar cases.");
        }
        for r in self.0 {
            writeln!(f, "  [#{}] {}", r.case.id, r.case.case_name)?;
            write!(f, "        {} · {}", r.case.citation, r.case.year)?;
            if let Some(pct) = r.match_percent() {
                write!(f, " · {pct}% similar")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ── Topics & filters ──

pub struct TopicList<'a>(pub &'a [Topic]);

impl fmt::Display for TopicList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No topics available.");
        }
        for t in self.0 {
            writeln!(f, "{:>5}  {} ({})", t.id, t.name, t.slug)?;
        }
        Ok(())
    }
}

/// One-line summary of pending filters, resolving the topic id to its name
/// when the vocabulary is known.
pub struct FilterLine<'a> {
    pub filters: &'a Filters,
    pub topics: &'a [Topic],
}

impl fmt::Display for FilterLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.filters.query.trim();
        write!(
            f,
            "query: {}",
            if query.is_empty() { "(any)" } else { query }
        )?;
        match self.filters.topic {
            Some(id) => match self.topics.iter().find(|t| t.id == id) {
                Some(t) => write!(f, "  topic: {}", t.name)?,
                None => write!(f, "  topic: #{id}")?,
            },
            None => write!(f, "  topic: all")?,
        }
        match (self.filters.year_from, self.filters.year_to) {
            (None, None) => Ok(()),
            (from, to) => write!(
                f,
                "  years: {}–{}",
                from.map(|y| y.to_string()).unwrap_or_default(),
                to.map(|y| y.to_string()).unwrap_or_default()
            ),
        }
    }
}

// ── Helpers ──

fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
