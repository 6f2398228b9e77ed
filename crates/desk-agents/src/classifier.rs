//! Keyword-count query complexity classifier.
//!
//! Routing between the Junior and Master agents hinges on this module:
//! every query is scanned (lowercased) for fixed simple and complex marker
//! phrases, and the hit counts decide the route. Pure and deterministic.

use serde::{Deserialize, Serialize};

/// Marker phrases for simple lookups
pub const SIMPLE_KEYWORDS: [&str; 8] = [
    "price",
    "current price",
    "stock price",
    "basic info",
    "company info",
    "simple",
    "quick",
    "basic",
];

/// Marker phrases for deep analysis
pub const COMPLEX_KEYWORDS: [&str; 11] = [
    "analysis",
    "comprehensive",
    "strategic",
    "recommendation",
    "investment thesis",
    "risk assessment",
    "portfolio",
    "sector",
    "market outlook",
    "comparative",
    "detailed",
];

/// Complexity class of a query, deciding which agents run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    /// Junior agent only
    Simple,
    /// Master agent only
    Complex,
    /// Both agents, outputs synthesized
    MultiStep,
}

/// Classify a query by counting keyword hits.
///
/// Substring containment, so overlapping phrases stack: "current price"
/// also hits "price". Tie-break order matters:
/// more complex than simple hits means Complex; at least one simple hit and
/// zero complex hits means Simple; everything else, including ties and the
/// empty query, falls through to MultiStep.
pub fn classify(query: &str) -> Complexity {
    let query_lower = query.to_lowercase();

    let simple_count = SIMPLE_KEYWORDS
        .iter()
        .filter(|kw| query_lower.contains(*kw))
        .count();
    let complex_count = COMPLEX_KEYWORDS
        .iter()
        .filter(|kw| query_lower.contains(*kw))
        .count();

    if complex_count > simple_count {
        Complexity::Complex
    } else if simple_count > 0 && complex_count == 0 {
        Complexity::Simple
    } else {
        Complexity::MultiStep
    }
}

/// Extract candidate ticker symbols from a query.
///
/// A candidate is a whitespace-separated token that, after trimming
/// punctuation, is 1-5 uppercase ASCII letters. Deduplicated and sorted.
pub fn extract_symbols(query: &str) -> Vec<String> {
    let mut symbols: Vec<String> = query
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| {
            !w.is_empty() && w.len() <= 5 && w.chars().all(|c| c.is_ascii_uppercase())
        })
        .map(String::from)
        .collect();

    symbols.sort();
    symbols.dedup();
    symbols
}
