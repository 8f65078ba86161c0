//! Fuzzy ranking of candidate notes, backing the target-note picker.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Candidates matching `query`, best first. An empty query keeps every candidate in its original order.
pub fn suggest_notes<'a>(candidates: &'a [String], query: &str) -> Vec<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return candidates.iter().map(String::as_str).collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT.match_paths());
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
    let mut buf = Vec::new();
    let mut scored: Vec<(&str, u32)> = candidates
        .iter()
        .filter_map(|c| {
            let haystack = Utf32Str::new(c, &mut buf);
            pattern.score(haystack, &mut matcher).map(|score| (c.as_str(), score))
        })
        .collect();

    // Stable sort: equal scores keep vault order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(c, _)| c).collect()
}
