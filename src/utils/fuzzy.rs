//! Fuzzy matching utilities
//!
//! Used to suggest the closest known name when a spoken name has no exact
//! match.

use strsim::normalized_levenshtein;

/// Result of a fuzzy match with the matched value and score
#[derive(Debug, Clone)]
pub struct FuzzyMatch {
    pub value: String,
    pub score: f64,
}

/// Find matches in a list of candidates
///
/// Returns up to `n` matches with scores at or above `cutoff`, best first.
pub fn find_matches(
    search_term: &str,
    candidates: &[String],
    n: usize,
    cutoff: f64,
) -> Vec<FuzzyMatch> {
    let search_lower = search_term.trim().to_lowercase();

    let mut matches: Vec<FuzzyMatch> = candidates
        .iter()
        .map(|candidate| FuzzyMatch {
            value: candidate.clone(),
            score: normalized_levenshtein(&search_lower, &candidate.to_lowercase()),
        })
        .filter(|m| m.score >= cutoff)
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(n);

    matches
}

/// Find the best match above a minimum score
///
/// Returns None if no match meets the cutoff
pub fn find_best_match(
    search_term: &str,
    candidates: &[String],
    cutoff: f64,
) -> Option<FuzzyMatch> {
    find_matches(search_term, candidates, 1, cutoff)
        .into_iter()
        .next()
}
