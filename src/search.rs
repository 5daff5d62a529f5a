use rand::Rng;

use crate::model::issue::{Issue, SearchResult};

pub const MAX_SIMULATED_MATCHES: u32 = 5;

/// Placeholder search: the documents are never read. Every issue comes back
/// with a random hit count and a snippet echoing the term. Nothing is ranked
/// or excluded. A blank term yields no results.
pub fn simulate<R: Rng + ?Sized>(issues: &[Issue], term: &str, rng: &mut R) -> Vec<SearchResult> {
    if term.trim().is_empty() {
        return Vec::new();
    }

    issues
        .iter()
        .map(|issue| SearchResult {
            issue: issue.clone(),
            matches: rng.gen_range(1..=MAX_SIMULATED_MATCHES),
            snippet: format!("...{}...", term),
        })
        .collect()
}
