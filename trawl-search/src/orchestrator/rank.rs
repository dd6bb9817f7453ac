//! Result deduplication and ranking.
//!
//! Collapses candidates that share a lowercased URL, keeping the
//! highest-scored entry (first seen wins on ties), then sorts by score and
//! truncates. Pure and deterministic: no I/O, no clock, no randomness.

use std::collections::HashMap;

use crate::types::SearchResult;

/// Hard ceiling on the number of ranked results.
pub const MAX_RANKED_RESULTS: usize = 20;

/// Deduplicate, sort and truncate candidates to [`MAX_RANKED_RESULTS`].
pub fn rank(candidates: Vec<SearchResult>) -> Vec<SearchResult> {
    rank_with_limit(candidates, MAX_RANKED_RESULTS)
}

/// Like [`rank`], with a caller-chosen cap. The cap is clamped to
/// [`MAX_RANKED_RESULTS`].
///
/// - Candidates without a URL or title are dropped.
/// - A later duplicate replaces the stored entry only when its score is
///   strictly greater; the entry keeps the slot of the first occurrence.
/// - The sort is stable, so equal scores keep first-merged order.
pub fn rank_with_limit(candidates: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    let mut slots: Vec<SearchResult> = Vec::with_capacity(candidates.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for candidate in candidates.into_iter().filter(SearchResult::is_rankable) {
        match index.get(&candidate.dedup_key()) {
            Some(&slot) => {
                if candidate.score > slots[slot].score {
                    slots[slot] = candidate;
                }
            }
            None => {
                index.insert(candidate.dedup_key(), slots.len());
                slots.push(candidate);
            }
        }
    }

    slots.sort_by(|a, b| b.score.cmp(&a.score));
    slots.truncate(limit.min(MAX_RANKED_RESULTS));
    slots
}
