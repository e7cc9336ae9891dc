//! Merge engine for dual-source competitions.
//!
//! One feed is results-oriented (authoritative for finished games, thin on
//! upcoming ones), the other schedule-oriented (the reverse). Merging is a
//! trust-precedence operation keyed on `Match.id`: every results entry is
//! kept, and a schedule entry survives only when its id was not already
//! seen. A schedule record never overwrites a results record, even for the
//! same id — the results entry carries the authoritative final score.

use crate::Match;
use std::collections::HashSet;

/// Merge a results-oriented list with a schedule-oriented list, keeping
/// insertion order: all results entries first, then previously-unseen
/// schedule entries. The aggregator's stable date sort relies on that
/// order for tie-breaking.
pub fn merge_match_lists(results: Vec<Match>, schedule: Vec<Match>) -> Vec<Match> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    let mut merged = Vec::with_capacity(results.len() + schedule.len());

    for m in results {
        seen.insert(m.id.clone());
        merged.push(m);
    }
    for m in schedule {
        if seen.insert(m.id.clone()) {
            merged.push(m);
        }
    }

    log::debug!("merged match lists into {} entries", merged.len());
    merged
}
