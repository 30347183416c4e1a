//! Journal frequency counting.

use crate::normalize::CleanedWork;
use std::collections::HashMap;

/// Count works per journal, most frequent first.
///
/// Journal names are trimmed and blank ones skipped. Journals with equal
/// counts keep the order in which they were first seen.
pub fn count_journals(works: &[CleanedWork]) -> Vec<(String, usize)> {
    count_values(works.iter().map(|w| w.journal.as_str()))
}

fn count_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values.map(str::trim).filter(|v| !v.is_empty()) {
        match index.get(value).copied() {
            Some(i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
