//! Free-text filtering of quote records.

use crate::types::Record;
use std::sync::Arc;

/// Whether `record` matches the already lower-cased `needle`.
fn matches(record: &Record, needle: &str) -> bool {
    record.text.to_lowercase().contains(needle)
        || record.author.to_lowercase().contains(needle)
        || record
            .date
            .as_deref()
            .is_some_and(|date| date.to_lowercase().contains(needle))
}

/// Returns the records whose text, author handle or date contains `query`,
/// ignoring case and surrounding whitespace. An empty query matches everything.
pub fn filter_records(records: &[Arc<Record>], query: &str) -> Vec<Arc<Record>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| matches(record, &needle))
        .cloned()
        .collect()
}
