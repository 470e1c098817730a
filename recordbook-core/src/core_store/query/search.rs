/*
    search.rs - Linear keyword search over record titles

    Case-insensitive substring match. No index: every call scans the
    records it is handed, in the order it is handed them.
*/

use crate::core_store::model::Record;

/// Records whose title contains `keyword`, ignoring case.
///
/// An empty keyword matches everything.
pub fn search_records<'a>(records: impl IntoIterator<Item = &'a Record>, keyword: &str) -> Vec<Record> {
    records
        .into_iter()
        .filter(|r| r.title_matches(keyword))
        .cloned()
        .collect()
}
