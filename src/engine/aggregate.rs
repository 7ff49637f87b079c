//! Fold drained results into the file and value indices.

use crate::{FileIndex, ScanReport, ScanResult, ValueIndex};

/// Build `(file name → values, value → urls)` from results in drain order.
///
/// A repeated file name overwrites the earlier entry. URL lists are appended as-is, never deduplicated.
pub fn aggregate(results: &[ScanResult]) -> (FileIndex, ValueIndex) {
    let mut file_index = FileIndex::new();
    let mut value_index = ValueIndex::new();
    for res in results {
        file_index.insert(res.name.clone(), res.values.clone());
        // url is only absent when values is empty
        let url = res.url.clone().unwrap_or_default();
        for value in &res.values {
            value_index
                .entry(value.clone())
                .or_default()
                .push(url.clone());
        }
    }
    (file_index, value_index)
}

/// Key set of `value_index`. Order follows map iteration and is not stable.
pub fn distinct_values(value_index: &ValueIndex) -> Vec<String> {
    value_index.keys().cloned().collect()
}

/// [`aggregate`] plus [`distinct_values`], packaged as a report.
pub fn build_report(results: &[ScanResult]) -> ScanReport {
    let (file_index, value_index) = aggregate(results);
    let distinct_values = distinct_values(&value_index);
    ScanReport {
        file_index,
        value_index,
        distinct_values,
        files_scanned: results.len(),
    }
}
