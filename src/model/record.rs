use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Header-name-to-value mapping for one data row.
pub type RowRecord = BTreeMap<String, String>;

/// A row record annotated with the tool tab it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundRow {
    pub tab: String,
    pub record: RowRecord,
}

/// Resolve a header name to its 1-based column index.
///
/// Exact match after trimming whitespace on both sides, case-sensitive.
/// Duplicate header names resolve to the first occurrence.
pub fn find_column_index(headers: &[String], name: &str) -> Option<u32> {
    let wanted = name.trim();
    headers
        .iter()
        .position(|h| h.trim() == wanted)
        .map(|i| i as u32 + 1)
}

/// Build a row record from a header row and one row of cell values.
///
/// Missing trailing cells map to empty strings, never absent keys.
/// Headers that are blank after trimming are dropped entirely.
pub fn build_row_record(headers: &[String], values: &[String]) -> RowRecord {
    let mut record = RowRecord::new();
    for (i, header) in headers.iter().enumerate() {
        let key = header.trim();
        if key.is_empty() {
            continue;
        }
        let value = values.get(i).cloned().unwrap_or_default();
        record.insert(key.to_string(), value);
    }
    record
}

/// Normalize a raw identifier column into the deduplicated, sorted id set.
///
/// `values` is the full column starting at row 1, so the first `header_row`
/// entries are header (or pre-header) cells and are dropped. Remaining values
/// are trimmed, blanks discarded, then deduplicated and sorted
/// lexicographically.
pub fn normalize_id_list(values: &[String], header_row: u32) -> Vec<String> {
    let ids: BTreeSet<String> = values
        .iter()
        .skip(header_row as usize)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .collect();
    ids.into_iter().collect()
}

/// Convert a 1-based column index to its A1 column letter ("A", "Z", "AA", ...).
pub fn col_letter(mut col: u32) -> String {
    let mut letters = String::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.insert(0, (b'A' + rem) as char);
        col = (col - 1) / 26;
    }
    letters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn find_column_index_is_one_based_and_trimmed() {
        let headers = strs(&["TPM_ID", "Name"]);
        assert_eq!(find_column_index(&headers, "TPM_ID"), Some(1));
        assert_eq!(find_column_index(&headers, "  Name  "), Some(2));
        assert_eq!(find_column_index(&strs(&["TPM_ID"]), "Missing"), None);
        // Case-sensitive
        assert_eq!(find_column_index(&headers, "tpm_id"), None);
    }

    #[test]
    fn find_column_index_prefers_first_duplicate() {
        let headers = strs(&["Name", "TPM_ID", "TPM_ID"]);
        assert_eq!(find_column_index(&headers, "TPM_ID"), Some(2));
    }

    #[test]
    fn build_row_record_pads_short_rows() {
        let record = build_row_record(&strs(&["A", "B"]), &strs(&["x"]));
        assert_eq!(record.get("A").map(String::as_str), Some("x"));
        assert_eq!(record.get("B").map(String::as_str), Some(""));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn build_row_record_drops_blank_headers() {
        let record = build_row_record(&strs(&["", "B"]), &strs(&["x", "y"]));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("B").map(String::as_str), Some("y"));
    }

    #[test]
    fn normalize_id_list_drops_header_trims_and_sorts() {
        let values = strs(&["TPM_ID", " b ", "", "a", "b", "  "]);
        assert_eq!(normalize_id_list(&values, 1), strs(&["a", "b"]));
    }

    #[test]
    fn normalize_id_list_is_idempotent() {
        let values = strs(&["TPM_ID", "c", "a", "b", "a"]);
        let once = normalize_id_list(&values, 1);
        // A second pass sees no header row to drop
        let twice = normalize_id_list(&once, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn col_letter_covers_multi_letter_columns() {
        assert_eq!(col_letter(1), "A");
        assert_eq!(col_letter(26), "Z");
        assert_eq!(col_letter(27), "AA");
        assert_eq!(col_letter(52), "AZ");
        assert_eq!(col_letter(703), "AAA");
    }
}
