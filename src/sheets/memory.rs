use std::collections::HashMap;

use anyhow::Result;

use crate::sheets::error::SheetError;
use crate::sheets::traits::SheetTransport;

/// In-memory workbook transport backing the seed data, the offline demo
/// mode, and the test suite. Honors the same targeted-read semantics as the
/// HTTP transport: bounded row ranges, single-column reads, trailing empty
/// cells omitted.
#[derive(Debug, Default, Clone)]
pub struct MemoryTransport {
    spreadsheets: HashMap<String, MemoryWorkbook>,
}

/// Tabs kept in insertion order so worksheet listings are stable.
#[derive(Debug, Default, Clone)]
struct MemoryWorkbook {
    tabs: Vec<(String, Vec<Vec<String>>)>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) one tab's grid of cell values.
    pub fn insert_tab(&mut self, spreadsheet_id: &str, tab: &str, rows: Vec<Vec<String>>) {
        let workbook = self
            .spreadsheets
            .entry(spreadsheet_id.to_string())
            .or_default();
        if let Some(existing) = workbook.tabs.iter_mut().find(|(t, _)| t == tab) {
            existing.1 = rows;
        } else {
            workbook.tabs.push((tab.to_string(), rows));
        }
    }

    fn workbook(&self, spreadsheet_id: &str) -> Result<&MemoryWorkbook, SheetError> {
        self.spreadsheets
            .get(spreadsheet_id)
            .ok_or_else(|| SheetError::SpreadsheetNotFound(spreadsheet_id.to_string()))
    }

    fn tab<'a>(
        &'a self,
        spreadsheet_id: &str,
        tab: &str,
    ) -> Result<&'a Vec<Vec<String>>, SheetError> {
        let workbook = self.workbook(spreadsheet_id)?;
        workbook
            .tabs
            .iter()
            .find(|(t, _)| t == tab)
            .map(|(_, rows)| rows)
            .ok_or_else(|| SheetError::WorksheetNotFound {
                spreadsheet_id: spreadsheet_id.to_string(),
                tab: tab.to_string(),
            })
    }
}

fn truncate_trailing_empty(mut values: Vec<String>) -> Vec<String> {
    while values.last().is_some_and(|v| v.is_empty()) {
        values.pop();
    }
    values
}

#[async_trait::async_trait]
impl SheetTransport for MemoryTransport {
    async fn worksheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>> {
        let workbook = self.workbook(spreadsheet_id)?;
        Ok(workbook.tabs.iter().map(|(t, _)| t.clone()).collect())
    }

    async fn read_row(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        row: u32,
        max_cols: Option<u32>,
    ) -> Result<Vec<String>> {
        let rows = self.tab(spreadsheet_id, tab)?;
        let mut values = rows
            .get(row.saturating_sub(1) as usize)
            .cloned()
            .unwrap_or_default();
        if let Some(cols) = max_cols {
            values.truncate(cols as usize);
        }
        Ok(truncate_trailing_empty(values))
    }

    async fn read_col(&self, spreadsheet_id: &str, tab: &str, col: u32) -> Result<Vec<String>> {
        let rows = self.tab(spreadsheet_id, tab)?;
        let idx = col.saturating_sub(1) as usize;
        let values = rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect();
        Ok(truncate_trailing_empty(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn sample() -> MemoryTransport {
        let mut transport = MemoryTransport::new();
        transport.insert_tab(
            "book",
            "Data",
            grid(&[
                &["TPM_ID", "Name", "Region"],
                &["TPM-001", "North Plant", "NO"],
                &["TPM-002", "", ""],
            ]),
        );
        transport
    }

    #[tokio::test]
    async fn read_row_is_bounded_and_trimmed_of_trailing_empties() {
        let transport = sample();
        let row = transport.read_row("book", "Data", 3, Some(3)).await.unwrap();
        assert_eq!(row, vec!["TPM-002".to_string()]);

        let bounded = transport.read_row("book", "Data", 2, Some(2)).await.unwrap();
        assert_eq!(bounded, vec!["TPM-001".to_string(), "North Plant".to_string()]);
    }

    #[tokio::test]
    async fn read_col_pads_interior_and_drops_trailing_empties() {
        let mut transport = sample();
        transport.insert_tab(
            "book",
            "Gaps",
            grid(&[&["TPM_ID"], &[], &["TPM-003"], &[]]),
        );
        let col = transport.read_col("book", "Gaps", 1).await.unwrap();
        assert_eq!(
            col,
            vec!["TPM_ID".to_string(), String::new(), "TPM-003".to_string()]
        );
    }

    #[tokio::test]
    async fn missing_spreadsheet_and_tab_are_typed_errors() {
        let transport = sample();
        let err = transport.worksheet_titles("nope").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SheetError>(),
            Some(SheetError::SpreadsheetNotFound(_))
        ));

        let err = transport.read_col("book", "nope", 1).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SheetError>(),
            Some(SheetError::WorksheetNotFound { .. })
        ));
    }
}
