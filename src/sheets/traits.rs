use anyhow::Result;

/// Low-level transport to one remote spreadsheet document.
///
/// Deliberately narrow: there is no whole-sheet read. Callers fetch exactly
/// one row (optionally bounded to the first `max_cols` columns) or exactly
/// one column, which is what keeps transfer sizes flat as sheets grow.
#[async_trait::async_trait]
pub trait SheetTransport: Send + Sync {
    /// Titles of all worksheets, in sheet order.
    /// Fails with `SheetError::SpreadsheetNotFound` when the document is absent.
    async fn worksheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>>;

    /// One row of formatted (displayed) cell values. `row` is 1-based.
    /// `Some(n)` bounds the read to columns 1..=n; `None` reads the whole row.
    /// Trailing empty cells are omitted, as the remote API does.
    async fn read_row(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        row: u32,
        max_cols: Option<u32>,
    ) -> Result<Vec<String>>;

    /// One whole column of formatted cell values, starting at row 1.
    /// `col` is 1-based. Trailing empty cells are omitted.
    async fn read_col(&self, spreadsheet_id: &str, tab: &str, col: u32) -> Result<Vec<String>>;
}
