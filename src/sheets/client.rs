use std::sync::Arc;

use anyhow::{Context, Result};

use crate::retry::RetryPolicy;
use crate::sheets::error::SheetError;
use crate::sheets::traits::SheetTransport;

/// Entry point for all remote spreadsheet access.
///
/// Holds the transport and the two retry budgets. Handles produced by
/// `open_spreadsheet` are intentionally not cached across public fetch
/// calls: every top-level fetch re-opens, trading latency for freedom from
/// handle staleness.
#[derive(Clone)]
pub struct SheetsClient {
    transport: Arc<dyn SheetTransport>,
    open_retry: RetryPolicy,
    fetch_retry: RetryPolicy,
}

impl SheetsClient {
    pub fn new(transport: Arc<dyn SheetTransport>) -> Self {
        Self {
            transport,
            open_retry: RetryPolicy::OPEN,
            fetch_retry: RetryPolicy::FETCH,
        }
    }

    pub fn with_policies(
        transport: Arc<dyn SheetTransport>,
        open_retry: RetryPolicy,
        fetch_retry: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            open_retry,
            fetch_retry,
        }
    }

    /// Retry budget for row/column value fetches.
    pub fn fetch_retry(&self) -> &RetryPolicy {
        &self.fetch_retry
    }

    /// Open a spreadsheet by its stable identifier.
    ///
    /// The metadata read runs under the OPEN retry budget. A not-found
    /// result is deterministic and propagates without consuming retries.
    pub async fn open_spreadsheet(&self, spreadsheet_id: &str) -> Result<Spreadsheet> {
        let worksheets = self
            .open_retry
            .run("open spreadsheet", || {
                self.transport.worksheet_titles(spreadsheet_id)
            })
            .await
            .with_context(|| format!("Failed to open spreadsheet `{spreadsheet_id}`"))?;

        Ok(Spreadsheet {
            transport: Arc::clone(&self.transport),
            id: spreadsheet_id.to_string(),
            worksheets,
        })
    }

    /// Open one named tab, re-opening the spreadsheet first.
    pub async fn open_worksheet(&self, spreadsheet_id: &str, tab: &str) -> Result<Worksheet> {
        let spreadsheet = self.open_spreadsheet(spreadsheet_id).await?;
        Ok(spreadsheet.worksheet(tab)?)
    }
}

/// Handle to one opened remote spreadsheet, carrying its tab list.
pub struct Spreadsheet {
    transport: Arc<dyn SheetTransport>,
    id: String,
    worksheets: Vec<String>,
}

impl Spreadsheet {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn worksheets(&self) -> &[String] {
        &self.worksheets
    }

    /// Resolve a tab by name. Purely local against the tab list fetched at
    /// open time, so never retried.
    pub fn worksheet(&self, tab: &str) -> Result<Worksheet, SheetError> {
        if !self.worksheets.iter().any(|t| t == tab) {
            return Err(SheetError::WorksheetNotFound {
                spreadsheet_id: self.id.clone(),
                tab: tab.to_string(),
            });
        }
        Ok(Worksheet {
            transport: Arc::clone(&self.transport),
            spreadsheet_id: self.id.clone(),
            title: tab.to_string(),
        })
    }
}

/// Handle to one named tab. Thin targeted-read delegations; retry is applied
/// by the composite operations in `logic`, which treat a whole
/// header/column/row sequence as one retry unit.
pub struct Worksheet {
    transport: Arc<dyn SheetTransport>,
    spreadsheet_id: String,
    title: String,
}

impl Worksheet {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The header row, read in full.
    pub async fn headers(&self, header_row: u32) -> Result<Vec<String>> {
        self.transport
            .read_row(&self.spreadsheet_id, &self.title, header_row, None)
            .await
            .with_context(|| format!("Failed to read header row of `{}`", self.title))
    }

    /// One data row, bounded to the first `max_cols` columns.
    pub async fn row_values(&self, row: u32, max_cols: u32) -> Result<Vec<String>> {
        self.transport
            .read_row(&self.spreadsheet_id, &self.title, row, Some(max_cols))
            .await
            .with_context(|| format!("Failed to read row {row} of `{}`", self.title))
    }

    /// One whole column, header cell included at position 0.
    pub async fn col_values(&self, col: u32) -> Result<Vec<String>> {
        self.transport
            .read_col(&self.spreadsheet_id, &self.title, col)
            .await
            .with_context(|| format!("Failed to read column {col} of `{}`", self.title))
    }
}
