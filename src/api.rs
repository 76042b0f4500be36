//! Public entry points consumed by the surrounding UI collaborators.
//!
//! Plain identifiers and strings in, plain sequences and mappings out; no
//! framework types cross this boundary. Every call re-authenticates and
//! re-opens the spreadsheet rather than reusing a handle across calls.

use anyhow::Result;

use crate::logic;
use crate::model::{FoundRow, RowRecord};
use crate::sheets::SheetsClient;

/// All TPM ids in one tool tab, deduplicated and sorted.
pub async fn fetch_tpm_ids(
    client: &SheetsClient,
    spreadsheet_id: &str,
    tab: &str,
    id_column: &str,
    header_row: u32,
) -> Result<Vec<String>> {
    let worksheet = client.open_worksheet(spreadsheet_id, tab).await?;
    logic::list_ids(&worksheet, id_column, header_row, client.fetch_retry()).await
}

/// The row for one TPM id in one tool tab; `None` when the id is absent.
pub async fn fetch_row_by_tpm_id(
    client: &SheetsClient,
    spreadsheet_id: &str,
    tab: &str,
    target_id: &str,
    id_column: &str,
    header_row: u32,
) -> Result<Option<RowRecord>> {
    let worksheet = client.open_worksheet(spreadsheet_id, tab).await?;
    logic::get_row_by_id(
        &worksheet,
        target_id,
        id_column,
        header_row,
        client.fetch_retry(),
    )
    .await
}

/// Sorted union of TPM ids across the configured tool tabs.
pub async fn fetch_tpm_ids_from_tools(
    client: &SheetsClient,
    spreadsheet_id: &str,
    tab_names: &[String],
    id_column: &str,
    header_row: u32,
    skip_missing: bool,
) -> Result<Vec<String>> {
    logic::list_ids_across_tabs(
        client,
        spreadsheet_id,
        tab_names,
        id_column,
        header_row,
        skip_missing,
    )
    .await
}

/// First row matching a TPM id across the tool tabs, in tab list order,
/// annotated with the tab it was found in.
pub async fn fetch_row_by_tpm_id_across_tools(
    client: &SheetsClient,
    spreadsheet_id: &str,
    tab_names: &[String],
    target_id: &str,
    id_column: &str,
    header_row: u32,
    skip_missing: bool,
) -> Result<Option<FoundRow>> {
    logic::find_row_across_tabs(
        client,
        spreadsheet_id,
        tab_names,
        target_id,
        id_column,
        header_row,
        skip_missing,
    )
    .await
}
