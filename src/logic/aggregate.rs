use std::collections::BTreeSet;

use anyhow::Result;

use crate::logic::fetch::{get_row_by_id, list_ids};
use crate::model::FoundRow;
use crate::sheets::{SheetError, SheetsClient};

/// Union of TPM ids across a list of tool tabs, sorted.
///
/// The spreadsheet is opened once for the whole scan; each tab's fetch then
/// runs under its own bounded retry. With `skip_missing`, tabs absent from
/// the spreadsheet are skipped silently; otherwise the missing tab
/// propagates. A non-retryable failure in any tab aborts the whole
/// aggregation with no partial result.
pub async fn list_ids_across_tabs(
    client: &SheetsClient,
    spreadsheet_id: &str,
    tab_names: &[String],
    id_column: &str,
    header_row: u32,
    skip_missing: bool,
) -> Result<Vec<String>> {
    let spreadsheet = client.open_spreadsheet(spreadsheet_id).await?;

    let mut all_ids = BTreeSet::new();
    for tab in tab_names {
        let worksheet = match spreadsheet.worksheet(tab) {
            Ok(worksheet) => worksheet,
            Err(SheetError::WorksheetNotFound { .. }) if skip_missing => {
                log::warn!("tool tab `{tab}` not found in `{spreadsheet_id}`, skipping");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        let ids = list_ids(&worksheet, id_column, header_row, client.fetch_retry()).await?;
        log::debug!("tab `{tab}`: {} ids", ids.len());
        all_ids.extend(ids);
    }

    Ok(all_ids.into_iter().collect())
}

/// Search the tool tabs in caller order for the first row matching
/// `target_id`, annotated with the tab it came from. First match wins; the
/// tie-break is tab list order, nothing else.
pub async fn find_row_across_tabs(
    client: &SheetsClient,
    spreadsheet_id: &str,
    tab_names: &[String],
    target_id: &str,
    id_column: &str,
    header_row: u32,
    skip_missing: bool,
) -> Result<Option<FoundRow>> {
    let spreadsheet = client.open_spreadsheet(spreadsheet_id).await?;

    for tab in tab_names {
        let worksheet = match spreadsheet.worksheet(tab) {
            Ok(worksheet) => worksheet,
            Err(SheetError::WorksheetNotFound { .. }) if skip_missing => {
                log::warn!("tool tab `{tab}` not found in `{spreadsheet_id}`, skipping");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if let Some(record) = get_row_by_id(
            &worksheet,
            target_id,
            id_column,
            header_row,
            client.fetch_retry(),
        )
        .await?
        {
            return Ok(Some(FoundRow {
                tab: tab.clone(),
                record,
            }));
        }
    }

    Ok(None)
}
