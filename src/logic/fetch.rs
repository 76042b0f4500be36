use anyhow::Result;

use crate::model::{build_row_record, find_column_index, normalize_id_list, RowRecord};
use crate::retry::RetryPolicy;
use crate::sheets::Worksheet;

/// List the deduplicated, sorted TPM ids in one worksheet.
///
/// Reads the header row, resolves the id column, then reads only that
/// column. A worksheet without the id column yields an empty list, not an
/// error. The whole sequence is one retry unit: on a transient failure the
/// headers are re-fetched too, since a resolved column index is cheap to
/// recompute and not safe to assume stable across the failure.
pub async fn list_ids(
    worksheet: &Worksheet,
    id_column: &str,
    header_row: u32,
    retry: &RetryPolicy,
) -> Result<Vec<String>> {
    retry
        .run("list ids", || async {
            let headers = worksheet.headers(header_row).await?;
            let Some(col) = find_column_index(&headers, id_column) else {
                log::debug!(
                    "worksheet `{}` has no `{id_column}` column, returning no ids",
                    worksheet.title()
                );
                return Ok(Vec::new());
            };
            let values = worksheet.col_values(col).await?;
            Ok(normalize_id_list(&values, header_row))
        })
        .await
}

/// Fetch the first row whose id cell matches `target_id` (trimmed exact
/// match), transferring only the id column and then the single matching row
/// bounded to the header width.
///
/// Identifier-not-found and missing id column are normal `None` results.
pub async fn get_row_by_id(
    worksheet: &Worksheet,
    target_id: &str,
    id_column: &str,
    header_row: u32,
    retry: &RetryPolicy,
) -> Result<Option<RowRecord>> {
    retry
        .run("row lookup", || async {
            let headers = worksheet.headers(header_row).await?;
            let Some(col) = find_column_index(&headers, id_column) else {
                return Ok(None);
            };
            let values = worksheet.col_values(col).await?;

            let target = target_id.trim();
            let hit = values
                .iter()
                .enumerate()
                .skip(header_row as usize)
                .find(|(_, value)| value.trim() == target);
            let Some((index, _)) = hit else {
                return Ok(None);
            };

            // Column positions are 0-based over rows starting at row 1
            let row = index as u32 + 1;
            let row_values = worksheet.row_values(row, headers.len() as u32).await?;
            Ok(Some(build_row_record(&headers, &row_values)))
        })
        .await
}
