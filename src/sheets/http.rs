use anyhow::{anyhow, Context, Result};
use reqwest::Url;

use crate::model::{col_letter, ServiceAccountKey};
use crate::sheets::auth;
use crate::sheets::error::SheetError;
use crate::sheets::traits::SheetTransport;

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Sheets v4 REST transport. The only network-touching component; every
/// request authenticates with a freshly exchanged service-account token.
pub struct HttpTransport {
    http: reqwest::Client,
    key: ServiceAccountKey,
    base_url: String,
}

impl HttpTransport {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            http: reqwest::Client::new(),
            key,
            base_url: SHEETS_BASE_URL.to_string(),
        }
    }

    /// Point the transport at a different endpoint, e.g. a local stub.
    pub fn with_base_url(key: ServiceAccountKey, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            key,
            base_url: base_url.into(),
        }
    }

    fn url(&self, spreadsheet_id: &str, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).context("Invalid Sheets API base URL")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Sheets API base URL cannot be a base"))?
            .push(spreadsheet_id)
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value> {
        let token = auth::fetch_access_token(&self.http, &self.key).await?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to reach the Sheets API")?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .unwrap_or("request failed")
                .to_string();
            return Err(SheetError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        response
            .json()
            .await
            .context("Failed to decode Sheets API response")
    }

    async fn read_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        major_dimension: &str,
    ) -> Result<Vec<Vec<String>>> {
        let mut url = self.url(spreadsheet_id, &["values", range])?;
        url.query_pairs_mut()
            .append_pair("majorDimension", major_dimension)
            .append_pair("valueRenderOption", "FORMATTED_VALUE");

        let body = self.get_json(url).await?;
        let values = body
            .get("values")
            .and_then(|v| v.as_array())
            .map(|rows| {
                rows.iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| {
                                cells
                                    .iter()
                                    .map(|c| c.as_str().unwrap_or_default().to_string())
                                    .collect()
                            })
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(values)
    }
}

/// Quote a tab name for A1 notation, escaping embedded single quotes.
fn quote_tab(tab: &str) -> String {
    format!("'{}'", tab.replace('\'', "''"))
}

/// A 404 on the metadata request means the spreadsheet itself is absent.
/// Value-range requests keep their raw API status: there the document
/// exists and a 404 would point at the range reference instead.
fn metadata_not_found(err: anyhow::Error, spreadsheet_id: &str) -> anyhow::Error {
    match err.downcast::<SheetError>() {
        Ok(SheetError::Api { status: 404, .. }) => {
            SheetError::SpreadsheetNotFound(spreadsheet_id.to_string()).into()
        }
        Ok(other) => other.into(),
        Err(err) => err,
    }
}

#[async_trait::async_trait]
impl SheetTransport for HttpTransport {
    async fn worksheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>> {
        let mut url = self.url(spreadsheet_id, &[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");

        let body = self
            .get_json(url)
            .await
            .map_err(|err| metadata_not_found(err, spreadsheet_id))?;
        let titles = body
            .get("sheets")
            .and_then(|s| s.as_array())
            .map(|sheets| {
                sheets
                    .iter()
                    .filter_map(|s| s.pointer("/properties/title"))
                    .filter_map(|t| t.as_str())
                    .map(|t| t.to_string())
                    .collect()
            })
            .unwrap_or_default();
        Ok(titles)
    }

    async fn read_row(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        row: u32,
        max_cols: Option<u32>,
    ) -> Result<Vec<String>> {
        let range = match max_cols {
            Some(cols) => format!("{}!A{row}:{}{row}", quote_tab(tab), col_letter(cols)),
            None => format!("{}!{row}:{row}", quote_tab(tab)),
        };
        let rows = self.read_range(spreadsheet_id, &range, "ROWS").await?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    async fn read_col(&self, spreadsheet_id: &str, tab: &str, col: u32) -> Result<Vec<String>> {
        let letter = col_letter(col);
        let range = format!("{}!{letter}:{letter}", quote_tab(tab));
        let cols = self.read_range(spreadsheet_id, &range, "COLUMNS").await?;
        Ok(cols.into_iter().next().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_tab_escapes_single_quotes() {
        assert_eq!(quote_tab("Checklist"), "'Checklist'");
        assert_eq!(quote_tab("Tom's Tab"), "'Tom''s Tab'");
    }

    #[test]
    fn bounded_row_range_uses_column_letters() {
        assert_eq!(
            format!("{}!A5:{}5", quote_tab("Tools"), col_letter(28)),
            "'Tools'!A5:AB5"
        );
    }

    #[test]
    fn metadata_404_becomes_spreadsheet_not_found() {
        let err = metadata_not_found(
            SheetError::Api {
                status: 404,
                message: "Requested entity was not found.".to_string(),
            }
            .into(),
            "book",
        );
        assert!(matches!(
            err.downcast_ref::<SheetError>(),
            Some(SheetError::SpreadsheetNotFound(id)) if id == "book"
        ));
    }

    #[test]
    fn non_404_statuses_pass_through_unchanged() {
        let err = metadata_not_found(
            SheetError::Api {
                status: 503,
                message: "backend flake".to_string(),
            }
            .into(),
            "book",
        );
        assert!(matches!(
            err.downcast_ref::<SheetError>(),
            Some(SheetError::Api { status: 503, .. })
        ));
    }
}
