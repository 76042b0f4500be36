use thiserror::Error;

/// Remote spreadsheet access errors.
///
/// The retry policy consults `is_retryable`: server-side transient statuses
/// are worth retrying, everything else is deterministic and propagates
/// immediately.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("spreadsheet `{0}` not found")]
    SpreadsheetNotFound(String),

    #[error("worksheet `{tab}` not found in spreadsheet `{spreadsheet_id}`")]
    WorksheetNotFound { spreadsheet_id: String, tab: String },

    #[error("sheets API error: [{status}]: {message}")]
    Api { status: u16, message: String },

    #[error("authentication failed: {0}")]
    Auth(String),
}

impl SheetError {
    pub fn is_retryable(&self) -> bool {
        match self {
            SheetError::Api { status, .. } => {
                matches!(status, 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}
