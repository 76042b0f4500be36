pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod retry;
pub mod seed;
pub mod sheets;
pub mod wizard;

// Export the public fetch entry points
pub use api::{
    fetch_row_by_tpm_id, fetch_row_by_tpm_id_across_tools, fetch_tpm_ids, fetch_tpm_ids_from_tools,
};

// Export all model types
pub use model::*;

// Export the retry policy
pub use retry::{is_retryable, RetryPolicy};

// Export sheet client types
pub use sheets::{
    HttpTransport, MemoryTransport, SheetError, SheetTransport, SheetsClient, Spreadsheet,
    Worksheet,
};

// Export wizard types
pub use wizard::{NavClicks, NavStyle, SessionState, StepCursor, WizardFlow};
