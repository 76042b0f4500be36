use crate::sheets::MemoryTransport;

pub const SEED_SPREADSHEET_ID: &str = "tpm-demo-workbook";

pub const SEED_TOOL_TABS: [&str; 2] = ["Generator Inspection", "Transformer Inspection"];

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

/// Sample multi-tool workbook for the offline demo mode and the test suite.
pub fn seed_transport() -> MemoryTransport {
    let mut transport = MemoryTransport::new();

    transport.insert_tab(
        SEED_SPREADSHEET_ID,
        SEED_TOOL_TABS[0],
        grid(&[
            &["TPM_ID", "Site Name", "Region", "Inspector", "Visit Date", "Status"],
            &["TPM-1002", "Harbor Generator Hall", "West", "L. Moreau", "2024-03-11", "Open"],
            &["TPM-1001", "North Ridge Plant", "North", "A. Okafor", "2024-02-27", "Closed"],
            &["TPM-1004", "Quarry Backup Unit", "East", "A. Okafor", "2024-04-02"],
        ]),
    );

    transport.insert_tab(
        SEED_SPREADSHEET_ID,
        SEED_TOOL_TABS[1],
        grid(&[
            &["TPM_ID", "Site Name", "Region", "Inspector", "Visit Date", "Status"],
            &["TPM-1001", "North Ridge Plant", "North", "L. Moreau", "2024-03-05", "Open"],
            &["TPM-2001", "Dockside Transformer Yard", "West", "S. Petrov", "2024-03-19", "Open"],
        ]),
    );

    transport
}
