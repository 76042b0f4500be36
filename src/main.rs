use std::sync::Arc;

use tpm_report_rust::api;
use tpm_report_rust::config::AppConfig;
use tpm_report_rust::seed;
use tpm_report_rust::sheets::{HttpTransport, SheetsClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with explicit filter to suppress reqwest debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("reqwest", LevelFilter::Warn)
        .init();

    println!("TPM Report: spreadsheet access demo");

    // Load configuration
    let config = AppConfig::load()?;

    // Bundled seed workbook for running without credentials (optional)
    let use_seed = std::env::var("TPM_USE_SEED").unwrap_or_default() == "true";
    let (client, spreadsheet_id, tabs) = if use_seed {
        println!("Using bundled seed workbook");
        let tabs: Vec<String> = seed::SEED_TOOL_TABS.iter().map(|t| t.to_string()).collect();
        (
            SheetsClient::new(Arc::new(seed::seed_transport())),
            seed::SEED_SPREADSHEET_ID.to_string(),
            tabs,
        )
    } else {
        let key = config.service_account()?;
        println!("Authenticating as {}", key.client_email);
        (
            SheetsClient::new(Arc::new(HttpTransport::new(key))),
            config.source.spreadsheet_id.clone(),
            config.source.tool_tabs.clone(),
        )
    };

    let ids = api::fetch_tpm_ids_from_tools(
        &client,
        &spreadsheet_id,
        &tabs,
        &config.source.id_column,
        config.source.header_row,
        true,
    )
    .await?;
    println!("{} TPM ids across {} tool tabs:", ids.len(), tabs.len());
    for id in &ids {
        println!("  {id}");
    }

    // Look up one row when an id is passed as an argument
    if let Some(target) = std::env::args().nth(1) {
        match api::fetch_row_by_tpm_id_across_tools(
            &client,
            &spreadsheet_id,
            &tabs,
            &target,
            &config.source.id_column,
            config.source.header_row,
            true,
        )
        .await?
        {
            Some(found) => {
                println!("Found `{target}` in tab `{}`:", found.tab);
                for (header, value) in &found.record {
                    println!("  {header}: {value}");
                }
            }
            None => println!("TPM id `{target}` not found in any tool tab"),
        }
    }

    Ok(())
}
