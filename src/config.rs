use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::ServiceAccountKey;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub credentials: CredentialsConfig,
}

/// Where the per-project rows live: one spreadsheet, one tab per tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub spreadsheet_id: String,
    pub tool_tabs: Vec<String>,
    pub header_row: u32,
    pub id_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Full service-account JSON supplied inline by the hosting environment.
    pub service_account_json: Option<String>,
    /// Explicit path to a key file, checked before the fixed fallback paths.
    pub service_account_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            tool_tabs: vec!["Sheet1".to_string()],
            header_row: 1,
            id_column: "TPM_ID".to_string(),
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            service_account_json: None,
            service_account_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Add environment variables with prefix "TPM_"
        config = config.add_source(
            config::Environment::with_prefix("TPM")
                .separator("_")
                .prefix_separator("_"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Resolve the service-account key: inline JSON first, then the
    /// environment, then an explicit path, then the fixed fallback paths.
    pub fn service_account(&self) -> anyhow::Result<ServiceAccountKey> {
        if let Some(raw) = &self.credentials.service_account_json {
            return ServiceAccountKey::from_json_str(raw);
        }

        if let Ok(raw) = std::env::var("TPM_SERVICE_ACCOUNT_JSON") {
            return ServiceAccountKey::from_json_str(&raw);
        }

        if let Some(path) = &self.credentials.service_account_path {
            return ServiceAccountKey::from_file(Path::new(path));
        }

        ServiceAccountKey::from_fallback_paths()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sheet_conventions() {
        let config = AppConfig::default();
        assert_eq!(config.source.header_row, 1);
        assert_eq!(config.source.id_column, "TPM_ID");
        assert!(config.credentials.service_account_json.is_none());
    }
}
