//! Client configuration

use crate::{ClientError, ClientResult};
use shared::RateTable;
use std::path::PathBuf;

/// Default API base URL (the service mounts its routes under `/api`)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Client configuration for the reservation service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL including `/api` (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// JSON rate table replacing the published rates
    pub rates_file: Option<PathBuf>,

    /// Log level filter (e.g., "info", "debug")
    pub log_level: String,

    /// Emit JSON log lines
    pub log_json: bool,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            rates_file: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }

    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `OCEANVIEW_API_URL` | `http://localhost:8080/api` |
    /// | `OCEANVIEW_TOKEN` | none |
    /// | `OCEANVIEW_TIMEOUT_SECS` | 30 |
    /// | `OCEANVIEW_RATES_FILE` | none |
    /// | `LOG_LEVEL` | info |
    /// | `LOG_JSON` | false |
    pub fn from_env() -> ClientResult<Self> {
        let _ = dotenvy::dotenv();

        let timeout = match std::env::var("OCEANVIEW_TIMEOUT_SECS") {
            Ok(v) => v.parse().map_err(|_| {
                ClientError::Config(format!("OCEANVIEW_TIMEOUT_SECS must be a number, got {v:?}"))
            })?,
            Err(_) => 30,
        };

        Ok(Self {
            base_url: std::env::var("OCEANVIEW_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            token: std::env::var("OCEANVIEW_TOKEN").ok().filter(|s| !s.is_empty()),
            timeout,
            rates_file: std::env::var("OCEANVIEW_RATES_FILE")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE"))
                .unwrap_or(false),
        })
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Price from a JSON rate table file
    pub fn with_rates_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.rates_file = Some(path.into());
        self
    }

    /// Rate table from `rates_file`, or the published rates
    pub fn rate_table(&self) -> ClientResult<RateTable> {
        let Some(path) = &self.rates_file else {
            return Ok(RateTable::default());
        };
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read rates file {}: {e}", path.display()))
        })?;
        RateTable::from_json(&json).map_err(|e| {
            ClientError::Config(format!("invalid rates file {}: {e}", path.display()))
        })
    }

    /// Create a gateway from this configuration
    pub fn build_gateway(&self) -> ClientResult<crate::NetworkGateway> {
        crate::NetworkGateway::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::RoomCategory;
    use std::io::Write;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://hotel.local/api")
            .with_token("abc")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://hotel.local/api");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
        assert!(!config.log_json);
    }

    #[test]
    fn test_default_rate_table_without_file() {
        let table = ClientConfig::default().rate_table().unwrap();
        assert_eq!(table.rate(RoomCategory::Deluxe), Decimal::from(8000));
    }

    #[test]
    fn test_rate_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"STANDARD":6000,"DELUXE":9000,"SUITE":13000,"FAMILY":16000,"PRESIDENTIAL":30000}}"#
        )
        .unwrap();

        let config = ClientConfig::default().with_rates_file(file.path());
        let table = config.rate_table().unwrap();
        assert_eq!(table.rate(RoomCategory::Presidential), Decimal::from(30000));
    }

    #[test]
    fn test_invalid_rate_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"STANDARD":6000}}"#).unwrap();

        let err = ClientConfig::default()
            .with_rates_file(file.path())
            .rate_table()
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let missing = ClientConfig::default()
            .with_rates_file("/nonexistent/rates.json")
            .rate_table()
            .unwrap_err();
        assert!(matches!(missing, ClientError::Config(_)));
    }
}
