use crate::constants::{self, listings, player_stats};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_default_output_dir, get_log_dir_path};
use validation::{validate_common, validate_listings, validate_player_stats};

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory every dataset and chart is written to.
    #[serde(default = "get_default_output_dir")]
    pub output_dir: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    #[serde(default)]
    pub listings: ListingsConfig,
    #[serde(default)]
    pub player_stats: PlayerStatsConfig,
}

/// Settings for the listings search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ListingsConfig {
    pub token_url: String,
    pub api_base_url: String,
    /// Base64 of `apikey:secret`, sent as HTTP Basic credentials.
    pub auth_string: String,
    pub country: String,
    pub language: String,
    pub max_items: u32,
    pub operation: String,
    pub property_type: String,
    pub order: String,
    /// `lat,lon` of the search center
    pub center: String,
    /// Search radius in meters
    pub distance: u32,
    pub sort: String,
    /// Page requested. Only this one page is fetched.
    pub num_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_offer: Option<bool>,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        ListingsConfig {
            token_url: listings::TOKEN_URL.to_string(),
            api_base_url: listings::API_BASE_URL.to_string(),
            auth_string: listings::AUTH_STRING.to_string(),
            country: listings::COUNTRY.to_string(),
            language: listings::LANGUAGE.to_string(),
            max_items: listings::MAX_ITEMS,
            operation: listings::OPERATION.to_string(),
            property_type: listings::PROPERTY_TYPE.to_string(),
            order: listings::ORDER.to_string(),
            center: listings::CENTER.to_string(),
            distance: listings::DISTANCE_METERS,
            sort: listings::SORT.to_string(),
            num_page: listings::NUM_PAGE,
            bank_offer: None,
        }
    }
}

impl ListingsConfig {
    /// Output path without extension: `{output_dir}/idealista-{property_type}-{operation}`.
    pub fn output_stem(&self, output_dir: &str) -> String {
        Path::new(output_dir)
            .join(format!(
                "idealista-{}-{}",
                self.property_type, self.operation
            ))
            .to_string_lossy()
            .to_string()
    }
}

/// Settings for the player stats pull.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerStatsConfig {
    pub register_base_url: String,
    /// Register CSV files fetched from `register_base_url`, in order.
    pub register_files: Vec<String>,
    pub savant_base_url: String,
    pub last_name: String,
    pub first_name: String,
    /// Inclusive start date, YYYY-MM-DD
    pub start_date: String,
    /// Inclusive end date, YYYY-MM-DD
    pub end_date: String,
    /// Only events played at this team's home park are kept.
    pub home_team: String,
    pub chart_title: String,
    pub csv_file: String,
    pub chart_file: String,
}

impl Default for PlayerStatsConfig {
    fn default() -> Self {
        PlayerStatsConfig {
            register_base_url: player_stats::REGISTER_BASE_URL.to_string(),
            register_files: default_register_files(),
            savant_base_url: player_stats::SAVANT_BASE_URL.to_string(),
            last_name: player_stats::LAST_NAME.to_string(),
            first_name: player_stats::FIRST_NAME.to_string(),
            start_date: player_stats::START_DATE.to_string(),
            end_date: player_stats::END_DATE.to_string(),
            home_team: player_stats::HOME_TEAM.to_string(),
            chart_title: player_stats::CHART_TITLE.to_string(),
            csv_file: player_stats::CSV_FILE.to_string(),
            chart_file: player_stats::CHART_FILE.to_string(),
        }
    }
}

/// `people-0.csv` through `people-f.csv`
fn default_register_files() -> Vec<String> {
    player_stats::REGISTER_SHARDS
        .chars()
        .map(|shard| format!("people-{shard}.csv"))
        .collect()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: get_default_output_dir(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            listings: ListingsConfig::default(),
            player_stats: PlayerStatsConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing config file yields the built-in defaults.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `PLAYGROUND_AUTH_STRING` - Override the listings API Basic credentials
    /// - `PLAYGROUND_OUTPUT_DIR` - Override output directory
    /// - `PLAYGROUND_LOG_FILE` - Override log file path
    /// - `PLAYGROUND_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Notes
    /// - Config file is stored in platform-specific config directory
    /// - Environment variables take precedence over config file
    /// - Validation is left to the caller so command line overrides can be applied first
    pub async fn load() -> Result<Self, AppError> {
        Self::load_or_default(&get_config_path()).await
    }

    /// Loads configuration from `path` when it exists, defaults otherwise,
    /// then applies environment overrides.
    pub async fn load_or_default(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            tracing::debug!("No config file at {path}, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific file, without env overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Override fields from `PLAYGROUND_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(auth_string) = std::env::var("PLAYGROUND_AUTH_STRING") {
            self.listings.auth_string = auth_string;
        }

        if let Ok(output_dir) = std::env::var("PLAYGROUND_OUTPUT_DIR") {
            self.output_dir = output_dir;
        }

        if let Ok(log_file_path) = std::env::var("PLAYGROUND_LOG_FILE") {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var("PLAYGROUND_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the settings both flows depend on.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_common(
            &self.output_dir,
            self.http_timeout_seconds,
            &self.log_file_path,
        )
    }

    /// Validates common settings plus the listings section.
    pub fn validate_for_listings(&self) -> Result<(), AppError> {
        self.validate()?;
        validate_listings(&self.listings)
    }

    /// Validates common settings plus the player stats section.
    pub fn validate_for_player_stats(&self) -> Result<(), AppError> {
        self.validate()?;
        validate_player_stats(&self.player_stats)
    }

    /// Saves configuration to a custom file path, creating the parent
    /// directory if needed.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        get_log_dir_path()
    }

    /// Displays the resolved configuration on stdout.
    /// The listings credentials are masked.
    pub fn display(&self, config_path: &str) {
        let masked_auth = if self.listings.auth_string.chars().count() > 4 {
            let prefix: String = self.listings.auth_string.chars().take(4).collect();
            format!("{prefix}…")
        } else {
            "****".to_string()
        };

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        if Path::new(config_path).exists() {
            println!("{config_path}");
        } else {
            println!("{config_path} (not found, using defaults)");
        }
        println!("────────────────────────────────────");
        println!("Output Directory:");
        println!("{}", self.output_dir);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", self.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &self.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{}/{}", get_log_dir_path(), constants::LOG_FILE_NAME);
            println!("(Default location)");
        }
        println!("────────────────────────────────────");
        println!("Listings:");
        println!("{} ({})", self.listings.api_base_url, masked_auth);
        println!(
            "{} {} in {}, {} m around {}",
            self.listings.operation,
            self.listings.property_type,
            self.listings.country,
            self.listings.distance,
            self.listings.center
        );
        println!("────────────────────────────────────");
        println!("Player Stats:");
        println!(
            "{} {}, {} to {}, home team {}",
            self.player_stats.first_name,
            self.player_stats.last_name,
            self.player_stats.start_date,
            self.player_stats.end_date,
            self.player_stats.home_team
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
output_dir = "/data/out"
log_file_path = "/custom/log/path"

[listings]
country = "pt"
operation = "sale"

[player_stats]
last_name = "witt"
first_name = "bobby"
"#;
        tokio::fs::write(&config_path, config_content).await.unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.output_dir, "/data/out");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.listings.country, "pt");
        assert_eq!(config.listings.operation, "sale");
        // Unset fields fall back to defaults
        assert_eq!(config.listings.property_type, "homes");
        assert_eq!(config.player_stats.last_name, "witt");
        assert_eq!(config.player_stats.home_team, "KC");
        assert_eq!(config.http_timeout_seconds, default_http_timeout());
    }

    #[tokio::test]
    async fn test_config_load_empty_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "").await.unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();

        assert_eq!(config.listings, ListingsConfig::default());
        assert_eq!(config.player_stats, PlayerStatsConfig::default());
        assert_eq!(config.log_file_path, None);
    }

    #[tokio::test]
    async fn test_config_save_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let config_dir = temp_dir.path().join("playground_datasets");
        let config_path = config_dir.join("config.toml");

        Config::default()
            .save_to_path(&config_path.to_string_lossy())
            .await
            .unwrap();

        assert!(config_dir.exists());
        assert!(config_path.exists());
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let mut original = Config::default();
        original.output_dir = "/data/out".to_string();
        original.listings.bank_offer = Some(false);
        original.player_stats.register_files = vec!["people-a.csv".to_string()];

        original.save_to_path(&config_path_str).await.unwrap();
        let loaded = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_config_without_log_file_path_serialization() {
        let toml_string = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!toml_string.contains("log_file_path"));
        assert!(!toml_string.contains("bank_offer"));
        assert!(toml_string.contains("[listings]"));
        assert!(toml_string.contains("[player_stats]"));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/nonexistent/path/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[tokio::test]
    async fn test_config_malformed_toml_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("malformed_config.toml");

        let malformed_content = r#"
output_dir = "/data/out"
[invalid_section
malformed = "data
"#;
        tokio::fs::write(&config_path, malformed_content)
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_load_or_default_missing_file() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let config = Config::load_or_default(&missing.to_string_lossy())
            .await
            .unwrap();

        assert_eq!(config.listings.token_url, listings::TOKEN_URL);
        assert_eq!(config.player_stats.register_files.len(), 16);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        unsafe {
            std::env::set_var("PLAYGROUND_AUTH_STRING", "dGVzdDpzZWNyZXQ=");
            std::env::set_var("PLAYGROUND_OUTPUT_DIR", "/tmp/datasets");
            std::env::set_var("PLAYGROUND_HTTP_TIMEOUT", "5");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var("PLAYGROUND_AUTH_STRING");
            std::env::remove_var("PLAYGROUND_OUTPUT_DIR");
            std::env::remove_var("PLAYGROUND_HTTP_TIMEOUT");
        }

        assert_eq!(config.listings.auth_string, "dGVzdDpzZWNyZXQ=");
        assert_eq!(config.output_dir, "/tmp/datasets");
        assert_eq!(config.http_timeout_seconds, 5);
    }

    #[test]
    #[serial]
    fn test_env_override_ignores_bad_timeout() {
        unsafe {
            std::env::set_var("PLAYGROUND_HTTP_TIMEOUT", "soon");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var("PLAYGROUND_HTTP_TIMEOUT");
        }

        assert_eq!(config.http_timeout_seconds, default_http_timeout());
    }

    #[test]
    fn test_output_stem() {
        let listings = ListingsConfig::default();
        let stem = listings.output_stem("/data/out");
        assert!(stem.ends_with("idealista-homes-rent"));
        assert!(stem.starts_with("/data/out"));
    }

    #[test]
    fn test_default_register_files() {
        let files = default_register_files();
        assert_eq!(files.first().map(String::as_str), Some("people-0.csv"));
        assert_eq!(files.last().map(String::as_str), Some("people-f.csv"));
    }
}
