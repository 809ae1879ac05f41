use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR_PREFIX: &str = "debit-strike";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_CREDENTIALS_FILE: &str = "credentials/credentials.json";
const DEFAULT_TOKEN_FILE: &str = "credentials/token.json";
const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com/v4";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub google: GoogleConfig,
    pub sheet: SheetConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GoogleConfig {
    /// OAuth client secret as downloaded from the Google Cloud console
    pub credentials_file: PathBuf,
    /// Where the access and refresh tokens are cached between runs
    pub token_file: PathBuf,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SheetConfig {
    pub spreadsheet_id: String,
    pub sheet_id: i32,
    pub api_base_url: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            sheet_id: 0,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl SheetConfig {
    pub fn batch_update_url(&self) -> Result<String> {
        if self.spreadsheet_id.is_empty() {
            return Err(AppError::Config(
                "spreadsheet_id must be set in config file or with --spreadsheet-id".to_string(),
            ));
        }

        Ok(format!(
            "{}/spreadsheets/{}:batchUpdate",
            self.api_base_url.trim_end_matches('/'),
            self.spreadsheet_id
        ))
    }
}

impl Config {
    /// Load the config from `path`, or from the XDG config directory when no
    /// path is given. A missing XDG config file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(AppError::Config(format!(
                    "Config file not found at {:?}",
                    path
                )));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::xdg_dirs().find_config_file(CONFIG_FILE_NAME),
        };

        let Some(config_path) = config_path else {
            debug!("No config file found, using defaults");
            return Ok(Config::default());
        };

        debug!(path = ?config_path, "Loading config");
        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Replace the spreadsheet id when one was given on the command line
    pub fn with_spreadsheet_id(mut self, spreadsheet_id: Option<&str>) -> Self {
        if let Some(id) = spreadsheet_id {
            self.sheet.spreadsheet_id = id.to_string();
        }
        self
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the config file path
    /// Path the config is read from: the `--config` path when given, otherwise
    /// the file in the XDG config directory.
    pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    pub fn config_file() -> Result<PathBuf> {
        let xdg_dirs = Self::xdg_dirs();
        xdg_dirs
            .place_config_file(CONFIG_FILE_NAME)
            .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))
    }
}
