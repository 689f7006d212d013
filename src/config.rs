use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub app: AppConfig,
    pub sheets: SheetsConfig,
    pub schedule: ScheduleConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

fn default_title() -> String {
    "Mt. Baker Training Plan 2026".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetsConfig {
    /// Spreadsheet id from the sheet URL.
    #[serde(default)]
    pub spreadsheet_id: String,
    /// Service-account JSON key file.
    #[serde(default)]
    pub credentials_path: String,
    pub calendar_worksheet: String,
    pub catalog_worksheet: String,
    pub api_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
    /// Names used in the `{User} Completed` / `{User} Comment` columns.
    pub users: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_days: u64,
    /// Emails allowed past the login screen.
    #[serde(default)]
    pub authorized_users: Vec<String>,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    pub redirect_url: String,
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TRAILHEAD__AUTH__JWT_SECRET, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("sheets.calendar_worksheet", "Schedule_streamlit")?
            .set_default("sheets.catalog_worksheet", "Workouts")?
            .set_default(
                "sheets.api_base_url",
                trailhead_schedule::gateway::DEFAULT_API_BASE_URL,
            )?
            .set_default("schedule.users", vec!["Lori", "Jonathan", "Miriam"])?
            .set_default("auth.jwt_expiration_days", 7)?
            .set_default("auth.redirect_url", "http://localhost:3000/auth/callback")?
            .set_default(
                "auth.authorize_url",
                "https://accounts.google.com/o/oauth2/v2/auth",
            )?
            .set_default("auth.token_url", "https://oauth2.googleapis.com/token")?
            .set_default(
                "auth.userinfo_url",
                "https://openidconnect.googleapis.com/v1/userinfo",
            )?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("TRAILHEAD")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("auth.authorized_users")
                .with_list_parse_key("schedule.users")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.auth.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.schedule.users.is_empty() {
            return Err("At least one schedule user is required".to_string());
        }
        if self.auth.authorized_users.is_empty() {
            return Err("auth.authorized_users must list at least one email".to_string());
        }
        if self.sheets.spreadsheet_id.is_empty() {
            return Err("sheets.spreadsheet_id is required".to_string());
        }
        if self.sheets.credentials_path.is_empty() {
            return Err("sheets.credentials_path is required".to_string());
        }
        Ok(())
    }
}
