use chrono::{FixedOffset, Offset, Utc};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError, ValidationErrors};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BASE_PATH: &str = "/transporter";
const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:8081";
const DEFAULT_SEARCH_PATH: &str = "collection_officer,market_place,agro_world_admin,public";
const DEFAULT_COMPLAIN_APP: &str = "Transport";
const CONFIG_DIR: &str = "config";
const DEV_DEFAULT_JWT_SECRET: &str = "transporter_development_secret_key_not_for_production_use";

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Database connection URL
    pub database_url: String,

    /// Postgres `search_path` applied to every pooled connection.
    /// The driver tables span several schemas; unset for SQLite.
    #[serde(default)]
    pub db_search_path: Option<String>,

    /// JWT signing secret
    #[validate(length(min = 32), custom = "validate_jwt_secret")]
    pub jwt_secret: String,

    /// Token lifetime in seconds (5min - 24h)
    #[serde(default = "default_jwt_expiration")]
    #[validate(range(min = 300, max = 86400))]
    pub jwt_expiration_secs: u64,

    /// bcrypt work factor for new password hashes
    #[serde(default = "default_bcrypt_cost")]
    #[validate(range(min = 4, max = 31))]
    pub bcrypt_cost: u32,

    /// Server host address
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Application environment
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Whether to run database migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,

    /// Prefix every route is mounted under
    #[serde(default = "default_base_path")]
    #[validate(custom = "validate_base_path")]
    pub base_path: String,

    /// CORS: comma-separated list of allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Option<String>,

    /// CORS: allow credentials
    #[serde(default = "default_true_bool")]
    pub cors_allow_credentials: bool,

    /// DB pool: max connections
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// DB pool: min connections
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,

    /// DB timeouts (seconds)
    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,
    #[serde(default = "default_db_idle_timeout_secs")]
    pub db_idle_timeout_secs: u64,
    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    /// Hours a driver has to hand over an assigned order
    #[serde(default = "default_hand_over_window_hours")]
    #[validate(range(min = 1, max = 168))]
    pub hand_over_window_hours: i64,

    /// Offset of the business day from UTC, used for "today" and complaint ref dates
    #[serde(default = "default_business_utc_offset_minutes")]
    pub business_utc_offset_minutes: i32,

    /// System application whose complaint categories drivers may pick from
    #[serde(default = "default_complain_app_name")]
    #[validate(length(min = 1))]
    pub complain_app_name: String,
}

impl AppConfig {
    /// Creates a configuration with defaults for everything but the essentials
    pub fn new(database_url: String, jwt_secret: String, environment: String) -> Self {
        Self {
            database_url,
            db_search_path: None,
            jwt_secret,
            jwt_expiration_secs: default_jwt_expiration(),
            bcrypt_cost: default_bcrypt_cost(),
            host: "0.0.0.0".to_string(),
            port: default_port(),
            environment,
            log_level: default_log_level(),
            log_json: false,
            auto_migrate: false,
            base_path: default_base_path(),
            cors_allowed_origins: default_cors_origins(),
            cors_allow_credentials: true,
            db_max_connections: default_db_max_connections(),
            db_min_connections: default_db_min_connections(),
            db_connect_timeout_secs: default_db_connect_timeout_secs(),
            db_idle_timeout_secs: default_db_idle_timeout_secs(),
            db_acquire_timeout_secs: default_db_acquire_timeout_secs(),
            max_body_size: default_max_body_size(),
            hand_over_window_hours: default_hand_over_window_hours(),
            business_utc_offset_minutes: default_business_utc_offset_minutes(),
            complain_app_name: default_complain_app_name(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Effective Postgres search_path; the multi-schema default applies to Postgres URLs only
    pub fn search_path(&self) -> Option<String> {
        match &self.db_search_path {
            Some(path) if !path.trim().is_empty() => Some(path.trim().to_string()),
            Some(_) => None,
            None if self.database_url.starts_with("postgres") => {
                Some(DEFAULT_SEARCH_PATH.to_string())
            }
            None => None,
        }
    }

    /// Gets log level reference
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Parsed CORS origins, empty entries dropped
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Timezone in which business days start and end
    pub fn business_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.business_utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    fn validate_additional_constraints(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !self.is_development() && self.jwt_secret.trim() == DEV_DEFAULT_JWT_SECRET {
            let mut err = ValidationError::new("jwt_secret_default_dev");
            err.message = Some(
                "The bundled development JWT secret must not be used outside development. Set APP__JWT_SECRET."
                    .into(),
            );
            errors.add("jwt_secret", err);
        }

        if self.is_production() && self.cors_origins().is_empty() {
            let mut err = ValidationError::new("cors_allowed_origins_required");
            err.message = Some("Set APP__CORS_ALLOWED_ORIGINS in production".into());
            errors.add("cors_allowed_origins", err);
        }

        if !(-720..=840).contains(&self.business_utc_offset_minutes) {
            let mut err = ValidationError::new("business_utc_offset_minutes");
            err.message = Some("UTC offset must be between -720 and 840 minutes".into());
            errors.add("business_utc_offset_minutes", err);
        }

        if self.db_min_connections > self.db_max_connections {
            let mut err = ValidationError::new("db_pool_bounds");
            err.message = Some("db_min_connections cannot exceed db_max_connections".into());
            errors.add("db_min_connections", err);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_jwt_expiration() -> u64 {
    8 * 60 * 60
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

fn default_cors_origins() -> Option<String> {
    Some(DEFAULT_CLIENT_ORIGIN.to_string())
}

fn default_true_bool() -> bool {
    true
}

fn default_db_max_connections() -> u32 {
    10
}
fn default_db_min_connections() -> u32 {
    1
}
fn default_db_connect_timeout_secs() -> u64 {
    30
}
fn default_db_idle_timeout_secs() -> u64 {
    600
}
fn default_db_acquire_timeout_secs() -> u64 {
    8
}

fn default_max_body_size() -> usize {
    10 * 1024 * 1024
}

fn default_hand_over_window_hours() -> i64 {
    24
}

fn default_business_utc_offset_minutes() -> i32 {
    330
}

fn default_complain_app_name() -> String {
    DEFAULT_COMPLAIN_APP.to_string()
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

fn validate_base_path(path: &str) -> Result<(), ValidationError> {
    if path.starts_with('/') && !path.ends_with('/') {
        Ok(())
    } else {
        let mut err = ValidationError::new("base_path");
        err.message = Some("base_path must start with '/' and must not end with '/'".into());
        Err(err)
    }
}

fn validate_jwt_secret(secret: &str) -> Result<(), ValidationError> {
    let trimmed = secret.trim();

    const DISALLOWED: [&str; 3] = ["your-secret-key", "default-secret-key", "changeme"];
    if DISALLOWED
        .iter()
        .any(|&bad| trimmed.eq_ignore_ascii_case(bad))
    {
        let mut err = ValidationError::new("jwt_secret");
        err.message = Some("JWT secret must be overridden with a secure random value".into());
        return Err(err);
    }

    if let Some(first) = trimmed.chars().next() {
        if trimmed.chars().all(|c| c == first) {
            let mut err = ValidationError::new("jwt_secret");
            err.message = Some("JWT secret cannot be a repeated character sequence".into());
            return Err(err);
        }
    }

    Ok(())
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("transporter_api={},tower_http=debug", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .json()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config (config/default.toml)
/// 3. Environment-specific config (config/{env}.toml)
/// 4. Environment variables (APP__*)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    load_config_from(Path::new(CONFIG_DIR))
}

/// Same as [`load_config`] with an explicit config directory
pub fn load_config_from(dir: &Path) -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !dir.exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            dir.display()
        );
    }

    // jwt_secret has no default and must come from a file or APP__JWT_SECRET
    let config = Config::builder()
        .set_default("database_url", "sqlite://transporter.db?mode=rwc")?
        .set_default("host", "0.0.0.0")?
        .set_default("port", DEFAULT_PORT as i64)?
        .set_default("environment", run_env.as_str())?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::from(dir.join("default")).required(false))
        .add_source(File::from(dir.join(&run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    if config.get_string("jwt_secret").is_err() {
        error!("JWT secret is not configured. Set APP__JWT_SECRET to a random string of at least 32 characters.");
        return Err(AppConfigError::Load(ConfigError::NotFound(
            "jwt_secret is required but not configured. Set APP__JWT_SECRET environment variable."
                .into(),
        )));
    }

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    app_config.validate_additional_constraints().map_err(|e| {
        error!("Configuration security validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig::new(
            "sqlite::memory:".into(),
            "a_reasonably_long_test_secret_for_transporter_tokens".into(),
            "production".into(),
        )
    }

    #[test]
    fn defaults_match_service_contract() {
        let cfg = base_config();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.jwt_expiration_secs, 28_800);
        assert_eq!(cfg.bcrypt_cost, 10);
        assert_eq!(cfg.base_path, "/transporter");
        assert_eq!(cfg.cors_origins(), vec!["http://localhost:8081".to_string()]);
        assert!(cfg.validate().is_ok());
        assert!(cfg.validate_additional_constraints().is_ok());
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let mut cfg = base_config();
        cfg.jwt_secret = "short".into();
        let errors = cfg.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("jwt_secret"));
    }

    #[test]
    fn repeated_character_secret_is_rejected() {
        let mut cfg = base_config();
        cfg.jwt_secret = "x".repeat(48);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bcrypt_cost_out_of_range_is_rejected() {
        let mut cfg = base_config();
        cfg.bcrypt_cost = 3;
        let errors = cfg.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("bcrypt_cost"));
    }

    #[test]
    fn base_path_must_be_absolute() {
        let mut cfg = base_config();
        cfg.base_path = "transporter/".into();
        let errors = cfg.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("base_path"));
    }

    #[test]
    fn dev_secret_is_rejected_outside_development() {
        let mut cfg = base_config();
        cfg.jwt_secret = DEV_DEFAULT_JWT_SECRET.into();
        assert!(cfg.validate_additional_constraints().is_err());

        cfg.environment = "development".into();
        assert!(cfg.validate_additional_constraints().is_ok());
    }

    #[test]
    fn production_requires_cors_origins() {
        let mut cfg = base_config();
        cfg.cors_allowed_origins = Some(" , ".into());
        assert!(cfg.validate_additional_constraints().is_err());
    }

    #[test]
    fn utc_offset_out_of_range_is_rejected() {
        let mut cfg = base_config();
        cfg.business_utc_offset_minutes = 900;
        assert!(cfg.validate_additional_constraints().is_err());
    }

    #[test]
    fn search_path_defaults_only_for_postgres() {
        let mut cfg = base_config();
        assert_eq!(cfg.search_path(), None);

        cfg.database_url = "postgres://localhost/transport".into();
        assert_eq!(cfg.search_path().as_deref(), Some(DEFAULT_SEARCH_PATH));

        cfg.db_search_path = Some("collection_officer".into());
        assert_eq!(cfg.search_path().as_deref(), Some("collection_officer"));
    }

    #[test]
    fn business_offset_follows_minutes() {
        let cfg = base_config();
        assert_eq!(cfg.business_offset().local_minus_utc(), 330 * 60);
    }

    fn config_dir(default_toml: &str) -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("default.toml"), default_toml).expect("write default.toml");
        dir
    }

    #[test]
    fn loads_values_from_config_dir() {
        let dir = config_dir(
            r#"
            jwt_secret = "loaded_from_file_secret_value_for_tests_only"
            environment = "development"
            port = 4100
            base_path = "/drivers"
            hand_over_window_hours = 12
            "#,
        );

        let cfg = load_config_from(dir.path()).expect("config should load");
        assert_eq!(cfg.port, 4100);
        assert_eq!(cfg.base_path, "/drivers");
        assert_eq!(cfg.hand_over_window_hours, 12);
        assert_eq!(cfg.complain_app_name, DEFAULT_COMPLAIN_APP);
    }

    #[test]
    fn unknown_keys_fail_to_load() {
        let dir = config_dir(
            r#"
            jwt_secret = "loaded_from_file_secret_value_for_tests_only"
            queue_url = "amqp://localhost"
            "#,
        );

        assert!(matches!(
            load_config_from(dir.path()),
            Err(AppConfigError::Load(_))
        ));
    }
}
