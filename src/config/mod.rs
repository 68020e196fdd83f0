use crate::core::calendar::current_working_month;
use crate::errors::{AppError, AppResult};
use crate::models::month::YearMonth;
use crate::utils::date;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment override for the configuration directory (tests, CI).
pub const HOME_ENV: &str = "RPLANNER_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_projects_table")]
    pub projects_table: String,
    #[serde(default = "default_activities_table")]
    pub activities_table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_past_months")]
    pub past_months: u32,
    #[serde(default = "default_future_months")]
    pub future_months: u32,
    #[serde(default = "default_horizon_months")]
    pub horizon_months: u32,
    /// First tracked month (YYYY-MM). Fixed so the full column set only grows.
    #[serde(default = "default_calendar_start")]
    pub calendar_start: String,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080/tables".to_string()
}
fn default_projects_table() -> String {
    "Projects".to_string()
}
fn default_activities_table() -> String {
    "Activities".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_attempts() -> u32 {
    3
}
fn default_retry_delay_ms() -> u64 {
    1000
}
fn default_settle_ms() -> u64 {
    500
}
fn default_cache_ttl_secs() -> u64 {
    30
}
fn default_past_months() -> u32 {
    4
}
fn default_future_months() -> u32 {
    1
}
fn default_horizon_months() -> u32 {
    1
}
fn default_calendar_start() -> String {
    "2025-01".to_string()
}

/// Keys every complete configuration file carries.
const KNOWN_KEYS: [&str; 12] = [
    "endpoint",
    "projects_table",
    "activities_table",
    "timeout_secs",
    "max_attempts",
    "retry_delay_ms",
    "settle_ms",
    "cache_ttl_secs",
    "past_months",
    "future_months",
    "horizon_months",
    "calendar_start",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            projects_table: default_projects_table(),
            activities_table: default_activities_table(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            settle_ms: default_settle_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            past_months: default_past_months(),
            future_months: default_future_months(),
            horizon_months: default_horizon_months(),
            calendar_start: default_calendar_start(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(HOME_ENV) {
            return PathBuf::from(custom);
        }
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rplanner")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rplanner")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rplanner.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write the default configuration file. Never overwrites an existing one.
    pub fn init() -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let path = Self::config_file();
        if !path.exists() {
            let mut cfg = Self::default();
            // a year of history; fixed from now on so columns only accumulate
            cfg.calendar_start = current_working_month(date::today()).add_months(-12).to_string();
            let yaml = serde_yaml::to_string(&cfg)?;
            fs::write(&path, yaml)?;
        }
        Ok(path)
    }

    /// Keys absent from the on-disk file (their defaults are in effect).
    pub fn check() -> AppResult<Vec<&'static str>> {
        let path = Self::config_file();
        if !path.exists() {
            return Err(AppError::Config(format!(
                "configuration file {} not found, run `rplanner init`",
                path.display()
            )));
        }

        let content = fs::read_to_string(&path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let map = value.as_mapping().ok_or(AppError::ConfigLoad)?;

        Ok(KNOWN_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(serde_yaml::Value::String((*k).to_string())))
            .collect())
    }

    fn validate(&self) -> AppResult<()> {
        if self.max_attempts == 0 {
            return Err(AppError::Config("max_attempts must be at least 1".into()));
        }
        self.calendar_start()?;
        Ok(())
    }

    pub fn calendar_start(&self) -> AppResult<YearMonth> {
        YearMonth::parse(&self.calendar_start)
            .ok_or_else(|| AppError::Config(format!("invalid calendar_start '{}'", self.calendar_start)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
