use std::fmt;

use crate::error::WatchError;

/// Default OneSignal notifications endpoint.
pub const DEFAULT_ONESIGNAL_API_URL: &str = "https://onesignal.com/api/v1/notifications";

/// Connection settings for the PostgreSQL data store.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub name: String,
}

/// Credentials and endpoint for the OneSignal push API.
#[derive(Clone)]
pub struct OneSignalConfig {
    /// Application whose subscribers receive the broadcast
    pub app_id: String,

    /// REST API key sent in the `Authorization` header
    pub api_key: String,

    /// Notifications endpoint (overridable for staging and tests)
    pub api_url: String,
}

/// Global worker configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,

    pub onesignal: OneSignalConfig,

    /// Seconds between dispatch cycles (default: 10)
    pub poll_interval_secs: u64,

    /// Rows with `odds` strictly below this value qualify (default: 20)
    pub odds_threshold: f64,
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, WatchError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| WatchError::Config(format!("{key} environment variable is required")))
        };

        let poll_interval_secs: u64 = parse_or(&lookup, "POLL_INTERVAL_SECS", 10)?;
        if poll_interval_secs == 0 {
            return Err(WatchError::Config(
                "POLL_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            database: DatabaseConfig {
                host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or(&lookup, "DB_PORT", 5432)?,
                user: required("DB_USER")?,
                password: lookup("DB_PASSWORD"),
                name: required("DB_NAME")?,
            },
            onesignal: OneSignalConfig {
                app_id: required("ONE_SIGNAL_APP_ID")?,
                api_key: required("ONE_SIGNAL_API_KEY")?,
                api_url: lookup("ONE_SIGNAL_API_URL")
                    .unwrap_or_else(|| DEFAULT_ONESIGNAL_API_URL.to_string()),
            },
            poll_interval_secs,
            odds_threshold: parse_or(&lookup, "SIGNAL_ODDS_THRESHOLD", 20.0)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, WatchError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            WatchError::Config(format!(
                "{key} must be a valid {}",
                std::any::type_name::<T>()
            ))
        }),
        None => Ok(default),
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Debug for OneSignalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneSignalConfig")
            .field("app_id", &self.app_id)
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database", &self.database)
            .field("onesignal", &self.onesignal)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("odds_threshold", &self.odds_threshold)
            .finish()
    }
}
