use std::{str::FromStr, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};

use crate::domain::models::Locale;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub activity_log: ActivityLogSettings,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Dashboard origin allowed by CORS.
    pub app_url: String,
    /// Language of status labels in responses and activity log details.
    #[serde(default = "default_locale")]
    pub locale: Locale,
}

fn default_locale() -> Locale {
    Locale::En
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ActivityLogSettings {
    /// Rolling window shown on the dashboard.
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub window_hours: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub retention_days: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub purge_interval_secs: u64,
}

impl ActivityLogSettings {
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.window_hours == 0 {
            return Err(config::ConfigError::Message(
                "activity_log.window_hours must be at least 1".into(),
            ));
        }
        if self.purge_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "activity_log.purge_interval_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no current directory: {e}")))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("invalid APP_ENVIRONMENT: {e}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("CENTRAL")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;
    settings.activity_log.validate()?;

    Ok(settings)
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
