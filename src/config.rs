use std::env;
use std::time::Duration;

/// Configuration for the homework status bot: credentials come from the
/// environment, operational settings from an optional TOML file.
use serde::Deserialize;

use crate::error::{Error, Result};

pub const ENV_PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Candidate settings files, tried in order.
const SETTINGS_CANDIDATES: [&str; 3] = ["./hwbot.toml", "./config/hwbot.toml", "/etc/hwbot.toml"];

fn parse_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(&s).map_err(serde::de::Error::custom)
}

/// Operational settings. Every field has a default, so a missing or partial
/// settings file degrades to the stock setup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "Settings::default_endpoint")]
    pub endpoint: String,

    #[serde(
        default = "Settings::default_poll_interval",
        deserialize_with = "parse_duration"
    )]
    pub poll_interval: Duration,
}

impl Settings {
    fn default_endpoint() -> String {
        "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
    }

    fn default_poll_interval() -> Duration {
        Duration::from_secs(600)
    }

    /// Loads settings from the first candidate file that reads and parses.
    pub fn load() -> Self {
        for path in &SETTINGS_CANDIDATES {
            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(_) => continue,
            };
            match toml::from_str::<Settings>(&content) {
                Ok(settings) => {
                    tracing::debug!("settings loaded from {}: {:?}", path, settings);
                    return settings;
                }
                Err(e) => {
                    tracing::warn!("failed to parse {}: {}", path, e);
                }
            }
        }

        tracing::warn!("no settings file found, using defaults");
        Settings::default()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            poll_interval: Self::default_poll_interval(),
        }
    }
}

/// Immutable runtime configuration, constructed once at startup and passed
/// into each component.
#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub settings: Settings,
}

impl Config {
    /// Reads the credential triple from the environment. Fails with
    /// `MissingEnv` naming the first absent variable.
    pub fn from_env(settings: Settings) -> Result<Self> {
        let practicum_token = env::var(ENV_PRACTICUM_TOKEN).unwrap_or_default();
        let telegram_token = env::var(ENV_TELEGRAM_TOKEN).unwrap_or_default();
        let telegram_chat_id = env::var(ENV_TELEGRAM_CHAT_ID).unwrap_or_default();

        if !check_tokens(&practicum_token, &telegram_token, &telegram_chat_id) {
            let missing = [
                (ENV_PRACTICUM_TOKEN, practicum_token.is_empty()),
                (ENV_TELEGRAM_TOKEN, telegram_token.is_empty()),
                (ENV_TELEGRAM_CHAT_ID, telegram_chat_id.is_empty()),
            ]
            .into_iter()
            .find_map(|(name, empty)| empty.then_some(name))
            .unwrap_or(ENV_PRACTICUM_TOKEN);
            return Err(Error::MissingEnv(missing));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            settings,
        })
    }
}

/// True when every required credential is present and non-empty.
pub fn check_tokens(practicum_token: &str, telegram_token: &str, telegram_chat_id: &str) -> bool {
    !practicum_token.is_empty() && !telegram_token.is_empty() && !telegram_chat_id.is_empty()
}
