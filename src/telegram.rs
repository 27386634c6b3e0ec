/// Telegram delivery for status notifications.
///
/// Talks to the Bot API directly over the shared HTTP client; the bot only
/// ever calls `sendMessage` against one fixed chat.
/// Docs: <https://core.telegram.org/bots/api>
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Outbound message seam used by the poll loop.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<()>;
}

/// Reply envelope of the Bot API.
#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
}

/// Bot API client bound to a single destination chat.
pub struct TelegramBot {
    http: reqwest::Client,
    base_url: String,
    chat_id: String,
}

impl TelegramBot {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config, TELEGRAM_API_BASE)
    }

    fn with_base_url(config: &Config, base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/bot{}", base, config.telegram_token),
            chat_id: config.telegram_chat_id.clone(),
        }
    }

    /// Delivers `text` to the configured chat.
    ///
    /// A credentials rejection (HTTP 401 or Bot API `error_code` 401) maps to
    /// `TelegramAuth` with the API description embedded; any other fault maps
    /// to `TelegramSend`.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        tracing::info!("sending telegram message");

        let response = self
            .http
            .post(format!("{}/sendMessage", self.base_url))
            .json(&serde_json::json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await
            .map_err(|e| Error::TelegramSend(e.to_string()))?;

        let status = response.status();
        let reply: ApiReply = response
            .json()
            .await
            .map_err(|e| Error::TelegramSend(e.to_string()))?;

        if reply.ok {
            tracing::info!("telegram message delivered");
            return Ok(());
        }

        let description = reply
            .description
            .unwrap_or_else(|| format!("sendMessage failed with {}", status));
        if status == StatusCode::UNAUTHORIZED || reply.error_code == Some(401) {
            return Err(Error::TelegramAuth(description));
        }
        Err(Error::TelegramSend(description))
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn notify(&self, text: &str) -> Result<()> {
        self.send_message(text).await
    }
}
