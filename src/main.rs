/// Homework status bot.
///
/// Polls the homework-review API on a fixed interval and relays status
/// changes to a Telegram chat. Startup: load `.env`, initialize logging,
/// validate the credential triple, then hand off to the poll loop.
mod config;
mod error;
mod logger;
mod message;
mod poller;
mod practicum;
mod status;
mod telegram;

use anyhow::Context;
use tracing::{error, info};

use config::{Config, Settings};
use poller::Poller;
use practicum::PracticumClient;
use telegram::TelegramBot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _guard = logger::init();

    let settings = Settings::load();
    let config = match Config::from_env(settings) {
        Ok(config) => config,
        Err(e) => {
            error!("bot startup aborted: {}", e);
            return Err(e.into());
        }
    };

    info!("starting homework status bot");
    let client = PracticumClient::new(&config);
    let bot = TelegramBot::new(&config);

    let poller = Poller::new(&config, client, bot);
    poller.run().await.context("poll loop terminated")
}
