/// The poll loop: fetch, compare to the previous report, notify on change,
/// sleep, repeat.
///
/// The previous report lives across iterations, so an unchanged status is
/// reported at most once. Fetch and shape failures terminate the loop;
/// everything downstream of a well-formed response is contained per
/// iteration.
use chrono::Utc;
use tokio::time::sleep;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::message::{Homework, Report};
use crate::practicum::{PracticumClient, check_response};
use crate::status::parse_status;
use crate::telegram::Notifier;

pub struct Poller<N: Notifier> {
    client: PracticumClient,
    notifier: N,
    interval: std::time::Duration,
}

impl<N: Notifier> Poller<N> {
    pub fn new(config: &Config, client: PracticumClient, notifier: N) -> Self {
        Self {
            client,
            notifier,
            interval: config.settings.poll_interval,
        }
    }

    /// Runs until a fetch or validation failure bubbles up.
    pub async fn run(&self) -> Result<()> {
        let mut prev_report = Report::default();
        loop {
            self.poll_once(&mut prev_report).await?;
            sleep(self.interval).await;
        }
    }

    /// One iteration of the loop.
    ///
    /// Errors from fetching, shape validation and an empty homework list are
    /// returned to the caller. Failures while formatting or delivering the
    /// report are contained: turned into a diagnostic chat message and an
    /// error log, and the iteration still counts as completed.
    pub async fn poll_once(&self, prev_report: &mut Report) -> Result<()> {
        let timestamp = Utc::now().timestamp();

        let body = self.client.get_homeworks(Some(timestamp)).await?;
        let homeworks = check_response(&body)?;
        let first = homeworks.first().ok_or(Error::NoHomeworks)?;

        let current_report = Report::from_homework(first);
        if let Err(error) = self.relay_change(prev_report, current_report, first).await {
            let message = format!("Сбой в работе бота: {error}");
            tracing::error!("{}", message);
            if let Err(send_error) = self.notifier.notify(&message).await {
                tracing::error!("failed to deliver diagnostic message: {}", send_error);
            }
        }

        Ok(())
    }

    /// Sends a notification when the current report differs from the
    /// previous one; the previous report is updated only after delivery.
    async fn relay_change(
        &self,
        prev_report: &mut Report,
        current_report: Report,
        homework: &Homework,
    ) -> Result<()> {
        if *prev_report == current_report {
            tracing::debug!("status unchanged");
            return Ok(());
        }

        let message = parse_status(Some(homework))?;
        self.notifier.notify(&message).await?;
        *prev_report = current_report;
        Ok(())
    }
}
