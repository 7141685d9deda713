//! Poll-and-display loop.
//!
//! Each tick asks the task source for the current task name and writes it to
//! the status indicator. Ticks never overlap: a slow fetch pushes the next
//! tick back instead of queueing another one.

mod indicator;

pub use indicator::{StatusIndicator, TerminalIndicator};

use crate::config::DisplayConfig;
use crate::tasks::TaskSource;
use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Floor for the poll interval, whatever the config or caller asks for.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    /// Shown while a fetch is in flight.
    pub placeholder: String,
    /// Shown after a failed fetch until the next tick.
    pub error_label: String,
}

impl PollSettings {
    pub fn from_display(display: &DisplayConfig) -> Self {
        Self {
            interval: Duration::from_secs(display.interval_secs),
            placeholder: display.placeholder.clone(),
            error_label: display.error_label.clone(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The interval the loop actually uses.
    pub fn effective_interval(&self) -> Duration {
        self.interval.max(MIN_INTERVAL)
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from_display(&DisplayConfig::default())
    }
}

pub struct Poller<S, I> {
    source: S,
    indicator: I,
    settings: PollSettings,
}

impl<S: TaskSource, I: StatusIndicator> Poller<S, I> {
    pub fn new(source: S, indicator: I, settings: PollSettings) -> Self {
        Self {
            source,
            indicator,
            settings,
        }
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Fetch once and update the label.
    ///
    /// A rejected token is fatal. Any other failure is logged and shown as
    /// the error label; the next tick tries again.
    pub async fn tick(&mut self) -> Result<()> {
        self.indicator.set_label(&self.settings.placeholder)?;

        match self.source.current_task_name().await {
            Ok(name) => {
                tracing::debug!("Current task: {}", name);
                self.indicator.set_label(&name)?;
            }
            Err(e) if e.is_unauthorized() => {
                self.indicator.set_label(&self.settings.error_label)?;
                return Err(anyhow::Error::new(e).context("Stopped polling"));
            }
            Err(e) => {
                tracing::warn!("Failed to fetch current task: {}", e);
                self.indicator.set_label(&self.settings.error_label)?;
            }
        }

        Ok(())
    }

    /// Poll until Ctrl-C.
    pub async fn run(&mut self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Poll until `shutdown` resolves. The first tick fires immediately.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let period = self.settings.effective_interval();
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!("Polling every {}s", period.as_secs_f64());

        let result = loop {
            tokio::select! {
                _ = &mut shutdown => break Ok(()),
                _ = interval.tick() => {}
            }
            tokio::select! {
                _ = &mut shutdown => break Ok(()),
                res = self.tick() => {
                    if let Err(e) = res {
                        break Err(e);
                    }
                }
            }
        };

        self.indicator.clear()?;
        result
    }
}
