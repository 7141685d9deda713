use crate::config::Config;
use crate::data::TaskFilter;
use crate::integrations::asana::AsanaApi;
use crate::statusbar::{PollSettings, Poller, StatusIndicator};
use crate::tasks::TaskFilterClient;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "asana-statusbar")]
#[command(about = "Displays your current Asana task in an always-visible status line")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the project, section or tag id to use with `run`.
    ///
    /// Get a personal access token first: https://asana.com/guide/help/api/api
    Init {
        /// Asana personal access token
        access_token: String,
    },

    /// Show the first task of a project, section or tag and keep it fresh.
    ///
    /// Exactly one of --section-id, --tag-id or --project-id must be set.
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Asana personal access token
    pub access_token: String,

    /// Show tasks from this column of a board
    #[arg(long)]
    pub section_id: Option<String>,

    /// Show tasks with this tag
    #[arg(long)]
    pub tag_id: Option<String>,

    /// Show tasks from this project
    #[arg(long)]
    pub project_id: Option<String>,

    /// Seconds between refreshes [default: 60]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

impl RunArgs {
    pub fn filter(&self) -> Result<TaskFilter> {
        let filter = TaskFilter::from_ids(
            self.project_id.as_deref(),
            self.section_id.as_deref(),
            self.tag_id.as_deref(),
        )?;
        Ok(filter)
    }

    /// Poll settings from the config file, with `--interval` taking priority.
    pub fn poll_settings(&self, config: &Config) -> PollSettings {
        let settings = PollSettings::from_display(&config.display);
        match self.interval {
            Some(secs) => settings.with_interval(Duration::from_secs(secs)),
            None => settings,
        }
    }

    /// Wire the Asana client, the filter and the indicator into a poller.
    pub fn into_poller<I: StatusIndicator>(
        &self,
        config: &Config,
        indicator: I,
    ) -> Result<Poller<TaskFilterClient<AsanaApi>, I>> {
        let filter = self.filter()?;
        tracing::info!("Showing first task of {}", filter);

        let api = AsanaApi::from_config(&self.access_token, &config.api);
        let client = TaskFilterClient::new(api, filter);
        Ok(Poller::new(client, indicator, self.poll_settings(config)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn test_parse_run_with_tag() {
        let cli = parse(&["asana-statusbar", "run", "tok", "--tag-id", "T1", "--interval", "1"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.access_token, "tok");
        assert_eq!(args.filter().unwrap(), TaskFilter::ByTag("T1".to_string()));
        assert_eq!(
            args.poll_settings(&Config::default()).interval,
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_interval_defaults_to_config() {
        let cli = parse(&["asana-statusbar", "run", "tok", "--project-id", "P"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(
            args.poll_settings(&Config::default()).interval,
            Duration::from_secs(60)
        );

        let mut config = Config::default();
        config.display.interval_secs = 5;
        assert_eq!(args.poll_settings(&config).interval, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(parse(&["asana-statusbar", "run", "tok", "--tag-id", "T", "--interval", "0"]).is_err());
    }

    #[test]
    fn test_run_without_filter_fails_to_build() {
        let cli = parse(&["asana-statusbar", "run", "tok"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.filter().is_err());
    }

    #[test]
    fn test_parse_init() {
        let cli = parse(&["asana-statusbar", "init", "tok"]).unwrap();
        assert!(matches!(cli.command, Command::Init { ref access_token } if access_token == "tok"));
    }
}
