use anyhow::Result;
use asana_statusbar::cli::{Cli, Command};
use asana_statusbar::config;
use asana_statusbar::integrations::asana::AsanaApi;
use asana_statusbar::setup::SetupWizard;
use asana_statusbar::statusbar::TerminalIndicator;
use clap::Parser;
use std::io::{self, IsTerminal};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the status line on stdout stays intact
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("asana_statusbar=info".parse()?),
        )
        .init();

    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Init { access_token } => {
            let api = AsanaApi::from_config(access_token, &config.api);
            let stdin = io::stdin();
            let mut wizard = SetupWizard::new(&api, stdin.lock(), io::stdout())
                .with_spinners(io::stderr().is_terminal());
            wizard.run().await?;
            Ok(())
        }
        Command::Run(args) => {
            let indicator = TerminalIndicator::stdout(config.display.max_width);
            let mut poller = args.into_poller(&config, indicator)?;
            poller.run().await
        }
    }
}
