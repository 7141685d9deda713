//! Interactive discovery of the id to pass to `run`.
//!
//! A fixed sequence of numbered choices: workspace, filter type, then the
//! tag, project or section. Input and output are generic so the flow can be
//! driven by a script.

use crate::data::{FilterKind, Resource, User};
use crate::error::ApiError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::{BufRead, Write};
use std::time::Duration;

pub const TOKEN_HELP_URL: &str = "https://asana.com/guide/help/api/api";

/// Read-only lookups the setup flow needs.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn me(&self) -> Result<User, ApiError>;
    async fn workspaces(&self) -> Result<Vec<Resource>, ApiError>;
    async fn tags(&self, workspace_gid: &str) -> Result<Vec<Resource>, ApiError>;
    async fn projects(&self, workspace_gid: &str) -> Result<Vec<Resource>, ApiError>;
    async fn sections(&self, project_gid: &str) -> Result<Vec<Resource>, ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    pub kind: FilterKind,
    pub gid: String,
}

impl SetupOutcome {
    pub fn run_hint(&self) -> String {
        format!("Use run command with \"{} {}\"", self.kind.flag(), self.gid)
    }
}

const FILTER_TYPE_PROMPT: &str = "You can use only one type of fetching tasks:\n\
    1. Show in status bar last task filtered by tag\n\
    2. Show in status bar last task filtered by project\n\
    3. Show in status bar last task filtered by column of board (so-called section)\n\
    Your choice";

pub struct SetupWizard<'a, D, R, W> {
    api: &'a D,
    input: R,
    output: W,
    spinners: bool,
}

impl<'a, D: Directory, R: BufRead, W: Write> SetupWizard<'a, D, R, W> {
    pub fn new(api: &'a D, input: R, output: W) -> Self {
        Self {
            api,
            input,
            output,
            spinners: false,
        }
    }

    /// Show a spinner on stderr while requests are in flight.
    pub fn with_spinners(mut self, enabled: bool) -> Self {
        self.spinners = enabled;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Walk through the choices. `None` means the flow stopped early and the
    /// reason was already printed.
    pub async fn run(&mut self) -> Result<Option<SetupOutcome>> {
        self.say("Starting validation of access_token...")?;
        let user = match self.with_spinner(self.api.me()).await {
            Ok(user) => user,
            Err(e) if e.is_unauthorized() => {
                let msg = format!(
                    "Token is invalid. Please check your token and read the official documentation: {}",
                    TOKEN_HELP_URL
                );
                writeln!(self.output, "{}", msg.red())?;
                return Ok(None);
            }
            Err(e) => return Err(e).context("Failed to validate access token"),
        };
        self.say(&format!("Hello, {}", user.name))?;

        self.say("Fetching workspaces...")?;
        let workspaces = self
            .with_spinner(self.api.workspaces())
            .await
            .context("Failed to fetch workspaces")?;
        let Some(workspace) = self.choose("workspace", &workspaces)? else {
            return Ok(None);
        };
        self.say(&format!(
            "Selected workspace {} ({})",
            workspace.name, workspace.gid
        ))?;

        let kind = match self.ask_number(FILTER_TYPE_PROMPT, 3)? {
            1 => FilterKind::Tag,
            2 => FilterKind::Project,
            _ => FilterKind::Section,
        };

        let chosen = match kind {
            FilterKind::Tag => {
                self.say("Fetching tags...")?;
                let tags = self
                    .with_spinner(self.api.tags(&workspace.gid))
                    .await
                    .context("Failed to fetch tags")?;
                self.choose("tag", &tags)?.cloned()
            }
            FilterKind::Project | FilterKind::Section => {
                self.say("Fetching projects...")?;
                let projects = self
                    .with_spinner(self.api.projects(&workspace.gid))
                    .await
                    .context("Failed to fetch projects")?;
                let Some(project) = self.choose("project", &projects)?.cloned() else {
                    return Ok(None);
                };

                if kind == FilterKind::Project {
                    Some(project)
                } else {
                    self.say("Fetching sections...")?;
                    let sections = self
                        .with_spinner(self.api.sections(&project.gid))
                        .await
                        .context("Failed to fetch sections")?;
                    self.choose("column of board (section)", &sections)?.cloned()
                }
            }
        };

        let Some(chosen) = chosen else {
            return Ok(None);
        };

        let outcome = SetupOutcome {
            kind,
            gid: chosen.gid,
        };
        writeln!(self.output, "{}", outcome.run_hint().green())?;
        Ok(Some(outcome))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// List `items` numbered from 1 and read a choice.
    fn choose<'r>(&mut self, what: &str, items: &'r [Resource]) -> Result<Option<&'r Resource>> {
        if items.is_empty() {
            self.say(&format!("No {} available, nothing to choose from.", what))?;
            return Ok(None);
        }

        self.say(&format!("Please choose {}", what))?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "{}: {} ({})", i + 1, item.name, item.gid)?;
        }
        let index = self.ask_number("Your choice", items.len())?;
        Ok(items.get(index - 1))
    }

    /// Prompt until a number in `1..=max` is entered.
    fn ask_number(&mut self, prompt: &str, max: usize) -> Result<usize> {
        loop {
            write!(self.output, "{}: ", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                anyhow::bail!("Input ended before a choice was made");
            }

            let answer = line.trim();
            match answer.parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Ok(n),
                Ok(_) => writeln!(self.output, "Error: {} is not in the range 1-{}.", answer, max)?,
                Err(_) => writeln!(self.output, "Error: '{}' is not a valid integer.", answer)?,
            }
        }
    }

    async fn with_spinner<T>(&self, fut: impl Future<Output = T>) -> T {
        let spinner = if self.spinners {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner}") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };

        let result = fut.await;
        spinner.finish_and_clear();
        result
    }
}
