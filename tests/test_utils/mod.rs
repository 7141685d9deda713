//! Test utilities and fixtures for asana-statusbar tests
#![allow(dead_code)]

use asana_statusbar::data::{Resource, User};
use asana_statusbar::error::ApiError;
use asana_statusbar::setup::Directory;
use asana_statusbar::statusbar::StatusIndicator;
use asana_statusbar::tasks::TaskSource;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub fn resource(gid: &str, name: &str) -> Resource {
    Resource {
        gid: gid.to_string(),
        name: name.to_string(),
    }
}

/// Asana `{"data": [...]}` body for a list of `(gid, name)` pairs.
pub fn data_list(items: &[(&str, &str)]) -> Value {
    let data: Vec<Value> = items
        .iter()
        .map(|(gid, name)| json!({ "gid": gid, "name": name }))
        .collect();
    json!({ "data": data })
}

/// Indicator that records every label written to it. Clones share the log.
#[derive(Clone, Default)]
pub struct RecordingIndicator {
    labels: Arc<Mutex<Vec<String>>>,
    cleared: Arc<Mutex<bool>>,
}

impl RecordingIndicator {
    pub fn labels(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }

    /// What the status indicator currently shows.
    pub fn current(&self) -> Option<String> {
        self.labels.lock().unwrap().last().cloned()
    }

    pub fn was_cleared(&self) -> bool {
        *self.cleared.lock().unwrap()
    }
}

impl StatusIndicator for RecordingIndicator {
    fn set_label(&mut self, label: &str) -> anyhow::Result<()> {
        self.labels.lock().unwrap().push(label.to_string());
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        *self.cleared.lock().unwrap() = true;
        Ok(())
    }
}

/// Task source returning scripted results in order, then repeating the last.
pub struct ScriptedSource {
    results: Mutex<VecDeque<Result<String, ApiError>>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedSource {
    pub fn names(names: &[&str]) -> Self {
        Self::new(names.iter().map(|n| Ok(n.to_string())).collect())
    }

    pub fn new(results: Vec<Result<String, ApiError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl TaskSource for ScriptedSource {
    async fn current_task_name(&self) -> Result<String, ApiError> {
        *self.calls.lock().unwrap() += 1;
        let mut results = self.results.lock().unwrap();
        match results.pop_front() {
            Some(Ok(name)) => {
                if results.is_empty() {
                    results.push_back(Ok(name.clone()));
                }
                Ok(name)
            }
            Some(Err(e)) => Err(e),
            None => Ok("No task".to_string()),
        }
    }
}

/// In-memory Asana directory.
#[derive(Default)]
pub struct StubDirectory {
    pub user: Option<User>,
    pub workspaces: Vec<Resource>,
    pub tags: HashMap<String, Vec<Resource>>,
    pub projects: HashMap<String, Vec<Resource>>,
    pub sections: HashMap<String, Vec<Resource>>,
}

impl StubDirectory {
    /// Valid token, three workspaces, three tags and projects in the
    /// second workspace, two sections in its second project.
    pub fn sample() -> Self {
        let mut dir = Self {
            user: Some(User {
                gid: "u1".to_string(),
                name: "Ada".to_string(),
                email: None,
            }),
            workspaces: vec![
                resource("w1", "Personal"),
                resource("w2", "Acme"),
                resource("w3", "Side project"),
            ],
            ..Self::default()
        };
        dir.tags.insert(
            "w2".to_string(),
            vec![resource("t1", "urgent"), resource("t2", "today"), resource("t3", "later")],
        );
        dir.projects.insert(
            "w2".to_string(),
            vec![resource("p1", "Website"), resource("p2", "Backend"), resource("p3", "Ops")],
        );
        dir.sections.insert(
            "p2".to_string(),
            vec![resource("s1", "To do"), resource("s2", "Doing")],
        );
        dir
    }

    pub fn unauthorized() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Directory for StubDirectory {
    async fn me(&self) -> Result<User, ApiError> {
        self.user.clone().ok_or(ApiError::Unauthorized)
    }

    async fn workspaces(&self) -> Result<Vec<Resource>, ApiError> {
        Ok(self.workspaces.clone())
    }

    async fn tags(&self, workspace_gid: &str) -> Result<Vec<Resource>, ApiError> {
        Ok(self.tags.get(workspace_gid).cloned().unwrap_or_default())
    }

    async fn projects(&self, workspace_gid: &str) -> Result<Vec<Resource>, ApiError> {
        Ok(self.projects.get(workspace_gid).cloned().unwrap_or_default())
    }

    async fn sections(&self, project_gid: &str) -> Result<Vec<Resource>, ApiError> {
        Ok(self.sections.get(project_gid).cloned().unwrap_or_default())
    }
}
