//! Minimal Asana REST client.
//!
//! Only the read endpoints needed to discover ids and to list the tasks of a
//! project, section or tag. Every response is wrapped in `{"data": ...}`;
//! collection endpoints are paginated through `next_page.offset`.

use crate::config::{ApiConfig, DEFAULT_API_URL};
use crate::data::{Resource, TaskFilter, TaskRecord, User};
use crate::error::ApiError;
use crate::integrations::HTTP_CLIENT;
use crate::setup::Directory;
use crate::tasks::TaskListing;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(default)]
    next_page: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
struct NextPage {
    offset: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

#[derive(Debug, Clone)]
pub struct AsanaApi {
    http: reqwest::Client,
    base_url: String,
    token: String,
    page_size: u32,
}

impl AsanaApi {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: HTTP_CLIENT.clone(),
            base_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            page_size: 100,
        }
    }

    pub fn from_config(token: impl Into<String>, config: &ApiConfig) -> Self {
        Self::new(token)
            .with_base_url(&config.base_url)
            .with_page_size(config.page_size)
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, 100);
        self
    }

    /// The user the access token belongs to.
    pub async fn me(&self) -> Result<User, ApiError> {
        let envelope: Envelope<User> = self.get("users/me", &[]).await?;
        Ok(envelope.data)
    }

    pub async fn workspaces(&self) -> Result<Vec<Resource>, ApiError> {
        self.get_all("workspaces", vec![]).await
    }

    pub async fn tags(&self, workspace_gid: &str) -> Result<Vec<Resource>, ApiError> {
        self.get_all("tags", vec![("workspace", workspace_gid.to_string())])
            .await
    }

    pub async fn projects(&self, workspace_gid: &str) -> Result<Vec<Resource>, ApiError> {
        self.get_all("projects", vec![("workspace", workspace_gid.to_string())])
            .await
    }

    pub async fn sections(&self, project_gid: &str) -> Result<Vec<Resource>, ApiError> {
        let path = format!("projects/{}/sections", urlencoding::encode(project_gid));
        self.get_all(&path, vec![]).await
    }

    /// One page of tasks for the filter, in API order.
    pub async fn tasks(&self, filter: &TaskFilter, limit: u32) -> Result<Vec<TaskRecord>, ApiError> {
        let path = tasks_path(filter);
        let query = [
            ("opt_fields", "name".to_string()),
            ("limit", limit.clamp(1, 100).to_string()),
        ];
        let envelope: Envelope<Vec<TaskRecord>> = self.get(&path, &query).await?;
        Ok(envelope.data)
    }

    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        mut query: Vec<(&str, String)>,
    ) -> Result<Vec<T>, ApiError> {
        query.push(("limit", self.page_size.to_string()));
        let mut items = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut page_query = query.clone();
            if let Some(offset) = offset.take() {
                page_query.push(("offset", offset));
            }

            let envelope: Envelope<Vec<T>> = self.get(path, &page_query).await?;
            items.extend(envelope.data);

            match envelope.next_page {
                Some(next) => offset = Some(next.offset),
                None => break,
            }
        }

        Ok(items)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() == 401 {
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

pub fn tasks_path(filter: &TaskFilter) -> String {
    format!(
        "{}/{}/tasks",
        filter.kind().collection(),
        urlencoding::encode(filter.gid())
    )
}

/// First error message of an Asana error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.errors.into_iter().next())
        .map(|e| e.message)
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl TaskListing for AsanaApi {
    async fn list_tasks(&self, filter: &TaskFilter, limit: u32) -> Result<Vec<TaskRecord>, ApiError> {
        self.tasks(filter, limit).await
    }
}

#[async_trait]
impl Directory for AsanaApi {
    async fn me(&self) -> Result<User, ApiError> {
        AsanaApi::me(self).await
    }

    async fn workspaces(&self) -> Result<Vec<Resource>, ApiError> {
        AsanaApi::workspaces(self).await
    }

    async fn tags(&self, workspace_gid: &str) -> Result<Vec<Resource>, ApiError> {
        AsanaApi::tags(self, workspace_gid).await
    }

    async fn projects(&self, workspace_gid: &str) -> Result<Vec<Resource>, ApiError> {
        AsanaApi::projects(self, workspace_gid).await
    }

    async fn sections(&self, project_gid: &str) -> Result<Vec<Resource>, ApiError> {
        AsanaApi::sections(self, project_gid).await
    }
}
