//! The task filter client: one listing query per call, first task wins.

use crate::data::{TaskFilter, TaskRecord};
use crate::error::ApiError;
use crate::integrations::asana::AsanaApi;
use async_trait::async_trait;

/// Shown when the filtered listing is empty.
pub const NO_TASK: &str = "No task";

/// Backend able to list the tasks matching a filter, in API-defined order.
#[async_trait]
pub trait TaskListing: Send + Sync {
    async fn list_tasks(&self, filter: &TaskFilter, limit: u32) -> Result<Vec<TaskRecord>, ApiError>;
}

/// Anything the poll loop can ask for the current task name.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn current_task_name(&self) -> Result<String, ApiError>;
}

pub struct TaskFilterClient<L = AsanaApi> {
    listing: L,
    filter: TaskFilter,
}

impl<L: TaskListing> TaskFilterClient<L> {
    pub fn new(listing: L, filter: TaskFilter) -> Self {
        Self { listing, filter }
    }
}

#[async_trait]
impl<L: TaskListing> TaskSource for TaskFilterClient<L> {
    async fn current_task_name(&self) -> Result<String, ApiError> {
        let tasks = self.listing.list_tasks(&self.filter, 1).await?;
        Ok(tasks
            .into_iter()
            .next()
            .map(|t| t.name)
            .unwrap_or_else(|| NO_TASK.to_string()))
    }
}
