use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;

/// Dimension a task listing is scoped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Project,
    Section,
    Tag,
}

impl FilterKind {
    /// Command-line flag that selects this dimension for `run`.
    pub fn flag(self) -> &'static str {
        match self {
            FilterKind::Project => "--project-id",
            FilterKind::Section => "--section-id",
            FilterKind::Tag => "--tag-id",
        }
    }

    /// Collection name in Asana REST paths (`/{collection}/{gid}/tasks`).
    pub fn collection(self) -> &'static str {
        match self {
            FilterKind::Project => "projects",
            FilterKind::Section => "sections",
            FilterKind::Tag => "tags",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Project => "project",
            FilterKind::Section => "section",
            FilterKind::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// The single criterion used to pick which tasks are listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    ByProject(String),
    BySection(String),
    ByTag(String),
}

impl TaskFilter {
    /// Build a filter from the three optional ids accepted by `run`.
    ///
    /// Blank values count as absent. Exactly one id must remain.
    pub fn from_ids(
        project_id: Option<&str>,
        section_id: Option<&str>,
        tag_id: Option<&str>,
    ) -> Result<Self, ConfigError> {
        fn present(id: Option<&str>) -> Option<&str> {
            id.map(str::trim).filter(|s| !s.is_empty())
        }

        let mut candidates = [
            present(project_id).map(|id| TaskFilter::ByProject(id.to_string())),
            present(section_id).map(|id| TaskFilter::BySection(id.to_string())),
            present(tag_id).map(|id| TaskFilter::ByTag(id.to_string())),
        ]
        .into_iter()
        .flatten();

        match (candidates.next(), candidates.next()) {
            (None, _) => Err(ConfigError::NoFilter),
            (Some(filter), None) => Ok(filter),
            (Some(first), Some(second)) => {
                let flags = [first, second]
                    .into_iter()
                    .chain(candidates)
                    .map(|c| c.kind().flag())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(ConfigError::MultipleFilters(flags))
            }
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            TaskFilter::ByProject(_) => FilterKind::Project,
            TaskFilter::BySection(_) => FilterKind::Section,
            TaskFilter::ByTag(_) => FilterKind::Tag,
        }
    }

    pub fn gid(&self) -> &str {
        match self {
            TaskFilter::ByProject(gid) | TaskFilter::BySection(gid) | TaskFilter::ByTag(gid) => gid,
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.gid())
    }
}

/// A task as returned by a listing query. Only the fields we read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskRecord {
    pub gid: String,
    #[serde(default)]
    pub name: String,
}

/// Any named Asana object: workspace, tag, project or section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Resource {
    pub gid: String,
    #[serde(default)]
    pub name: String,
}

/// The authenticated user (`/users/me`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub gid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}
