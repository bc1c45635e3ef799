//! Asana as the task tracker.
//!
//! Reads the assignee's tasks in a workspace together with their subtasks,
//! and marks tasks complete. Every Asana response is wrapped in
//! `{"data": ...}`; list endpoints page with `next_page.offset`.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::http::ApiClient;
use super::traits::TaskTracker;
use crate::error::Result;
use crate::storage::config::AsanaConfig;
use crate::task::{Subtask, Task, UNFILED};

pub const DEFAULT_BASE_URL: &str = "https://app.asana.com/api/1.0";

const TASK_FIELDS: &str =
    "name,due_on,completed,memberships.project.name,memberships.section.name";
const SUBTASK_FIELDS: &str = "name,completed";
const PAGE_SIZE: &str = "100";

#[derive(Debug, Deserialize)]
struct Page<T> {
    data: Vec<T>,
    #[serde(default)]
    next_page: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
struct NextPage {
    offset: String,
}

#[derive(Debug, Deserialize)]
struct AsanaTask {
    gid: String,
    name: String,
    #[serde(default)]
    due_on: Option<NaiveDate>,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    memberships: Vec<Membership>,
}

#[derive(Debug, Deserialize)]
struct Membership {
    #[serde(default)]
    project: Option<Named>,
    #[serde(default)]
    section: Option<Named>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AsanaSubtask {
    gid: String,
    name: String,
    #[serde(default)]
    completed: bool,
}

impl From<AsanaSubtask> for Subtask {
    fn from(raw: AsanaSubtask) -> Self {
        Subtask::new(raw.gid, raw.name, raw.completed)
    }
}

/// Asana REST client scoped to one assignee and workspace.
pub struct AsanaTracker {
    api: ApiClient,
    assignee_gid: String,
    workspace_gid: String,
}

impl AsanaTracker {
    pub fn new(
        base_url: &str,
        access_token: &str,
        assignee_gid: impl Into<String>,
        workspace_gid: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new("asana", base_url, access_token)?,
            assignee_gid: assignee_gid.into(),
            workspace_gid: workspace_gid.into(),
        })
    }

    pub fn from_config(config: &AsanaConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.access_token,
            config.assignee_gid.clone(),
            config.workspace_gid.clone(),
        )
    }

    /// Fetch every page of a list endpoint.
    fn get_all<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut pairs: Vec<(&str, &str)> = query.to_vec();
            pairs.push(("limit", PAGE_SIZE));
            if let Some(ref offset) = offset {
                pairs.push(("offset", offset.as_str()));
            }

            let page: Page<T> = self.api.get(path, &pairs)?;
            items.extend(page.data);

            match page.next_page {
                Some(next) => offset = Some(next.offset),
                None => break,
            }
        }

        Ok(items)
    }

    fn raw_subtasks(&self, parent_gid: &str) -> Result<Vec<AsanaSubtask>> {
        self.get_all(
            &format!("tasks/{parent_gid}/subtasks"),
            &[("opt_fields", SUBTASK_FIELDS)],
        )
    }
}

impl TaskTracker for AsanaTracker {
    fn open_tasks(&self, completed_since: NaiveDate) -> Result<Vec<Task>> {
        let since = completed_since.format("%Y-%m-%d").to_string();
        let raw: Vec<AsanaTask> = self.get_all(
            "tasks",
            &[
                ("assignee", self.assignee_gid.as_str()),
                ("workspace", self.workspace_gid.as_str()),
                ("completed_since", since.as_str()),
                ("opt_fields", TASK_FIELDS),
            ],
        )?;

        let mut tasks = Vec::new();
        for task in raw {
            if task.completed || task.due_on.is_none() {
                continue;
            }

            let (section, project) = match task.memberships.first() {
                Some(m) => (
                    m.section.as_ref().map_or(UNFILED, |s| s.name.as_str()).to_string(),
                    m.project.as_ref().map_or(UNFILED, |p| p.name.as_str()).to_string(),
                ),
                None => (UNFILED.to_string(), UNFILED.to_string()),
            };

            let subtasks = self
                .raw_subtasks(&task.gid)?
                .into_iter()
                .map(Subtask::from)
                .collect();

            tasks.push(
                Task::new(task.gid, task.name, task.due_on)
                    .with_membership(section, project)
                    .with_subtasks(subtasks),
            );
        }

        tracing::info!(count = tasks.len(), "fetched open tasks from Asana");
        Ok(tasks)
    }

    fn subtasks(&self, parent_gid: &str) -> Result<Vec<Subtask>> {
        Ok(self
            .raw_subtasks(parent_gid)?
            .into_iter()
            .map(Subtask::from)
            .collect())
    }

    fn complete(&self, gid: &str) -> Result<()> {
        self.api
            .put(&format!("tasks/{gid}"), &json!({ "data": { "completed": true } }))?;
        tracing::debug!(%gid, "completed in Asana");
        Ok(())
    }
}
