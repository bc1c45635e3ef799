//! Google Tasks as the day's to-do list.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::http::ApiClient;
use super::traits::{TodoEntry, TodoList};
use crate::error::{ConfigError, Result};
use crate::storage::config::GoogleConfig;
use crate::task::WorkItem;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/tasks/v1";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage<T> {
    // a path default avoids serde adding a `T: Default` bound
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTask {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    status: String,
}

/// A task list the user owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListInfo {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// One Google Tasks list.
pub struct GoogleTasksList {
    api: ApiClient,
    tasklist_id: String,
}

impl GoogleTasksList {
    pub fn new(base_url: &str, access_token: &str, tasklist_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new("google_tasks", base_url, access_token)?,
            tasklist_id: tasklist_id.into(),
        })
    }

    pub fn from_config(config: &GoogleConfig) -> Result<Self> {
        if config.tasklist_id.is_empty() {
            return Err(ConfigError::MissingKey("google.tasklist_id".into()).into());
        }
        Self::new(&config.tasks_base_url, &config.access_token, config.tasklist_id.clone())
    }

    fn tasks_path(&self) -> String {
        format!("lists/{}/tasks", self.tasklist_id)
    }
}

/// Every task list on the account; used to find the id for the config.
pub fn task_lists(base_url: &str, access_token: &str) -> Result<Vec<TaskListInfo>> {
    let api = ApiClient::new("google_tasks", base_url, access_token)?;
    let mut lists = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let mut query = vec![("maxResults", "100")];
        if let Some(ref token) = page_token {
            query.push(("pageToken", token.as_str()));
        }

        let page: ListPage<TaskListInfo> = api.get("users/@me/lists", &query)?;
        lists.extend(page.items);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(lists)
}

impl TodoList for GoogleTasksList {
    fn add(&self, item: &WorkItem) -> Result<()> {
        let body = json!({
            "title": item.title,
            "notes": item.notes,
            "due": item.due_rfc3339(),
        });
        let _: Value = self.api.post(&self.tasks_path(), &body)?;
        tracing::debug!(title = %item.title, "added to Google Tasks");
        Ok(())
    }

    fn entries(&self) -> Result<Vec<TodoEntry>> {
        let path = self.tasks_path();
        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("showHidden", "true"),
                ("showCompleted", "true"),
                ("maxResults", "100"),
            ];
            if let Some(ref token) = page_token {
                query.push(("pageToken", token.as_str()));
            }

            let page: ListPage<RawTask> = self.api.get(&path, &query)?;
            entries.extend(page.items.into_iter().map(|raw| TodoEntry {
                completed: raw.status == "completed",
                id: raw.id,
                title: raw.title,
                notes: raw.notes,
            }));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(entries)
    }

    fn remove(&self, id: &str) -> Result<()> {
        self.api.delete(&format!("{}/{}", self.tasks_path(), id))
    }
}
