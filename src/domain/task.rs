use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by the backend to a list.
pub type ListId = String;

/// Identifier assigned by the backend to a task.
pub type TaskId = String;

/// Completion state of a task. Serialized as the backend's `done` boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum TaskStatus {
    #[default]
    Todo,
    Done,
}

impl TaskStatus {
    pub fn is_done(self) -> bool {
        self == TaskStatus::Done
    }

    /// Stable key used on the command line (`todo` / `done`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Done => "done",
        }
    }
}

impl From<bool> for TaskStatus {
    fn from(done: bool) -> Self {
        if done { Self::Done } else { Self::Todo }
    }
}

impl From<TaskStatus> for bool {
    fn from(status: TaskStatus) -> Self {
        status.is_done()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "未完了"),
            Self::Done => write!(f, "完了"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "open" | "未完了" => Ok(Self::Todo),
            "done" | "complete" | "completed" | "完了" => Ok(Self::Done),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

/// A task as returned by `GET /lists/{list}/tasks/{task}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub detail: String,
    #[serde(default)]
    pub done: TaskStatus,
    /// Deadline as an RFC3339 UTC instant. Empty when the backend sent none,
    /// which fails to parse on its own card only.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub limit: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response body of `GET /lists/{list}/tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPage {
    #[serde(default, rename = "listId")]
    pub list_id: Option<ListId>,
    #[serde(default)]
    tasks: Option<Vec<Task>>,
}

impl TaskPage {
    pub fn new(list_id: impl Into<ListId>, tasks: Vec<Task>) -> Self {
        Self {
            list_id: Some(list_id.into()),
            tasks: Some(tasks),
        }
    }

    /// Tasks on the page; a `null` payload is treated as empty.
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks.unwrap_or_default()
    }
}

/// Request body for creating or updating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    pub title: String,
    pub detail: String,
    pub done: TaskStatus,
    pub limit: String,
}

/// A to-do list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: ListId,
    pub title: String,
}

/// Request body for creating or renaming a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPayload {
    pub title: String,
}
