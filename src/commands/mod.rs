//! User-facing operations.
//!
//! Each operation performs its backend calls once. A failure is logged and
//! returned as `"<operation> failed: <detail>"`; nothing is retried.

use crate::application::board::{DisplayFilter, render_board, select_list};
use crate::application::form::TaskForm;
use crate::domain::time_view::{
    Layout, format_local, parse_instant, remaining_time, render_deadline_in,
};
use crate::domain::{Instant, ListPayload, Task, TaskList, TimeViewError};
use crate::infra::backend::{ApiError, TodoBackend};
use chrono::TimeZone;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchLists,
    FetchList,
    FetchTasks,
    FetchTask,
    CreateList,
    UpdateList,
    DeleteList,
    CreateTask,
    UpdateTask,
    DeleteTask,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FetchLists => "fetching lists",
            Self::FetchList => "fetching list",
            Self::FetchTasks => "fetching tasks",
            Self::FetchTask => "fetching task",
            Self::CreateList => "creating list",
            Self::UpdateList => "updating list",
            Self::DeleteList => "deleting list",
            Self::CreateTask => "creating task",
            Self::UpdateTask => "updating task",
            Self::DeleteTask => "deleting task",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{operation} failed: {source}")]
    Backend {
        operation: Operation,
        #[source]
        source: ApiError,
    },

    #[error("{operation} failed: {source}")]
    InvalidTime {
        operation: Operation,
        #[source]
        source: TimeViewError,
    },

    #[error("{operation} failed: title must not be empty")]
    EmptyTitle { operation: Operation },
}

impl CommandError {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Backend { operation, .. }
            | Self::InvalidTime { operation, .. }
            | Self::EmptyTitle { operation } => *operation,
        }
    }
}

fn backend_err(operation: Operation) -> impl FnOnce(ApiError) -> CommandError {
    move |source| {
        log::warn!("{} failed: {}", operation, source);
        CommandError::Backend { operation, source }
    }
}

fn time_err(operation: Operation) -> impl FnOnce(TimeViewError) -> CommandError {
    move |source| {
        log::warn!("{} failed: {}", operation, source);
        CommandError::InvalidTime { operation, source }
    }
}

fn require_title(title: &str, operation: Operation) -> Result<(), CommandError> {
    if title.trim().is_empty() {
        return Err(CommandError::EmptyTitle { operation });
    }
    Ok(())
}

/// Lists plus the tasks of the selected list, as fetched for one render.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub lists: Vec<TaskList>,
    pub selected: Option<String>,
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn render<Tz: TimeZone>(&self, filter: DisplayFilter, now: Instant, tz: &Tz) -> String {
        render_board(
            &self.lists,
            self.selected.as_deref(),
            &self.tasks,
            filter,
            now,
            tz,
        )
    }
}

pub async fn load_lists(backend: &dyn TodoBackend) -> Result<Vec<TaskList>, CommandError> {
    backend
        .lists()
        .await
        .map_err(backend_err(Operation::FetchLists))
}

/// Fetch all lists, pick one (the requested one or the first) and fetch its
/// tasks.
pub async fn load_board(
    backend: &dyn TodoBackend,
    requested: Option<&str>,
) -> Result<Board, CommandError> {
    let lists = load_lists(backend).await?;

    let Some(selected) = select_list(&lists, requested) else {
        return Ok(Board {
            lists,
            ..Board::default()
        });
    };

    let tasks = backend
        .tasks(&selected)
        .await
        .map_err(backend_err(Operation::FetchTasks))?
        .into_tasks();
    log::debug!("Loaded {} tasks for list {}", tasks.len(), selected);

    Ok(Board {
        lists,
        selected: Some(selected),
        tasks,
    })
}

/// Fetch a task and pre-fill the edit form from it.
pub async fn load_task_form<Tz: TimeZone>(
    backend: &dyn TodoBackend,
    list_id: &str,
    task_id: &str,
    tz: &Tz,
) -> Result<TaskForm, CommandError> {
    let task = backend
        .task(list_id, task_id)
        .await
        .map_err(backend_err(Operation::FetchTask))?;
    TaskForm::from_task_in(&task, tz).map_err(time_err(Operation::FetchTask))
}

/// Detail view of a single task.
pub async fn describe_task<Tz: TimeZone>(
    backend: &dyn TodoBackend,
    list_id: &str,
    task_id: &str,
    now: Instant,
    tz: &Tz,
) -> Result<String, CommandError> {
    let task = backend
        .task(list_id, task_id)
        .await
        .map_err(backend_err(Operation::FetchTask))?;
    let limit = parse_instant(&task.limit).map_err(time_err(Operation::FetchTask))?;
    let deadline = render_deadline_in(limit, now, tz);
    let remaining = remaining_time(limit, now);

    let mut out = String::new();
    out.push_str(&format!("タイトル：{}\n", task.title));
    out.push_str(&format!("期限：{}\n", deadline));
    out.push_str(&format!("残り日時：{}\n", remaining));
    out.push_str(&format!("編集用期限：{}\n", format_local(limit, tz, Layout::Editable)));
    out.push_str(&format!("状態：{}\n", task.done));
    if !task.detail.is_empty() {
        out.push_str(&format!("詳細：\n{}\n", task.detail));
    }
    Ok(out)
}

/// Convert the form and create the task. A bad deadline fails before any
/// request is sent.
pub async fn create_task<Tz: TimeZone>(
    backend: &dyn TodoBackend,
    list_id: &str,
    form: &TaskForm,
    tz: &Tz,
) -> Result<String, CommandError> {
    require_title(&form.title, Operation::CreateTask)?;
    let payload = form
        .to_payload_in(tz)
        .map_err(time_err(Operation::CreateTask))?;
    let id = backend
        .create_task(list_id, &payload)
        .await
        .map_err(backend_err(Operation::CreateTask))?;
    log::info!("Created task {} in list {}", id, list_id);
    Ok(id)
}

/// Convert the form and send the update. A bad deadline fails before any
/// request is sent.
pub async fn update_task<Tz: TimeZone>(
    backend: &dyn TodoBackend,
    list_id: &str,
    task_id: &str,
    form: &TaskForm,
    tz: &Tz,
) -> Result<(), CommandError> {
    require_title(&form.title, Operation::UpdateTask)?;
    let payload = form
        .to_payload_in(tz)
        .map_err(time_err(Operation::UpdateTask))?;
    backend
        .update_task(list_id, task_id, &payload)
        .await
        .map_err(backend_err(Operation::UpdateTask))?;
    log::info!("Updated task {} in list {}", task_id, list_id);
    Ok(())
}

pub async fn delete_task(
    backend: &dyn TodoBackend,
    list_id: &str,
    task_id: &str,
) -> Result<(), CommandError> {
    backend
        .delete_task(list_id, task_id)
        .await
        .map_err(backend_err(Operation::DeleteTask))?;
    log::info!("Deleted task {} from list {}", task_id, list_id);
    Ok(())
}

pub async fn create_list(backend: &dyn TodoBackend, title: &str) -> Result<String, CommandError> {
    require_title(title, Operation::CreateList)?;
    let payload = ListPayload {
        title: title.trim().to_string(),
    };
    let id = backend
        .create_list(&payload)
        .await
        .map_err(backend_err(Operation::CreateList))?;
    log::info!("Created list {}", id);
    Ok(id)
}

/// Rename a list, returning its previous title.
pub async fn rename_list(
    backend: &dyn TodoBackend,
    list_id: &str,
    title: &str,
) -> Result<String, CommandError> {
    require_title(title, Operation::UpdateList)?;
    let current = backend
        .list(list_id)
        .await
        .map_err(backend_err(Operation::FetchList))?;
    let payload = ListPayload {
        title: title.trim().to_string(),
    };
    backend
        .update_list(list_id, &payload)
        .await
        .map_err(backend_err(Operation::UpdateList))?;
    Ok(current.title)
}

pub async fn delete_list(backend: &dyn TodoBackend, list_id: &str) -> Result<(), CommandError> {
    backend
        .delete_list(list_id)
        .await
        .map_err(backend_err(Operation::DeleteList))?;
    log::info!("Deleted list {}", list_id);
    Ok(())
}
