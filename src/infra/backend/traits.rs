use crate::domain::{ListPayload, Task, TaskList, TaskPage, TaskPayload};
use async_trait::async_trait;

use super::error::ApiError;

/// List and task CRUD against the backend. Every call is a single request.
#[async_trait]
pub trait TodoBackend: Send + Sync {
    async fn lists(&self) -> Result<Vec<TaskList>, ApiError>;
    async fn list(&self, list_id: &str) -> Result<TaskList, ApiError>;
    /// Returns the id assigned to the new list.
    async fn create_list(&self, payload: &ListPayload) -> Result<String, ApiError>;
    async fn update_list(&self, list_id: &str, payload: &ListPayload) -> Result<(), ApiError>;
    async fn delete_list(&self, list_id: &str) -> Result<(), ApiError>;

    async fn tasks(&self, list_id: &str) -> Result<TaskPage, ApiError>;
    async fn task(&self, list_id: &str, task_id: &str) -> Result<Task, ApiError>;
    /// Returns the id assigned to the new task.
    async fn create_task(&self, list_id: &str, payload: &TaskPayload) -> Result<String, ApiError>;
    async fn update_task(
        &self,
        list_id: &str,
        task_id: &str,
        payload: &TaskPayload,
    ) -> Result<(), ApiError>;
    async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<(), ApiError>;
}
