//! The task edit form.
//!
//! The deadline field holds a local, minute-precision string. It is filled
//! from the backend record in the `Prefill` layout and converted back to a
//! canonical instant only when the form is submitted, so a malformed value is
//! caught before any request is made.

use crate::domain::time_view::{from_editable_local_in, to_local_in};
use crate::domain::{Layout, Task, TaskPayload, TaskStatus, TimeViewError};
use chrono::{Local, TimeZone};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskForm {
    pub title: String,
    pub detail: String,
    pub status: TaskStatus,
    /// Local deadline, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD HH:MM`.
    pub limit: String,
}

impl TaskForm {
    pub fn new(title: impl Into<String>, detail: impl Into<String>, limit: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            status: TaskStatus::Todo,
            limit: limit.into(),
        }
    }

    pub fn from_task_in<Tz: TimeZone>(task: &Task, tz: &Tz) -> Result<Self, TimeViewError> {
        Ok(Self {
            title: task.title.clone(),
            detail: task.detail.clone(),
            status: task.done,
            limit: to_local_in(&task.limit, tz, Layout::Prefill)?,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = limit.into();
        self
    }

    pub fn to_payload_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<TaskPayload, TimeViewError> {
        Ok(TaskPayload {
            title: self.title.clone(),
            detail: self.detail.clone(),
            done: self.status,
            limit: from_editable_local_in(&self.limit, tz)?,
        })
    }

    /// Request body with the deadline read in the local time zone.
    pub fn to_payload(&self) -> Result<TaskPayload, TimeViewError> {
        self.to_payload_in(&Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn task() -> Task {
        Task {
            id: "t1".into(),
            title: "Write report".into(),
            detail: "quarterly numbers".into(),
            done: TaskStatus::Todo,
            limit: "2024-01-10T15:30:42.123Z".into(),
        }
    }

    #[test]
    fn test_prefill_uses_local_zone() {
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        let form = TaskForm::from_task_in(&task(), &jst).unwrap();
        assert_eq!(form.limit, "2024-01-11 00:30");
        assert_eq!(form.title, "Write report");
        assert_eq!(form.status, TaskStatus::Todo);
    }

    #[test]
    fn test_untouched_form_submits_truncated_deadline() {
        let form = TaskForm::from_task_in(&task(), &Utc).unwrap();
        let payload = form.to_payload_in(&Utc).unwrap();
        assert_eq!(payload.limit, "2024-01-10T15:30:00.000Z");
        assert_eq!(payload.detail, "quarterly numbers");
    }

    #[test]
    fn test_edits_flow_into_payload() {
        let payload = TaskForm::from_task_in(&task(), &Utc)
            .unwrap()
            .with_title("Send report")
            .with_status(TaskStatus::Done)
            .with_limit("2024-03-05T09:15")
            .to_payload_in(&Utc)
            .unwrap();
        assert_eq!(payload.title, "Send report");
        assert_eq!(payload.done, TaskStatus::Done);
        assert_eq!(payload.limit, "2024-03-05T09:15:00.000Z");
    }

    #[test]
    fn test_bad_limit_is_rejected_before_submit() {
        let form = TaskForm::new("a", "b", "tomorrow-ish");
        assert!(matches!(
            form.to_payload_in(&Utc),
            Err(TimeViewError::Parse { .. })
        ));
    }

    #[test]
    fn test_to_payload_reads_local_zone() {
        let form = TaskForm::new("a", "", "2024-03-05T09:15");
        assert_eq!(form.to_payload().unwrap(), form.to_payload_in(&Local).unwrap());
        assert!(TaskForm::new("a", "", "").to_payload().is_err());
    }

    #[test]
    fn test_unreadable_backend_deadline() {
        let mut broken = task();
        broken.limit = "soon".into();
        assert!(TaskForm::from_task_in(&broken, &Utc).is_err());
    }
}
