//! Domain types for the to-do client.
//! Defines the records exchanged with the backend and the pure deadline
//! presentation logic.

pub mod error;
pub mod task;
pub mod time_view;

pub use error::*;
pub use task::*;
pub use time_view::{DisplayDeadline, Instant, Layout, OVERDUE_MARKER, RemainingTime};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_task_status_display_parse() {
        assert_eq!(TaskStatus::Todo.to_string(), "未完了");
        assert_eq!(TaskStatus::Done.to_string(), "完了");
        assert_eq!(TaskStatus::from_str("DONE").unwrap(), TaskStatus::Done);
        assert_eq!(TaskStatus::from_str("todo").unwrap(), TaskStatus::Todo);
        assert_eq!(TaskStatus::from_str("完了").unwrap(), TaskStatus::Done);
        assert!(TaskStatus::from_str("maybe").is_err());
    }

    #[test]
    fn test_task_status_is_a_json_boolean() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t1","title":"Write report","detail":"","done":true,"limit":"2024-01-02T03:04:05.000Z"}"#,
        )
        .unwrap();
        assert_eq!(task.done, TaskStatus::Done);

        let payload = TaskPayload {
            title: "a".into(),
            detail: "b".into(),
            done: TaskStatus::Todo,
            limit: "2024-01-02T03:04:00.000Z".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["done"], serde_json::Value::Bool(false));
    }

    #[test]
    fn test_task_page_null_tasks_is_empty() {
        let page: TaskPage = serde_json::from_str(r#"{"listId":"l1","tasks":null}"#).unwrap();
        assert_eq!(page.list_id.as_deref(), Some("l1"));
        assert!(page.into_tasks().is_empty());

        let page: TaskPage = serde_json::from_str("{}").unwrap();
        assert!(page.into_tasks().is_empty());
    }

    #[test]
    fn test_task_page_keeps_tasks_with_null_fields() {
        let json = r#"{"listId":"l1","tasks":[
            {"id":"t1","title":"ok","detail":"d","done":false,"limit":"2024-01-02T03:04:00.000Z"},
            {"id":"t2","title":"no deadline","detail":null,"done":true,"limit":null},
            {"id":"t3","title":"bare"}
        ]}"#;
        let tasks = serde_json::from_str::<TaskPage>(json).unwrap().into_tasks();

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].limit, "2024-01-02T03:04:00.000Z");
        assert_eq!(tasks[1].detail, "");
        assert_eq!(tasks[1].limit, "");
        assert!(tasks[1].done.is_done());
        assert_eq!(tasks[2].limit, "");
    }
}
