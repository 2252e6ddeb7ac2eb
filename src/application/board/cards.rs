use crate::domain::time_view::{parse_instant, remaining_time, render_deadline_in};
use crate::domain::{DisplayDeadline, Instant, RemainingTime, Task, TaskStatus, TimeViewError};
use chrono::TimeZone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineView {
    pub deadline: DisplayDeadline,
    pub remaining: RemainingTime,
}

/// Everything the board prints for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub task_id: String,
    pub title: String,
    /// Route of the task's edit page.
    pub link: String,
    pub status: TaskStatus,
    /// Fails when the backend sent a deadline that is not a valid instant.
    pub deadline: Result<DeadlineView, TimeViewError>,
}

impl TaskCard {
    pub fn build<Tz: TimeZone>(task: &Task, list_id: &str, now: Instant, tz: &Tz) -> Self {
        let deadline = parse_instant(&task.limit).map(|limit| DeadlineView {
            deadline: render_deadline_in(limit, now, tz),
            remaining: remaining_time(limit, now),
        });
        if let Err(err) = &deadline {
            log::warn!("Task {} has an unreadable deadline: {}", task.id, err);
        }

        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            link: format!("/lists/{}/tasks/{}", list_id, task.id),
            status: task.done,
            deadline,
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.deadline
            .as_ref()
            .is_ok_and(|view| view.deadline.is_overdue)
    }
}
