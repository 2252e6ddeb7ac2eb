use crate::domain::{ListId, Task, TaskList, TaskStatus};
use std::fmt;
use std::str::FromStr;

/// Which tasks the board shows. Only completion state is considered;
/// deadlines never hide a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayFilter {
    #[default]
    Todo,
    Done,
}

impl DisplayFilter {
    pub fn status(self) -> TaskStatus {
        match self {
            Self::Todo => TaskStatus::Todo,
            Self::Done => TaskStatus::Done,
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        task.done == self.status()
    }
}

impl fmt::Display for DisplayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status())
    }
}

impl FromStr for DisplayFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match TaskStatus::from_str(s)? {
            TaskStatus::Todo => Ok(Self::Todo),
            TaskStatus::Done => Ok(Self::Done),
        }
    }
}

/// The list to show: `requested` when it exists, otherwise the first list.
pub fn select_list(lists: &[TaskList], requested: Option<&str>) -> Option<ListId> {
    if let Some(id) = requested
        && let Some(list) = lists.iter().find(|list| list.id == id)
    {
        return Some(list.id.clone());
    }
    if let Some(id) = requested {
        log::warn!("List {} not found, showing the first list instead", id);
    }
    lists.first().map(|list| list.id.clone())
}

/// Tasks matching `filter`, in backend order.
pub fn filter_tasks(tasks: &[Task], filter: DisplayFilter) -> Vec<&Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}
