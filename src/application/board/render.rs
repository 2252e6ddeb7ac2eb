use crate::domain::{Instant, Task, TaskList};
use chrono::TimeZone;

use super::cards::TaskCard;
use super::selection::{DisplayFilter, filter_tasks};

const UNREADABLE_DEADLINE: &str = "(期限を読み取れません)";

/// Text rendering of the board: list tabs, then the filtered task cards.
pub fn render_board<Tz: TimeZone>(
    lists: &[TaskList],
    selected: Option<&str>,
    tasks: &[Task],
    filter: DisplayFilter,
    now: Instant,
    tz: &Tz,
) -> String {
    let mut out = String::new();

    out.push_str("リスト一覧\n");
    if lists.is_empty() {
        out.push_str("  (リストがありません)\n");
    }
    for list in lists {
        let marker = if Some(list.id.as_str()) == selected {
            '*'
        } else {
            ' '
        };
        out.push_str(&format!("{} {} [{}]\n", marker, list.title, list.id));
    }

    out.push_str(&format!("\nタスク一覧 ({})\n", filter));

    let Some(list_id) = selected else {
        return out;
    };

    for task in filter_tasks(tasks, filter) {
        let card = TaskCard::build(task, list_id, now, tz);
        render_card(&mut out, &card);
    }

    out
}

fn render_card(out: &mut String, card: &TaskCard) {
    out.push_str(&format!("- {}\n", card.title));
    match &card.deadline {
        Ok(view) => {
            out.push_str(&format!("  期限：{}\n", view.deadline));
            out.push_str(&format!("  残り日時：{}\n", view.remaining));
        }
        Err(_) => out.push_str(&format!("  期限：{}\n", UNREADABLE_DEADLINE)),
    }
    out.push_str(&format!("  {}\n", card.status));
    out.push_str(&format!("  {}\n", card.link));
}
