use crate::application::board::*;
use crate::domain::time_view::parse_instant;
use crate::domain::*;
use chrono::Utc;
use std::str::FromStr;

fn list(id: &str, title: &str) -> TaskList {
    TaskList {
        id: id.into(),
        title: title.into(),
    }
}

fn task(id: &str, title: &str, done: bool, limit: &str) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        detail: String::new(),
        done: done.into(),
        limit: limit.into(),
    }
}

fn sample_tasks() -> Vec<Task> {
    vec![
        task("t1", "Buy milk", false, "2024-01-10T15:30:00.000Z"),
        task("t2", "File taxes", true, "2024-01-01T00:00:00.000Z"),
        task("t3", "Call mom", false, "2024-01-01T00:00:00.000Z"),
        task("t4", "Renew passport", true, "2024-02-01T00:00:00.000Z"),
    ]
}

fn now() -> Instant {
    parse_instant("2024-01-10T00:00:00.000Z").unwrap()
}

#[test]
fn test_select_list_prefers_requested() {
    let lists = vec![list("a", "Home"), list("b", "Work")];
    assert_eq!(select_list(&lists, Some("b")).as_deref(), Some("b"));
    assert_eq!(select_list(&lists, None).as_deref(), Some("a"));
    assert_eq!(select_list(&lists, Some("zzz")).as_deref(), Some("a"));
    assert_eq!(select_list(&[], None), None);
}

#[test]
fn test_filter_by_completion_only() {
    let tasks = sample_tasks();

    let todo: Vec<_> = filter_tasks(&tasks, DisplayFilter::Todo)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    // t3 is overdue and still shown.
    assert_eq!(todo, vec!["t1", "t3"]);

    let done: Vec<_> = filter_tasks(&tasks, DisplayFilter::Done)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(done, vec!["t2", "t4"]);
}

#[test]
fn test_display_filter_parse() {
    assert_eq!(DisplayFilter::default(), DisplayFilter::Todo);
    assert_eq!(DisplayFilter::from_str("done").unwrap(), DisplayFilter::Done);
    assert_eq!(DisplayFilter::from_str("TODO").unwrap(), DisplayFilter::Todo);
    assert!(DisplayFilter::from_str("overdue").is_err());
}

#[test]
fn test_card_for_upcoming_task() {
    let tasks = sample_tasks();
    let card = TaskCard::build(&tasks[0], "a", now(), &Utc);
    assert_eq!(card.link, "/lists/a/tasks/t1");
    assert_eq!(card.status, TaskStatus::Todo);
    assert!(!card.is_overdue());

    let view = card.deadline.unwrap();
    assert_eq!(view.deadline.text, "2024/01/10 15:30");
    assert_eq!(
        view.remaining,
        RemainingTime {
            days: 0,
            hours: 15,
            minutes: 30
        }
    );
}

#[test]
fn test_card_for_overdue_task() {
    let tasks = sample_tasks();
    let card = TaskCard::build(&tasks[2], "a", now(), &Utc);
    assert!(card.is_overdue());
    assert!(card.deadline.unwrap().remaining.is_zero());
}

#[test]
fn test_card_with_unreadable_deadline() {
    let broken = task("t9", "Broken", false, "yesterday");
    let card = TaskCard::build(&broken, "a", now(), &Utc);
    assert!(card.deadline.is_err());
    assert!(!card.is_overdue());
}

#[test]
fn test_render_board_todo_view() {
    let lists = vec![list("a", "Home"), list("b", "Work")];
    let out = render_board(
        &lists,
        Some("a"),
        &sample_tasks(),
        DisplayFilter::Todo,
        now(),
        &Utc,
    );

    assert!(out.contains("* Home [a]"));
    assert!(out.contains("  Work [b]"));
    assert!(out.contains("タスク一覧 (未完了)"));
    assert!(out.contains("- Buy milk"));
    assert!(out.contains("期限：2024/01/10 15:30\n"));
    assert!(out.contains("残り日時：0日 15時間 30分"));
    assert!(out.contains(&format!("期限：2024/01/01 00:00 {}", OVERDUE_MARKER)));
    assert!(out.contains("残り日時：0日 0時間 0分"));
    assert!(out.contains("/lists/a/tasks/t3"));
    assert!(!out.contains("File taxes"));
}

#[test]
fn test_render_board_done_view_and_bad_deadline() {
    let lists = vec![list("a", "Home")];
    let mut tasks = sample_tasks();
    tasks.push(task("t5", "Mystery", true, "n/a"));

    let out = render_board(&lists, Some("a"), &tasks, DisplayFilter::Done, now(), &Utc);
    assert!(out.contains("タスク一覧 (完了)"));
    assert!(out.contains("- File taxes"));
    assert!(out.contains("残り日時：22日 0時間 0分"));
    assert!(out.contains("- Mystery\n  期限：(期限を読み取れません)"));
    assert!(!out.contains("Buy milk"));
}

#[test]
fn test_render_board_without_lists() {
    let out = render_board(&[], None, &[], DisplayFilter::Todo, now(), &Utc);
    assert!(out.contains("(リストがありません)"));
    assert!(!out.contains("- "));
}
