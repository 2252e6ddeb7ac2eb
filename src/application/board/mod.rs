//! The task board: list tabs, the completion filter and task cards.

pub mod cards;
pub mod render;
pub mod selection;

#[cfg(test)]
mod tests;

pub use cards::{DeadlineView, TaskCard};
pub use render::render_board;
pub use selection::{DisplayFilter, filter_tasks, select_list};
