//! Application layer (use-cases, policies).
//!
//! Presentation logic for the task board and the task edit form. Nothing
//! here performs IO or reads the clock; callers pass `now` and the time zone.

pub mod board;
pub mod form;
