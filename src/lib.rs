//! Terminal client for a REST to-do list service.
//!
//! `domain` holds the records and the deadline presentation logic,
//! `application` the board and edit form, `infra` the HTTP client, session
//! token and config file, and `commands` the user operations built on them.

pub mod application;
pub mod commands;
pub mod domain;
pub mod infra;
