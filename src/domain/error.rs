//! Domain error types for the to-do client.
//!
//! These cover failures in pure presentation logic. Transport and storage
//! failures live next to their adapters in `infra`.

use std::fmt;
use thiserror::Error;

/// A string could not be interpreted as a date/time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeViewError {
    #[error("cannot interpret '{input}' as a date/time: {reason}")]
    Parse { input: String, reason: String },
}

impl TimeViewError {
    pub(crate) fn parse(input: &str, reason: impl fmt::Display) -> Self {
        TimeViewError::Parse {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}
