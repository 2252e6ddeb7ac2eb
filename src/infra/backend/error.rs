use thiserror::Error;

/// Failures talking to the to-do backend. None of them are retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not signed in: no session token (run `todoview login <token>`)")]
    MissingToken,

    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("{method} {url}: {source}")]
    Request {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response of {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// HTTP status for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
