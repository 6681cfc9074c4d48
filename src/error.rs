use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered with status {status}")]
    Status {
        endpoint: &'static str,
        status: u16,
    },

    #[error("malformed response from {endpoint}: {reason}")]
    Malformed {
        endpoint: &'static str,
        reason: String,
    },

    #[error("local marker storage failed: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("local marker storage migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("nothing to submit")]
    EmptyInput,

    #[error("map view is not initialized")]
    NotInitialized,

    #[error("log in to add markers")]
    LoginRequired,
}

impl BoardError {
    pub(crate) fn network(endpoint: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| BoardError::Network { endpoint, source }
    }

    pub(crate) fn malformed(endpoint: &'static str, reason: impl ToString) -> Self {
        BoardError::Malformed {
            endpoint,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Network,
    MalformedResponse,
    MissingTarget,
    LoginRequired,
}

/// A non-fatal message for the user. The map keeps working after one is
/// raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Wraps an error with what the user was trying to do.
    pub fn from_error(action: &str, err: &BoardError) -> Self {
        let kind = match err {
            BoardError::Network { .. } | BoardError::Status { .. } | BoardError::Storage(_) => {
                NoticeKind::Network
            }
            BoardError::Malformed { .. } | BoardError::Migration(_) => {
                NoticeKind::MalformedResponse
            }
            BoardError::EmptyInput | BoardError::NotInitialized => NoticeKind::MissingTarget,
            BoardError::LoginRequired => NoticeKind::LoginRequired,
        };
        Self::new(kind, format!("{}: {}", action, err))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
