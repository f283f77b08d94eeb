// error.rs
use std::io;

use thiserror::Error;

/// Errors raised by the editor model and the language resources.
///
/// Word-level failures (unknown words, empty synonym sets, missing selections)
/// are not errors: they fall back to the input or become no-ops.
#[derive(Error, Debug)]
pub enum EditError {
    #[error("position {position} is outside of {widget} (length {len})")]
    InvalidPosition {
        widget: String,
        position: usize,
        len: usize,
    },

    #[error("range {start}..{end} is not valid for {widget} (length {len})")]
    InvalidRange {
        widget: String,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("unknown widget: {0}")]
    UnknownWidget(String),

    #[error("resource error: {0}")]
    Resource(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl EditError {
    pub fn resource<S: Into<String>>(msg: S) -> Self {
        EditError::Resource(msg.into())
    }

    /// True for errors caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EditError::InvalidPosition { .. }
                | EditError::InvalidRange { .. }
                | EditError::UnknownWidget(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
