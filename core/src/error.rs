//! Error type shared by the layout engine, the tmux boundary and the state store.

use std::path::PathBuf;

use thiserror::Error;


#[derive(Debug, Error)]
pub enum ZoomError {
    /// Layout text that does not follow the tmux layout grammar.
    #[error("malformed layout at byte {offset}: {reason}")]
    MalformedLayout { offset: usize, reason: String },

    /// A tmux query or command could not be run or exited non-zero.
    #[error("tmux {command} failed: {detail}")]
    HostCommandFailed { command: String, detail: String },

    #[error("invalid pane id '{0}'")]
    InvalidPaneId(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}


pub type Result<T> = std::result::Result<T, ZoomError>;


impl ZoomError {
    pub fn malformed(offset: usize, reason: impl Into<String>) -> ZoomError {
        ZoomError::MalformedLayout {
            offset,
            reason: reason.into(),
        }
    }

    pub fn host(command: impl Into<String>, detail: impl Into<String>) -> ZoomError {
        ZoomError::HostCommandFailed {
            command: command.into(),
            detail: detail.into(),
        }
    }
}
