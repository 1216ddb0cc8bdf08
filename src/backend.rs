//! Backend invocation boundary
//!
//! The assistant's actual work (audio capture, speech recognition, command
//! execution, persistent storage) happens in a separate backend process.
//! This layer reaches it only through [`Backend`], one async method per
//! named invocation. Every call is a request/response pair that either
//! yields a value or a [`BackendError`]; nothing here blocks.

use async_trait::async_trait;
use thiserror::Error;

/// Failure surfaced by a backend invocation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend was unreachable or reported an error for the call.
    #[error("backend call `{command}` failed: {message}")]
    Invoke { command: String, message: String },
    /// The configuration payload returned by the backend could not be parsed.
    #[error("malformed backend configuration: {0}")]
    MalformedConfig(#[from] serde_json::Error),
}

impl BackendError {
    /// Convenience constructor for an invocation failure.
    pub fn invoke(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invoke {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// Asynchronous invocation contract with the assistant backend.
///
/// Implementations wrap whatever transport the host application uses (IPC,
/// local socket, in-process channel). Calls may resolve in any order; the
/// caller enforces no ordering between them.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Whether the backend is currently listening for speech.
    async fn is_listening(&self) -> Result<bool, BackendError>;

    /// Asks the backend to start listening.
    async fn start_listening(&self) -> Result<(), BackendError>;

    /// Asks the backend to stop listening.
    async fn stop_listening(&self) -> Result<(), BackendError>;

    /// Executes an assistant command from free text; returns the backend's
    /// response text.
    async fn execute_command_by_text(&self, text: &str) -> Result<String, BackendError>;

    /// Reveals `path` in the system file manager.
    async fn show_in_explorer(&self, path: &str) -> Result<(), BackendError>;

    /// Reads a value from the backend key-value store.
    async fn db_read(&self, key: &str) -> Result<String, BackendError>;

    /// Returns the backend configuration as a JSON-encoded string.
    async fn get_config(&self) -> Result<String, BackendError>;

    /// Official Telegram channel URL.
    async fn get_tg_official_link(&self) -> Result<String, BackendError>;

    /// Feedback form URL.
    async fn get_feedback_link(&self) -> Result<String, BackendError>;

    /// Source repository URL.
    async fn get_repository_link(&self) -> Result<String, BackendError>;

    /// Path of the backend's log file on disk.
    async fn get_log_file_path(&self) -> Result<String, BackendError>;
}
