//! Action bridge
//!
//! Translates user intents (start/stop listening, execute a command, reveal
//! a file) into backend invocations and state updates. Every operation
//! returns its `Result` to the caller so the UI layer can decide whether to
//! surface a notification; the bridge itself never panics and never leaves
//! a cell in an invalid state.
//!
//! The listening flag is a two-state machine: a successful start moves it
//! to `true`, a failed start forces it to `false`, a successful stop moves
//! it to `false`, and a failed stop leaves it untouched. The recurring
//! status poll overwrites the flag with backend truth regardless of prior
//! state; a failed poll changes nothing, so a transient backend hiccup
//! never flickers the UI to "not listening".

use crate::backend::{Backend, BackendError};
use crate::state::AppState;
use std::sync::Arc;

/// Bridges user intents to backend invocations and state updates.
pub struct ActionBridge {
    state: Arc<AppState>,
    backend: Arc<dyn Backend>,
}

impl ActionBridge {
    /// Creates a bridge writing into `state` and invoking `backend`.
    pub fn new(state: Arc<AppState>, backend: Arc<dyn Backend>) -> Self {
        Self { state, backend }
    }

    /// Queries the backend listening state and mirrors it into the store.
    ///
    /// On failure the flag is left unchanged; the next poll reconciles.
    pub async fn poll_listening_status(&self) -> Result<bool, BackendError> {
        match self.backend.is_listening().await {
            Ok(listening) => {
                self.state.is_listening.set(listening);
                Ok(listening)
            }
            Err(e) => {
                tracing::warn!("Listening status poll failed: {}", e);
                Err(e)
            }
        }
    }

    /// Asks the backend to start listening.
    ///
    /// Sets the listening flag to `true` on success and forces it to
    /// `false` on failure.
    pub async fn start_listening(&self) -> Result<(), BackendError> {
        match self.backend.start_listening().await {
            Ok(()) => {
                self.state.is_listening.set(true);
                tracing::info!("Listening started");
                Ok(())
            }
            Err(e) => {
                self.state.is_listening.set(false);
                tracing::error!("Failed to start listening: {}", e);
                self.state.add_log(&format!("Failed to start listening: {}", e));
                Err(e)
            }
        }
    }

    /// Asks the backend to stop listening.
    ///
    /// Sets the listening flag to `false` on success. On failure the flag
    /// is left unchanged: the backend may well still be listening, and the
    /// recurring poll converges on its truth within one interval.
    pub async fn stop_listening(&self) -> Result<(), BackendError> {
        match self.backend.stop_listening().await {
            Ok(()) => {
                self.state.is_listening.set(false);
                tracing::info!("Listening stopped");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to stop listening: {}", e);
                self.state.add_log(&format!("Failed to stop listening: {}", e));
                Err(e)
            }
        }
    }

    /// Executes an assistant command from free text and returns the
    /// backend's response text. The outcome is mirrored into the visible
    /// log buffer either way.
    pub async fn execute_command_by_text(&self, text: &str) -> Result<String, BackendError> {
        match self.backend.execute_command_by_text(text).await {
            Ok(result) => {
                tracing::info!("Command executed: {}", result);
                self.state.add_log(&format!("Command executed: {}", result));
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Failed to execute command: {}", e);
                self.state.add_log(&format!("Failed to execute command: {}", e));
                Err(e)
            }
        }
    }

    /// Reveals `path` in the system file manager. No state update.
    pub async fn show_in_explorer(&self, path: &str) -> Result<(), BackendError> {
        match self.backend.show_in_explorer(path).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("Failed to reveal {} in file manager: {}", path, e);
                Err(e)
            }
        }
    }
}

/// Returns `s` with its first character upper-cased and the remainder
/// unchanged. Empty input yields an empty string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Backend;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Backend stub with per-call failure switches.
    #[derive(Default)]
    struct MockBackend {
        listening: AtomicBool,
        fail_poll: AtomicBool,
        fail_start: AtomicBool,
        fail_stop: AtomicBool,
        fail_execute: AtomicBool,
        poll_calls: AtomicUsize,
    }

    impl MockBackend {
        fn offline(command: &str) -> BackendError {
            BackendError::invoke(command, "backend offline")
        }
    }

    #[async_trait]
    impl Backend for MockBackend {
        async fn is_listening(&self) -> Result<bool, BackendError> {
            self.poll_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_poll.load(Ordering::SeqCst) {
                return Err(Self::offline("is_listening"));
            }
            Ok(self.listening.load(Ordering::SeqCst))
        }

        async fn start_listening(&self) -> Result<(), BackendError> {
            if self.fail_start.load(Ordering::SeqCst) {
                return Err(Self::offline("start_listening"));
            }
            self.listening.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn stop_listening(&self) -> Result<(), BackendError> {
            if self.fail_stop.load(Ordering::SeqCst) {
                return Err(Self::offline("stop_listening"));
            }
            self.listening.store(false, Ordering::SeqCst);
            Ok(())
        }

        async fn execute_command_by_text(&self, text: &str) -> Result<String, BackendError> {
            if self.fail_execute.load(Ordering::SeqCst) {
                return Err(Self::offline("execute_command_by_text"));
            }
            Ok(format!("Executing command: {}", text))
        }

        async fn show_in_explorer(&self, _path: &str) -> Result<(), BackendError> {
            Ok(())
        }

        async fn db_read(&self, _key: &str) -> Result<String, BackendError> {
            Ok(String::new())
        }

        async fn get_config(&self) -> Result<String, BackendError> {
            Ok("{}".to_string())
        }

        async fn get_tg_official_link(&self) -> Result<String, BackendError> {
            Ok(String::new())
        }

        async fn get_feedback_link(&self) -> Result<String, BackendError> {
            Ok(String::new())
        }

        async fn get_repository_link(&self) -> Result<String, BackendError> {
            Ok(String::new())
        }

        async fn get_log_file_path(&self) -> Result<String, BackendError> {
            Ok(String::new())
        }
    }

    fn bridge_with(backend: Arc<MockBackend>) -> (Arc<AppState>, ActionBridge) {
        let state = Arc::new(AppState::new());
        let bridge = ActionBridge::new(Arc::clone(&state), backend);
        (state, bridge)
    }

    #[tokio::test]
    async fn test_start_success_sets_flag_true() {
        let (state, bridge) = bridge_with(Arc::new(MockBackend::default()));

        bridge.start_listening().await.unwrap();

        assert!(state.is_listening());
        assert!(state.logs.get().is_empty());
    }

    #[tokio::test]
    async fn test_start_failure_forces_flag_false_and_logs_once() {
        let backend = Arc::new(MockBackend::default());
        backend.fail_start.store(true, Ordering::SeqCst);
        let (state, bridge) = bridge_with(backend);
        state.is_listening.set(true);

        let result = bridge.start_listening().await;

        assert!(result.is_err());
        assert!(!state.is_listening());
        assert_eq!(state.logs.get().len(), 1);
    }

    #[tokio::test]
    async fn test_stop_success_sets_flag_false() {
        let (state, bridge) = bridge_with(Arc::new(MockBackend::default()));
        state.is_listening.set(true);

        bridge.stop_listening().await.unwrap();

        assert!(!state.is_listening());
    }

    #[tokio::test]
    async fn test_stop_failure_leaves_flag_unchanged() {
        let backend = Arc::new(MockBackend::default());
        backend.fail_stop.store(true, Ordering::SeqCst);
        let (state, bridge) = bridge_with(backend);
        state.is_listening.set(true);

        let result = bridge.stop_listening().await;

        assert!(result.is_err());
        assert!(state.is_listening());
        assert_eq!(state.logs.get().len(), 1);
    }

    #[tokio::test]
    async fn test_poll_mirrors_backend_truth() {
        let backend = Arc::new(MockBackend::default());
        backend.listening.store(true, Ordering::SeqCst);
        let (state, bridge) = bridge_with(Arc::clone(&backend));

        assert!(bridge.poll_listening_status().await.unwrap());
        assert!(state.is_listening());

        backend.listening.store(false, Ordering::SeqCst);
        assert!(!bridge.poll_listening_status().await.unwrap());
        assert!(!state.is_listening());
    }

    #[tokio::test]
    async fn test_poll_failure_leaves_flag_unchanged() {
        let backend = Arc::new(MockBackend::default());
        let (state, bridge) = bridge_with(Arc::clone(&backend));
        state.is_listening.set(true);
        backend.fail_poll.store(true, Ordering::SeqCst);

        let result = bridge.poll_listening_status().await;

        assert!(result.is_err());
        assert!(state.is_listening());
        // Poll failures stay out of the visible log buffer.
        assert!(state.logs.get().is_empty());
    }

    #[tokio::test]
    async fn test_execute_command_returns_response_and_logs() {
        let (state, bridge) = bridge_with(Arc::new(MockBackend::default()));

        let result = bridge.execute_command_by_text("open browser").await.unwrap();

        assert_eq!(result, "Executing command: open browser");
        let logs = state.logs.get();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("Command executed"));
    }

    #[tokio::test]
    async fn test_execute_command_failure_is_logged() {
        let backend = Arc::new(MockBackend::default());
        backend.fail_execute.store(true, Ordering::SeqCst);
        let (state, bridge) = bridge_with(backend);

        let result = bridge.execute_command_by_text("open browser").await;

        assert!(result.is_err());
        let logs = state.logs.get();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("Failed to execute command"));
    }

    #[tokio::test]
    async fn test_show_in_explorer_touches_no_state() {
        let (state, bridge) = bridge_with(Arc::new(MockBackend::default()));

        bridge.show_in_explorer("/tmp/hermes.log").await.unwrap();

        assert!(!state.is_listening());
        assert!(state.logs.get().is_empty());
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("hello"), "Hello");
        assert_eq!(capitalize_first("Hello"), "Hello");
        assert_eq!(capitalize_first("h"), "H");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_capitalize_first_multibyte() {
        assert_eq!(capitalize_first("é"), "É");
        assert_eq!(capitalize_first("ßeta"), "SSeta");
    }
}
