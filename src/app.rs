//! Application object
//!
//! [`App`] ties the layer together: it owns the reactive state, the action
//! bridge and the recurring status poll. Construction does no I/O;
//! [`App::initialize`] runs the startup fetches, [`App::start_polling`]
//! spawns the poll task and [`App::dispose`] tears it down again.

use crate::backend::Backend;
use crate::bridge::ActionBridge;
use crate::config::RemoteConfig;
use crate::state::AppState;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Period of the recurring listening-status poll.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Key of the assistant voice entry in the backend key-value store.
const ASSISTANT_VOICE_KEY: &str = "assistant_voice";

/// The UI-side application: reactive state, action bridge and poll task.
pub struct App {
    state: Arc<AppState>,
    bridge: Arc<ActionBridge>,
    backend: Arc<dyn Backend>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl App {
    /// Builds the application around `backend`. No backend call is made
    /// until [`initialize`](Self::initialize) or
    /// [`start_polling`](Self::start_polling).
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let state = Arc::new(AppState::new());
        let bridge = Arc::new(ActionBridge::new(Arc::clone(&state), Arc::clone(&backend)));
        Self {
            state,
            bridge,
            backend,
            poll_task: Mutex::new(None),
        }
    }

    /// The reactive state shared with UI consumers.
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// The action bridge for user-triggered operations.
    pub fn bridge(&self) -> &Arc<ActionBridge> {
        &self.bridge
    }

    /// Runs the startup fetches: assistant voice, backend config and the
    /// static links.
    ///
    /// The fetches are independent: each failure is logged and leaves the
    /// corresponding cell at its default value, and the remaining fetches
    /// still run. Not retried; the cells stay at defaults until restart.
    pub async fn initialize(&self) {
        match self.backend.db_read(ASSISTANT_VOICE_KEY).await {
            Ok(voice) => self.state.assistant_voice.set(voice),
            Err(e) => tracing::error!("Failed to read assistant voice: {}", e),
        }

        match self.backend.get_config().await {
            Ok(payload) => match RemoteConfig::parse(&payload) {
                Ok(config) => self.state.apply_config(&config),
                Err(e) => tracing::error!("Failed to parse backend config: {}", e),
            },
            Err(e) => tracing::error!("Failed to fetch backend config: {}", e),
        }

        match self.backend.get_tg_official_link().await {
            Ok(url) => self.state.links.update(|l| l.telegram = url),
            Err(e) => tracing::error!("Failed to fetch Telegram link: {}", e),
        }
        match self.backend.get_feedback_link().await {
            Ok(url) => self.state.links.update(|l| l.feedback = url),
            Err(e) => tracing::error!("Failed to fetch feedback link: {}", e),
        }
        match self.backend.get_repository_link().await {
            Ok(url) => self.state.links.update(|l| l.repository = url),
            Err(e) => tracing::error!("Failed to fetch repository link: {}", e),
        }
        match self.backend.get_log_file_path().await {
            Ok(path) => self.state.links.update(|l| l.log_file = path),
            Err(e) => tracing::error!("Failed to fetch log file path: {}", e),
        }

        tracing::info!("UI state initialised");
    }

    /// Spawns the recurring task that mirrors backend listening state into
    /// the store every [`POLL_INTERVAL`]. Idempotent while a poll task is
    /// already running.
    pub fn start_polling(&self) {
        let mut task = self.poll_task.lock();
        if task.is_some() {
            return;
        }

        let bridge = Arc::clone(&self.bridge);
        *task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(POLL_INTERVAL);
            loop {
                interval.tick().await;
                // Failures are logged inside the bridge and leave the flag
                // unchanged; the next tick tries again.
                let _ = bridge.poll_listening_status().await;
            }
        }));
        tracing::info!("Status poll started ({:?} period)", POLL_INTERVAL);
    }

    /// Stops the recurring poll. Idempotent; the state cells keep their
    /// last values.
    pub fn dispose(&self) {
        if let Some(task) = self.poll_task.lock().take() {
            task.abort();
            tracing::info!("Status poll stopped");
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.dispose();
    }
}
