//! UI-visible application state
//!
//! [`AppState`] holds every reactive cell the interface renders: the
//! listening flag, recognized text, the assistant's current phrase, the
//! selected speech backend, the bounded log buffer and a handful of static
//! links fetched once at startup. The state owns no I/O; the action bridge
//! and startup routine write into it.

use crate::cell::Cell;
use crate::config::RemoteConfig;
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the visible log buffer.
pub const LOG_CAPACITY: usize = 50;

/// Default status label shown before any activity.
const DEFAULT_STATUS: &str = "Ready";

/// Speech-to-text backend selected in the assistant's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeechBackend {
    /// Offline recognition (the default when config is absent or invalid).
    #[default]
    Vosk,
    /// Cloud recognition via the Gemini API.
    Gemini,
}

impl SpeechBackend {
    /// Maps a configured engine name to a backend, falling back to Vosk for
    /// anything unrecognised.
    pub fn from_name(name: &str) -> Self {
        if name == "Gemini" {
            SpeechBackend::Gemini
        } else {
            SpeechBackend::Vosk
        }
    }
}

/// Static links and paths fetched from the backend once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLinks {
    /// Official Telegram channel URL.
    pub telegram: String,
    /// Feedback form URL.
    pub feedback: String,
    /// Source repository URL.
    pub repository: String,
    /// Path of the backend's log file on disk.
    pub log_file: String,
}

/// Reactive application state.
///
/// Shared by `Arc`; every field is a [`Cell`] so UI consumers can subscribe
/// to the values they render. Nothing here persists beyond process
/// lifetime; persistence, if any, is the backend's concern.
pub struct AppState {
    /// Last known backend listening state. May lag the backend by up to one
    /// poll interval.
    pub is_listening: Cell<bool>,
    /// Last recognized utterance; empty until first recognition.
    pub recognized_text: Cell<String>,
    /// The assistant's current spoken phrase.
    pub current_phrase: Cell<String>,
    /// Speech backend selected at startup from the backend config.
    pub selected_backend: Cell<SpeechBackend>,
    /// Whether the config reports a non-empty Gemini API key.
    pub api_key_set: Cell<bool>,
    /// Timestamp-prefixed log entries, oldest first, at most [`LOG_CAPACITY`].
    pub logs: Cell<Vec<String>>,
    /// Assistant voice name, read from the backend key-value store.
    pub assistant_voice: Cell<String>,
    /// Human-readable status label.
    pub status: Cell<String>,
    /// Static links fetched once at startup.
    pub links: Cell<StaticLinks>,
}

impl AppState {
    /// Creates the state with every cell at its default value.
    pub fn new() -> Self {
        Self {
            is_listening: Cell::new(false),
            recognized_text: Cell::default(),
            current_phrase: Cell::default(),
            selected_backend: Cell::default(),
            api_key_set: Cell::new(false),
            logs: Cell::default(),
            assistant_voice: Cell::default(),
            status: Cell::new(DEFAULT_STATUS.to_string()),
            links: Cell::default(),
        }
    }

    /// Returns the most recently observed listening state without
    /// establishing a subscription.
    pub fn is_listening(&self) -> bool {
        self.is_listening.get()
    }

    /// Appends a timestamp-prefixed entry to the visible log buffer,
    /// evicting the oldest entries past [`LOG_CAPACITY`].
    pub fn add_log(&self, message: &str) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        let entry = format!("[{}] {}", stamp, message);
        self.logs.update(|logs| {
            logs.push(entry);
            if logs.len() > LOG_CAPACITY {
                let overflow = logs.len() - LOG_CAPACITY;
                logs.drain(..overflow);
            }
        });
    }

    /// Applies a parsed backend config snapshot to the selection cells.
    pub fn apply_config(&self, config: &RemoteConfig) {
        self.selected_backend.set(config.speech_to_text_engine);
        self.api_key_set.set(config.gemini_api_key_set);
        tracing::info!(
            "Config applied: engine={:?}, gemini key set: {}",
            config.speech_to_text_engine,
            config.gemini_api_key_set
        );
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
