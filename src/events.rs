//! Backend-pushed events
//!
//! Besides answering invocations, the backend pushes updates the UI cannot
//! poll for: newly recognized utterances, the assistant's spoken phrase and
//! status changes. [`BackendEvent`] is the typed form of those pushes;
//! [`AppState::apply_event`] routes each one into the matching cell.

use crate::state::AppState;
use serde::{Deserialize, Serialize};

/// An update pushed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendEvent {
    /// A new utterance was recognized.
    Recognized { text: String },
    /// The assistant started speaking a phrase.
    AssistantPhrase { text: String },
    /// The human-readable status label changed.
    StatusChanged { label: String },
    /// A command finished executing.
    CommandExecuted { name: String },
}

impl AppState {
    /// Routes a backend event into the matching state cell.
    ///
    /// Command completions are also mirrored into the visible log buffer.
    pub fn apply_event(&self, event: BackendEvent) {
        match event {
            BackendEvent::Recognized { text } => {
                tracing::debug!("Recognized: {}", text);
                self.recognized_text.set(text);
            }
            BackendEvent::AssistantPhrase { text } => {
                self.current_phrase.set(text);
            }
            BackendEvent::StatusChanged { label } => {
                self.status.set(label);
            }
            BackendEvent::CommandExecuted { name } => {
                self.add_log(&format!("Command executed: {}", name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_updates_text_cell() {
        let state = AppState::new();
        state.apply_event(BackendEvent::Recognized {
            text: "open the browser".to_string(),
        });
        assert_eq!(state.recognized_text.get(), "open the browser");
    }

    #[test]
    fn test_assistant_phrase_updates_cell() {
        let state = AppState::new();
        state.apply_event(BackendEvent::AssistantPhrase {
            text: "At your service".to_string(),
        });
        assert_eq!(state.current_phrase.get(), "At your service");
    }

    #[test]
    fn test_status_changed_replaces_label() {
        let state = AppState::new();
        state.apply_event(BackendEvent::StatusChanged {
            label: "Listening".to_string(),
        });
        assert_eq!(state.status.get(), "Listening");
    }

    #[test]
    fn test_command_executed_lands_in_log_buffer() {
        let state = AppState::new();
        state.apply_event(BackendEvent::CommandExecuted {
            name: "weather".to_string(),
        });

        let logs = state.logs.get();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].ends_with("] Command executed: weather"));
    }

    #[test]
    fn test_event_serialisation_roundtrip() {
        let event = BackendEvent::Recognized {
            text: "hello".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"recognized""#));

        let back: BackendEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, BackendEvent::Recognized { text } if text == "hello"));
    }
}
