//! Backend configuration payload parsing
//!
//! The backend exposes its settings as a JSON-encoded string via the
//! `get_config` invocation. Only two fields matter to the UI: the selected
//! speech-to-text engine and whether a Gemini API key is present. Parsing
//! is lenient: missing fields fall back to defaults, an unknown engine
//! name falls back to Vosk, and the key itself never leaves this module.

use crate::backend::BackendError;
use crate::state::SpeechBackend;
use serde::Deserialize;

/// Raw shape of the backend config payload. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    speech_to_text_engine: String,
    api_keys: RawApiKeys,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawApiKeys {
    gemini: String,
}

/// The subset of backend configuration the UI mirrors into state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Selected speech-to-text engine.
    pub speech_to_text_engine: SpeechBackend,
    /// Whether the config carries a non-empty Gemini API key.
    pub gemini_api_key_set: bool,
}

impl RemoteConfig {
    /// Parses a `get_config` payload.
    ///
    /// An empty payload yields the defaults (Vosk, no key); malformed JSON
    /// is a [`BackendError::MalformedConfig`].
    pub fn parse(payload: &str) -> Result<Self, BackendError> {
        if payload.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig = serde_json::from_str(payload)?;
        Ok(Self {
            speech_to_text_engine: SpeechBackend::from_name(&raw.speech_to_text_engine),
            gemini_api_key_set: !raw.api_keys.gemini.is_empty(),
        })
    }
}
