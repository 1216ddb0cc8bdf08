//! Hermes UI state-synchronization layer
//!
//! Mirrors backend-owned state (listening status, recognized text,
//! configuration) into reactive cells the interface renders, and forwards
//! user actions to the assistant backend through an async invocation
//! boundary. Speech recognition, command execution and persistence live in
//! the backend; this crate is the glue that keeps the UI's picture of them
//! current.

pub mod app;
pub mod backend;
pub mod bridge;
pub mod cell;
pub mod config;
pub mod events;
pub mod state;

pub use app::{App, POLL_INTERVAL};
pub use backend::{Backend, BackendError};
pub use bridge::{capitalize_first, ActionBridge};
pub use cell::{Cell, Subscription};
pub use config::RemoteConfig;
pub use events::BackendEvent;
pub use state::{AppState, SpeechBackend, StaticLinks, LOG_CAPACITY};
