//! Kiosk Gateway - Voice-driven café ordering assistant
//!
//! This library provides the core functionality for the kiosk gateway:
//! - Dialogue state machine for guided ordering in Korean
//! - Keyword slot parsers with optional LLM-enhanced fallbacks
//! - Speech collaborators (Whisper STT, OpenAI TTS with a disk cache)
//! - HTTP session API for kiosk clients
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  Kiosk Client                        │
//! │        microphone  │  touch screen  │  speaker       │
//! └────────────────────┬────────────────────────────────┘
//!                      │ HTTP
//! ┌────────────────────▼────────────────────────────────┐
//! │                 Kiosk Gateway                        │
//! │   Sessions  │  Dispatcher  │  Parsers  │  STT/TTS   │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │            OpenAI APIs (optional)                    │
//! │   Whisper  │  Speech  │  Chat (enhanced parsing)    │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod menu;
pub mod nlu;
pub mod order;
pub mod voice;

pub use config::Config;
pub use dialogue::{Dispatcher, OrderPayload, OrderSnapshot, SessionRegistry, SlotStore, Step};
pub use error::{Error, Result};
