//! Speech collaborators: transcription, synthesis, and their retry policy

pub mod retry;
mod stt;
mod tts;

pub use stt::Transcriber;
pub use tts::Synthesizer;
