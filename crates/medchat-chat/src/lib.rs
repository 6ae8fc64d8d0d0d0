//! Conversation management for medchat
//!
//! This crate owns the in-memory session of one chat view, the completion
//! client that answers it, and the submission flow tying them together.

pub mod completion;
pub mod controller;
pub mod session;
pub mod speech;

// Re-export commonly used types
pub use completion::{CompletionClient, Reply, ReplyStatus};
pub use controller::{ChatController, Draft, SubmissionState, SubmitOutcome};
pub use session::{Session, SessionView};
pub use speech::{Narrator, SpeechRecognizer, SpeechSynthesizer};
