//! Chat gateway for the EarthGuard assistant.
//!
//! Wraps a user question in a fixed instructional prompt, sends it to the
//! Gemini `generateContent` endpoint, and returns the Markdown reply or a
//! classified [`ChatError`]. [`Conversation`] layers the transcript and the
//! one-request-at-a-time rule on top of [`ChatGateway`].

pub mod classify;
pub mod client;
pub mod conversation;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod types;

pub use classify::{classify, FailureKind};
pub use client::GeminiClient;
pub use conversation::{Conversation, SubmitOutcome};
pub use error::ChatError;
pub use gateway::{ChatGateway, ContentGenerator};
pub use prompt::{build_prompt, SuggestedQuestion, FALLBACK_MESSAGE, SUGGESTED_QUESTIONS};
