//! A chat transcript with at most one question in flight.
//!
//! [`Conversation::submit`] holds an in-flight guard for the whole call. The
//! guard is released on drop, so an error, an early return, or the caller
//! dropping the future all re-enable submission. [`Conversation::dismiss`]
//! marks any outstanding answer as stale: it is discarded when it arrives
//! instead of being appended.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use earthguard_core::ChatMessage;

use crate::classify::FailureKind;
use crate::error::ChatError;
use crate::gateway::{ChatGateway, ContentGenerator};
use crate::prompt::FALLBACK_MESSAGE;

/// What happened to a submitted question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The Markdown answer was appended.
    Answered,
    /// The fallback message was appended as an error entry.
    Failed(FailureKind),
    /// The conversation was dismissed while waiting; nothing was appended.
    Discarded,
}

pub struct Conversation<G> {
    gateway: Arc<ChatGateway<G>>,
    messages: Mutex<Vec<ChatMessage>>,
    in_flight: AtomicBool,
    epoch: AtomicU64,
}

struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<G: ContentGenerator> Conversation<G> {
    pub fn new(gateway: Arc<ChatGateway<G>>) -> Self {
        Self {
            gateway,
            messages: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    /// Ask a question and append the exchange to the transcript.
    ///
    /// Upstream failures never surface as errors: they are recorded as one
    /// error-flagged assistant message carrying [`FALLBACK_MESSAGE`].
    ///
    /// # Errors
    ///
    /// - [`ChatError::EmptyQuestion`] for a blank question (nothing appended).
    /// - [`ChatError::Busy`] while another question is outstanding.
    pub async fn submit(&self, question: &str) -> Result<SubmitOutcome, ChatError> {
        if question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(ChatError::Busy)?;
        let epoch = self.epoch.load(Ordering::Acquire);

        self.lock_messages().push(ChatMessage::user(question));

        let result = self.gateway.ask(question).await;

        if self.epoch.load(Ordering::Acquire) != epoch {
            tracing::debug!("conversation dismissed; discarding late chat response");
            return Ok(SubmitOutcome::Discarded);
        }

        let mut messages = self.lock_messages();
        match result {
            Ok(answer) => {
                messages.push(ChatMessage::assistant(answer));
                Ok(SubmitOutcome::Answered)
            }
            Err(err) => {
                let kind = err.failure_kind().unwrap_or(FailureKind::Transient);
                messages.push(ChatMessage::assistant_error(FALLBACK_MESSAGE));
                Ok(SubmitOutcome::Failed(kind))
            }
        }
    }

    /// Stop waiting for the outstanding answer, if any.
    pub fn dismiss(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Whether a question is currently outstanding (input should be disabled).
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Snapshot of the transcript in order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock_messages().clone()
    }

    fn lock_messages(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
