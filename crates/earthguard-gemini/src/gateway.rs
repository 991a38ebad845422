use std::future::Future;

use crate::client::GeminiClient;
use crate::error::ChatError;
use crate::prompt::build_prompt;

/// Source of generated text for a prompt.
///
/// Implemented by [`GeminiClient`]; tests substitute scripted generators.
pub trait ContentGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, ChatError>> + Send;
}

impl ContentGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, ChatError>> + Send {
        self.generate_content(prompt)
    }
}

/// Stateless question-to-Markdown gateway. No answers are cached.
pub struct ChatGateway<G> {
    generator: G,
}

impl<G: ContentGenerator> ChatGateway<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Ask one question and return the reply text verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::EmptyQuestion`] without any network call when the
    /// question is blank, otherwise whatever the generator reports.
    pub async fn ask(&self, question: &str) -> Result<String, ChatError> {
        if question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        let prompt = build_prompt(question);
        match self.generator.generate(&prompt).await {
            Ok(answer) => {
                tracing::debug!(answer_len = answer.len(), "chat answer received");
                Ok(answer)
            }
            Err(err) => {
                if let Some(kind) = err.failure_kind() {
                    tracing::warn!(
                        kind = %kind,
                        error = %err,
                        "chat request failed: {}",
                        kind.describe()
                    );
                }
                Err(err)
            }
        }
    }
}
