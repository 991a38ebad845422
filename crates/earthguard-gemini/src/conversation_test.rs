use std::future::Future;
use std::time::Duration;

use earthguard_core::ChatRole;
use tokio::sync::Notify;

use super::*;

struct Scripted {
    reply: Result<String, ChatError>,
}

impl ContentGenerator for Scripted {
    fn generate(&self, _prompt: &str) -> impl Future<Output = Result<String, ChatError>> + Send {
        let reply = self.reply.clone();
        async move { reply }
    }
}

/// Holds every answer until the test releases the gate.
struct Gated {
    gate: Arc<Notify>,
}

impl ContentGenerator for Gated {
    fn generate(&self, _prompt: &str) -> impl Future<Output = Result<String, ChatError>> + Send {
        let gate = Arc::clone(&self.gate);
        async move {
            gate.notified().await;
            Ok("late answer".to_string())
        }
    }
}

fn scripted(reply: Result<String, ChatError>) -> Conversation<Scripted> {
    Conversation::new(Arc::new(ChatGateway::new(Scripted { reply })))
}

fn gated() -> (Arc<Conversation<Gated>>, Arc<Notify>) {
    let gate = Arc::new(Notify::new());
    let gateway = ChatGateway::new(Gated {
        gate: Arc::clone(&gate),
    });
    (Arc::new(Conversation::new(Arc::new(gateway))), gate)
}

async fn wait_until_busy<G: ContentGenerator>(conversation: &Conversation<G>) {
    while !conversation.is_busy() {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn answer_is_appended_after_question() {
    let conversation = scripted(Ok("**Compost** it".to_string()));

    let outcome = conversation.submit("Banana peels?").await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Answered);
    assert_eq!(
        conversation.messages(),
        vec![
            ChatMessage::user("Banana peels?"),
            ChatMessage::assistant("**Compost** it"),
        ]
    );
    assert!(!conversation.is_busy());
}

#[tokio::test]
async fn quota_failure_becomes_single_fallback_message() {
    let conversation = scripted(Err(ChatError::QuotaExceeded(
        "quota exceeded for project".to_string(),
    )));

    let outcome = conversation.submit("Where do batteries go?").await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Failed(FailureKind::QuotaExceeded));
    let messages = conversation.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, ChatRole::Assistant);
    assert!(messages[1].is_error);
    assert_eq!(messages[1].content, FALLBACK_MESSAGE);
    assert!(!conversation.is_busy(), "input must be re-enabled after failure");
}

#[tokio::test]
async fn every_failure_kind_uses_same_fallback() {
    for err in [
        ChatError::Auth("API key not valid".to_string()),
        ChatError::Transient("connection reset".to_string()),
    ] {
        let conversation = scripted(Err(err));
        conversation.submit("q").await.unwrap();
        let last = conversation.messages().pop().unwrap();
        assert!(last.is_error);
        assert_eq!(last.content, FALLBACK_MESSAGE);
    }
}

#[tokio::test]
async fn blank_question_is_rejected_and_not_recorded() {
    let conversation = scripted(Ok("unused".to_string()));
    assert_eq!(
        conversation.submit("  ").await.unwrap_err(),
        ChatError::EmptyQuestion
    );
    assert!(conversation.messages().is_empty());
}

#[tokio::test]
async fn overlapping_submission_is_rejected_as_busy() {
    let (conversation, gate) = gated();

    let first = tokio::spawn({
        let conversation = Arc::clone(&conversation);
        async move { conversation.submit("first").await }
    });
    wait_until_busy(&conversation).await;

    assert_eq!(
        conversation.submit("second").await.unwrap_err(),
        ChatError::Busy
    );

    gate.notify_one();
    let outcome = first.await.expect("task panicked").unwrap();
    assert_eq!(outcome, SubmitOutcome::Answered);
    assert!(!conversation.is_busy());

    let contents: Vec<String> = conversation
        .messages()
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert_eq!(contents, vec!["first", "late answer"]);
}

#[tokio::test]
async fn late_answer_after_dismiss_is_discarded() {
    let (conversation, gate) = gated();

    let pending = tokio::spawn({
        let conversation = Arc::clone(&conversation);
        async move { conversation.submit("still there?").await }
    });
    wait_until_busy(&conversation).await;

    conversation.dismiss();
    gate.notify_one();

    let outcome = pending.await.expect("task panicked").unwrap();
    assert_eq!(outcome, SubmitOutcome::Discarded);
    assert_eq!(
        conversation.messages(),
        vec![ChatMessage::user("still there?")]
    );
    assert!(!conversation.is_busy());
}

#[tokio::test]
async fn dropping_pending_submission_releases_guard() {
    let (conversation, gate) = gated();

    let timed_out =
        tokio::time::timeout(Duration::from_millis(20), conversation.submit("slow")).await;
    assert!(timed_out.is_err());
    assert!(!conversation.is_busy());

    gate.notify_one();
    let outcome = conversation.submit("again").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Answered);
}
