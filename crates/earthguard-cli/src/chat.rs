//! `ask` command: one-shot answers and the interactive assistant session.

use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::Arc;

use anyhow::Context;
use earthguard_core::{AppConfig, ChatMessage};
use earthguard_gemini::{
    ChatError, ChatGateway, Conversation, GeminiClient, SubmitOutcome, SUGGESTED_QUESTIONS,
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Answer `question`, or start an interactive session when it is `None`.
///
/// # Errors
///
/// Returns an error if no Gemini API key is configured, the client cannot be
/// built, or stdin cannot be read. Upstream failures are not errors: the
/// fallback message is printed instead.
pub(crate) async fn run_ask(
    config: &AppConfig,
    question: Option<&str>,
    suggestions: bool,
) -> anyhow::Result<()> {
    if suggestions {
        print!("{}", render_suggestions());
        return Ok(());
    }

    let api_key = config
        .gemini_api_key
        .as_deref()
        .context("GEMINI_API_KEY is not set; the assistant is unavailable")?;
    let client = GeminiClient::with_base_url(
        api_key,
        &config.gemini_model,
        config.gemini_timeout_secs,
        &config.gemini_base_url,
    )?;
    let conversation = Conversation::new(Arc::new(ChatGateway::new(client)));

    match question {
        Some(question) => ask_once(&conversation, question).await,
        None => interactive(&conversation).await,
    }
}

async fn ask_once(
    conversation: &Conversation<GeminiClient>,
    question: &str,
) -> anyhow::Result<()> {
    let outcome = conversation.submit(question).await?;
    print_reply(conversation, outcome);
    Ok(())
}

async fn interactive(conversation: &Conversation<GeminiClient>) -> anyhow::Result<()> {
    println!("EarthGuard eco assistant. Ask about recycling, composting or waste disposal.");
    println!("Type `exit` to leave; Ctrl-C stops waiting for an answer.");
    println!();
    print!("{}", render_suggestions());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            break;
        }

        let line = resolve_suggestion(line);
        tokio::select! {
            result = conversation.submit(line) => match result {
                Ok(outcome) => print_reply(conversation, outcome),
                Err(ChatError::EmptyQuestion) => {}
                Err(err) => eprintln!("{err}"),
            },
            _ = tokio::signal::ctrl_c() => {
                conversation.dismiss();
                println!("(stopped waiting for the answer)");
            }
        }
    }
    Ok(())
}

/// A bare number picks the matching starter question.
fn resolve_suggestion(input: &str) -> &str {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| SUGGESTED_QUESTIONS.get(i))
        .map_or(input, |s| s.question)
}

fn print_reply(conversation: &Conversation<GeminiClient>, outcome: SubmitOutcome) {
    if outcome == SubmitOutcome::Discarded {
        return;
    }
    if let Some(reply) = last_assistant_message(&conversation.messages()) {
        println!("{}", reply.content);
    }
}

fn last_assistant_message(messages: &[ChatMessage]) -> Option<&ChatMessage> {
    messages
        .iter()
        .rev()
        .find(|m| m.role == earthguard_core::ChatRole::Assistant)
}

fn render_suggestions() -> String {
    let mut out = String::from("Try asking:\n");
    for (i, suggestion) in SUGGESTED_QUESTIONS.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} [{}]",
            i + 1,
            suggestion.question,
            suggestion.tag
        );
    }
    out
}
