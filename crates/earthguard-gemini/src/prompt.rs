use serde::Serialize;

/// Shown to the user in place of an answer whenever the upstream call fails.
pub const FALLBACK_MESSAGE: &str = "I apologize, but I'm having trouble connecting. Please try asking about waste management, recycling, or sustainability topics.";

const PROMPT_PREFIX: &str = "As an eco-friendly AI assistant, provide detailed advice about: ";

const PROMPT_SUFFIX: &str = ". \n    Use Markdown formatting for:\n    - Headings (###)\n    - Bold text (**)\n    - Lists (*)\n    - Code blocks (``)\n    Make the response well-structured and easy to read.";

/// Wrap `question` verbatim in the Markdown-advice instructions.
#[must_use]
pub fn build_prompt(question: &str) -> String {
    format!("{PROMPT_PREFIX}{question}{PROMPT_SUFFIX}")
}

/// Starter question offered before the first message of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuggestedQuestion {
    pub question: &'static str,
    pub tag: &'static str,
}

pub const SUGGESTED_QUESTIONS: [SuggestedQuestion; 5] = [
    SuggestedQuestion {
        question: "How do I properly recycle electronics?",
        tag: "E-Waste",
    },
    SuggestedQuestion {
        question: "What items can be composted at home?",
        tag: "Composting",
    },
    SuggestedQuestion {
        question: "How to reduce plastic waste in daily life?",
        tag: "Plastic",
    },
    SuggestedQuestion {
        question: "What are the best practices for recycling paper?",
        tag: "Paper",
    },
    SuggestedQuestion {
        question: "How to dispose of hazardous materials safely?",
        tag: "Hazardous",
    },
];
