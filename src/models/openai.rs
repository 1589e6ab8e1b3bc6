// Legacy OpenAI chat-completion shape
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Chat-completion result as returned by the GPT-4 Vision integration this
/// crate replaces. Callers read `choices[0].message.content` and
/// `usage.total_tokens`; nothing else is reproduced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
}

/// Token usage. Gemini counts tokens differently, so this is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    pub total_tokens: u32,
}

impl ChatCompletion {
    /// Wrap model text as a single-choice completion with zero usage.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: Message {
                    content: content.into(),
                },
            }],
            usage: Usage::default(),
        }
    }

    /// Content of the first choice.
    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.message.content.as_str())
    }
}
