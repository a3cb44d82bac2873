use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use overmoney_core::{CategoryId, ChatId, Message, ResolvedTransaction, UserId, Vocabulary};
use overmoney_interpret::Interpreter;
use overmoney_suggest::Suggestion;
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

/// One line of machine-readable output.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok {
        transaction_id: Uuid,
        transaction: ResolvedTransaction,
    },
    Error {
        kind: &'static str,
        message: String,
        text: String,
    },
    Suggested {
        transaction_id: Uuid,
        category: CategoryId,
    },
}

impl Outcome {
    pub fn render(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize output")
    }

    /// Suggestions without a category are not reported.
    pub fn from_suggestion(s: Suggestion) -> Option<Outcome> {
        s.category.map(|category| Outcome::Suggested {
            transaction_id: s.transaction_id,
            category,
        })
    }
}

pub fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary> {
    let Some(path) = path else {
        return Ok(Vocabulary::empty());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read vocabulary file {}", path.display()))?;
    let vocabulary = Vocabulary::from_toml(&content)
        .with_context(|| format!("Invalid vocabulary file {}", path.display()))?;
    Ok(vocabulary)
}

pub fn interpret_line(
    text: &str,
    sender: UserId,
    chat: ChatId,
    received_at: DateTime<Utc>,
    vocabulary: &Vocabulary,
) -> Outcome {
    let message = Message::new(text, sender, chat, received_at);
    match Interpreter::interpret(&message, vocabulary) {
        Ok(transaction) => Outcome::Ok {
            transaction_id: Uuid::new_v4(),
            transaction,
        },
        Err(e) => Outcome::Error {
            kind: e.kind(),
            message: e.to_string(),
            text: text.to_string(),
        },
    }
}
