use overmoney_core::{Message, ResolvedTransaction, Vocabulary};

use crate::amount::{AmountLocator, InterpretError};
use crate::resolver::CategoryResolver;

/// Turns one chat message into a transaction: amount first, then category.
pub struct Interpreter;

impl Interpreter {
    pub fn interpret(
        message: &Message,
        vocabulary: &Vocabulary,
    ) -> Result<ResolvedTransaction, InterpretError> {
        let parsed = AmountLocator::locate(&message.text).inspect_err(|e| {
            tracing::debug!(chat = %message.chat, kind = e.kind(), "message not interpreted");
        })?;

        let category = CategoryResolver::new(vocabulary)
            .resolve(&parsed.description)
            .map(|r| r.category.id);

        tracing::debug!(
            chat = %message.chat,
            amount = %parsed.amount,
            position = %parsed.position,
            category = ?category,
            "message interpreted"
        );

        Ok(ResolvedTransaction {
            chat: message.chat,
            amount: parsed.amount,
            description: parsed.description,
            category,
            position: parsed.position,
            date: message.date,
        })
    }

    /// An uncategorized transaction is worth a background suggestion only when
    /// the account has categories to choose from.
    pub fn needs_suggestion(transaction: &ResolvedTransaction, vocabulary: &Vocabulary) -> bool {
        !transaction.is_categorized() && !vocabulary.is_empty()
    }
}
