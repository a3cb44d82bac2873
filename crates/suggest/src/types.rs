use overmoney_core::{Category, CategoryId, ResolvedTransaction, Vocabulary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Work item for the suggestion worker: one uncategorized transaction and the
/// categories it could belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Correlates the answer with the stored transaction.
    pub transaction_id: Uuid,
    pub description: String,
    pub categories: Vec<Category>,
}

impl SuggestionRequest {
    pub fn new(transaction_id: Uuid, transaction: &ResolvedTransaction, vocabulary: &Vocabulary) -> Self {
        Self {
            transaction_id,
            description: transaction.description.clone(),
            categories: vocabulary.categories().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub transaction_id: Uuid,
    /// `None` when the recognizer had no opinion.
    pub category: Option<CategoryId>,
}
