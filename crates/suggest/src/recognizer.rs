use overmoney_core::CategoryId;
use thiserror::Error;

use crate::types::SuggestionRequest;

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("Recognizer backend error: {0}")]
    Backend(String),
    #[error("Recognizer suggested unknown category {0}")]
    UnknownCategory(CategoryId),
}

/// Abstraction over a category recognition backend.
/// Implementations pick one of the request's candidate categories, or none.
pub trait CategoryRecognizer: Send + Sync {
    fn recognize(&self, request: &SuggestionRequest) -> Result<Option<CategoryId>, RecognizerError>;
}

// ── Mock backend (used for tests) ───────────────────────────────────────────

/// Returns a preset answer regardless of the request.
pub struct MockRecognizer {
    pub answer: Option<CategoryId>,
}

impl MockRecognizer {
    pub fn new(answer: Option<CategoryId>) -> Self {
        Self { answer }
    }
}

impl CategoryRecognizer for MockRecognizer {
    fn recognize(&self, _request: &SuggestionRequest) -> Result<Option<CategoryId>, RecognizerError> {
        Ok(self.answer)
    }
}

// ── Substring backend ───────────────────────────────────────────────────────

/// Local fallback: suggests the lowest-id category whose name or keyword
/// occurs anywhere inside the description, e.g. "кофе" inside "кофейня".
#[derive(Debug, Default)]
pub struct SubstringRecognizer;

impl CategoryRecognizer for SubstringRecognizer {
    fn recognize(&self, request: &SuggestionRequest) -> Result<Option<CategoryId>, RecognizerError> {
        let description = request.description.to_lowercase();
        let mut candidates: Vec<_> = request.categories.iter().collect();
        candidates.sort_by_key(|c| c.id);

        let hit = candidates.into_iter().find(|c| {
            let name = c.name.trim().to_lowercase();
            (!name.is_empty() && description.contains(&name))
                || c.keywords.iter().any(|k| description.contains(k.as_str()))
        });
        Ok(hit.map(|c| c.id))
    }
}
