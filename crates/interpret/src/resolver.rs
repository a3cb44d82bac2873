use overmoney_core::{Category, Vocabulary};
use serde::Serialize;

use crate::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// The whole description equals a category name.
    CategoryName,
    /// The description, or one of its words, equals a keyword alias.
    Keyword,
}

/// Why a category was picked.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'v> {
    pub category: &'v Category,
    pub tier: MatchTier,
    /// The folded text that matched: the description for a name match, the keyword otherwise.
    pub matched: String,
}

/// Best-effort category lookup over one account's vocabulary.
///
/// Categories are visited in ascending id order and keywords in
/// lexicographic order, so when several categories match the one with the
/// lowest id wins.
pub struct CategoryResolver<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> CategoryResolver<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Returns `None` for "uncategorized", which is not an error.
    pub fn resolve(&self, description: &str) -> Option<Resolution<'v>> {
        let folded = normalize::fold(description);
        if folded.is_empty() || self.vocabulary.is_empty() {
            return None;
        }

        let resolution = self
            .match_category_name(&folded)
            .or_else(|| self.match_keyword(&folded));

        match &resolution {
            Some(r) => tracing::debug!(
                category = %r.category.id,
                tier = ?r.tier,
                matched = %r.matched,
                "category resolved"
            ),
            None => tracing::debug!(description = %folded, "no category matched"),
        }
        resolution
    }

    fn categories(&self) -> impl Iterator<Item = &'v Category> {
        self.vocabulary.categories().iter()
    }

    fn match_category_name(&self, folded: &str) -> Option<Resolution<'v>> {
        self.categories()
            .find(|c| normalize::fold(&c.name) == folded)
            .map(|category| Resolution {
                category,
                tier: MatchTier::CategoryName,
                matched: folded.to_string(),
            })
    }

    fn match_keyword(&self, folded: &str) -> Option<Resolution<'v>> {
        // Learned keywords may be a whole multi-word description.
        if let Some(category) = self.categories().find(|c| c.keywords.contains(folded)) {
            return Some(Resolution {
                category,
                tier: MatchTier::Keyword,
                matched: folded.to_string(),
            });
        }

        let words: Vec<String> = normalize::tokens(folded).collect();
        self.categories().find_map(|category| {
            category
                .keywords
                .iter()
                .find(|keyword| words.iter().any(|w| w == *keyword))
                .map(|keyword| Resolution {
                    category,
                    tier: MatchTier::Keyword,
                    matched: keyword.clone(),
                })
        })
    }
}

/// Shorthand for `CategoryResolver::new(vocabulary).resolve(description)`.
pub fn resolve<'v>(description: &str, vocabulary: &'v Vocabulary) -> Option<Resolution<'v>> {
    CategoryResolver::new(vocabulary).resolve(description)
}
