use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A spending category together with the keyword aliases that select it.
/// Keywords are stored lowercased and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
}

impl Category {
    pub fn new(id: CategoryId, name: &str) -> Self {
        Category {
            id,
            name: name.to_string(),
            keywords: BTreeSet::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.extend(
            keywords
                .into_iter()
                .filter_map(|k| fold_keyword(k.as_ref())),
        );
        self
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        fold_keyword(keyword).is_some_and(|k| self.keywords.contains(&k))
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum VocabularyError {
    #[error("Category not found: {0}")]
    UnknownCategory(CategoryId),
    #[error("Category id {0} is used more than once")]
    DuplicateCategory(CategoryId),
    #[error("Keyword must not be blank")]
    EmptyKeyword,
    #[error("Failed to parse vocabulary: {0}")]
    Parse(String),
}

/// Snapshot of one account's categories and keyword aliases.
///
/// Categories are kept sorted by id, which is also the order lookups visit
/// them in. Readers never mutate it; the `assign_keyword`/`remove_keyword`
/// operations are for the owner of the data when it builds the next snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VocabularyFile")]
pub struct Vocabulary {
    #[serde(rename = "category")]
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct VocabularyFile {
    #[serde(rename = "category", default)]
    categories: Vec<Category>,
}

impl TryFrom<VocabularyFile> for Vocabulary {
    type Error = VocabularyError;

    fn try_from(file: VocabularyFile) -> Result<Self, Self::Error> {
        Vocabulary::new(file.categories)
    }
}

impl Vocabulary {
    pub fn new(categories: Vec<Category>) -> Result<Self, VocabularyError> {
        let mut categories: Vec<Category> = categories
            .into_iter()
            .map(|c| {
                let keywords = c.keywords.iter().filter_map(|k| fold_keyword(k)).collect();
                Category { keywords, ..c }
            })
            .collect();
        categories.sort_by_key(|c| c.id);
        if let Some(dup) = categories.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(VocabularyError::DuplicateCategory(dup[0].id));
        }
        Ok(Vocabulary { categories })
    }

    pub fn empty() -> Self {
        Vocabulary::default()
    }

    /// Parses a `[[category]]` table array:
    ///
    /// ```toml
    /// [[category]]
    /// id = 1
    /// name = "Food"
    /// keywords = ["coffee", "кофе"]
    /// ```
    pub fn from_toml(toml_content: &str) -> Result<Self, VocabularyError> {
        let file: VocabularyFile =
            toml::from_str(toml_content).map_err(|e| VocabularyError::Parse(e.to_string()))?;
        Vocabulary::new(file.categories)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Categories in ascending id order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|idx| &self.categories[idx])
    }

    /// Category currently owning `keyword`, lowest id first if the data is inconsistent.
    pub fn owner_of(&self, keyword: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.has_keyword(keyword))
    }

    /// Makes `keyword` an alias of `category`, detaching it from any other
    /// category so that each keyword maps to a single category.
    pub fn assign_keyword(
        &mut self,
        keyword: &str,
        category: CategoryId,
    ) -> Result<(), VocabularyError> {
        let keyword = fold_keyword(keyword).ok_or(VocabularyError::EmptyKeyword)?;
        let idx = self
            .categories
            .binary_search_by_key(&category, |c| c.id)
            .map_err(|_| VocabularyError::UnknownCategory(category))?;

        for c in &mut self.categories {
            c.keywords.remove(&keyword);
        }
        self.categories[idx].keywords.insert(keyword);
        Ok(())
    }

    /// Removes `keyword` from every category. Returns whether anything was removed.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let Some(keyword) = fold_keyword(keyword) else {
            return false;
        };
        let mut removed = false;
        for c in &mut self.categories {
            removed |= c.keywords.remove(&keyword);
        }
        removed
    }
}

fn fold_keyword(keyword: &str) -> Option<String> {
    let folded = keyword.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    (!folded.is_empty()).then_some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> CategoryId {
        CategoryId(n)
    }

    fn sample() -> Vocabulary {
        Vocabulary::new(vec![
            Category::new(id(2), "Transport").with_keywords(["taxi", "Метро"]),
            Category::new(id(1), "Food").with_keywords(["Coffee", " кофе  латте "]),
        ])
        .unwrap()
    }

    #[test]
    fn categories_sorted_by_id() {
        let v = sample();
        let ids: Vec<_> = v.categories().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![id(1), id(2)]);
    }

    #[test]
    fn keywords_are_folded() {
        let v = sample();
        let food = v.get(id(1)).unwrap();
        assert!(food.keywords.contains("coffee"));
        assert!(food.keywords.contains("кофе латте"));
        assert!(v.get(id(2)).unwrap().has_keyword("МЕТРО"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Vocabulary::new(vec![
            Category::new(id(1), "Food"),
            Category::new(id(1), "Drinks"),
        ])
        .unwrap_err();
        assert_eq!(err, VocabularyError::DuplicateCategory(id(1)));
    }

    #[test]
    fn get_unknown_is_none() {
        assert!(sample().get(id(42)).is_none());
    }

    #[test]
    fn assign_keyword_moves_between_categories() {
        let mut v = sample();
        v.assign_keyword("TAXI", id(1)).unwrap();
        assert!(v.get(id(1)).unwrap().has_keyword("taxi"));
        assert!(!v.get(id(2)).unwrap().has_keyword("taxi"));
        assert_eq!(v.owner_of("taxi").unwrap().id, id(1));
    }

    #[test]
    fn assign_keyword_errors() {
        let mut v = sample();
        assert_eq!(
            v.assign_keyword("bus", id(9)),
            Err(VocabularyError::UnknownCategory(id(9)))
        );
        assert_eq!(v.assign_keyword("   ", id(1)), Err(VocabularyError::EmptyKeyword));
    }

    #[test]
    fn remove_keyword_reports_change() {
        let mut v = sample();
        assert!(v.remove_keyword("Coffee"));
        assert!(!v.remove_keyword("coffee"));
        assert!(v.owner_of("coffee").is_none());
    }

    #[test]
    fn from_toml_parses_categories() {
        let v = Vocabulary::from_toml(
            r#"
            [[category]]
            id = 3
            name = "Home"

            [[category]]
            id = 1
            name = "Food"
            keywords = ["Coffee", "кофе"]
            "#,
        )
        .unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.categories()[0].name, "Food");
        assert!(v.get(id(1)).unwrap().has_keyword("КОФЕ"));
        assert!(v.get(id(3)).unwrap().keywords.is_empty());
    }

    #[test]
    fn from_toml_rejects_duplicate_ids() {
        let doc = "[[category]]\nid = 1\nname = \"A\"\n\n[[category]]\nid = 1\nname = \"B\"\n";
        assert_eq!(
            Vocabulary::from_toml(doc),
            Err(VocabularyError::DuplicateCategory(id(1)))
        );
    }

    #[test]
    fn json_roundtrip_revalidates() {
        let v = sample();
        let json = serde_json::to_string(&v).unwrap();
        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn from_toml_empty_document_is_empty_vocabulary() {
        let v = Vocabulary::from_toml("").unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn from_toml_reports_parse_errors() {
        assert!(matches!(
            Vocabulary::from_toml("[[category]]\nid = \"x\""),
            Err(VocabularyError::Parse(_))
        ));
    }
}
