//! Vocabulary catalog: loading, search, and user edits.
//!
//! The effective catalog is assembled in layers: the shipped catalog, then
//! the learner's custom words, then per-word edits, then deletions.
//!
//! # Bulk format
//! ```text
//! der Hund = dog, hound
//! die Katze = cat
//! ```

use crate::error::{CatalogError, Result};
use crate::types::VocabularyItem;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use uuid::Uuid;

/// Category given to words the learner adds.
pub const CUSTOM_CATEGORY: &str = "custom";

/// Ordered word list, `{"words": [...]}` on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub words: Vec<VocabularyItem>,
}

/// A word typed in by the learner, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWord {
    pub source_term: String,
    pub target_term: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub article: Option<String>,
}

impl NewWord {
    /// Assign a fresh custom id and trim every field.
    pub fn into_item(self) -> VocabularyItem {
        VocabularyItem {
            id: new_custom_id(),
            source_term: self.source_term.trim().to_string(),
            target_term: self.target_term.trim().to_string(),
            synonyms: clean_synonyms(self.synonyms),
            category: CUSTOM_CATEGORY.to_string(),
            article: clean_article(self.article),
        }
    }
}

/// Replacement terms for an existing word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEdit {
    pub source_term: String,
    pub target_term: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
}

impl WordEdit {
    /// Trimmed copy; `None` if either term is blank.
    pub fn cleaned(&self) -> Option<Self> {
        let source_term = self.source_term.trim().to_string();
        let target_term = self.target_term.trim().to_string();
        if source_term.is_empty() || target_term.is_empty() {
            return None;
        }
        Some(Self {
            source_term,
            target_term,
            synonyms: clean_synonyms(self.synonyms.clone()),
            article: clean_article(self.article.clone()),
        })
    }

    fn apply(&self, item: &mut VocabularyItem) {
        item.source_term = self.source_term.clone();
        item.target_term = self.target_term.clone();
        item.synonyms = self.synonyms.clone();
        item.article = self.article.clone();
    }
}

/// Outcome of adding a word.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added(VocabularyItem),
    /// A word with the same source term (or source and target) exists.
    Duplicate(VocabularyItem),
}

/// Result of parsing a pasted block of `source = target, synonyms` lines.
#[derive(Debug, Default)]
pub struct BulkParse {
    pub entries: Vec<NewWord>,
    pub errors: Vec<CatalogError>,
}

pub fn new_custom_id() -> String {
    format!("custom_{}", Uuid::new_v4().simple())
}

fn clean_synonyms(synonyms: Vec<String>) -> Vec<String> {
    synonyms
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn clean_article(article: Option<String>) -> Option<String> {
    article
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}

impl Catalog {
    /// Parse a catalog file, rejecting duplicate ids.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        for item in &catalog.words {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: item.id.clone(),
                });
            }
        }
        Ok(catalog)
    }

    /// Layer custom words, edits and deletions over a base catalog.
    pub fn assemble(
        mut base: Catalog,
        custom: &[VocabularyItem],
        overrides: &BTreeMap<String, WordEdit>,
        deleted: &BTreeSet<String>,
    ) -> Self {
        for item in custom {
            if base.get(&item.id).is_none() {
                base.words.push(item.clone());
            }
        }
        for (id, edit) in overrides {
            if let Some(item) = base.get_mut(id) {
                edit.apply(item);
            }
        }
        base.words.retain(|item| !deleted.contains(&item.id));
        base
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VocabularyItem> {
        self.words.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut VocabularyItem> {
        self.words.iter_mut().find(|item| item.id == id)
    }

    /// Words whose terms or synonyms contain `query` (case-insensitive).
    /// A blank query returns everything.
    pub fn search(&self, query: &str) -> Vec<&VocabularyItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.words.iter().collect();
        }
        self.words
            .iter()
            .filter(|item| {
                item.source_term.to_lowercase().contains(&query)
                    || item.target_term.to_lowercase().contains(&query)
                    || item
                        .synonyms
                        .iter()
                        .any(|s| s.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// First word whose source term, target term or a synonym equals `term`
    /// (case-insensitive).
    pub fn find_by_term(&self, term: &str) -> Option<&VocabularyItem> {
        let term = term.trim().to_lowercase();
        self.words.iter().find(|item| {
            item.source_term.to_lowercase() == term
                || item.target_term.to_lowercase() == term
                || item.synonyms.iter().any(|s| s.to_lowercase() == term)
        })
    }

    /// Existing word that `word` would duplicate: same source and target
    /// first, otherwise same source term.
    pub fn find_duplicate(&self, word: &NewWord) -> Option<&VocabularyItem> {
        let source = word.source_term.trim().to_lowercase();
        let target = word.target_term.trim().to_lowercase();
        self.words
            .iter()
            .find(|item| {
                item.source_term.to_lowercase() == source
                    && item.target_term.to_lowercase() == target
            })
            .or_else(|| {
                self.words
                    .iter()
                    .find(|item| item.source_term.to_lowercase() == source)
            })
    }

    /// Add a learner's word unless it duplicates an existing one.
    pub fn add(&mut self, word: NewWord) -> AddOutcome {
        if let Some(existing) = self.find_duplicate(&word) {
            return AddOutcome::Duplicate(existing.clone());
        }
        let item = word.into_item();
        self.words.push(item.clone());
        AddOutcome::Added(item)
    }

    /// Apply an edit in place. Returns whether the word exists.
    pub fn edit(&mut self, id: &str, edit: &WordEdit) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                edit.apply(item);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<VocabularyItem> {
        let index = self.words.iter().position(|item| item.id == id)?;
        Some(self.words.remove(index))
    }

    /// Distinct categories in catalog order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.words
            .iter()
            .filter(|item| seen.insert(item.category.as_str()))
            .map(|item| item.category.clone())
            .collect()
    }
}

/// Parse one `source = target, synonym, ...` line (1-based `line`).
pub fn parse_bulk_line(text: &str, line: usize) -> Result<NewWord> {
    let (source, targets) = text
        .split_once('=')
        .ok_or(CatalogError::MissingSeparator { line })?;

    let source = source.trim();
    let mut targets = targets
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let target = targets.next().unwrap_or_default();

    if source.is_empty() || target.is_empty() {
        return Err(CatalogError::EmptyTerm { line });
    }

    Ok(NewWord {
        source_term: source.to_string(),
        target_term: target.to_string(),
        synonyms: targets.map(String::from).collect(),
        article: None,
    })
}

/// Parse a pasted block, collecting bad lines instead of stopping at them.
pub fn parse_bulk(text: &str) -> BulkParse {
    let mut parsed = BulkParse::default();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_bulk_line(line, idx + 1) {
            Ok(entry) => parsed.entries.push(entry),
            Err(err) => parsed.errors.push(err),
        }
    }
    parsed
}

/// Split pasted "known words" text on newlines, commas and semicolons.
pub fn split_known_terms(text: &str) -> Vec<String> {
    text.split(['\n', ',', ';'])
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CATALOG: &str = r#"{
        "words": [
            {"id": "w1", "german": "der Hund", "english": "dog", "synonyms": ["hound"], "category": "animals", "article": "der"},
            {"id": "w2", "sourceTerm": "die Katze", "targetTerm": "cat", "category": "animals"},
            {"id": "w3", "sourceTerm": "Berlin", "targetTerm": "Berlin", "category": "places"}
        ]
    }"#;

    fn catalog() -> Catalog {
        Catalog::from_json(CATALOG).unwrap()
    }

    fn new_word(source: &str, target: &str) -> NewWord {
        NewWord {
            source_term: source.to_string(),
            target_term: target.to_string(),
            synonyms: vec![],
            article: None,
        }
    }

    #[test]
    fn parses_catalog_file() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("w1").unwrap().article.as_deref(), Some("der"));
        assert_eq!(catalog.categories(), vec!["animals", "places"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"{"words": [
            {"id": "w1", "sourceTerm": "a", "targetTerm": "b"},
            {"id": "w1", "sourceTerm": "c", "targetTerm": "d"}
        ]}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateId { .. })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn search_matches_terms_and_synonyms() {
        let catalog = catalog();
        let hits: Vec<_> = catalog.search("HOUN").iter().map(|i| i.id.clone()).collect();
        assert_eq!(hits, vec!["w1"]);
        assert_eq!(catalog.search("  ").len(), 3);
    }

    #[test]
    fn find_by_term_is_exact_and_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.find_by_term("Die Katze").unwrap().id, "w2");
        assert_eq!(catalog.find_by_term("hound").unwrap().id, "w1");
        assert!(catalog.find_by_term("kat").is_none());
    }

    #[test]
    fn add_detects_duplicates() {
        let mut catalog = catalog();
        match catalog.add(new_word("DER HUND", "puppy")) {
            AddOutcome::Duplicate(existing) => assert_eq!(existing.id, "w1"),
            other => panic!("expected duplicate, got {other:?}"),
        }

        match catalog.add(new_word(" das Pferd ", " horse ")) {
            AddOutcome::Added(item) => {
                assert!(item.id.starts_with("custom_"));
                assert_eq!(item.source_term, "das Pferd");
                assert_eq!(item.category, CUSTOM_CATEGORY);
            }
            other => panic!("expected added, got {other:?}"),
        }
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn assemble_applies_layers_in_order() {
        let custom = vec![new_word("das Pferd", "horse").into_item()];
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "w2".to_string(),
            WordEdit {
                source_term: "die Katze".to_string(),
                target_term: "kitty".to_string(),
                synonyms: vec!["cat".to_string()],
                article: Some("die".to_string()),
            },
        );
        let deleted: BTreeSet<String> = ["w3".to_string()].into_iter().collect();

        let catalog = Catalog::assemble(catalog(), &custom, &overrides, &deleted);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("w2").unwrap().target_term, "kitty");
        assert!(catalog.get("w3").is_none());
        assert!(catalog.get(&custom[0].id).is_some());
    }

    #[test]
    fn bulk_lines_parse_synonyms() {
        let word = parse_bulk_line("der Hund = dog, hound , ", 1).unwrap();
        assert_eq!(word.source_term, "der Hund");
        assert_eq!(word.target_term, "dog");
        assert_eq!(word.synonyms, vec!["hound"]);
    }

    #[test]
    fn bulk_collects_errors_per_line() {
        let parsed = parse_bulk("der Hund = dog\n\nno separator\n = empty\ndie Katze=cat");
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.errors.len(), 2);
        assert!(matches!(parsed.errors[0], CatalogError::MissingSeparator { line: 3 }));
        assert!(matches!(parsed.errors[1], CatalogError::EmptyTerm { line: 4 }));
    }

    #[test]
    fn known_terms_split_on_separators() {
        assert_eq!(
            split_known_terms("Hund, Katze;\n\n  Maus "),
            vec!["hund", "katze", "maus"]
        );
    }

    #[test]
    fn blank_edit_is_rejected() {
        let edit = WordEdit {
            source_term: " ".to_string(),
            target_term: "dog".to_string(),
            synonyms: vec![],
            article: None,
        };
        assert!(edit.cleaned().is_none());
    }
}
