//! JSON-file persistence for learner state.
//!
//! Each document lives in its own file under the data directory and is
//! rewritten whole after every change. A store without a data directory
//! keeps everything in memory.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use vocab_core::{Catalog, CatalogError, ProgressBook, Settings, VocabularyItem, WordEdit};

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Documents persisted under the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Progress,
    Settings,
    CustomWords,
    Overrides,
    DeletedWords,
}

impl Document {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Progress => "progress.json",
            Self::Settings => "settings.json",
            Self::CustomWords => "custom_words.json",
            Self::Overrides => "word_overrides.json",
            Self::DeletedWords => "deleted_words.json",
        }
    }
}

/// Everything the routes read and mutate.
#[derive(Debug, Default, Clone)]
pub struct StoreState {
    /// Effective catalog: base plus custom words, edits and deletions.
    pub catalog: Catalog,
    pub progress: ProgressBook,
    pub settings: Settings,
    pub custom_words: Vec<VocabularyItem>,
    pub overrides: BTreeMap<String, WordEdit>,
    pub deleted: BTreeSet<String>,
}

impl StoreState {
    pub fn is_custom(&self, word_id: &str) -> bool {
        self.custom_words.iter().any(|w| w.id == word_id)
    }
}

pub struct Store {
    data_dir: Option<PathBuf>,
    state: Mutex<StoreState>,
}

impl Store {
    /// Load the base catalog and any saved learner state.
    ///
    /// A missing catalog is an error. Missing state files start empty;
    /// corrupt ones, and settings that fail validation, are logged and
    /// replaced with defaults.
    pub fn open(data_dir: &Path, catalog_path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(catalog_path).map_err(|source| StoreError::Io {
            path: catalog_path.to_path_buf(),
            source,
        })?;
        let base = Catalog::from_json(&raw)?;

        std::fs::create_dir_all(data_dir).map_err(|source| StoreError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let custom_words: Vec<VocabularyItem> = load_document(data_dir, Document::CustomWords);
        let overrides: BTreeMap<String, WordEdit> = load_document(data_dir, Document::Overrides);
        let deleted: BTreeSet<String> = load_document(data_dir, Document::DeletedWords);
        let catalog = Catalog::assemble(base, &custom_words, &overrides, &deleted);

        let state = StoreState {
            catalog,
            progress: load_document(data_dir, Document::Progress),
            settings: load_settings(data_dir),
            custom_words,
            overrides,
            deleted,
        };

        tracing::info!(
            words = state.catalog.len(),
            practiced = state.progress.words.len(),
            "store loaded"
        );

        Ok(Self {
            data_dir: Some(data_dir.to_path_buf()),
            state: Mutex::new(state),
        })
    }

    /// Store that never touches disk.
    pub fn in_memory(catalog: Catalog) -> Self {
        Self {
            data_dir: None,
            state: Mutex::new(StoreState {
                catalog,
                ..Default::default()
            }),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().await
    }

    /// Persist `next` and only then make it the live state.
    ///
    /// On a failed write `live` is left untouched, so memory never runs
    /// ahead of disk.
    pub async fn commit(
        &self,
        live: &mut StoreState,
        next: StoreState,
        documents: &[Document],
    ) -> Result<(), StoreError> {
        self.save(&next, documents).await?;
        *live = next;
        Ok(())
    }

    /// Write the given documents from `state`.
    pub async fn save(&self, state: &StoreState, documents: &[Document]) -> Result<(), StoreError> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };

        for &document in documents {
            let json = match document {
                Document::Progress => serde_json::to_vec_pretty(&state.progress)?,
                Document::Settings => serde_json::to_vec_pretty(&state.settings)?,
                Document::CustomWords => serde_json::to_vec_pretty(&state.custom_words)?,
                Document::Overrides => serde_json::to_vec_pretty(&state.overrides)?,
                Document::DeletedWords => serde_json::to_vec_pretty(&state.deleted)?,
            };
            write_atomic(&dir.join(document.file_name()), &json).await?;
        }
        Ok(())
    }
}

fn load_document<T: DeserializeOwned + Default>(dir: &Path, document: Document) -> T {
    let path = dir.join(document.file_name());
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable state file, using defaults");
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "corrupt state file, using defaults");
        T::default()
    })
}

fn load_settings(dir: &Path) -> Settings {
    let settings: Settings = load_document(dir, Document::Settings);
    match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "invalid settings file, using defaults");
            Settings::default()
        }
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    tokio::fs::write(&tmp, bytes).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vocab_core::MasteryTracker;

    const CATALOG: &str = r#"{"words": [
        {"id": "w1", "sourceTerm": "der Hund", "targetTerm": "dog", "category": "animals"},
        {"id": "w2", "sourceTerm": "die Katze", "targetTerm": "cat", "category": "animals"}
    ]}"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "vocab-store-{name}-{}-{}",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_round_trips_progress_and_edits() {
        let dir = scratch_dir("roundtrip");
        let catalog_path = dir.join("vocabulary.json");
        std::fs::write(&catalog_path, CATALOG).unwrap();
        let data_dir = dir.join("data");

        let store = Store::open(&data_dir, &catalog_path).unwrap();
        {
            let mut state = store.lock().await;
            let tracker = MasteryTracker::from_settings(&state.settings);
            state.progress.record_attempt(&tracker, "w1", true, Utc::now());
            state.deleted.insert("w2".to_string());
            state.settings.mastery_threshold = 5;
            store
                .save(
                    &state,
                    &[Document::Progress, Document::DeletedWords, Document::Settings],
                )
                .await
                .unwrap();
        }

        let reopened = Store::open(&data_dir, &catalog_path).unwrap();
        let state = reopened.lock().await;
        assert_eq!(state.progress.get("w1").unwrap().correct_count, 1);
        assert!(state.catalog.get("w2").is_none());
        assert_eq!(state.settings.mastery_threshold, 5);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_corrupt_state_falls_back_to_defaults() {
        let dir = scratch_dir("corrupt");
        let catalog_path = dir.join("vocabulary.json");
        std::fs::write(&catalog_path, CATALOG).unwrap();
        std::fs::write(dir.join("settings.json"), "{not json").unwrap();

        let store = Store::open(&dir, &catalog_path).unwrap();
        assert_eq!(store.lock().await.settings, Settings::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_invalid_settings_fall_back_to_defaults() {
        let dir = scratch_dir("invalid-settings");
        let catalog_path = dir.join("vocabulary.json");
        std::fs::write(&catalog_path, CATALOG).unwrap();
        std::fs::write(dir.join("settings.json"), r#"{"masteryThreshold": 0}"#).unwrap();

        let store = Store::open(&dir, &catalog_path).unwrap();
        assert_eq!(store.lock().await.settings.mastery_threshold, 3);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_live_state() {
        let dir = scratch_dir("failed-commit");
        let catalog_path = dir.join("vocabulary.json");
        std::fs::write(&catalog_path, CATALOG).unwrap();
        let data_dir = dir.join("data");

        let store = Store::open(&data_dir, &catalog_path).unwrap();
        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, "not a directory").unwrap();

        let mut state = store.lock().await;
        let mut next = state.clone();
        next.settings.mastery_threshold = 9;
        let result = store.commit(&mut state, next, &[Document::Settings]).await;

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(state.settings.mastery_threshold, 3);

        drop(state);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let dir = scratch_dir("missing");
        let result = Store::open(&dir, &dir.join("nope.json"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_in_memory_save_is_a_no_op() {
        let store = Store::in_memory(Catalog::from_json(CATALOG).unwrap());
        let state = store.lock().await;
        store.save(&state, &[Document::Progress]).await.unwrap();
        assert_eq!(state.catalog.len(), 2);
    }
}
