//! Core vocabulary drill engine shared by the server and any other front end.
//!
//! Provides:
//! - Transcript normalization (punctuation and filler-phrase stripping)
//! - English plural/article variants
//! - Levenshtein similarity
//! - Layered answer evaluation
//! - Mastery tracking and interval-table review scheduling
//! - Practice session selection
//! - Catalog editing and learning statistics

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod fuzzy;
pub mod mastery;
pub mod normalize;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod types;
pub mod variants;

pub use catalog::{AddOutcome, BulkParse, Catalog, NewWord, WordEdit};
pub use error::{CatalogError, Result, SettingsError};
pub use evaluator::{evaluate_answer, AnswerEvaluator, Evaluation, MatchRule};
pub use fuzzy::{levenshtein_distance, similarity};
pub use mastery::{record_attempt, AttemptOutcome, MasteryPolicy, MasteryTracker};
pub use normalize::{is_repeat_command, normalize};
pub use progress::{PracticeTotals, ProgressBook};
pub use scheduler::{compute_next_review, IntervalTable, ReviewScheduler};
pub use session::{select_default_session, select_session};
pub use stats::{CategoryProgress, StatisticsReport};
pub use types::{MasteryState, Settings, VocabularyItem, WordProgress};
pub use variants::variants;
