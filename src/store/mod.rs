// src/store/mod.rs

pub mod memory;

use async_trait::async_trait;

use crate::error::QuizError;
use crate::models::attempt::QuizAttempt;
use crate::models::question::Question;
use crate::models::quiz_config::QuizConfig;

/// Read access to the question bank.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Returns only `is_active` questions for the chapter; the engine does
    /// not filter by activity beyond what this returns.
    async fn active_questions(&self, chapter_id: &str) -> Result<Vec<Question>, QuizError>;

    /// Fetches the original records for the given ids, active or not, so an
    /// in-flight attempt can still be graded after a question is retired.
    /// Ids with no record are simply absent from the result.
    async fn questions_by_ids(&self, ids: &[String]) -> Result<Vec<Question>, QuizError>;
}

/// Read access to per-chapter quiz configuration.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// The returned config is assumed upstream-validated (difficulty mix
    /// summing to 100); the engine consumes it without re-checking.
    async fn config_for_chapter(&self, chapter_id: &str)
    -> Result<Option<QuizConfig>, QuizError>;
}

/// Attempt persistence.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn insert(&self, attempt: &QuizAttempt) -> Result<(), QuizError>;

    async fn load(&self, attempt_id: &str) -> Result<Option<QuizAttempt>, QuizError>;

    /// Replaces the stored attempt. Implementations must make the
    /// completed-check atomic with the write: if the stored attempt is
    /// already completed, fail with `AlreadySubmitted` instead of
    /// overwriting, so concurrent submissions serialize to exactly one win.
    async fn save(&self, attempt: &QuizAttempt) -> Result<(), QuizError>;

    /// Number of completed attempts the user has for the chapter. Backs the
    /// max-attempts check at quiz start.
    async fn count_completed(&self, user_id: &str, chapter_id: &str) -> Result<u32, QuizError>;
}
