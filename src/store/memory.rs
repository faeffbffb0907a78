// src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::QuizError;
use crate::models::attempt::QuizAttempt;
use crate::models::question::Question;
use crate::models::quiz_config::QuizConfig;
use crate::store::{AttemptStore, ConfigStore, QuestionBank};

/// In-memory question bank. Backs the test suites and demos; a production
/// caller plugs in its own `QuestionBank` over real storage.
#[derive(Default)]
pub struct InMemoryQuestionBank {
    questions: RwLock<Vec<Question>>,
}

impl InMemoryQuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, question: Question) {
        self.questions.write().await.push(question);
    }

    /// Flips a question's active flag, as a bank admin flow would.
    pub async fn set_active(&self, id: &str, active: bool) {
        let mut questions = self.questions.write().await;
        if let Some(question) = questions.iter_mut().find(|q| q.id == id) {
            question.is_active = active;
        }
    }
}

#[async_trait]
impl QuestionBank for InMemoryQuestionBank {
    async fn active_questions(&self, chapter_id: &str) -> Result<Vec<Question>, QuizError> {
        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .filter(|q| q.chapter_id == chapter_id && q.is_active)
            .cloned()
            .collect())
    }

    async fn questions_by_ids(&self, ids: &[String]) -> Result<Vec<Question>, QuizError> {
        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .filter(|q| ids.contains(&q.id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryConfigStore {
    configs: RwLock<HashMap<String, QuizConfig>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, config: QuizConfig) {
        self.configs
            .write()
            .await
            .insert(config.chapter_id.clone(), config);
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn config_for_chapter(
        &self,
        chapter_id: &str,
    ) -> Result<Option<QuizConfig>, QuizError> {
        Ok(self.configs.read().await.get(chapter_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryAttemptStore {
    attempts: RwLock<HashMap<String, QuizAttempt>>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn insert(&self, attempt: &QuizAttempt) -> Result<(), QuizError> {
        self.attempts
            .write()
            .await
            .insert(attempt.id.clone(), attempt.clone());
        Ok(())
    }

    async fn load(&self, attempt_id: &str) -> Result<Option<QuizAttempt>, QuizError> {
        Ok(self.attempts.read().await.get(attempt_id).cloned())
    }

    async fn save(&self, attempt: &QuizAttempt) -> Result<(), QuizError> {
        // The write lock spans the completed-check and the swap, which is
        // what serializes two concurrent submissions of the same attempt.
        let mut attempts = self.attempts.write().await;
        match attempts.get(&attempt.id) {
            None => Err(QuizError::AttemptNotFound),
            Some(stored) if stored.is_completed() => Err(QuizError::AlreadySubmitted),
            Some(_) => {
                attempts.insert(attempt.id.clone(), attempt.clone());
                Ok(())
            }
        }
    }

    async fn count_completed(&self, user_id: &str, chapter_id: &str) -> Result<u32, QuizError> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .values()
            .filter(|a| a.user_id == user_id && a.chapter_id == chapter_id && a.is_completed())
            .count() as u32)
    }
}
