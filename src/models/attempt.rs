// src/models/attempt.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QuizError;
use crate::models::question::SanitizedQuestion;

/// Attempt lifecycle. `Expired` is reserved for time-limit enforcement by an
/// outer layer; the engine itself only ever drives `InProgress -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    InProgress,
    Completed,
    Expired,
}

/// One instance of a user taking a generated quiz, from start to submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: String,
    pub user_id: String,
    pub chapter_id: String,

    /// Fixed at start; order is the order the questions were handed out.
    pub selected_question_ids: Vec<String>,

    /// Sum of the selected questions' points, fixed at start.
    pub max_score: f64,

    /// Question id -> submitted answer. Empty until submission; answers are
    /// opaque JSON and malformed shapes grade as incorrect.
    pub answers: HashMap<String, Value>,

    pub score: f64,
    pub percentage: f64,
    pub passed: bool,

    pub status: AttemptStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl QuizAttempt {
    pub fn new(
        user_id: &str,
        chapter_id: &str,
        selected_question_ids: Vec<String>,
        max_score: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            chapter_id: chapter_id.to_string(),
            selected_question_ids,
            max_score,
            answers: HashMap::new(),
            score: 0.0,
            percentage: 0.0,
            passed: false,
            status: AttemptStatus::InProgress,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status != AttemptStatus::InProgress || self.completed_at.is_some()
    }

    /// Total transition into the terminal state. Fails with
    /// `AlreadySubmitted` on anything that is not `InProgress`, so
    /// `completed_at` can only ever be set once.
    pub fn complete(
        &mut self,
        answers: HashMap<String, Value>,
        score: f64,
        percentage: f64,
        passed: bool,
        completed_at: DateTime<Utc>,
    ) -> Result<(), QuizError> {
        if self.is_completed() {
            return Err(QuizError::AlreadySubmitted);
        }
        self.answers = answers;
        self.score = score;
        self.percentage = percentage;
        self.passed = passed;
        self.status = AttemptStatus::Completed;
        self.completed_at = Some(completed_at);
        Ok(())
    }
}

/// DTO returned from starting a quiz: the sanitized paper plus the config
/// summary the client needs to run the attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartQuizResult {
    pub attempt_id: String,
    pub quiz_title: String,
    pub quiz_description: Option<String>,
    pub time_limit_minutes: u32,
    pub questions_count: usize,
    pub show_results_immediately: bool,
    pub questions: Vec<SanitizedQuestion>,
    pub started_at: DateTime<Utc>,
}

/// Per-question grading breakdown returned after submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub question_text: String,
    pub user_answer: Option<Value>,
    pub correct_answer: Value,
    pub is_correct: bool,
    pub points_earned: f64,
    pub explanation: Option<String>,
}

/// DTO returned from submitting a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuizResult {
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub passed: bool,
    /// Lets the transport layer decide whether to display `results` now.
    pub show_results_immediately: bool,
    pub results: Vec<QuestionResult>,
}
