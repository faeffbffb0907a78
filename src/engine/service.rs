// src/engine/service.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::engine::grader::{correct_answer_of, grade};
use crate::engine::sanitizer::{sanitize, shuffle_choices};
use crate::engine::selector::select_questions;
use crate::error::QuizError;
use crate::models::attempt::{QuestionResult, QuizAttempt, StartQuizResult, SubmitQuizResult};
use crate::models::question::Question;
use crate::store::{AttemptStore, ConfigStore, QuestionBank};

/// Owns the attempt lifecycle: generates quizzes, tracks attempts from
/// started to submitted, and aggregates grading into the final verdict.
pub struct QuizEngine {
    questions: Arc<dyn QuestionBank>,
    configs: Arc<dyn ConfigStore>,
    attempts: Arc<dyn AttemptStore>,
}

impl QuizEngine {
    pub fn new(
        questions: Arc<dyn QuestionBank>,
        configs: Arc<dyn ConfigStore>,
        attempts: Arc<dyn AttemptStore>,
    ) -> Self {
        Self { questions, configs, attempts }
    }

    /// Generates a quiz paper for the chapter and opens a new attempt.
    ///
    /// * Selects a difficulty-weighted random subset of the active bank.
    /// * Persists the attempt before anything is returned.
    /// * Returns sanitized questions only; answer keys and explanations
    ///   never leave the engine at this stage.
    pub async fn start_quiz(
        &self,
        user_id: &str,
        chapter_id: &str,
    ) -> Result<StartQuizResult, QuizError> {
        let config = self
            .configs
            .config_for_chapter(chapter_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or(QuizError::QuizInactive)?;

        if config.max_attempts > 0 {
            let taken = self.attempts.count_completed(user_id, chapter_id).await?;
            if taken >= config.max_attempts {
                return Err(QuizError::MaxAttemptsReached);
            }
        }

        let bank = self.questions.active_questions(chapter_id).await?;
        if bank.is_empty() {
            return Err(QuizError::NoQuestionsAvailable);
        }

        let mut rng = rand::thread_rng();
        let selected = select_questions(
            &bank,
            config.questions_per_quiz as usize,
            &config.difficulty_mix,
            &mut rng,
        )?;

        let max_score: f64 = selected.iter().map(|q| q.points).sum();
        let attempt = QuizAttempt::new(
            user_id,
            chapter_id,
            selected.iter().map(|q| q.id.clone()).collect(),
            max_score,
        );
        self.attempts.insert(&attempt).await.map_err(|e| {
            tracing::error!("Failed to persist new attempt: {}", e);
            e
        })?;

        let mut questions: Vec<_> = selected.iter().map(|q| sanitize(q, &mut rng)).collect();
        if config.shuffle_options {
            for question in &mut questions {
                shuffle_choices(question, &mut rng);
            }
        }

        tracing::info!(
            "Started attempt {} for user {} on chapter {} ({} questions, max score {})",
            attempt.id,
            user_id,
            chapter_id,
            questions.len(),
            max_score
        );

        Ok(StartQuizResult {
            attempt_id: attempt.id,
            quiz_title: config.title,
            quiz_description: config.description,
            time_limit_minutes: config.time_limit_minutes,
            questions_count: questions.len(),
            show_results_immediately: config.show_results_immediately,
            questions,
            started_at: attempt.started_at,
        })
    }

    /// Grades a submission and closes the attempt.
    ///
    /// * The attempt must belong to `user_id`; a foreign or missing attempt
    ///   is the same `AttemptNotFound`.
    /// * Questions left unanswered grade as incorrect with zero points; a
    ///   partially answered submission never fails outright.
    /// * Exactly one submission is ever accepted per attempt.
    pub async fn submit_quiz(
        &self,
        attempt_id: &str,
        user_id: &str,
        answers: HashMap<String, Value>,
    ) -> Result<SubmitQuizResult, QuizError> {
        let mut attempt = self
            .attempts
            .load(attempt_id)
            .await?
            .filter(|a| a.user_id == user_id)
            .ok_or(QuizError::AttemptNotFound)?;

        if attempt.is_completed() {
            return Err(QuizError::AlreadySubmitted);
        }

        let config = self
            .configs
            .config_for_chapter(&attempt.chapter_id)
            .await?
            .ok_or(QuizError::QuizInactive)?;

        // Original, un-sanitized records; the ones handed out at start.
        let originals = self
            .questions
            .questions_by_ids(&attempt.selected_question_ids)
            .await?;
        let by_id: HashMap<&str, &Question> =
            originals.iter().map(|q| (q.id.as_str(), q)).collect();

        let mut score = 0.0;
        let mut results = Vec::with_capacity(attempt.selected_question_ids.len());
        for question_id in &attempt.selected_question_ids {
            let Some(question) = by_id.get(question_id.as_str()) else {
                tracing::warn!(
                    "Question {} missing from bank while grading attempt {}",
                    question_id,
                    attempt_id
                );
                continue;
            };

            let user_answer = answers.get(question_id);
            let graded = grade(question, user_answer);
            score += graded.points_earned;

            results.push(QuestionResult {
                question_id: question_id.clone(),
                question_text: question.text.clone(),
                user_answer: user_answer.cloned(),
                correct_answer: correct_answer_of(question),
                is_correct: graded.is_correct,
                points_earned: graded.points_earned,
                explanation: question.explanation.clone(),
            });
        }

        let percentage = if attempt.max_score > 0.0 {
            score / attempt.max_score * 100.0
        } else {
            0.0
        };
        let passed = percentage >= config.passing_score_percentage;

        attempt.complete(answers, score, percentage, passed, Utc::now())?;
        self.attempts.save(&attempt).await.map_err(|e| {
            tracing::error!("Failed to persist submission for attempt {}: {}", attempt_id, e);
            e
        })?;

        tracing::info!(
            "Completed attempt {} for user {}: {}/{} ({:.1}%), passed={}",
            attempt_id,
            user_id,
            score,
            attempt.max_score,
            percentage,
            passed
        );

        Ok(SubmitQuizResult {
            score,
            max_score: attempt.max_score,
            percentage,
            passed,
            show_results_immediately: config.show_results_immediately,
            results,
        })
    }
}
