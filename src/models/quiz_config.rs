// src/models/quiz_config.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Easy/medium/hard percentage split used to weight question selection.
/// The three values must sum to exactly 100; that invariant is enforced at
/// write time (`QuizConfig::validate`), and the selector consumes the
/// percentages as-is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifficultyMix {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyMix {
    pub fn sum(&self) -> u32 {
        self.easy + self.medium + self.hard
    }
}

/// Per-chapter quiz settings (1:1 with a chapter).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_mix_sum))]
pub struct QuizConfig {
    pub chapter_id: String,

    pub title: String,
    pub description: Option<String>,

    #[validate(range(min = 1))]
    pub questions_per_quiz: u32,

    pub time_limit_minutes: u32,

    #[validate(range(min = 0.0, max = 100.0))]
    pub passing_score_percentage: f64,

    pub difficulty_mix: DifficultyMix,

    pub is_active: bool,
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
    pub show_results_immediately: bool,

    /// 0 = unlimited.
    pub max_attempts: u32,
}

fn validate_mix_sum(config: &QuizConfig) -> Result<(), ValidationError> {
    if config.difficulty_mix.sum() != 100 {
        return Err(ValidationError::new("difficulty_mix_must_sum_to_100"));
    }
    Ok(())
}
