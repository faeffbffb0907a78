// src/error.rs

use std::fmt;

/// Global engine error enum.
/// Centralizes every failure the quiz engine surfaces to a caller.
#[derive(Debug)]
pub enum QuizError {
    /// The chapter has no quiz configuration, or the configuration is disabled.
    QuizInactive,

    /// The chapter has no active questions to build a quiz from.
    NoQuestionsAvailable,

    /// The attempt does not exist, or belongs to a different user.
    /// The two cases are deliberately indistinguishable.
    AttemptNotFound,

    /// The attempt was already submitted. Re-submissions are rejected,
    /// not silently accepted.
    AlreadySubmitted,

    /// The user has exhausted the configured number of attempts for the chapter.
    MaxAttemptsReached,

    /// A question or configuration payload failed boundary validation.
    InvalidQuestion(String),

    /// Opaque storage failure, passed through unmodified. The engine never
    /// retries; that decision belongs to the caller.
    Storage(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::QuizInactive => write!(f, "quiz is not active for this chapter"),
            QuizError::NoQuestionsAvailable => write!(f, "no active questions available"),
            QuizError::AttemptNotFound => write!(f, "attempt not found"),
            QuizError::AlreadySubmitted => write!(f, "attempt was already submitted"),
            QuizError::MaxAttemptsReached => write!(f, "maximum number of attempts reached"),
            QuizError::InvalidQuestion(msg) => write!(f, "invalid question payload: {}", msg),
            QuizError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {}

/// Allows using the `?` operator on payload (de)serialization at the
/// engine boundary.
impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::InvalidQuestion(err.to_string())
    }
}

impl From<validator::ValidationErrors> for QuizError {
    fn from(err: validator::ValidationErrors) -> Self {
        QuizError::InvalidQuestion(err.to_string())
    }
}
