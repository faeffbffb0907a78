// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Question formats the engine can select, sanitize and grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    TrueFalse,
    MultipleChoice,
    MultipleAnswer,
    Matching,
    Ordering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One selectable answer option (multiple-choice / multiple-answer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
}

/// One left/right pair of a matching question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPair {
    pub id: String,
    pub left: String,
    pub right: String,
}

/// One item of an ordering question. `correct_order` is 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingItem {
    pub id: String,
    pub text: String,
    pub correct_order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrueFalseOptions {
    pub correct_answer: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultipleChoiceOptions {
    pub choices: Vec<Choice>,
    /// Must reference one of `choices` by id.
    pub correct_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultipleAnswerOptions {
    pub choices: Vec<Choice>,
    /// Non-empty; every entry must reference one of `choices` by id.
    pub correct_answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingOptions {
    pub pairs: Vec<MatchPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingOptions {
    pub items: Vec<OrderingItem>,
}

/// Per-type `options` payload. One shape per question type; the pairing with
/// `Question::question_type` is checked by `Question::validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionOptions {
    TrueFalse(TrueFalseOptions),
    MultipleChoice(MultipleChoiceOptions),
    MultipleAnswer(MultipleAnswerOptions),
    Matching(MatchingOptions),
    Ordering(OrderingOptions),
}

impl QuestionOptions {
    pub fn matches_type(&self, question_type: QuestionType) -> bool {
        matches!(
            (self, question_type),
            (QuestionOptions::TrueFalse(_), QuestionType::TrueFalse)
                | (QuestionOptions::MultipleChoice(_), QuestionType::MultipleChoice)
                | (QuestionOptions::MultipleAnswer(_), QuestionType::MultipleAnswer)
                | (QuestionOptions::Matching(_), QuestionType::Matching)
                | (QuestionOptions::Ordering(_), QuestionType::Ordering)
        )
    }
}

/// A full question as stored in the question bank, answer key included.
/// Never sent to a test-taker directly; see `SanitizedQuestion`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_options_shape))]
pub struct Question {
    pub id: String,
    pub chapter_id: String,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    /// The text content of the question.
    pub text: String,

    pub difficulty: Difficulty,

    /// Positive, in 0.5 increments.
    #[validate(range(min = 0.5))]
    pub points: f64,

    pub options: QuestionOptions,

    /// Explanation shown alongside the correct answer in results.
    pub explanation: Option<String>,

    pub is_active: bool,
}

/// Cross-field invariants that serde derives cannot express: the options
/// variant must match the declared type, and answer keys must reference
/// listed option ids. Run at deserialization boundaries.
fn validate_options_shape(question: &Question) -> Result<(), ValidationError> {
    if !question.options.matches_type(question.question_type) {
        return Err(ValidationError::new("options_type_mismatch"));
    }
    match &question.options {
        QuestionOptions::MultipleChoice(o) => {
            if !o.choices.iter().any(|c| c.id == o.correct_answer) {
                return Err(ValidationError::new("correct_answer_not_in_choices"));
            }
        }
        QuestionOptions::MultipleAnswer(o) => {
            if o.correct_answers.is_empty() {
                return Err(ValidationError::new("correct_answers_empty"));
            }
            for id in &o.correct_answers {
                if !o.choices.iter().any(|c| &c.id == id) {
                    return Err(ValidationError::new("correct_answer_not_in_choices"));
                }
            }
        }
        QuestionOptions::Matching(o) => {
            if o.pairs.is_empty() {
                return Err(ValidationError::new("pairs_empty"));
            }
        }
        QuestionOptions::Ordering(o) => {
            if o.items.is_empty() {
                return Err(ValidationError::new("items_empty"));
            }
        }
        QuestionOptions::TrueFalse(_) => {}
    }
    Ok(())
}

/// An ordering item as shown to a test-taker: intended position stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingPrompt {
    pub id: String,
    pub text: String,
}

/// Options payload with every answer-revealing field removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SanitizedOptions {
    /// Multiple-choice and multiple-answer: the selectable choices only.
    Choices { choices: Vec<Choice> },
    /// Matching: right-hand values reassigned to pairs in shuffled order.
    Matching { pairs: Vec<MatchPair> },
    /// Ordering: items in shuffled order, intended positions dropped.
    Ordering { items: Vec<OrderingPrompt> },
    /// True/false: the statement itself is the whole prompt.
    Empty {},
}

/// DTO for sending a question to a test-taker (excludes answer keys and
/// explanation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    pub difficulty: Difficulty,
    pub points: f64,
    pub options: SanitizedOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn multiple_choice_question() -> Question {
        Question {
            id: "q1".to_string(),
            chapter_id: "ch1".to_string(),
            question_type: QuestionType::MultipleChoice,
            text: "Pick one".to_string(),
            difficulty: Difficulty::Easy,
            points: 10.0,
            options: QuestionOptions::MultipleChoice(MultipleChoiceOptions {
                choices: vec![
                    Choice { id: "a".to_string(), text: "A".to_string() },
                    Choice { id: "b".to_string(), text: "B".to_string() },
                ],
                correct_answer: "b".to_string(),
            }),
            explanation: None,
            is_active: true,
        }
    }

    #[test]
    fn test_valid_question_passes() {
        assert!(multiple_choice_question().validate().is_ok());
    }

    #[test]
    fn test_dangling_correct_answer_rejected() {
        let mut question = multiple_choice_question();
        if let QuestionOptions::MultipleChoice(o) = &mut question.options {
            o.correct_answer = "z".to_string();
        }
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_options_type_mismatch_rejected() {
        let mut question = multiple_choice_question();
        question.question_type = QuestionType::Matching;
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_options_deserialize_by_shape() {
        let question: Question = serde_json::from_value(json!({
            "id": "q2",
            "chapter_id": "ch1",
            "type": "MULTIPLE_ANSWER",
            "text": "Pick all",
            "difficulty": "HARD",
            "points": 5.0,
            "options": {
                "choices": [
                    { "id": "a", "text": "A" },
                    { "id": "b", "text": "B" }
                ],
                "correct_answers": ["a", "b"]
            },
            "explanation": null,
            "is_active": true
        }))
        .unwrap();

        assert!(matches!(question.options, QuestionOptions::MultipleAnswer(_)));
        assert!(question.validate().is_ok());
    }

    #[test]
    fn test_zero_points_rejected() {
        let mut question = multiple_choice_question();
        question.points = 0.0;
        assert!(question.validate().is_err());
    }
}
