// src/engine/grader.rs

use std::collections::HashSet;

use serde_json::{Value, json};

use crate::models::question::{OrderingItem, Question, QuestionOptions};

/// Outcome of grading one question.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GradingResult {
    pub is_correct: bool,
    pub points_earned: f64,
}

fn no_credit() -> GradingResult {
    GradingResult { is_correct: false, points_earned: 0.0 }
}

fn full_credit(points: f64) -> GradingResult {
    GradingResult { is_correct: true, points_earned: points }
}

/// Fraction-of-subparts credit: full points on a complete match, otherwise
/// `round(points * fraction)` (round half up on this positive domain).
fn partial_credit(points: f64, matched: usize, total: usize) -> GradingResult {
    if total == 0 {
        return no_credit();
    }
    if matched == total {
        return full_credit(points);
    }
    GradingResult {
        is_correct: false,
        points_earned: (points * matched as f64 / total as f64).round(),
    }
}

/// Grades one answer against one question. Pure: no side effects, no
/// dependency on attempt state, same inputs always give the same output.
///
/// A missing, null or malformed answer grades as incorrect with zero
/// points, for every type. Grading never fails.
pub fn grade(question: &Question, user_answer: Option<&Value>) -> GradingResult {
    let Some(answer) = user_answer else {
        return no_credit();
    };
    if answer.is_null() {
        return no_credit();
    }

    match &question.options {
        QuestionOptions::TrueFalse(o) => {
            // Strict boolean equality; the string "true" is not an answer.
            if answer.as_bool() == Some(o.correct_answer) {
                full_credit(question.points)
            } else {
                no_credit()
            }
        }
        QuestionOptions::MultipleChoice(o) => {
            if answer.as_str() == Some(o.correct_answer.as_str()) {
                full_credit(question.points)
            } else {
                no_credit()
            }
        }
        QuestionOptions::MultipleAnswer(o) => {
            // Exact set match, no partial credit.
            let Some(entries) = answer.as_array() else {
                return no_credit();
            };
            if entries.iter().any(|v| !v.is_string()) {
                return no_credit();
            }
            let given: HashSet<&str> = entries.iter().filter_map(Value::as_str).collect();
            let expected: HashSet<&str> =
                o.correct_answers.iter().map(String::as_str).collect();
            if given == expected {
                full_credit(question.points)
            } else {
                no_credit()
            }
        }
        QuestionOptions::Matching(o) => {
            let Some(assignments) = answer.as_object() else {
                return no_credit();
            };
            let matched = o
                .pairs
                .iter()
                .filter(|pair| {
                    assignments.get(&pair.id).and_then(Value::as_str)
                        == Some(pair.right.as_str())
                })
                .count();
            partial_credit(question.points, matched, o.pairs.len())
        }
        QuestionOptions::Ordering(o) => {
            let Some(sequence) = answer.as_array() else {
                return no_credit();
            };
            let canonical = canonical_order(&o.items);
            let matched = canonical
                .iter()
                .enumerate()
                .filter(|(position, item)| {
                    sequence.get(*position).and_then(Value::as_str) == Some(item.id.as_str())
                })
                .count();
            partial_credit(question.points, matched, canonical.len())
        }
    }
}

/// The answer key in the shape `grade` accepts, used for result display:
/// bool, choice id, id set, pair-id -> right-value map, or item ids in
/// canonical order.
pub fn correct_answer_of(question: &Question) -> Value {
    match &question.options {
        QuestionOptions::TrueFalse(o) => Value::Bool(o.correct_answer),
        QuestionOptions::MultipleChoice(o) => Value::String(o.correct_answer.clone()),
        QuestionOptions::MultipleAnswer(o) => json!(o.correct_answers),
        QuestionOptions::Matching(o) => {
            let map: serde_json::Map<String, Value> = o
                .pairs
                .iter()
                .map(|pair| (pair.id.clone(), Value::String(pair.right.clone())))
                .collect();
            Value::Object(map)
        }
        QuestionOptions::Ordering(o) => {
            let ids: Vec<&str> = canonical_order(&o.items)
                .iter()
                .map(|item| item.id.as_str())
                .collect();
            json!(ids)
        }
    }
}

fn canonical_order(items: &[OrderingItem]) -> Vec<&OrderingItem> {
    let mut sorted: Vec<&OrderingItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.correct_order);
    sorted
}
