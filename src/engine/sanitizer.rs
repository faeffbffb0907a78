// src/engine/sanitizer.rs

use rand::Rng;

use crate::models::question::{
    MatchPair, OrderingPrompt, Question, QuestionOptions, SanitizedOptions, SanitizedQuestion,
};
use crate::utils::shuffle::shuffle;

/// Strips every answer-revealing field from a question before it is handed
/// to a test-taker.
///
/// * True/false, multiple-choice, multiple-answer: the answer key fields are
///   simply dropped; choice order is preserved (see `shuffle_choices`).
/// * Matching: right-hand values are shuffled independently of the left keys
///   and reassigned to pairs by position.
/// * Ordering: the item list is shuffled and the intended positions dropped.
///
/// `explanation` is always cleared, whatever the type.
pub fn sanitize<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> SanitizedQuestion {
    let options = match &question.options {
        QuestionOptions::TrueFalse(_) => SanitizedOptions::Empty {},
        QuestionOptions::MultipleChoice(o) => SanitizedOptions::Choices {
            choices: o.choices.clone(),
        },
        QuestionOptions::MultipleAnswer(o) => SanitizedOptions::Choices {
            choices: o.choices.clone(),
        },
        QuestionOptions::Matching(o) => {
            let mut rights: Vec<String> = o.pairs.iter().map(|p| p.right.clone()).collect();
            shuffle(&mut rights, rng);
            let pairs = o
                .pairs
                .iter()
                .zip(rights)
                .map(|(pair, right)| MatchPair {
                    id: pair.id.clone(),
                    left: pair.left.clone(),
                    right,
                })
                .collect();
            SanitizedOptions::Matching { pairs }
        }
        QuestionOptions::Ordering(o) => {
            let mut items: Vec<OrderingPrompt> = o
                .items
                .iter()
                .map(|item| OrderingPrompt {
                    id: item.id.clone(),
                    text: item.text.clone(),
                })
                .collect();
            shuffle(&mut items, rng);
            SanitizedOptions::Ordering { items }
        }
    };

    SanitizedQuestion {
        id: question.id.clone(),
        question_type: question.question_type,
        text: question.text.clone(),
        difficulty: question.difficulty,
        points: question.points,
        options,
    }
}

/// Shuffles the choice list of a sanitized multiple-choice/multiple-answer
/// question in place. Applied by the lifecycle manager when the chapter
/// config asks for option shuffling; other types are left untouched.
pub fn shuffle_choices<R: Rng + ?Sized>(question: &mut SanitizedQuestion, rng: &mut R) {
    if let SanitizedOptions::Choices { choices } = &mut question.options {
        shuffle(choices, rng);
    }
}
