// src/engine/selector.rs

use std::collections::HashSet;

use rand::Rng;

use crate::error::QuizError;
use crate::models::question::{Difficulty, Question};
use crate::models::quiz_config::DifficultyMix;
use crate::utils::shuffle::{draw, shuffle};

/// Picks a difficulty-weighted random subset of `count` questions.
///
/// * Per-difficulty targets are floored from the mix percentages; hard
///   absorbs the rounding remainder.
/// * Each pool is sampled uniformly without replacement.
/// * A shortfall (exhausted pools) is backfilled uniformly from whatever
///   active questions were not already selected, any difficulty.
/// * Asking for more questions than exist returns everything available;
///   only an empty bank is an error.
pub fn select_questions<R: Rng + ?Sized>(
    all_active: &[Question],
    count: usize,
    mix: &DifficultyMix,
    rng: &mut R,
) -> Result<Vec<Question>, QuizError> {
    if all_active.is_empty() {
        return Err(QuizError::NoQuestionsAvailable);
    }

    let easy_target = count * mix.easy as usize / 100;
    let medium_target = count * mix.medium as usize / 100;
    let hard_target = count - easy_target - medium_target;

    let mut selected: Vec<Question> = Vec::with_capacity(count.min(all_active.len()));
    for (difficulty, target) in [
        (Difficulty::Easy, easy_target),
        (Difficulty::Medium, medium_target),
        (Difficulty::Hard, hard_target),
    ] {
        let pool: Vec<&Question> = all_active
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .collect();
        selected.extend(draw(&pool, target, rng).into_iter().cloned());
    }

    if selected.len() < count {
        // Exclusion by id set, not by position or identity.
        let taken: HashSet<&str> = selected.iter().map(|q| q.id.as_str()).collect();
        let remaining: Vec<&Question> = all_active
            .iter()
            .filter(|q| !taken.contains(q.id.as_str()))
            .collect();
        let need = count - selected.len();
        selected.extend(draw(&remaining, need, rng).into_iter().cloned());
    }

    // The paper order is always randomized here; repeat-shuffling on resume
    // is the caller's concern, gated by its own flag.
    shuffle(&mut selected, rng);
    Ok(selected)
}
