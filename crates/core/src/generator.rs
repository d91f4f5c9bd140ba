//! Problem and answer-choice generation.
//!
//! Both generators take the random source as a parameter so callers decide
//! between a seeded `StdRng` (tests, replays) and `rand::rng()`.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::model::{ChoiceError, ChoiceSet, Difficulty, Operation, Problem};

/// Rejection-sampling attempts before falling back to enumeration.
pub const MAX_GENERATION_ATTEMPTS: usize = 50;

/// Distractor offsets around the correct answer (0 excluded).
const DISTRACTOR_OFFSETS: [i64; 5] = [-3, -2, -1, 1, 2];

//
// ─── PROBLEMS ──────────────────────────────────────────────────────────────────
//

/// Generate a problem for the given tier and operation.
///
/// When `previous` is set, the new unordered operand pair differs from it.
/// Sampling is retried up to [`MAX_GENERATION_ATTEMPTS`] times; after that
/// the pair is picked from the tier's enumerated pairs minus the previous one.
/// Every supported tier has more than one pair, so the rule always holds.
pub fn generate<R: Rng + ?Sized>(
    difficulty: Difficulty,
    operation: Operation,
    previous: Option<&Problem>,
    rng: &mut R,
) -> Problem {
    let previous_pair = previous.map(Problem::pair);

    let mut candidate = sample_problem(difficulty, operation, rng);
    let Some(previous_pair) = previous_pair else {
        return candidate;
    };

    for _ in 1..MAX_GENERATION_ATTEMPTS {
        if candidate.pair() != previous_pair {
            return candidate;
        }
        candidate = sample_problem(difficulty, operation, rng);
    }
    if candidate.pair() != previous_pair {
        return candidate;
    }

    let fresh: Vec<(u32, u32)> = tier_pairs(difficulty)
        .into_iter()
        .filter(|&(a, b)| Problem::new(a, b, operation).pair() != previous_pair)
        .collect();
    match fresh.choose(rng) {
        Some(&(a, b)) => Problem::new(a, b, operation),
        None => candidate,
    }
}

/// Every ordered operand pair admitted by the tier.
#[must_use]
pub fn tier_pairs(difficulty: Difficulty) -> Vec<(u32, u32)> {
    let range = difficulty.operand_range();
    range
        .clone()
        .flat_map(|a| range.clone().map(move |b| (a, b)))
        .filter(|&(a, b)| difficulty.admits(a, b))
        .collect()
}

fn sample_problem<R: Rng + ?Sized>(
    difficulty: Difficulty,
    operation: Operation,
    rng: &mut R,
) -> Problem {
    let range = difficulty.operand_range();
    loop {
        let a = rng.random_range(range.clone());
        let b = rng.random_range(range.clone());
        if difficulty.admits(a, b) {
            return Problem::new(a, b, operation);
        }
    }
}

//
// ─── CHOICES ───────────────────────────────────────────────────────────────────
//

/// Build three ascending choices around `correct`.
///
/// Distractors are drawn uniformly from `correct - 3 ..= correct + 2`
/// (excluding `correct`) restricted to the operation's answer bounds.
///
/// # Errors
///
/// Returns `ChoiceError::OutOfRange` if `correct` is outside the answer bounds
/// and `ChoiceError::Unsatisfiable` if fewer than two distractors remain.
pub fn choices<R: Rng + ?Sized>(
    correct: u32,
    operation: Operation,
    rng: &mut R,
) -> Result<ChoiceSet, ChoiceError> {
    let bounds = operation.answer_bounds();
    if !bounds.contains(&correct) {
        return Err(ChoiceError::OutOfRange {
            correct,
            min: *bounds.start(),
            max: *bounds.end(),
        });
    }

    let candidates: Vec<u32> = DISTRACTOR_OFFSETS
        .iter()
        .filter_map(|offset| u32::try_from(i64::from(correct) + offset).ok())
        .filter(|value| bounds.contains(value))
        .collect();

    let picked: Vec<u32> = candidates.choose_multiple(rng, 2).copied().collect();
    let &[first, second] = picked.as_slice() else {
        return Err(ChoiceError::Unsatisfiable {
            correct,
            available: candidates.len(),
        });
    };
    ChoiceSet::new(correct, [first, second])
}

/// Generate a problem and its choices in one step.
///
/// # Errors
///
/// Propagates `ChoiceError` from [`choices`]; generated problems always
/// produce answers inside the bounds, so this does not fail in practice.
pub fn problem_with_choices<R: Rng + ?Sized>(
    difficulty: Difficulty,
    operation: Operation,
    previous: Option<&Problem>,
    rng: &mut R,
) -> Result<(Problem, ChoiceSet), ChoiceError> {
    let problem = generate(difficulty, operation, previous, rng);
    let set = choices(problem.result(), operation, rng)?;
    Ok((problem, set))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
