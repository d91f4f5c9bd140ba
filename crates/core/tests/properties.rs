//! Property-based tests for the drill engine.

use drill_core::generator::{choices, generate};
use drill_core::model::{Difficulty, Operation};
use drill_core::{Action, DrillConfig, DrillEvent, Phase, SET_LENGTH, SessionState};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![Just(Operation::Addition), Just(Operation::Subtraction)]
}

proptest! {
    /// Operands stay in the tier range and results are non-negative.
    #[test]
    fn generated_problems_respect_tier(
        difficulty in difficulty_strategy(),
        operation in operation_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let problem = generate(difficulty, operation, None, &mut rng);
        let range = difficulty.operand_range();

        prop_assert!(range.contains(&problem.operand_a()));
        prop_assert!(range.contains(&problem.operand_b()));
        if let Some(limit) = difficulty.pair_sum_limit() {
            prop_assert!(problem.operand_a() + problem.operand_b() <= limit);
        }
        if operation == Operation::Subtraction {
            prop_assert!(problem.operand_a() >= problem.operand_b());
        }
        prop_assert!(operation.answer_bounds().contains(&problem.result()));
    }

    /// Consecutive problems never share an unordered operand pair.
    #[test]
    fn consecutive_problems_differ(
        difficulty in difficulty_strategy(),
        operation in operation_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let first = generate(difficulty, operation, None, &mut rng);
        let second = generate(difficulty, operation, Some(&first), &mut rng);
        prop_assert_ne!(first.pair(), second.pair());
    }

    /// Choices: three distinct ascending values containing the answer.
    #[test]
    fn choices_are_three_sorted_distinct(
        operation in operation_strategy(),
        correct in 0_u32..=18,
        seed in any::<u64>(),
    ) {
        prop_assume!(operation.answer_bounds().contains(&correct));
        let mut rng = StdRng::seed_from_u64(seed);
        let set = choices(correct, operation, &mut rng).expect("answer in bounds");
        let values = set.values();

        prop_assert!(values[0] < values[1] && values[1] < values[2]);
        prop_assert!(set.contains(correct));
        for value in values {
            prop_assert!(operation.answer_bounds().contains(value));
            prop_assert!(*value + 3 >= correct && *value <= correct + 2);
        }
    }

    /// A full set scores exactly the correct submissions.
    #[test]
    fn full_set_scores_correct_submissions(
        difficulty in difficulty_strategy(),
        operation in operation_strategy(),
        answers in proptest::collection::vec(any::<bool>(), SET_LENGTH as usize),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = SessionState::new(DrillConfig::new(difficulty, operation), &mut rng)
            .expect("session starts");
        let mut completions = Vec::new();

        for answer_correctly in &answers {
            let correct = state.current_problem().result();
            let choice = if *answer_correctly {
                correct
            } else {
                state.choices().iter().find(|&c| c != correct).expect("distractor")
            };
            let step = state.apply(Action::SubmitAnswer(choice), &mut rng).expect("submit");
            let step = step.state.apply(Action::Advance, &mut rng).expect("advance");
            completions.extend(step.events);
            state = step.state;
        }

        let expected = u32::try_from(answers.iter().filter(|a| **a).count()).unwrap();
        prop_assert_eq!(state.phase(), Phase::SetComplete);
        prop_assert_eq!(state.correct_count(), expected);
        prop_assert_eq!(state.results(), answers.as_slice());
        prop_assert_eq!(completions, vec![DrillEvent::SetComplete { correct_count: expected }]);
    }

    /// Restarting a finished set looks like a brand new one.
    #[test]
    fn restart_matches_fresh_session(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = DrillConfig::new(Difficulty::Hard, Operation::Addition);
        let mut state = SessionState::new(config, &mut rng).expect("session starts");
        for _ in 0..SET_LENGTH {
            let answer = state.current_problem().result();
            state = state.apply(Action::SubmitAnswer(answer), &mut rng).expect("submit").state;
            state = state.apply(Action::Advance, &mut rng).expect("advance").state;
        }
        prop_assert_eq!(state.phase(), Phase::SetComplete);

        let restarted = state.apply(Action::Restart, &mut rng).expect("restart").state;
        let fresh = SessionState::new(config, &mut rng).expect("session starts");

        prop_assert_eq!(restarted.phase(), fresh.phase());
        prop_assert_eq!(restarted.question_index(), fresh.question_index());
        prop_assert_eq!(restarted.correct_count(), fresh.correct_count());
        prop_assert_eq!(restarted.results(), fresh.results());
        prop_assert_eq!(restarted.previous_problem(), fresh.previous_problem());
        prop_assert_eq!(restarted.last_answer(), fresh.last_answer());
        prop_assert_eq!(restarted.config(), fresh.config());
    }
}

#[test]
fn easy_addition_one_plus_two_offers_nearby_choices() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..50 {
        let set = choices(3, Operation::Addition, &mut rng).unwrap();
        assert!(set.contains(3));
        assert!(set.iter().all(|v| (1..=5).contains(&v)));
    }
}
