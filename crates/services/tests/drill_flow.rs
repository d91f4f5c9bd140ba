use std::sync::Arc;

use drill_core::model::{Difficulty, Operation};
use drill_core::{DrillConfig, Phase};
use services::clock::fixed_now;
use services::{
    AppState, AuthUser, Clock, DrillEventSink, DrillService, RecordingSink, Screen, TracingSink,
};

#[test]
fn guest_plays_a_set_and_restarts() {
    let mut app = AppState::new();
    app.sign_in(AuthUser::Guest);
    let config = DrillConfig::new(Difficulty::Medium, Operation::Addition);
    app.select(config).unwrap();

    let sink = Arc::new(RecordingSink::new());
    let mut drill = DrillService::start_seeded(config, Clock::Fixed(fixed_now()), 2024)
        .unwrap()
        .with_sink(Arc::clone(&sink) as Arc<dyn DrillEventSink>)
        .with_sink(Arc::new(TracingSink));

    let mut expected_correct = 0;
    for question in 1..=10 {
        let state = drill.state();
        assert_eq!(state.question_index(), question);
        let correct = state.current_problem().result();
        let choice = if question % 2 == 0 {
            expected_correct += 1;
            correct
        } else {
            state.choices().iter().find(|&c| c != correct).unwrap()
        };

        let outcome = drill.submit_answer(choice).unwrap();
        outcome.events.iter().for_each(|e| app.apply_event(e));

        // a second click on the same question is ignored
        let again = drill.submit_answer(choice).unwrap_err();
        assert!(again.is_ignorable());

        let outcome = drill.advance().unwrap();
        outcome.events.iter().for_each(|e| app.apply_event(e));
    }

    assert_eq!(drill.state().phase(), Phase::SetComplete);
    assert_eq!(drill.state().results().len(), 10);
    assert_eq!(drill.state().correct_count(), expected_correct);
    assert_eq!(app.problems_solved(), expected_correct);
    assert_eq!(app.screen(), Screen::Results);

    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].summary.correct(), expected_correct);
    assert_eq!(reports[0].config, config);

    let config_again = app.restart_set().unwrap();
    assert_eq!(config_again, config);
    drill.restart().unwrap();
    assert_eq!(drill.state().phase(), Phase::Answering);
    assert_eq!(drill.state().question_index(), 1);
    assert!(drill.state().results().is_empty());
    assert_eq!(app.screen(), Screen::Drill);
}

#[test]
fn seeded_services_replay_identically() {
    let config = DrillConfig::new(Difficulty::Hard, Operation::Subtraction);
    let play = || {
        let mut drill = DrillService::start_seeded(config, Clock::Fixed(fixed_now()), 7).unwrap();
        let mut seen = Vec::new();
        for _ in 0..10 {
            let problem = *drill.state().current_problem();
            seen.push((problem, *drill.state().choices()));
            drill.submit_answer(problem.result()).unwrap();
            drill.advance().unwrap();
        }
        seen
    };
    assert_eq!(play(), play());
}
