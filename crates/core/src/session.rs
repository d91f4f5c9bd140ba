//! Ten-question drill set as a pure reducer.
//!
//! [`SessionState::apply`] never performs side effects. It returns the next
//! state together with the [`DrillEvent`]s the host should dispatch.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::generator;
use crate::model::{ChoiceError, ChoiceSet, Difficulty, Operation, Problem, SetSummary};

/// Number of problems in a set.
pub const SET_LENGTH: u32 = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("{action} is not allowed while {phase}")]
    WrongPhase { action: ActionKind, phase: Phase },

    #[error("{0} is not one of the offered choices")]
    NotAChoice(u32),

    #[error(transparent)]
    Choices(#[from] ChoiceError),
}

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Difficulty and operation picked on the selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrillConfig {
    pub difficulty: Difficulty,
    pub operation: Operation,
}

impl DrillConfig {
    #[must_use]
    pub fn new(difficulty: Difficulty, operation: Operation) -> Self {
        Self {
            difficulty,
            operation,
        }
    }
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self::new(Difficulty::Easy, Operation::Addition)
    }
}

//
// ─── ACTIONS & EVENTS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Answering,
    Feedback,
    SetComplete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Answering => "answering",
            Phase::Feedback => "showing feedback",
            Phase::SetComplete => "the set is complete",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SubmitAnswer(u32),
    Advance,
    Restart,
}

impl Action {
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SubmitAnswer(_) => ActionKind::SubmitAnswer,
            Action::Advance => ActionKind::Advance,
            Action::Restart => ActionKind::Restart,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SubmitAnswer,
    Advance,
    Restart,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionKind::SubmitAnswer => "submitting an answer",
            ActionKind::Advance => "advancing",
            ActionKind::Restart => "restarting",
        })
    }
}

/// Notifications for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrillEvent {
    /// Fired once per correct answer.
    ProblemSolved,
    /// Fired once when the tenth problem is advanced past.
    SetComplete { correct_count: u32 },
}

/// The answer just given, kept while in `Feedback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub selected: u32,
    pub correct_answer: u32,
    pub is_correct: bool,
}

/// State of one slot in the ten-question progress strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Correct,
    Incorrect,
    Current,
    Pending,
}

/// Result of applying an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub events: Vec<DrillEvent>,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    config: DrillConfig,
    current_problem: Problem,
    choices: ChoiceSet,
    previous_problem: Option<Problem>,
    question_index: u32,
    correct_count: u32,
    results: Vec<bool>,
    last_answer: Option<AnswerRecord>,
    phase: Phase,
}

impl SessionState {
    /// Start a fresh set for `config`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Choices` if choice generation fails, which does
    /// not happen for generated problems.
    pub fn new<R: Rng + ?Sized>(config: DrillConfig, rng: &mut R) -> Result<Self, SessionError> {
        let (current_problem, choices) =
            generator::problem_with_choices(config.difficulty, config.operation, None, rng)?;
        Ok(Self {
            config,
            current_problem,
            choices,
            previous_problem: None,
            question_index: 1,
            correct_count: 0,
            results: Vec::with_capacity(SET_LENGTH as usize),
            last_answer: None,
            phase: Phase::Answering,
        })
    }

    #[must_use]
    pub fn config(&self) -> DrillConfig {
        self.config
    }

    #[must_use]
    pub fn current_problem(&self) -> &Problem {
        &self.current_problem
    }

    #[must_use]
    pub fn choices(&self) -> &ChoiceSet {
        &self.choices
    }

    #[must_use]
    pub fn previous_problem(&self) -> Option<&Problem> {
        self.previous_problem.as_ref()
    }

    /// 1-based index of the current question.
    #[must_use]
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn results(&self) -> &[bool] {
        &self.results
    }

    #[must_use]
    pub fn last_answer(&self) -> Option<&AnswerRecord> {
        self.last_answer.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.question_index == SET_LENGTH
    }

    /// Score for the finished set, `None` until `SetComplete`.
    #[must_use]
    pub fn summary(&self) -> Option<SetSummary> {
        if self.phase != Phase::SetComplete {
            return None;
        }
        SetSummary::from_results(&self.results).ok()
    }

    /// Status of every slot in the set, in question order.
    #[must_use]
    pub fn progress(&self) -> Vec<SlotStatus> {
        (0..SET_LENGTH as usize)
            .map(|slot| match self.results.get(slot) {
                Some(true) => SlotStatus::Correct,
                Some(false) => SlotStatus::Incorrect,
                None if slot + 1 == self.question_index as usize
                    && self.phase == Phase::Answering =>
                {
                    SlotStatus::Current
                }
                None => SlotStatus::Pending,
            })
            .collect()
    }

    /// Apply an action and return the next state plus emitted events.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` if the action is not valid in the
    /// current phase and `SessionError::NotAChoice` for answers outside the
    /// offered choices. `self` is left untouched on error.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        action: Action,
        rng: &mut R,
    ) -> Result<Transition, SessionError> {
        match (action, self.phase) {
            (Action::SubmitAnswer(choice), Phase::Answering) => self.submit_answer(choice),
            (Action::Advance, Phase::Feedback) => self.advance(rng),
            (Action::Restart, _) => Ok(Transition {
                state: Self::new(self.config, rng)?,
                events: Vec::new(),
            }),
            (action, phase) => Err(SessionError::WrongPhase {
                action: action.kind(),
                phase,
            }),
        }
    }

    fn submit_answer(&self, choice: u32) -> Result<Transition, SessionError> {
        if !self.choices.contains(choice) {
            return Err(SessionError::NotAChoice(choice));
        }

        let correct_answer = self.current_problem.result();
        let is_correct = choice == correct_answer;

        let mut next = self.clone();
        next.results.push(is_correct);
        next.correct_count += u32::from(is_correct);
        next.last_answer = Some(AnswerRecord {
            selected: choice,
            correct_answer,
            is_correct,
        });
        next.phase = Phase::Feedback;

        let events = if is_correct {
            vec![DrillEvent::ProblemSolved]
        } else {
            Vec::new()
        };
        Ok(Transition {
            state: next,
            events,
        })
    }

    fn advance<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Transition, SessionError> {
        let mut next = self.clone();

        if self.is_last_question() {
            next.phase = Phase::SetComplete;
            return Ok(Transition {
                state: next,
                events: vec![DrillEvent::SetComplete {
                    correct_count: self.correct_count,
                }],
            });
        }

        let (problem, choices) = generator::problem_with_choices(
            self.config.difficulty,
            self.config.operation,
            Some(&self.current_problem),
            rng,
        )?;
        next.previous_problem = Some(self.current_problem);
        next.current_problem = problem;
        next.choices = choices;
        next.question_index += 1;
        next.last_answer = None;
        next.phase = Phase::Answering;

        Ok(Transition {
            state: next,
            events: Vec::new(),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
