use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use drill_core::{Action, DrillConfig, DrillEvent, Phase, SessionState};

use super::report::SetReport;
use super::sink::DrillEventSink;
use crate::clock::Clock;
use crate::error::DrillServiceError;

/// What a single action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillOutcome {
    pub events: Vec<DrillEvent>,
    pub phase: Phase,
}

/// Owns the active drill set and dispatches its events.
///
/// The session state is replaced wholesale on every action; sinks are
/// called after the new state is in place.
pub struct DrillService {
    clock: Clock,
    rng: StdRng,
    state: SessionState,
    started_at: DateTime<Utc>,
    sinks: Vec<Arc<dyn DrillEventSink>>,
    last_report: Option<SetReport>,
}

impl DrillService {
    /// Start a set with an OS-seeded random source.
    ///
    /// # Errors
    ///
    /// Returns `DrillServiceError::Session` if the first problem cannot be built.
    pub fn start(config: DrillConfig, clock: Clock) -> Result<Self, DrillServiceError> {
        Self::with_rng(config, clock, StdRng::from_os_rng())
    }

    /// Start a set with a seeded random source, for replays and tests.
    ///
    /// # Errors
    ///
    /// Returns `DrillServiceError::Session` if the first problem cannot be built.
    pub fn start_seeded(
        config: DrillConfig,
        clock: Clock,
        seed: u64,
    ) -> Result<Self, DrillServiceError> {
        Self::with_rng(config, clock, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: DrillConfig,
        clock: Clock,
        mut rng: StdRng,
    ) -> Result<Self, DrillServiceError> {
        let state = SessionState::new(config, &mut rng)?;
        tracing::debug!(
            difficulty = %config.difficulty,
            operation = %config.operation,
            "drill set started"
        );
        Ok(Self {
            clock,
            rng,
            state,
            started_at: clock.now(),
            sinks: Vec::new(),
            last_report: None,
        })
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DrillEventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> DrillConfig {
        self.state.config()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Report for the most recently finished set, cleared on restart.
    #[must_use]
    pub fn last_report(&self) -> Option<&SetReport> {
        self.last_report.as_ref()
    }

    /// Mutable access to the clock, so tests can move time forward.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Answer the current problem.
    ///
    /// # Errors
    ///
    /// Returns `DrillServiceError::Session` when not answering or when
    /// `choice` is not one of the offered values.
    pub fn submit_answer(&mut self, choice: u32) -> Result<DrillOutcome, DrillServiceError> {
        self.dispatch(Action::SubmitAnswer(choice))
    }

    /// Move past the feedback screen.
    ///
    /// # Errors
    ///
    /// Returns `DrillServiceError::Session` when not showing feedback.
    pub fn advance(&mut self) -> Result<DrillOutcome, DrillServiceError> {
        self.dispatch(Action::Advance)
    }

    /// Throw away the current set and start over with the same config.
    ///
    /// # Errors
    ///
    /// Returns `DrillServiceError::Session` if the first problem cannot be built.
    pub fn restart(&mut self) -> Result<DrillOutcome, DrillServiceError> {
        self.dispatch(Action::Restart)
    }

    fn dispatch(&mut self, action: Action) -> Result<DrillOutcome, DrillServiceError> {
        let transition = self.state.apply(action, &mut self.rng).inspect_err(|err| {
            tracing::debug!(?action, error = %err, "drill action rejected");
        })?;

        // Built before the swap; a failure leaves the state untouched.
        let report = if transition
            .events
            .iter()
            .any(|event| matches!(event, DrillEvent::SetComplete { .. }))
        {
            Some(self.report_for(&transition.state)?)
        } else {
            None
        };

        self.state = transition.state;
        if action == Action::Restart {
            self.started_at = self.clock.now();
            self.last_report = None;
        }

        for event in &transition.events {
            match event {
                DrillEvent::ProblemSolved => {
                    let config = self.state.config();
                    for sink in &self.sinks {
                        sink.problem_solved(config);
                    }
                }
                DrillEvent::SetComplete { .. } => {
                    if let Some(report) = &report {
                        for sink in &self.sinks {
                            sink.set_complete(report);
                        }
                    }
                }
            }
        }
        if report.is_some() {
            self.last_report = report;
        }

        Ok(DrillOutcome {
            events: transition.events,
            phase: self.state.phase(),
        })
    }

    fn report_for(&self, state: &SessionState) -> Result<SetReport, DrillServiceError> {
        let summary = state.summary().ok_or(DrillServiceError::NotComplete)?;
        Ok(SetReport::new(
            state.config(),
            summary,
            state.results().to_vec(),
            self.started_at,
            self.clock.now(),
        ))
    }
}

impl fmt::Debug for DrillService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrillService")
            .field("state", &self.state)
            .field("started_at", &self.started_at)
            .field("sinks_len", &self.sinks.len())
            .field("last_report", &self.last_report)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
