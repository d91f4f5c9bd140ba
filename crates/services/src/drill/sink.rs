use std::sync::{Mutex, PoisonError};

use drill_core::DrillConfig;

use super::report::SetReport;

/// Receives drill events dispatched by `DrillService`.
pub trait DrillEventSink: Send + Sync {
    /// Called once per correct answer.
    fn problem_solved(&self, config: DrillConfig);

    /// Called once per finished set.
    fn set_complete(&self, report: &SetReport);
}

/// Logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DrillEventSink for TracingSink {
    fn problem_solved(&self, config: DrillConfig) {
        tracing::debug!(
            difficulty = %config.difficulty,
            operation = %config.operation,
            "problem solved"
        );
    }

    fn set_complete(&self, report: &SetReport) {
        tracing::info!(
            report_id = %report.id,
            difficulty = %report.config.difficulty,
            operation = %report.config.operation,
            correct = report.summary.correct(),
            total = report.summary.total(),
            percentage = report.summary.percentage(),
            elapsed_secs = report.elapsed().num_seconds(),
            "set complete"
        );
        match report.to_json() {
            Ok(json) => tracing::trace!(report = %json, "set report"),
            Err(err) => tracing::warn!(error = %err, "failed to serialize set report"),
        }
    }
}

/// Recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkRecord {
    ProblemSolved(DrillConfig),
    SetComplete(SetReport),
}

/// Keeps every call in memory; useful for hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<SinkRecord>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> Vec<SinkRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.records()
            .iter()
            .filter(|r| matches!(r, SinkRecord::ProblemSolved(_)))
            .count()
    }

    #[must_use]
    pub fn reports(&self) -> Vec<SetReport> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                SinkRecord::SetComplete(report) => Some(report),
                SinkRecord::ProblemSolved(_) => None,
            })
            .collect()
    }

    fn push(&self, record: SinkRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

impl DrillEventSink for RecordingSink {
    fn problem_solved(&self, config: DrillConfig) {
        self.push(SinkRecord::ProblemSolved(config));
    }

    fn set_complete(&self, report: &SetReport) {
        self.push(SinkRecord::SetComplete(report.clone()));
    }
}
