use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use drill_core::DrillConfig;
use drill_core::model::SetSummary;

/// Identifier attached to every finished-set report.
pub type SetReportId = Uuid;

/// Finished set, handed to sinks for external reporting.
///
/// Reports are not persisted; sinks decide what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetReport {
    pub id: SetReportId,
    pub config: DrillConfig,
    pub summary: SetSummary,
    pub results: Vec<bool>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl SetReport {
    #[must_use]
    pub fn new(
        config: DrillConfig,
        summary: SetSummary,
        results: Vec<bool>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            summary,
            results,
            started_at,
            completed_at,
        }
    }

    /// Wall time spent on the set; zero if the clock went backwards.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        (self.completed_at - self.started_at).max(Duration::zero())
    }

    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
