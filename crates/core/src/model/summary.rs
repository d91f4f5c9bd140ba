use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SetSummaryError {
    #[error("a set needs at least one question")]
    Empty,

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CountMismatch { correct: u32, total: u32 },

    #[error("too many results for a single set: {len}")]
    TooManyResults { len: usize },
}

/// Score band shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultBand {
    /// Every answer correct.
    Perfect,
    /// 80% or more.
    Excellent,
    /// 60% or more.
    Good,
    /// 40% or more.
    NeedsPractice,
    KeepTrying,
}

impl ResultBand {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            100.. => Self::Perfect,
            80..=99 => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::NeedsPractice,
            _ => Self::KeepTrying,
        }
    }
}

/// Aggregate score for a finished set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSummary {
    correct: u32,
    total: u32,
    percentage: u32,
    band: ResultBand,
}

impl SetSummary {
    /// # Errors
    ///
    /// Returns `SetSummaryError::Empty` for a zero-length set and
    /// `SetSummaryError::CountMismatch` if `correct > total`.
    pub fn new(correct: u32, total: u32) -> Result<Self, SetSummaryError> {
        if total == 0 {
            return Err(SetSummaryError::Empty);
        }
        if correct > total {
            return Err(SetSummaryError::CountMismatch { correct, total });
        }
        // round-half-up in integer arithmetic
        let percentage = (correct * 200 + total) / (total * 2);
        Ok(Self {
            correct,
            total,
            percentage,
            band: ResultBand::from_percentage(percentage),
        })
    }

    /// Build a summary from per-question correctness flags.
    ///
    /// # Errors
    ///
    /// Returns `SetSummaryError::TooManyResults` if the count does not fit in `u32`,
    /// otherwise the same errors as [`SetSummary::new`].
    pub fn from_results(results: &[bool]) -> Result<Self, SetSummaryError> {
        let total = u32::try_from(results.len())
            .map_err(|_| SetSummaryError::TooManyResults { len: results.len() })?;
        let correct = results.iter().fold(0_u32, |acc, ok| acc + u32::from(*ok));
        Self::new(correct, total)
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.total - self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn band(&self) -> ResultBand {
        self.band
    }
}
