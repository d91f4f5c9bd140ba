use serde::Serialize;
use thiserror::Error;

/// Number of answer choices offered per problem.
pub const CHOICE_COUNT: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChoiceError {
    #[error("correct answer {correct} is outside the answer range {min}..={max}")]
    OutOfRange { correct: u32, min: u32, max: u32 },

    #[error("only {available} distractors available around {correct}")]
    Unsatisfiable { correct: u32, available: usize },

    #[error("choices must be 3 distinct values including the answer")]
    Malformed,
}

/// Three distinct answer choices, sorted ascending, one of which is correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceSet {
    values: [u32; CHOICE_COUNT],
}

impl ChoiceSet {
    /// Build a choice set from the correct answer and two distractors.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceError::Malformed` if any two values coincide.
    pub fn new(correct: u32, distractors: [u32; 2]) -> Result<Self, ChoiceError> {
        let mut values = [correct, distractors[0], distractors[1]];
        values.sort_unstable();
        if values.windows(2).any(|w| w[0] == w[1]) {
            return Err(ChoiceError::Malformed);
        }
        Ok(Self { values })
    }

    #[must_use]
    pub fn values(&self) -> &[u32; CHOICE_COUNT] {
        &self.values
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.values.contains(&value)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied()
    }
}
