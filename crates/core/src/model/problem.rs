use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised while parsing drill configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("unknown difficulty: {0} (expected easy, medium, hard or 1-3)")]
    UnknownDifficulty(String),

    #[error("unknown operation: {0} (expected addition or subtraction)")]
    UnknownOperation(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty tier controlling operand ranges.
///
/// - `Easy`: both operands in `1..=3`
/// - `Medium`: operands in `1..=9` whose sum stays within 9
/// - `Hard`: both operands in `1..=9`, unconstrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Numeric tier (1-3).
    #[must_use]
    pub fn tier(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Inclusive range each operand is drawn from.
    #[must_use]
    pub fn operand_range(self) -> RangeInclusive<u32> {
        match self {
            Difficulty::Easy => 1..=3,
            Difficulty::Medium | Difficulty::Hard => 1..=9,
        }
    }

    /// Upper bound on `a + b` for a generated pair, if the tier has one.
    #[must_use]
    pub fn pair_sum_limit(self) -> Option<u32> {
        match self {
            Difficulty::Medium => Some(9),
            Difficulty::Easy | Difficulty::Hard => None,
        }
    }

    /// Returns true when the (unordered) pair is allowed for this tier.
    #[must_use]
    pub fn admits(self, a: u32, b: u32) -> bool {
        let range = self.operand_range();
        range.contains(&a)
            && range.contains(&b)
            && self.pair_sum_limit().is_none_or(|limit| a + b <= limit)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Self::Easy),
            "medium" | "2" => Ok(Self::Medium),
            "hard" | "3" => Ok(Self::Hard),
            _ => Err(ParseError::UnknownDifficulty(s.to_string())),
        }
    }
}

//
// ─── OPERATION ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Addition, Operation::Subtraction];

    /// Operator symbol used when rendering a problem.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '-',
        }
    }

    /// Inclusive range of values accepted as answers (and distractors).
    #[must_use]
    pub fn answer_bounds(self) -> RangeInclusive<u32> {
        match self {
            Operation::Addition => 1..=MAX_ANSWER,
            Operation::Subtraction => 0..=MAX_ANSWER,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
        };
        f.write_str(name)
    }
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "addition" | "+" => Ok(Self::Addition),
            "sub" | "subtraction" | "-" => Ok(Self::Subtraction),
            _ => Err(ParseError::UnknownOperation(s.to_string())),
        }
    }
}

/// Largest answer any supported tier can produce (9 + 9).
pub const MAX_ANSWER: u32 = 18;

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// A single arithmetic problem.
///
/// Only the generator builds problems, from pairs its tier admits.
/// Subtraction operands are reordered so the result is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Problem {
    operand_a: u32,
    operand_b: u32,
    operation: Operation,
}

impl Problem {
    #[must_use]
    pub(crate) fn new(operand_a: u32, operand_b: u32, operation: Operation) -> Self {
        let (operand_a, operand_b) = match operation {
            Operation::Subtraction if operand_a < operand_b => (operand_b, operand_a),
            _ => (operand_a, operand_b),
        };
        Self {
            operand_a,
            operand_b,
            operation,
        }
    }

    #[must_use]
    pub fn operand_a(&self) -> u32 {
        self.operand_a
    }

    #[must_use]
    pub fn operand_b(&self) -> u32 {
        self.operand_b
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn result(&self) -> u32 {
        match self.operation {
            Operation::Addition => self.operand_a + self.operand_b,
            Operation::Subtraction => self.operand_a - self.operand_b,
        }
    }

    #[must_use]
    pub fn pair(&self) -> OperandPair {
        OperandPair::new(self.operand_a, self.operand_b)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = ?",
            self.operand_a,
            self.operation.symbol(),
            self.operand_b
        )
    }
}

/// Unordered operand pair; `(1, 2)` and `(2, 1)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperandPair {
    low: u32,
    high: u32,
}

impl OperandPair {
    #[must_use]
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    #[must_use]
    pub fn low(&self) -> u32 {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> u32 {
        self.high
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
