mod choices;
mod problem;
mod summary;

pub use choices::{CHOICE_COUNT, ChoiceError, ChoiceSet};
pub use problem::{Difficulty, MAX_ANSWER, OperandPair, Operation, ParseError, Problem};
pub use summary::{ResultBand, SetSummary, SetSummaryError};
