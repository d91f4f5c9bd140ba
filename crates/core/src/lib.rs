#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod model;
pub mod session;

pub use error::Error;
pub use session::{
    Action, AnswerRecord, DrillConfig, DrillEvent, Phase, SET_LENGTH, SessionError, SessionState,
    SlotStatus, Transition,
};
