use thiserror::Error;

use crate::model::{ChoiceError, ParseError, SetSummaryError};
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Choices(#[from] ChoiceError),
    #[error(transparent)]
    Summary(#[from] SetSummaryError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_errors_convert_transparently() {
        let err: Error = ParseError::UnknownOperation("times".to_string()).into();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(
            err.to_string(),
            "unknown operation: times (expected addition or subtraction)"
        );

        let err: Error = SessionError::NotAChoice(7).into();
        assert!(matches!(err, Error::Session(_)));
    }
}
