//! Crate-level error type
//!
//! Every module reports its own error enum. [`Error`] wraps them so that the
//! pipeline and other cross-module entry points can use `?` throughout, while
//! callers can still match on the specific failure.

use std::fmt;
use std::io;

use crate::circuit::SynthesisError;
use crate::expression::{EvaluationError, ParseError};
use crate::pla::{PLAReadError, PLAWriteError};
use crate::truth_table::TruthTableError;

/// Any failure of the logic-synth pipeline
#[derive(Debug)]
pub enum Error {
    /// Expression text could not be parsed
    Parse(ParseError),
    /// Expression evaluation failed
    Evaluation(EvaluationError),
    /// Truth table construction or access failed
    TruthTable(TruthTableError),
    /// Circuit construction or technology mapping failed
    Synthesis(SynthesisError),
    /// PLA input could not be read
    PLARead(PLAReadError),
    /// PLA output could not be written
    PLAWrite(PLAWriteError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Evaluation(e) => write!(f, "Evaluation error: {}", e),
            Error::TruthTable(e) => write!(f, "Truth table error: {}", e),
            Error::Synthesis(e) => write!(f, "Synthesis error: {}", e),
            Error::PLARead(e) => write!(f, "{}", e),
            Error::PLAWrite(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Evaluation(e) => Some(e),
            Error::TruthTable(e) => Some(e),
            Error::Synthesis(e) => Some(e),
            Error::PLARead(e) => Some(e),
            Error::PLAWrite(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<EvaluationError> for Error {
    fn from(err: EvaluationError) -> Self {
        Error::Evaluation(err)
    }
}

impl From<TruthTableError> for Error {
    fn from(err: TruthTableError) -> Self {
        Error::TruthTable(err)
    }
}

impl From<SynthesisError> for Error {
    fn from(err: SynthesisError) -> Self {
        Error::Synthesis(err)
    }
}

impl From<PLAReadError> for Error {
    fn from(err: PLAReadError) -> Self {
        Error::PLARead(err)
    }
}

impl From<PLAWriteError> for Error {
    fn from(err: PLAWriteError) -> Self {
        Error::PLAWrite(err)
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::PLARead(e) => e.into(),
            Error::PLAWrite(e) => e.into(),
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::GateType;
    use std::error::Error as _;
    use std::sync::Arc;

    #[test]
    fn test_wrapped_messages() {
        let err: Error = TruthTableError::TooManyVariables { count: 12, max: 10 }.into();
        assert!(err.to_string().starts_with("Truth table error: "));

        let err: Error = SynthesisError::Unsynthesizable {
            gate: GateType::Not,
        }
        .into();
        assert!(err.to_string().contains("'not'"));
    }

    #[test]
    fn test_source_is_inner_error() {
        let err: Error = EvaluationError::UndefinedVariable {
            name: Arc::from("A"),
        }
        .into();
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_is_preserved() {
        let inner = io::Error::new(io::ErrorKind::NotFound, "missing.pla");
        let err: Error = PLAReadError::Io(inner).into();
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);

        let err: Error = SynthesisError::UnknownGateType {
            name: Arc::from("mux"),
        }
        .into();
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }
}
