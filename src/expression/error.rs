//! Error types for expression parsing and evaluation

use std::fmt;
use std::io;
use std::sync::Arc;

/// A malformed expression
///
/// `position` is the byte offset of the offending token in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong
    pub message: Arc<str>,
    /// Byte offset into the input
    pub position: usize,
    /// Tokens that would have been accepted, when known
    pub expected: Option<Vec<Arc<str>>>,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<Arc<str>>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
            expected: None,
        }
    }

    pub(crate) fn expecting<'a>(
        message: impl Into<Arc<str>>,
        position: usize,
        expected: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        ParseError {
            message: message.into(),
            position,
            expected: Some(expected.into_iter().map(Arc::from).collect()),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)?;
        if let Some(expected) = &self.expected {
            let list: Vec<&str> = expected.iter().map(|s| s.as_ref()).collect();
            write!(f, ". Expected: {}", list.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for io::Error {
    fn from(err: ParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Failure while evaluating an expression or simulating a circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// The assignment has no value for a referenced variable
    UndefinedVariable {
        /// The missing variable
        name: Arc<str>,
    },
    /// A circuit edge names a gate the circuit does not contain
    UnknownNode {
        /// The dangling gate id
        id: Arc<str>,
    },
    /// A circuit has no output with this name
    UnknownOutput {
        /// The requested output
        name: Arc<str>,
    },
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationError::UndefinedVariable { name } => {
                write!(f, "Variable '{}' is not defined in the assignment", name)
            }
            EvaluationError::UnknownNode { id } => {
                write!(f, "Circuit references unknown gate '{}'", id)
            }
            EvaluationError::UnknownOutput { name } => {
                write!(f, "Circuit has no output named '{}'", name)
            }
        }
    }
}

impl std::error::Error for EvaluationError {}

impl From<EvaluationError> for io::Error {
    fn from(err: EvaluationError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
