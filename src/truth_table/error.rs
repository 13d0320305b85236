//! Error types for truth-table construction and pattern conversion

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::expression::EvaluationError;

/// Errors raised while building, querying or editing a truth table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TruthTableError {
    /// More input variables than the table size cap allows
    TooManyVariables {
        /// Requested number of inputs
        count: usize,
        /// The cap
        max: usize,
    },
    /// More outputs than fit in an output mask
    TooManyOutputs {
        /// Requested number of outputs
        count: usize,
        /// The cap
        max: usize,
    },
    /// A pattern's length differs from the number of variables
    PatternLengthMismatch {
        /// Length of the pattern
        pattern_length: usize,
        /// Number of variables
        variable_count: usize,
    },
    /// A pattern contains something other than `0` and `1`
    InvalidPattern {
        /// The offending pattern
        pattern: Arc<str>,
    },
    /// An assignment lacks a value for one of the variables
    MissingVariable {
        /// The missing variable
        name: Arc<str>,
    },
    /// The same name appears twice among inputs or outputs
    DuplicateVariable {
        /// The repeated name
        name: Arc<str>,
    },
    /// The table has no output of this name
    UnknownOutput {
        /// The requested output
        name: Arc<str>,
    },
    /// Evaluating the source expression failed
    Evaluation(EvaluationError),
}

impl fmt::Display for TruthTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruthTableError::TooManyVariables { count, max } => write!(
                f,
                "Variable count ({}) exceeds maximum allowed ({})",
                count, max
            ),
            TruthTableError::TooManyOutputs { count, max } => write!(
                f,
                "Output count ({}) exceeds maximum allowed ({})",
                count, max
            ),
            TruthTableError::PatternLengthMismatch {
                pattern_length,
                variable_count,
            } => write!(
                f,
                "Pattern length ({}) does not match variable count ({})",
                pattern_length, variable_count
            ),
            TruthTableError::InvalidPattern { pattern } => {
                write!(f, "Invalid pattern '{}': only '0' and '1' are allowed", pattern)
            }
            TruthTableError::MissingVariable { name } => {
                write!(f, "Variable '{}' not found in assignment", name)
            }
            TruthTableError::DuplicateVariable { name } => {
                write!(f, "Variable '{}' appears more than once", name)
            }
            TruthTableError::UnknownOutput { name } => {
                write!(f, "Unknown output variable '{}'", name)
            }
            TruthTableError::Evaluation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TruthTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TruthTableError::Evaluation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EvaluationError> for TruthTableError {
    fn from(err: EvaluationError) -> Self {
        TruthTableError::Evaluation(err)
    }
}

impl From<TruthTableError> for io::Error {
    fn from(err: TruthTableError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
