//! Error types for circuit construction and gate-library mapping

use std::fmt;
use std::io;
use std::sync::Arc;

use super::GateType;

/// Errors raised while building or rewriting a circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// A fixed-library transformer met a gate it has no rule for
    Unsupported {
        /// Name of the transformer, e.g. `to_nand_only`
        transformer: Arc<str>,
        /// The gate type that could not be mapped
        gate: GateType,
    },
    /// No combination of the enabled gates realizes this gate type
    Unsynthesizable {
        /// The gate type that could not be realized
        gate: GateType,
    },
    /// An edge names a node that does not exist
    UnknownNode {
        /// The dangling input name or gate id
        id: Arc<str>,
    },
    /// A gate was given a number of inputs it cannot take
    InvalidArity {
        /// The gate type
        gate: GateType,
        /// Number of inputs supplied
        arity: usize,
    },
    /// A gate type name that is not recognized
    UnknownGateType {
        /// The unrecognized name
        name: Arc<str>,
    },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisError::Unsupported { transformer, gate } => write!(
                f,
                "Transformer '{}' does not support gate type: {}",
                transformer, gate
            ),
            SynthesisError::Unsynthesizable { gate } => write!(
                f,
                "Cannot synthesize gate type '{}' from the enabled gate set",
                gate
            ),
            SynthesisError::UnknownNode { id } => {
                write!(f, "Circuit references unknown node '{}'", id)
            }
            SynthesisError::InvalidArity { gate, arity } => {
                write!(f, "Gate type '{}' cannot take {} inputs", gate, arity)
            }
            SynthesisError::UnknownGateType { name } => {
                write!(f, "Unknown gate type '{}'", name)
            }
        }
    }
}

impl std::error::Error for SynthesisError {}

impl From<SynthesisError> for io::Error {
    fn from(err: SynthesisError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
