//! Conversions between bit-pattern strings, row indices and assignments
//!
//! Patterns list the most significant input first, in the table's variable
//! order, so the pattern of row `i` is `i` written in binary.

use std::sync::Arc;

use super::{TruthTableError, MAX_INPUT_VARIABLES};
use crate::expression::Assignment;

/// Fail if `count` inputs would exceed the table size cap
pub fn validate_variable_count(count: usize) -> Result<(), TruthTableError> {
    if count > MAX_INPUT_VARIABLES {
        return Err(TruthTableError::TooManyVariables {
            count,
            max: MAX_INPUT_VARIABLES,
        });
    }
    Ok(())
}

/// The pattern of row `index` in a table with `width` inputs
pub fn index_to_pattern(index: usize, width: usize) -> String {
    (0..width)
        .map(|bit| {
            if (index >> (width - 1 - bit)) & 1 == 1 {
                '1'
            } else {
                '0'
            }
        })
        .collect()
}

/// The row index of a full `0`/`1` pattern
pub fn pattern_to_index(pattern: &str, width: usize) -> Result<usize, TruthTableError> {
    if pattern.len() != width {
        return Err(TruthTableError::PatternLengthMismatch {
            pattern_length: pattern.chars().count(),
            variable_count: width,
        });
    }
    pattern.bytes().try_fold(0usize, |index, byte| match byte {
        b'0' => Ok(index << 1),
        b'1' => Ok((index << 1) | 1),
        _ => Err(TruthTableError::InvalidPattern {
            pattern: Arc::from(pattern),
        }),
    })
}

/// All `2^count` patterns in ascending numeric order
///
/// Zero inputs yield the single empty pattern.
///
/// ```
/// use logic_synth::truth_table::generate_all_patterns;
///
/// assert_eq!(generate_all_patterns(2).unwrap(), ["00", "01", "10", "11"]);
/// assert_eq!(generate_all_patterns(0).unwrap(), [""]);
/// ```
pub fn generate_all_patterns(count: usize) -> Result<Vec<String>, TruthTableError> {
    validate_variable_count(count)?;
    Ok((0..1usize << count)
        .map(|index| index_to_pattern(index, count))
        .collect())
}

/// Map each variable to the bit at its position in `pattern`
pub fn pattern_to_assignment(
    pattern: &str,
    variables: &[Arc<str>],
) -> Result<Assignment, TruthTableError> {
    let index = pattern_to_index(pattern, variables.len())?;
    Ok(index_to_assignment(index, variables))
}

pub(crate) fn index_to_assignment(index: usize, variables: &[Arc<str>]) -> Assignment {
    let width = variables.len();
    variables
        .iter()
        .enumerate()
        .map(|(bit, name)| (Arc::clone(name), (index >> (width - 1 - bit)) & 1 == 1))
        .collect()
}

/// Render the values of `variables` as a pattern
pub fn assignment_to_pattern(
    assignment: &Assignment,
    variables: &[Arc<str>],
) -> Result<String, TruthTableError> {
    variables
        .iter()
        .map(|name| match assignment.get(name) {
            Some(true) => Ok('1'),
            Some(false) => Ok('0'),
            None => Err(TruthTableError::MissingVariable {
                name: Arc::clone(name),
            }),
        })
        .collect()
}
