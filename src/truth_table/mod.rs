//! Truth tables with don't-care outputs and multiple output columns
//!
//! A [`TruthTable`] always holds exactly one row per input pattern: `2^n`
//! rows for `n` inputs, a single row for zero inputs. Rows are stored densely
//! by index, so the "every pattern exactly once" invariant holds by
//! construction.
//!
//! Tables come from three places:
//!
//! - [`generate_truth_table`] evaluates an [`Expr`] over every input pattern,
//!   with the variables sorted lexicographically;
//! - [`TruthTable::empty`] creates an all-false table to be filled in with
//!   [`TruthTable::set`] or [`TruthTable::cycle`];
//! - the PLA reader in [`crate::pla`].
//!
//! ```
//! use logic_synth::truth_table::{expression_to_truth_table, OutputValue};
//!
//! let table = expression_to_truth_table("B・A", "Y").unwrap();
//! assert_eq!(table.input_variables()[0].as_ref(), "A");
//! assert_eq!(table.value("11", "Y").unwrap(), OutputValue::True);
//! assert_eq!(table.value("01", "Y").unwrap(), OutputValue::False);
//! ```

mod canonical;
mod error;
mod patterns;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::debug;

pub use canonical::{truth_table_to_pos, truth_table_to_sop};
pub use error::TruthTableError;
pub use patterns::{
    assignment_to_pattern, generate_all_patterns, index_to_pattern, pattern_to_assignment,
    pattern_to_index, validate_variable_count,
};

pub(crate) use patterns::index_to_assignment;

use crate::expression::{parse, Expr};

/// Largest supported number of input variables
pub const MAX_INPUT_VARIABLES: usize = 10;

/// Largest supported number of output variables (one bit each in a `u64` mask)
pub const MAX_OUTPUT_VARIABLES: usize = 64;

/// Value of one output for one input pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputValue {
    True,
    #[default]
    False,
    /// Unconstrained; minimization may pick either value
    DontCare,
}

impl OutputValue {
    /// Next value in the editing cycle `True -> False -> DontCare -> True`
    pub fn cycle(self) -> Self {
        match self {
            OutputValue::True => OutputValue::False,
            OutputValue::False => OutputValue::DontCare,
            OutputValue::DontCare => OutputValue::True,
        }
    }

    /// Swap `True` and `False`, keeping `DontCare`
    pub fn invert(self) -> Self {
        match self {
            OutputValue::True => OutputValue::False,
            OutputValue::False => OutputValue::True,
            OutputValue::DontCare => OutputValue::DontCare,
        }
    }

    /// The concrete value, or `None` for a don't-care
    pub fn as_bool(self) -> Option<bool> {
        match self {
            OutputValue::True => Some(true),
            OutputValue::False => Some(false),
            OutputValue::DontCare => None,
        }
    }

    /// True for `True` and `DontCare`, the values an implicant may cover
    pub fn may_be_true(self) -> bool {
        self != OutputValue::False
    }
}

impl From<bool> for OutputValue {
    fn from(value: bool) -> Self {
        if value {
            OutputValue::True
        } else {
            OutputValue::False
        }
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputValue::True => "1",
            OutputValue::False => "0",
            OutputValue::DontCare => "x",
        })
    }
}

/// A complete truth table over named inputs and outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    input_variables: Vec<Arc<str>>,
    output_variables: Vec<Arc<str>>,
    /// `rows[index][output]`, with `index` the numeric value of the pattern
    rows: Vec<Vec<OutputValue>>,
}

impl TruthTable {
    /// An all-false table over the given inputs and outputs
    ///
    /// Names must be unique within inputs and within outputs.
    pub fn empty<I, O>(inputs: I, outputs: O) -> Result<Self, TruthTableError>
    where
        I: IntoIterator,
        I::Item: Into<Arc<str>>,
        O: IntoIterator,
        O::Item: Into<Arc<str>>,
    {
        let input_variables: Vec<Arc<str>> = inputs.into_iter().map(Into::into).collect();
        let output_variables: Vec<Arc<str>> = outputs.into_iter().map(Into::into).collect();

        validate_variable_count(input_variables.len())?;
        if output_variables.len() > MAX_OUTPUT_VARIABLES {
            return Err(TruthTableError::TooManyOutputs {
                count: output_variables.len(),
                max: MAX_OUTPUT_VARIABLES,
            });
        }
        check_unique(&input_variables)?;
        check_unique(&output_variables)?;

        let rows = vec![
            vec![OutputValue::False; output_variables.len()];
            1usize << input_variables.len()
        ];
        Ok(TruthTable {
            input_variables,
            output_variables,
            rows,
        })
    }

    pub fn input_variables(&self) -> &[Arc<str>] {
        &self.input_variables
    }

    pub fn output_variables(&self) -> &[Arc<str>] {
        &self.output_variables
    }

    pub fn num_inputs(&self) -> usize {
        self.input_variables.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.output_variables.len()
    }

    /// Number of rows, `2^num_inputs()`
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Output values of row `index`, in output order
    pub fn row(&self, index: usize) -> Option<&[OutputValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Iterate `(pattern, values)` in ascending pattern order
    pub fn entries(&self) -> impl Iterator<Item = (String, &[OutputValue])> + '_ {
        let width = self.num_inputs();
        self.rows
            .iter()
            .enumerate()
            .map(move |(index, values)| (index_to_pattern(index, width), values.as_slice()))
    }

    /// Position of an output column
    pub fn output_index(&self, name: &str) -> Result<usize, TruthTableError> {
        self.output_variables
            .iter()
            .position(|output| output.as_ref() == name)
            .ok_or_else(|| TruthTableError::UnknownOutput {
                name: Arc::from(name),
            })
    }

    /// Value of output `output` for `pattern`
    pub fn value(&self, pattern: &str, output: &str) -> Result<OutputValue, TruthTableError> {
        let index = pattern_to_index(pattern, self.num_inputs())?;
        let column = self.output_index(output)?;
        Ok(self.rows[index][column])
    }

    /// Overwrite one cell
    pub fn set(
        &mut self,
        pattern: &str,
        output: &str,
        value: OutputValue,
    ) -> Result<(), TruthTableError> {
        let index = pattern_to_index(pattern, self.num_inputs())?;
        let column = self.output_index(output)?;
        self.rows[index][column] = value;
        Ok(())
    }

    /// Advance one cell through `True -> False -> DontCare` and return the new value
    pub fn cycle(&mut self, pattern: &str, output: &str) -> Result<OutputValue, TruthTableError> {
        let index = pattern_to_index(pattern, self.num_inputs())?;
        let column = self.output_index(output)?;
        let cell = &mut self.rows[index][column];
        *cell = cell.cycle();
        Ok(*cell)
    }

    pub(crate) fn set_at(&mut self, index: usize, column: usize, value: OutputValue) {
        self.rows[index][column] = value;
    }

    /// The same table with `True` and `False` swapped in every cell
    pub fn inverted(&self) -> Self {
        TruthTable {
            input_variables: self.input_variables.clone(),
            output_variables: self.output_variables.clone(),
            rows: self
                .rows
                .iter()
                .map(|values| values.iter().map(|value| value.invert()).collect())
                .collect(),
        }
    }
}

fn check_unique(names: &[Arc<str>]) -> Result<(), TruthTableError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_ref()) {
            return Err(TruthTableError::DuplicateVariable {
                name: Arc::clone(name),
            });
        }
    }
    Ok(())
}

/// Evaluate `expr` on every input pattern
///
/// Columns are the expression's variables in lexicographic order, regardless
/// of where they first occur in the expression.
pub fn generate_truth_table(
    expr: &Expr,
    output_name: &str,
) -> Result<TruthTable, TruthTableError> {
    let mut variables = expr.variables();
    variables.sort();
    validate_variable_count(variables.len())?;
    debug!(
        "generating truth table for {} over {} variables",
        output_name,
        variables.len()
    );

    let mut table = TruthTable::empty(variables, [output_name])?;
    for index in 0..table.num_rows() {
        let assignment = index_to_assignment(index, &table.input_variables);
        let value = expr.evaluate(&assignment)?;
        table.set_at(index, 0, value.into());
    }
    Ok(table)
}

/// Parse `text` and tabulate it (see [`generate_truth_table`])
pub fn expression_to_truth_table(
    text: &str,
    output_name: &str,
) -> Result<TruthTable, crate::Error> {
    let expr = parse(text)?;
    Ok(generate_truth_table(&expr, output_name)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_table() {
        let table = expression_to_truth_table("A & B", "Y").unwrap();
        let values: Vec<(String, OutputValue)> = table
            .entries()
            .map(|(pattern, values)| (pattern, values[0]))
            .collect();
        assert_eq!(
            values,
            vec![
                ("00".to_string(), OutputValue::False),
                ("01".to_string(), OutputValue::False),
                ("10".to_string(), OutputValue::False),
                ("11".to_string(), OutputValue::True),
            ]
        );
    }

    #[test]
    fn test_variables_are_sorted() {
        let table = expression_to_truth_table("C + A・B", "F").unwrap();
        let inputs: Vec<&str> = table.input_variables().iter().map(|s| s.as_ref()).collect();
        assert_eq!(inputs, vec!["A", "B", "C"]);
        assert_eq!(table.num_rows(), 8);
        // C alone sets the output
        assert_eq!(table.value("001", "F").unwrap(), OutputValue::True);
        assert_eq!(table.value("110", "F").unwrap(), OutputValue::True);
        assert_eq!(table.value("100", "F").unwrap(), OutputValue::False);
    }

    #[test]
    fn test_constant_expression_has_single_row() {
        let table = expression_to_truth_table("1", "Y").unwrap();
        assert_eq!(table.num_inputs(), 0);
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.value("", "Y").unwrap(), OutputValue::True);
    }

    #[test]
    fn test_eleven_variables_rejected() {
        let text = "A + B + C + D + E + F + G + H + I + J + K";
        let err = expression_to_truth_table(text, "Y").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::TruthTable(TruthTableError::TooManyVariables { count: 11, .. })
        ));
    }

    #[test]
    fn test_ten_variables_accepted() {
        let text = "A・B・C・D・E・F・G・H・I・J";
        let table = expression_to_truth_table(text, "Y").unwrap();
        assert_eq!(table.num_rows(), 1024);
        assert_eq!(table.value("1111111111", "Y").unwrap(), OutputValue::True);
    }

    #[test]
    fn test_empty_table_and_editing() {
        let mut table = TruthTable::empty(["A", "B"], ["Y", "Z"]).unwrap();
        assert!(table
            .entries()
            .all(|(_, values)| values.iter().all(|v| *v == OutputValue::False)));

        table.set("10", "Z", OutputValue::True).unwrap();
        assert_eq!(table.value("10", "Z").unwrap(), OutputValue::True);
        assert_eq!(table.cycle("10", "Z").unwrap(), OutputValue::False);
        assert_eq!(table.cycle("10", "Z").unwrap(), OutputValue::DontCare);
        assert_eq!(table.cycle("10", "Z").unwrap(), OutputValue::True);

        assert!(matches!(
            table.set("10", "W", OutputValue::True),
            Err(TruthTableError::UnknownOutput { .. })
        ));
        assert!(matches!(
            table.set("1", "Y", OutputValue::True),
            Err(TruthTableError::PatternLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        assert!(matches!(
            TruthTable::empty(["A", "A"], ["Y"]),
            Err(TruthTableError::DuplicateVariable { .. })
        ));
        assert!(matches!(
            TruthTable::empty(["A"], ["Y", "Y"]),
            Err(TruthTableError::DuplicateVariable { .. })
        ));
    }

    #[test]
    fn test_inverted_keeps_dont_cares() {
        let mut table = TruthTable::empty(["A"], ["Y"]).unwrap();
        table.set("1", "Y", OutputValue::DontCare).unwrap();
        let inverted = table.inverted();
        assert_eq!(inverted.value("0", "Y").unwrap(), OutputValue::True);
        assert_eq!(inverted.value("1", "Y").unwrap(), OutputValue::DontCare);
    }
}
