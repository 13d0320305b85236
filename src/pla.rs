//! PLA (Programmable Logic Array) format support for truth tables
//!
//! The text format is the one Berkeley tools use:
//!
//! ```text
//! .i 2
//! .o 1
//! .ilb A B
//! .ob Y
//! .type fr
//! .p 2
//! 1- 1
//! 00 0
//! .e
//! ```
//!
//! Input columns are over `0`, `1` and `-` (either value); a `-` input stands
//! for every matching row. Output columns use `1` (on), `-` or `2` (don't
//! care) and `~` (nothing said). What `0` means depends on `.type`: in `fr`
//! and `fdr` files it marks the row as off, in `f` and `fd` files (the
//! default) it says nothing. Rows no cube mentions are off.

mod error;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use log::debug;

pub use error::{PLAError, PLAReadError, PLAWriteError};

use crate::truth_table::{index_to_pattern, OutputValue, TruthTable};

/// Types that can be written as PLA text
pub trait PLAWriter {
    /// Write PLA text to any writer
    ///
    /// Both `to_pla_string` and `to_pla_file` delegate to this method.
    fn write_pla<W: Write>(&self, writer: &mut W) -> Result<(), PLAWriteError>;

    /// Render PLA text into a string
    fn to_pla_string(&self) -> Result<String, PLAWriteError> {
        let mut buffer = Vec::new();
        self.write_pla(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| PLAWriteError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Write PLA text to a file
    fn to_pla_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PLAWriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_pla(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Types that can be parsed from PLA text
pub trait PLAReader: Sized {
    /// Parse from any buffered reader
    ///
    /// Both `from_pla_string` and `from_pla_file` delegate to this method.
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PLAReadError>;

    /// Parse from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use logic_synth::pla::PLAReader;
    /// use logic_synth::truth_table::{OutputValue, TruthTable};
    ///
    /// let pla = ".i 2\n.o 1\n.p 1\n1- 1\n.e\n";
    /// let table = TruthTable::from_pla_string(pla).unwrap();
    /// assert_eq!(table.num_inputs(), 2);
    /// assert_eq!(table.value("10", "y0").unwrap(), OutputValue::True);
    /// assert_eq!(table.value("01", "y0").unwrap(), OutputValue::False);
    /// ```
    fn from_pla_string(s: &str) -> Result<Self, PLAReadError> {
        Self::from_pla_reader(io::Cursor::new(s.as_bytes()))
    }

    /// Load from a file
    fn from_pla_file<P: AsRef<Path>>(path: P) -> Result<Self, PLAReadError> {
        let file = File::open(path)?;
        Self::from_pla_reader(BufReader::new(file))
    }
}

/// Writes one cube per row with a `.type fr` header, so every cell is
/// stated explicitly and reading the text back gives an equal table.
impl PLAWriter for TruthTable {
    fn write_pla<W: Write>(&self, writer: &mut W) -> Result<(), PLAWriteError> {
        writeln!(writer, ".i {}", self.num_inputs())?;
        writeln!(writer, ".o {}", self.num_outputs())?;
        if self.num_inputs() > 0 {
            writeln!(writer, ".ilb {}", join(self.input_variables()))?;
        }
        if self.num_outputs() > 0 {
            writeln!(writer, ".ob {}", join(self.output_variables()))?;
        }
        writeln!(writer, ".type fr")?;
        writeln!(writer, ".p {}", self.num_rows())?;

        for (pattern, values) in self.entries() {
            let outputs: String = values
                .iter()
                .map(|value| match value {
                    OutputValue::True => '1',
                    OutputValue::False => '0',
                    OutputValue::DontCare => '-',
                })
                .collect();
            writeln!(writer, "{} {}", pattern, outputs)?;
        }

        writeln!(writer, ".e")?;
        Ok(())
    }
}

fn join(names: &[Arc<str>]) -> String {
    names
        .iter()
        .map(|name| name.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One output character of a cube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputBit {
    On,
    Off,
    DontCare,
    Unspecified,
}

struct Cube {
    inputs: String,
    outputs: Vec<OutputBit>,
}

impl PLAReader for TruthTable {
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PLAReadError> {
        let mut num_inputs: Option<usize> = None;
        let mut num_outputs: Option<usize> = None;
        let mut input_labels: Option<Vec<Arc<str>>> = None;
        let mut output_labels: Option<Vec<Arc<str>>> = None;
        let mut explicit_off = false;
        let mut cubes = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('.') {
                let parts: Vec<&str> = line.split_whitespace().collect();
                let value = parts.get(1).copied().unwrap_or("");
                match parts.first().copied() {
                    Some(".i") => {
                        num_inputs = Some(value.parse().map_err(|_| {
                            PLAError::InvalidInputDirective {
                                value: Arc::from(value),
                            }
                        })?);
                    }
                    Some(".o") => {
                        num_outputs = Some(value.parse().map_err(|_| {
                            PLAError::InvalidOutputDirective {
                                value: Arc::from(value),
                            }
                        })?);
                    }
                    Some(".ilb") => {
                        input_labels = Some(parts[1..].iter().map(|s| Arc::from(*s)).collect());
                    }
                    Some(".ob") => {
                        output_labels = Some(parts[1..].iter().map(|s| Arc::from(*s)).collect());
                    }
                    Some(".type") => explicit_off = matches!(value, "fr" | "fdr"),
                    Some(".e") | Some(".end") => break,
                    // .p and anything unknown
                    _ => {}
                }
                continue;
            }

            let inputs = num_inputs.ok_or(PLAError::MissingInputDirective)?;
            let outputs = num_outputs.ok_or(PLAError::MissingOutputDirective)?;
            cubes.push(parse_cube(line, number + 1, inputs, outputs, explicit_off)?);
        }

        let num_inputs = num_inputs.unwrap_or(0);
        let num_outputs = num_outputs.unwrap_or(0);
        let input_labels = labels(input_labels, num_inputs, "x", "input")?;
        let output_labels = labels(output_labels, num_outputs, "y", "output")?;
        let mut table = TruthTable::empty(input_labels, output_labels)?;
        debug!(
            "read PLA with {} inputs, {} outputs and {} cubes",
            num_inputs,
            num_outputs,
            cubes.len()
        );

        let mut assigned: Vec<Option<OutputValue>> = vec![None; table.num_rows() * num_outputs];
        for cube in &cubes {
            for index in expand(&cube.inputs) {
                for (column, bit) in cube.outputs.iter().enumerate() {
                    let value = match bit {
                        OutputBit::On => OutputValue::True,
                        OutputBit::Off => OutputValue::False,
                        OutputBit::DontCare => OutputValue::DontCare,
                        OutputBit::Unspecified => continue,
                    };
                    let cell = &mut assigned[index * num_outputs + column];
                    *cell = Some(merge(*cell, value).ok_or_else(|| PLAError::ConflictingValue {
                        pattern: Arc::from(index_to_pattern(index, num_inputs)),
                        output: Arc::clone(&table.output_variables()[column]),
                    })?);
                }
            }
        }

        for (cell, value) in assigned.into_iter().enumerate() {
            if let Some(value) = value {
                table.set_at(cell / num_outputs, cell % num_outputs, value);
            }
        }
        Ok(table)
    }
}

/// Combine two statements about one cell; a care value beats don't-care,
/// `None` on an on/off conflict
fn merge(current: Option<OutputValue>, value: OutputValue) -> Option<OutputValue> {
    match (current, value) {
        (None, value) => Some(value),
        (Some(OutputValue::DontCare), value) => Some(value),
        (Some(current), OutputValue::DontCare) => Some(current),
        (Some(current), value) if current == value => Some(value),
        _ => None,
    }
}

fn labels(
    given: Option<Vec<Arc<str>>>,
    count: usize,
    prefix: &str,
    label_type: &str,
) -> Result<Vec<Arc<str>>, PLAError> {
    match given {
        Some(labels) if labels.len() != count => Err(PLAError::LabelCountMismatch {
            label_type: Arc::from(label_type),
            expected: count,
            actual: labels.len(),
        }),
        Some(labels) => Ok(labels),
        None => Ok((0..count)
            .map(|i| Arc::from(format!("{}{}", prefix, i)))
            .collect()),
    }
}

fn parse_cube(
    line: &str,
    number: usize,
    num_inputs: usize,
    num_outputs: usize,
    explicit_off: bool,
) -> Result<Cube, PLAError> {
    // Some PLA files use | between inputs and outputs, and column layouts
    // may put spaces anywhere
    let compact: Vec<char> = line
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '|')
        .collect();
    if compact.len() != num_inputs + num_outputs {
        return Err(PLAError::CubeDimensionMismatch {
            expected: num_inputs + num_outputs,
            actual: compact.len(),
            line: number,
        });
    }
    let (inputs, outputs) = compact.split_at(num_inputs);

    for (position, &character) in inputs.iter().enumerate() {
        if !matches!(character, '0' | '1' | '-') {
            return Err(PLAError::InvalidInputCharacter {
                character,
                position,
            });
        }
    }

    let outputs = outputs
        .iter()
        .enumerate()
        .map(|(position, &character)| match character {
            '1' => Ok(OutputBit::On),
            '0' if explicit_off => Ok(OutputBit::Off),
            '0' | '~' => Ok(OutputBit::Unspecified),
            '-' | '2' => Ok(OutputBit::DontCare),
            _ => Err(PLAError::InvalidOutputCharacter {
                character,
                position,
            }),
        })
        .collect::<Result<_, _>>()?;

    Ok(Cube {
        inputs: inputs.iter().collect(),
        outputs,
    })
}

/// Row indices matched by an input cube over `0`, `1` and `-`
fn expand(inputs: &str) -> Vec<usize> {
    inputs.chars().fold(vec![0usize], |indices, character| {
        indices
            .into_iter()
            .flat_map(|index| {
                let low = index << 1;
                match character {
                    '0' => vec![low],
                    '1' => vec![low | 1],
                    _ => vec![low, low | 1],
                }
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_dont_care_inputs() {
        assert_eq!(expand("1-"), vec![2, 3]);
        assert_eq!(expand("-0-"), vec![0, 1, 4, 5]);
        assert_eq!(expand(""), vec![0]);
    }

    #[test]
    fn test_merge_rules() {
        assert_eq!(merge(None, OutputValue::False), Some(OutputValue::False));
        assert_eq!(
            merge(Some(OutputValue::DontCare), OutputValue::True),
            Some(OutputValue::True)
        );
        assert_eq!(
            merge(Some(OutputValue::True), OutputValue::DontCare),
            Some(OutputValue::True)
        );
        assert_eq!(merge(Some(OutputValue::True), OutputValue::False), None);
    }

    #[test]
    fn test_labels_and_default_names() {
        let pla = ".i 2\n.o 2\n.ilb A B\n.p 2\n11 1-\n0- 01\n.e\n";
        let table = TruthTable::from_pla_string(pla).unwrap();
        assert_eq!(table.input_variables()[1].as_ref(), "B");
        assert_eq!(table.output_variables()[0].as_ref(), "y0");
        assert_eq!(table.value("11", "y1").unwrap(), OutputValue::DontCare);
        // fd semantics: 0 says nothing, so 00 stays off for y0
        assert_eq!(table.value("00", "y0").unwrap(), OutputValue::False);
        assert_eq!(table.value("01", "y1").unwrap(), OutputValue::True);
    }

    #[test]
    fn test_fr_conflict_is_an_error() {
        let pla = ".i 1\n.o 1\n.type fr\n- 1\n1 0\n.e\n";
        let err = TruthTable::from_pla_string(pla).unwrap_err();
        assert!(matches!(
            err,
            PLAReadError::PLA(PLAError::ConflictingValue { .. })
        ));
    }

    #[test]
    fn test_care_value_beats_dont_care() {
        let pla = ".i 1\n.o 1\n- -\n1 1\n.e\n";
        let table = TruthTable::from_pla_string(pla).unwrap();
        assert_eq!(table.value("1", "y0").unwrap(), OutputValue::True);
        assert_eq!(table.value("0", "y0").unwrap(), OutputValue::DontCare);
    }

    #[test]
    fn test_pipe_separated_cube() {
        let pla = ".i 3\n.o 1\n1 0 1 | 1\n.e\n";
        let table = TruthTable::from_pla_string(pla).unwrap();
        assert_eq!(table.value("101", "y0").unwrap(), OutputValue::True);
    }

    #[test]
    fn test_format_errors() {
        assert!(matches!(
            TruthTable::from_pla_string("11 1\n"),
            Err(PLAReadError::PLA(PLAError::MissingInputDirective))
        ));
        assert!(matches!(
            TruthTable::from_pla_string(".i x\n"),
            Err(PLAReadError::PLA(PLAError::InvalidInputDirective { .. }))
        ));
        assert!(matches!(
            TruthTable::from_pla_string(".i 2\n.o 1\n1 1\n"),
            Err(PLAReadError::PLA(PLAError::CubeDimensionMismatch { line: 3, .. }))
        ));
        assert!(matches!(
            TruthTable::from_pla_string(".i 2\n.o 1\n1x 1\n"),
            Err(PLAReadError::PLA(PLAError::InvalidInputCharacter { character: 'x', position: 1 }))
        ));
        assert!(matches!(
            TruthTable::from_pla_string(".i 2\n.o 1\n11 z\n"),
            Err(PLAReadError::PLA(PLAError::InvalidOutputCharacter { character: 'z', .. }))
        ));
        assert!(matches!(
            TruthTable::from_pla_string(".i 2\n.o 1\n.ilb A\n.e\n"),
            Err(PLAReadError::PLA(PLAError::LabelCountMismatch { expected: 2, actual: 1, .. }))
        ));
        assert!(matches!(
            TruthTable::from_pla_string(".i 11\n.o 1\n.e\n"),
            Err(PLAReadError::Table(_))
        ));
    }

    #[test]
    fn test_written_text() {
        let mut table = TruthTable::empty(["A"], ["Y", "Z"]).unwrap();
        table.set("1", "Y", OutputValue::True).unwrap();
        table.set("0", "Z", OutputValue::DontCare).unwrap();
        assert_eq!(
            table.to_pla_string().unwrap(),
            ".i 1\n.o 2\n.ilb A\n.ob Y Z\n.type fr\n.p 2\n0 0-\n1 10\n.e\n"
        );
    }

    #[test]
    fn test_round_trip_preserves_cells() {
        let mut table = TruthTable::empty(["A", "B"], ["Y"]).unwrap();
        table.set("01", "Y", OutputValue::True).unwrap();
        table.set("10", "Y", OutputValue::DontCare).unwrap();
        let text = table.to_pla_string().unwrap();
        assert_eq!(TruthTable::from_pla_string(&text).unwrap(), table);
    }
}
