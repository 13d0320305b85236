//! Gate-level circuits
//!
//! A [`Circuit`] is a directed acyclic graph of gates stored as an arena in
//! creation order. Edges are [`NodeRef`]s naming either a primary input or a
//! gate id, so a gate can only refer to nodes that existed before it.
//!
//! The stages that produce and consume circuits:
//!
//! - [`CircuitBuilder`] assembles a circuit gate by gate;
//! - [`convert_ast_to_circuit`] lowers expressions, sharing identical
//!   sub-expressions across outputs;
//! - [`to_nand_only`], [`to_nor_only`] and [`to_custom_gate_set`] retarget a
//!   circuit to a restricted gate library;
//! - [`optimize_circuit`] removes double negations;
//! - [`circuit_to_expressions`] renders each output back into text.
//!
//! # Examples
//!
//! ```
//! use logic_synth::circuit::{convert_ast_to_circuit, expression_node_to_string, circuit_to_expressions, to_nand_only};
//! use logic_synth::expression::parse;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let y = parse("A・B + C")?;
//! let circuit = convert_ast_to_circuit([("Y", &y)])?;
//! let nand = to_nand_only(&circuit)?;
//!
//! for (name, node) in circuit_to_expressions(&nand)? {
//!     println!("{} = {}", name, expression_node_to_string(&node));
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod convert;
mod error;
mod library;
mod peephole;
mod render;
mod rewrite;


use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use builder::CircuitBuilder;
pub use convert::convert_ast_to_circuit;
pub use error::SynthesisError;
pub use library::{to_custom_gate_set, to_nand_only, to_nor_only, GateSet};
pub use peephole::optimize_circuit;
pub use render::{circuit_to_expressions, expression_node_to_string, ExpressionNode};

use crate::expression::{Assignment, EvaluationError};

/// Kinds of gate a circuit may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GateType {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    /// Identity
    Buf,
    /// Constant one
    Vcc,
    /// Constant zero
    Gnd,
}

impl GateType {
    /// Every gate type
    pub const ALL: [GateType; 10] = [
        GateType::And,
        GateType::Or,
        GateType::Not,
        GateType::Nand,
        GateType::Nor,
        GateType::Xor,
        GateType::Xnor,
        GateType::Buf,
        GateType::Vcc,
        GateType::Gnd,
    ];

    /// Lowercase name, also used as the gate id prefix
    pub fn name(self) -> &'static str {
        match self {
            GateType::And => "and",
            GateType::Or => "or",
            GateType::Not => "not",
            GateType::Nand => "nand",
            GateType::Nor => "nor",
            GateType::Xor => "xor",
            GateType::Xnor => "xnor",
            GateType::Buf => "buf",
            GateType::Vcc => "vcc",
            GateType::Gnd => "gnd",
        }
    }

    /// `vcc` or `gnd`
    pub fn is_constant(self) -> bool {
        matches!(self, GateType::Vcc | GateType::Gnd)
    }

    /// Whether a gate of this type can have `arity` inputs
    ///
    /// Constants take none, `not` and `buf` take one, every other gate takes
    /// two or more.
    pub fn accepts(self, arity: usize) -> bool {
        match self {
            GateType::Vcc | GateType::Gnd => arity == 0,
            GateType::Not | GateType::Buf => arity == 1,
            _ => arity >= 2,
        }
    }

    /// Output of the gate for the given input values
    ///
    /// `xor` is odd parity and `xnor` even parity over all inputs.
    pub fn evaluate(self, inputs: &[bool]) -> bool {
        let ones = inputs.iter().filter(|&&value| value).count();
        match self {
            GateType::And => ones == inputs.len(),
            GateType::Nand => ones != inputs.len(),
            GateType::Or | GateType::Buf => ones > 0,
            GateType::Nor | GateType::Not => ones == 0,
            GateType::Xor => ones % 2 == 1,
            GateType::Xnor => ones % 2 == 0,
            GateType::Vcc => true,
            GateType::Gnd => false,
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateType {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        GateType::ALL
            .into_iter()
            .find(|gate| gate.name() == wanted)
            .ok_or_else(|| SynthesisError::UnknownGateType {
                name: Arc::from(s.trim()),
            })
    }
}

/// Identifier of a gate, unique within its circuit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GateId(Arc<str>);

impl GateId {
    pub(crate) fn new(gate: GateType, serial: usize) -> Self {
        GateId(Arc::from(format!("{}_{}", gate.name(), serial)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn to_arc(&self) -> Arc<str> {
        Arc::clone(&self.0)
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An edge of the circuit graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeRef {
    /// A primary input, by name
    Input(Arc<str>),
    /// The output of a gate
    Gate(GateId),
}

impl NodeRef {
    /// Name of the input or id of the gate
    pub fn name(&self) -> &str {
        match self {
            NodeRef::Input(name) => name,
            NodeRef::Gate(id) => id.as_str(),
        }
    }

    fn to_arc(&self) -> Arc<str> {
        match self {
            NodeRef::Input(name) => Arc::clone(name),
            NodeRef::Gate(id) => id.to_arc(),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One gate and the nodes feeding it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateNode {
    pub id: GateId,
    pub gate: GateType,
    pub inputs: Vec<NodeRef>,
}

/// A combinational gate network
///
/// Circuits are only created through [`CircuitBuilder`] and the transforms in
/// this module, which guarantees every edge points at an input or at an
/// earlier gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Circuit {
    inputs: Vec<Arc<str>>,
    outputs: Vec<(Arc<str>, NodeRef)>,
    gates: Vec<GateNode>,
    index: HashMap<GateId, usize>,
}

impl Circuit {
    /// Primary inputs in declaration order
    pub fn inputs(&self) -> &[Arc<str>] {
        &self.inputs
    }

    /// Named outputs in declaration order
    pub fn outputs(&self) -> &[(Arc<str>, NodeRef)] {
        &self.outputs
    }

    /// Gates in creation order, which is a topological order
    pub fn gates(&self) -> &[GateNode] {
        &self.gates
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    pub fn gate(&self, id: &GateId) -> Option<&GateNode> {
        self.index
            .get(id)
            .and_then(|&position| self.gates.get(position))
    }

    /// The gate driving `node`, if it is not a primary input
    pub fn gate_of(&self, node: &NodeRef) -> Option<&GateNode> {
        match node {
            NodeRef::Input(_) => None,
            NodeRef::Gate(id) => self.gate(id),
        }
    }

    /// The node driving the named output
    pub fn output(&self, name: &str) -> Option<&NodeRef> {
        self.outputs
            .iter()
            .find(|(output, _)| &**output == name)
            .map(|(_, node)| node)
    }

    /// Gate types used anywhere in the circuit
    pub fn gate_types(&self) -> BTreeSet<GateType> {
        self.gates.iter().map(|node| node.gate).collect()
    }

    /// Number of gates of each type
    pub fn gate_counts(&self) -> BTreeMap<GateType, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.gates {
            *counts.entry(node.gate).or_insert(0) += 1;
        }
        counts
    }

    /// Simulate the circuit and return every output value in order
    pub fn evaluate(
        &self,
        assignment: &Assignment,
    ) -> Result<Vec<(Arc<str>, bool)>, EvaluationError> {
        let values = self.simulate(assignment)?;
        self.outputs
            .iter()
            .map(|(name, node)| {
                self.value_of(node, assignment, &values)
                    .map(|value| (Arc::clone(name), value))
            })
            .collect()
    }

    /// Simulate the circuit and return one output
    pub fn evaluate_output(
        &self,
        name: &str,
        assignment: &Assignment,
    ) -> Result<bool, EvaluationError> {
        let node = self
            .output(name)
            .ok_or_else(|| EvaluationError::UnknownOutput {
                name: Arc::from(name),
            })?;
        let values = self.simulate(assignment)?;
        self.value_of(node, assignment, &values)
    }

    fn simulate(&self, assignment: &Assignment) -> Result<Vec<bool>, EvaluationError> {
        let mut values = Vec::with_capacity(self.gates.len());
        for node in &self.gates {
            let inputs = node
                .inputs
                .iter()
                .map(|input| self.value_of(input, assignment, &values))
                .collect::<Result<Vec<bool>, _>>()?;
            values.push(node.gate.evaluate(&inputs));
        }
        Ok(values)
    }

    fn value_of(
        &self,
        node: &NodeRef,
        assignment: &Assignment,
        values: &[bool],
    ) -> Result<bool, EvaluationError> {
        match node {
            NodeRef::Input(name) => assignment.get(name).copied().ok_or_else(|| {
                EvaluationError::UndefinedVariable {
                    name: Arc::clone(name),
                }
            }),
            NodeRef::Gate(id) => self
                .index
                .get(id)
                .and_then(|&position| values.get(position))
                .copied()
                .ok_or_else(|| EvaluationError::UnknownNode { id: id.to_arc() }),
        }
    }
}

/// One line per gate, then one line per output
///
/// ```text
/// inputs: A, B
/// nand_0 = nand(A, B)
/// nand_1 = nand(nand_0, nand_0)
/// Y = nand_1
/// ```
impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: Vec<&str> = self.inputs.iter().map(|name| &**name).collect();
        writeln!(f, "inputs: {}", inputs.join(", "))?;
        for node in &self.gates {
            let operands: Vec<&str> = node.inputs.iter().map(NodeRef::name).collect();
            writeln!(f, "{} = {}({})", node.id, node.gate, operands.join(", "))?;
        }
        for (name, node) in &self.outputs {
            writeln!(f, "{} = {}", name, node)?;
        }
        Ok(())
    }
}
