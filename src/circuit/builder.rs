//! Imperative circuit assembly

use std::sync::Arc;

use super::{Circuit, GateId, GateNode, GateType, NodeRef, SynthesisError};

/// Assembles a [`Circuit`] one node at a time
///
/// Gate ids are `{type}_{n}` where `n` counts every gate this builder has
/// added since it was created or last [reset](CircuitBuilder::reset), so ids
/// are unique within the builder and assigned in call order.
///
/// # Examples
///
/// ```
/// use logic_synth::circuit::{CircuitBuilder, GateType};
///
/// # fn main() -> Result<(), logic_synth::circuit::SynthesisError> {
/// let mut builder = CircuitBuilder::new();
/// let a = builder.add_input("A");
/// let b = builder.add_input("B");
/// let and = builder.add_gate(GateType::And, vec![a, b])?;
/// let not = builder.add_gate(GateType::Not, vec![and.clone()])?;
/// builder.set_output("Y", not)?;
///
/// let circuit = builder.build();
/// assert_eq!(and.to_string(), "and_0");
/// assert_eq!(circuit.gate_count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
    counter: usize,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a primary input; declaring the same name twice is a no-op
    pub fn add_input(&mut self, name: impl Into<Arc<str>>) -> NodeRef {
        let name = name.into();
        if !self.has_input(&name) {
            self.circuit.inputs.push(Arc::clone(&name));
        }
        NodeRef::Input(name)
    }

    /// Append a gate over existing nodes and return a reference to it
    pub fn add_gate(
        &mut self,
        gate: GateType,
        inputs: Vec<NodeRef>,
    ) -> Result<NodeRef, SynthesisError> {
        if !gate.accepts(inputs.len()) {
            return Err(SynthesisError::InvalidArity {
                gate,
                arity: inputs.len(),
            });
        }
        for input in &inputs {
            self.check_exists(input)?;
        }

        let id = GateId::new(gate, self.counter);
        self.counter += 1;
        self.circuit
            .index
            .insert(id.clone(), self.circuit.gates.len());
        self.circuit.gates.push(GateNode {
            id: id.clone(),
            gate,
            inputs,
        });
        Ok(NodeRef::Gate(id))
    }

    /// Bind an output name to a node, replacing any earlier binding
    pub fn set_output(
        &mut self,
        name: impl Into<Arc<str>>,
        node: NodeRef,
    ) -> Result<(), SynthesisError> {
        self.check_exists(&node)?;
        let name = name.into();
        match self
            .circuit
            .outputs
            .iter_mut()
            .find(|(output, _)| *output == name)
        {
            Some((_, bound)) => *bound = node,
            None => self.circuit.outputs.push((name, node)),
        }
        Ok(())
    }

    /// Snapshot of everything added so far
    pub fn build(&self) -> Circuit {
        self.circuit.clone()
    }

    /// Consume the builder without copying
    pub fn finish(self) -> Circuit {
        self.circuit
    }

    /// Drop all nodes and restart id numbering
    pub fn reset(&mut self) {
        self.circuit = Circuit::default();
        self.counter = 0;
    }

    fn has_input(&self, name: &str) -> bool {
        self.circuit.inputs.iter().any(|input| &**input == name)
    }

    fn check_exists(&self, node: &NodeRef) -> Result<(), SynthesisError> {
        let exists = match node {
            NodeRef::Input(name) => self.has_input(name),
            NodeRef::Gate(id) => self.circuit.index.contains_key(id),
        };
        if exists {
            Ok(())
        } else {
            Err(SynthesisError::UnknownNode { id: node.to_arc() })
        }
    }
}
