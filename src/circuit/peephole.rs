//! Peephole removal of double negations

use log::debug;

use super::rewrite::{rebuild, Emitter, GateRewrite};
use super::{Circuit, GateNode, GateType, NodeRef, SynthesisError};

struct DoubleNegation;

/// `Some(x)` when every element of `inputs` is `x`
fn all_same(inputs: &[NodeRef]) -> Option<&NodeRef> {
    let (first, rest) = inputs.split_first()?;
    rest.iter().all(|input| input == first).then_some(first)
}

impl GateRewrite for DoubleNegation {
    fn bypass<'c>(&self, circuit: &'c Circuit, node: &'c GateNode) -> Option<&'c NodeRef> {
        match node.gate {
            // not(not(x))
            GateType::Not => {
                let inner = circuit.gate_of(all_same(&node.inputs)?)?;
                if inner.gate != GateType::Not {
                    return None;
                }
                all_same(&inner.inputs)
            }
            // nand(m, m) with m = nand(x, x), same for nor
            GateType::Nand | GateType::Nor => {
                let inner = circuit.gate_of(all_same(&node.inputs)?)?;
                if inner.gate != node.gate || node.inputs.len() < 2 || inner.inputs.len() < 2 {
                    return None;
                }
                all_same(&inner.inputs)
            }
            _ => None,
        }
    }

    fn rewrite(
        &mut self,
        out: &mut Emitter,
        gate: GateType,
        inputs: Vec<NodeRef>,
    ) -> Result<NodeRef, SynthesisError> {
        out.emit(gate, inputs)
    }
}

/// Collapse double negations
///
/// Recognizes `not(not(x))`, `nand(nand(x,x), nand(x,x))` and
/// `nor(nor(x,x), nor(x,x))` and replaces each with `x`. Every other gate is
/// rebuilt over its optimized inputs, and gates no output reaches are
/// dropped.
///
/// # Examples
///
/// ```
/// use logic_synth::circuit::{convert_ast_to_circuit, optimize_circuit, NodeRef};
/// use logic_synth::expression::parse;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let y = parse("~(~A)")?;
/// let circuit = convert_ast_to_circuit([("Y", &y)])?;
/// assert_eq!(circuit.gate_count(), 2);
///
/// let optimized = optimize_circuit(&circuit)?;
/// assert_eq!(optimized.gate_count(), 0);
/// assert_eq!(optimized.output("Y"), Some(&NodeRef::Input("A".into())));
/// # Ok(())
/// # }
/// ```
pub fn optimize_circuit(circuit: &Circuit) -> Result<Circuit, SynthesisError> {
    let optimized = rebuild(circuit, &mut DoubleNegation)?;
    debug!(
        "peephole: {} gates -> {}",
        circuit.gate_count(),
        optimized.gate_count()
    );
    Ok(optimized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitBuilder;

    #[test]
    fn test_nand_double_negation() {
        let mut builder = CircuitBuilder::new();
        let a = builder.add_input("A");
        let inner = builder.add_gate(GateType::Nand, vec![a.clone(), a.clone()]).unwrap();
        let outer = builder
            .add_gate(GateType::Nand, vec![inner.clone(), inner])
            .unwrap();
        builder.set_output("Y", outer).unwrap();

        let optimized = optimize_circuit(&builder.build()).unwrap();
        assert_eq!(optimized.gate_count(), 0);
        assert_eq!(optimized.output("Y"), Some(&a));
    }

    #[test]
    fn test_nor_double_negation() {
        let mut builder = CircuitBuilder::new();
        let a = builder.add_input("A");
        let inner = builder.add_gate(GateType::Nor, vec![a.clone(), a.clone()]).unwrap();
        let outer = builder.add_gate(GateType::Nor, vec![inner.clone(), inner]).unwrap();
        builder.set_output("Y", outer).unwrap();

        let optimized = optimize_circuit(&builder.build()).unwrap();
        assert_eq!(optimized.output("Y"), Some(&a));
    }

    #[test]
    fn test_nand_of_distinct_operands_is_kept() {
        let mut builder = CircuitBuilder::new();
        let a = builder.add_input("A");
        let b = builder.add_input("B");
        let inner = builder.add_gate(GateType::Nand, vec![a, b]).unwrap();
        let outer = builder
            .add_gate(GateType::Nand, vec![inner.clone(), inner])
            .unwrap();
        builder.set_output("Y", outer).unwrap();

        let optimized = optimize_circuit(&builder.build()).unwrap();
        assert_eq!(optimized.gate_count(), 2);
    }

    #[test]
    fn test_mixed_negations_are_kept() {
        // nor(nand(x,x), nand(x,x)) is not a double negation
        let mut builder = CircuitBuilder::new();
        let a = builder.add_input("A");
        let inner = builder.add_gate(GateType::Nand, vec![a.clone(), a]).unwrap();
        let outer = builder.add_gate(GateType::Nor, vec![inner.clone(), inner]).unwrap();
        builder.set_output("Y", outer).unwrap();

        let optimized = optimize_circuit(&builder.build()).unwrap();
        assert_eq!(optimized.gate_count(), 2);
    }

    #[test]
    fn test_unreachable_gates_are_dropped() {
        let mut builder = CircuitBuilder::new();
        let a = builder.add_input("A");
        builder.add_gate(GateType::Not, vec![a.clone()]).unwrap();
        builder.set_output("Y", a).unwrap();

        let optimized = optimize_circuit(&builder.build()).unwrap();
        assert_eq!(optimized.gate_count(), 0);
    }

    #[test]
    fn test_quadruple_negation() {
        let mut builder = CircuitBuilder::new();
        let mut node = builder.add_input("A");
        for _ in 0..4 {
            node = builder.add_gate(GateType::Not, vec![node]).unwrap();
        }
        builder.set_output("Y", node).unwrap();

        let optimized = optimize_circuit(&builder.build()).unwrap();
        assert_eq!(optimized.gate_count(), 0);
    }
}
