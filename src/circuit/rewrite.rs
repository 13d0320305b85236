//! Shared driver for circuit-to-circuit rewrites
//!
//! A rewrite walks every output cone depth-first, rewriting each original
//! gate once (memoized by gate id) so shared nodes stay shared. Only gates
//! reachable from an output are visited, so the result never contains dead
//! logic.

use std::collections::HashMap;

use log::trace;

use super::{Circuit, CircuitBuilder, GateId, GateNode, GateType, NodeRef, SynthesisError};

/// Emits gates into the rewritten circuit, reusing an existing gate when the
/// same type is applied to the same operands
pub(crate) struct Emitter {
    builder: CircuitBuilder,
    emitted: HashMap<(GateType, Vec<NodeRef>), NodeRef>,
}

impl Emitter {
    fn new(circuit: &Circuit) -> Self {
        let mut builder = CircuitBuilder::new();
        for input in circuit.inputs() {
            builder.add_input(input.clone());
        }
        Emitter {
            builder,
            emitted: HashMap::new(),
        }
    }

    pub fn emit(&mut self, gate: GateType, inputs: Vec<NodeRef>) -> Result<NodeRef, SynthesisError> {
        let key = (gate, inputs);
        if let Some(node) = self.emitted.get(&key) {
            return Ok(node.clone());
        }
        let node = self.builder.add_gate(gate, key.1.clone())?;
        self.emitted.insert(key, node.clone());
        Ok(node)
    }

    /// `gate(a, a)`, the self-inverting form of `nand` and `nor`
    pub fn emit_self(&mut self, gate: GateType, a: NodeRef) -> Result<NodeRef, SynthesisError> {
        self.emit(gate, vec![a.clone(), a])
    }
}

/// Per-gate rule of a rewrite
pub(crate) trait GateRewrite {
    /// An original node that `node` may be replaced with outright
    ///
    /// When this returns `Some`, the replacement is rewritten in place of
    /// `node` and [`GateRewrite::rewrite`] is not called.
    fn bypass<'c>(&self, _circuit: &'c Circuit, _node: &'c GateNode) -> Option<&'c NodeRef> {
        None
    }

    /// Emit the replacement for `gate` applied to already rewritten `inputs`
    fn rewrite(
        &mut self,
        out: &mut Emitter,
        gate: GateType,
        inputs: Vec<NodeRef>,
    ) -> Result<NodeRef, SynthesisError>;
}

/// Rewrite every output of `circuit` with `rule`
///
/// Inputs are redeclared in their original order, outputs keep their names
/// and order.
pub(crate) fn rebuild<R: GateRewrite>(circuit: &Circuit, rule: &mut R) -> Result<Circuit, SynthesisError> {
    let mut pass = Rebuild {
        circuit,
        rule,
        out: Emitter::new(circuit),
        memo: HashMap::new(),
    };
    for (name, node) in circuit.outputs() {
        let rewritten = pass.node(node)?;
        pass.out.builder.set_output(name.clone(), rewritten)?;
    }
    trace!(
        "rewrote {} gates into {}",
        circuit.gate_count(),
        pass.out.emitted.len()
    );
    Ok(pass.out.builder.finish())
}

struct Rebuild<'c, 'r, R> {
    circuit: &'c Circuit,
    rule: &'r mut R,
    out: Emitter,
    memo: HashMap<&'c GateId, NodeRef>,
}

impl<'c, R: GateRewrite> Rebuild<'c, '_, R> {
    fn node(&mut self, node: &'c NodeRef) -> Result<NodeRef, SynthesisError> {
        let id = match node {
            NodeRef::Input(_) => return Ok(node.clone()),
            NodeRef::Gate(id) => id,
        };
        if let Some(done) = self.memo.get(id) {
            return Ok(done.clone());
        }

        let circuit = self.circuit;
        let original = circuit
            .gate(id)
            .ok_or_else(|| SynthesisError::UnknownNode { id: id.to_arc() })?;

        let result = match self.rule.bypass(circuit, original) {
            Some(replacement) => {
                trace!("{} bypassed by {}", id, replacement);
                self.node(replacement)?
            }
            None => {
                let inputs = original
                    .inputs
                    .iter()
                    .map(|input| self.node(input))
                    .collect::<Result<Vec<_>, _>>()?;
                self.rule.rewrite(&mut self.out, original.gate, inputs)?
            }
        };

        self.memo.insert(id, result.clone());
        Ok(result)
    }
}
