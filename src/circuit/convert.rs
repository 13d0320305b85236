//! Lowering expression trees into a shared circuit

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use log::debug;

use super::{Circuit, CircuitBuilder, GateType, NodeRef, SynthesisError};
use crate::expression::{BinaryOp, Expr};

/// Lower named expressions into one circuit
///
/// Every sub-expression gets a structural key such as `and(var:A,not(var:B))`.
/// Operands of `and`, `or` and `xor` are ordered by key first, so `A・B` and
/// `B・A` share a key. Sub-expressions with equal keys become a single gate,
/// which shares common logic across outputs. Constants become `vcc`/`gnd`
/// gates and variables become primary inputs, declared in sorted order.
///
/// # Examples
///
/// ```
/// use logic_synth::circuit::convert_ast_to_circuit;
/// use logic_synth::expression::parse;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let y = parse("A・B + C")?;
/// let z = parse("B・A ⊕ C")?;
/// let circuit = convert_ast_to_circuit([("Y", &y), ("Z", &z)])?;
///
/// // the two products share one gate
/// assert_eq!(circuit.gate_count(), 3);
/// # Ok(())
/// # }
/// ```
pub fn convert_ast_to_circuit<'e, N, I>(outputs: I) -> Result<Circuit, SynthesisError>
where
    N: Into<Arc<str>>,
    I: IntoIterator<Item = (N, &'e Expr)>,
{
    let outputs: Vec<(Arc<str>, &Expr)> = outputs
        .into_iter()
        .map(|(name, expr)| (name.into(), expr))
        .collect();

    let mut lowering = Lowering::default();
    let variables: BTreeSet<Arc<str>> = outputs
        .iter()
        .flat_map(|(_, expr)| expr.variables())
        .collect();
    for variable in variables {
        lowering.builder.add_input(variable);
    }

    for (name, expr) in outputs {
        let (_, node) = lowering.lower(expr)?;
        lowering.builder.set_output(name, node)?;
    }

    let circuit = lowering.builder.finish();
    debug!(
        "lowered {} outputs into {} gates over {} inputs",
        circuit.outputs().len(),
        circuit.gate_count(),
        circuit.inputs().len()
    );
    Ok(circuit)
}

#[derive(Default)]
struct Lowering {
    builder: CircuitBuilder,
    shared: HashMap<String, NodeRef>,
}

impl Lowering {
    /// Structural key and node of `expr`
    fn lower(&mut self, expr: &Expr) -> Result<(String, NodeRef), SynthesisError> {
        match expr {
            Expr::Constant(value) => {
                let gate = if *value { GateType::Vcc } else { GateType::Gnd };
                self.intern(format!("const:{}", value), gate, Vec::new())
            }
            Expr::Variable(name) => Ok((format!("var:{}", name), NodeRef::Input(Arc::clone(name)))),
            Expr::Not(inner) => {
                let (key, node) = self.lower(inner)?;
                self.intern(format!("not({})", key), GateType::Not, vec![node])
            }
            Expr::Binary { op, left, right } => {
                let mut operands = [self.lower(left)?, self.lower(right)?];
                operands.sort_by(|(a, _), (b, _)| a.cmp(b));
                let [(first_key, first), (second_key, second)] = operands;
                let gate = match op {
                    BinaryOp::And => GateType::And,
                    BinaryOp::Or => GateType::Or,
                    BinaryOp::Xor => GateType::Xor,
                };
                self.intern(
                    format!("{}({},{})", op.name(), first_key, second_key),
                    gate,
                    vec![first, second],
                )
            }
        }
    }

    fn intern(
        &mut self,
        key: String,
        gate: GateType,
        inputs: Vec<NodeRef>,
    ) -> Result<(String, NodeRef), SynthesisError> {
        if let Some(node) = self.shared.get(&key) {
            return Ok((key, node.clone()));
        }
        let node = self.builder.add_gate(gate, inputs)?;
        self.shared.insert(key.clone(), node.clone());
        Ok((key, node))
    }
}
