//! Rendering circuit outputs back into expression text

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{Circuit, GateId, GateType, NodeRef, SynthesisError};

/// Tree view of one circuit output
///
/// Shared gates are expanded at every reference, so the tree may repeat
/// subtrees that the circuit holds once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionNode {
    Gate {
        gate: GateType,
        id: GateId,
        children: Vec<ExpressionNode>,
    },
    Input(Arc<str>),
    Constant {
        value: bool,
        id: GateId,
    },
}

impl ExpressionNode {
    fn is_atom(&self) -> bool {
        !matches!(self, ExpressionNode::Gate { .. })
    }

    fn precedence(&self) -> u8 {
        match self {
            ExpressionNode::Gate { gate, .. } => precedence(*gate),
            _ => ATOM,
        }
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&expression_node_to_string(self))
    }
}

const ATOM: u8 = 4;

fn precedence(gate: GateType) -> u8 {
    match gate {
        GateType::Or => 1,
        GateType::Xor => 2,
        GateType::And => 3,
        _ => ATOM,
    }
}

/// Separator and precedence of the term a gate (or its negation) joins
fn connective(gate: GateType) -> Option<(&'static str, u8)> {
    match gate {
        GateType::And | GateType::Nand => Some((" ・ ", 3)),
        GateType::Or | GateType::Nor => Some((" + ", 1)),
        GateType::Xor | GateType::Xnor => Some((" ⊕ ", 2)),
        _ => None,
    }
}

/// Expand every output of `circuit` into an [`ExpressionNode`] tree
pub fn circuit_to_expressions(
    circuit: &Circuit,
) -> Result<Vec<(Arc<str>, ExpressionNode)>, SynthesisError> {
    let mut expanded = HashMap::new();
    circuit
        .outputs()
        .iter()
        .map(|(name, node)| {
            expand(circuit, node, &mut expanded).map(|tree| (Arc::clone(name), tree))
        })
        .collect()
}

fn expand(
    circuit: &Circuit,
    node: &NodeRef,
    expanded: &mut HashMap<GateId, ExpressionNode>,
) -> Result<ExpressionNode, SynthesisError> {
    let id = match node {
        NodeRef::Input(name) => return Ok(ExpressionNode::Input(Arc::clone(name))),
        NodeRef::Gate(id) => id,
    };
    if let Some(tree) = expanded.get(id) {
        return Ok(tree.clone());
    }

    let gate = circuit
        .gate(id)
        .ok_or_else(|| SynthesisError::UnknownNode { id: id.to_arc() })?;
    let tree = match gate.gate {
        GateType::Vcc | GateType::Gnd => ExpressionNode::Constant {
            value: gate.gate == GateType::Vcc,
            id: id.clone(),
        },
        _ => ExpressionNode::Gate {
            gate: gate.gate,
            id: id.clone(),
            children: gate
                .inputs
                .iter()
                .map(|input| expand(circuit, input, expanded))
                .collect::<Result<_, _>>()?,
        },
    };
    expanded.insert(id.clone(), tree.clone());
    Ok(tree)
}

/// Render a tree with the fewest parentheses the precedences allow
///
/// From loosest to tightest: `+`, `⊕`, `・`, then negations and atoms. A
/// child is parenthesized only when it binds looser than its parent needs.
/// `nand`, `nor` and `xnor` render as a negated AND, OR or XOR term.
///
/// # Examples
///
/// ```
/// use logic_synth::circuit::{circuit_to_expressions, expression_node_to_string, CircuitBuilder, GateType};
///
/// # fn main() -> Result<(), logic_synth::circuit::SynthesisError> {
/// let mut builder = CircuitBuilder::new();
/// let a = builder.add_input("A");
/// let b = builder.add_input("B");
/// let c = builder.add_input("C");
/// let inner = builder.add_gate(GateType::Nand, vec![a, b])?;
/// let outer = builder.add_gate(GateType::Nand, vec![inner, c])?;
/// builder.set_output("Y", outer)?;
///
/// let expressions = circuit_to_expressions(&builder.build())?;
/// assert_eq!(expression_node_to_string(&expressions[0].1), "¬(¬(A ・ B) ・ C)");
/// # Ok(())
/// # }
/// ```
pub fn expression_node_to_string(node: &ExpressionNode) -> String {
    let mut text = String::new();
    write_node(node, &mut text);
    text
}

fn write_node(node: &ExpressionNode, out: &mut String) {
    match node {
        ExpressionNode::Input(name) => out.push_str(name),
        ExpressionNode::Constant { value, .. } => out.push(if *value { '1' } else { '0' }),
        ExpressionNode::Gate { gate, children, .. } => match gate {
            GateType::Not => {
                out.push('¬');
                match children.as_slice() {
                    [child] if child.is_atom() => write_node(child, out),
                    _ => {
                        out.push('(');
                        write_joined(children, "", 0, out);
                        out.push(')');
                    }
                }
            }
            GateType::Buf => write_joined(children, "", ATOM, out),
            GateType::And | GateType::Or | GateType::Xor => {
                if let Some((separator, required)) = connective(*gate) {
                    write_joined(children, separator, required, out);
                }
            }
            GateType::Nand | GateType::Nor | GateType::Xnor => {
                out.push_str("¬(");
                if let Some((separator, required)) = connective(*gate) {
                    write_joined(children, separator, required, out);
                }
                out.push(')');
            }
            GateType::Vcc => out.push('1'),
            GateType::Gnd => out.push('0'),
        },
    }
}

/// Children joined by `separator`, each parenthesized when it binds looser
/// than `required`
fn write_joined(children: &[ExpressionNode], separator: &str, required: u8, out: &mut String) {
    for (position, child) in children.iter().enumerate() {
        if position > 0 {
            out.push_str(separator);
        }
        if child.precedence() < required {
            out.push('(');
            write_node(child, out);
            out.push(')');
        } else {
            write_node(child, out);
        }
    }
}
