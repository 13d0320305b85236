//! Technology mapping onto restricted gate libraries

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use log::debug;

use super::rewrite::{rebuild, Emitter, GateRewrite};
use super::{Circuit, GateType, NodeRef, SynthesisError};

/// A set of enabled gate types
///
/// `vcc`, `gnd` and `buf` are always available to
/// [`to_custom_gate_set`] whether or not they are in the set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GateSet(BTreeSet<GateType>);

impl GateSet {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Every gate type
    pub fn all() -> Self {
        GateType::ALL.into_iter().collect()
    }

    pub fn nand_only() -> Self {
        [GateType::Nand].into_iter().collect()
    }

    pub fn nor_only() -> Self {
        [GateType::Nor].into_iter().collect()
    }

    pub fn enable(&mut self, gate: GateType) -> &mut Self {
        self.0.insert(gate);
        self
    }

    pub fn disable(&mut self, gate: GateType) -> &mut Self {
        self.0.remove(&gate);
        self
    }

    pub fn contains(&self, gate: GateType) -> bool {
        self.0.contains(&gate)
    }

    pub fn iter(&self) -> impl Iterator<Item = GateType> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<GateType> for GateSet {
    fn from_iter<I: IntoIterator<Item = GateType>>(iter: I) -> Self {
        GateSet(iter.into_iter().collect())
    }
}

impl fmt::Display for GateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(GateType::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

fn single(gate: GateType, mut inputs: Vec<NodeRef>) -> Result<NodeRef, SynthesisError> {
    match inputs.len() {
        1 => Ok(inputs.remove(0)),
        arity => Err(SynthesisError::InvalidArity { gate, arity }),
    }
}

/// Maps everything onto one universal gate (`nand` or `nor`)
struct Universal {
    base: GateType,
    /// The operation `base` negates: `and` for `nand`, `or` for `nor`
    inner: GateType,
    /// The De Morgan dual of `inner`
    dual: GateType,
    transformer: &'static str,
}

impl GateRewrite for Universal {
    fn rewrite(
        &mut self,
        out: &mut Emitter,
        gate: GateType,
        inputs: Vec<NodeRef>,
    ) -> Result<NodeRef, SynthesisError> {
        if gate == self.base || gate.is_constant() {
            out.emit(gate, inputs)
        } else if gate == GateType::Not {
            let a = single(gate, inputs)?;
            out.emit_self(self.base, a)
        } else if gate == self.inner {
            let negated = out.emit(self.base, inputs)?;
            out.emit_self(self.base, negated)
        } else if gate == self.dual {
            let negated = inputs
                .into_iter()
                .map(|a| out.emit_self(self.base, a))
                .collect::<Result<Vec<_>, _>>()?;
            out.emit(self.base, negated)
        } else {
            Err(SynthesisError::Unsupported {
                transformer: Arc::from(self.transformer),
                gate,
            })
        }
    }
}

/// Rewrite a circuit using only `nand` gates (plus constants)
///
/// `not(a)` becomes `nand(a, a)`, `and` becomes a `nand` fed twice into a
/// second `nand`, and `or` becomes a `nand` of self-`nand`ed operands. Any
/// other gate type fails with [`SynthesisError::Unsupported`].
pub fn to_nand_only(circuit: &Circuit) -> Result<Circuit, SynthesisError> {
    debug!("mapping {} gates to nand only", circuit.gate_count());
    rebuild(
        circuit,
        &mut Universal {
            base: GateType::Nand,
            inner: GateType::And,
            dual: GateType::Or,
            transformer: "to_nand_only",
        },
    )
}

/// Rewrite a circuit using only `nor` gates (plus constants)
///
/// The dual of [`to_nand_only`].
pub fn to_nor_only(circuit: &Circuit) -> Result<Circuit, SynthesisError> {
    debug!("mapping {} gates to nor only", circuit.gate_count());
    rebuild(
        circuit,
        &mut Universal {
            base: GateType::Nor,
            inner: GateType::Or,
            dual: GateType::And,
            transformer: "to_nor_only",
        },
    )
}

/// Synthesizes each gate from whatever is enabled
struct Custom<'a> {
    enabled: &'a GateSet,
}

impl Custom<'_> {
    fn has(&self, gate: GateType) -> bool {
        self.enabled.contains(gate)
    }

    fn synthesize(
        &self,
        out: &mut Emitter,
        gate: GateType,
        inputs: Vec<NodeRef>,
    ) -> Result<NodeRef, SynthesisError> {
        if self.has(gate) || matches!(gate, GateType::Vcc | GateType::Gnd | GateType::Buf) {
            return out.emit(gate, inputs);
        }
        let unsynthesizable = || SynthesisError::Unsynthesizable { gate };

        match gate {
            GateType::Not => {
                let a = single(gate, inputs)?;
                if self.has(GateType::Nand) {
                    out.emit_self(GateType::Nand, a)
                } else if self.has(GateType::Nor) {
                    out.emit_self(GateType::Nor, a)
                } else {
                    Err(unsynthesizable())
                }
            }
            GateType::And => {
                if self.has(GateType::Nand) {
                    let nand = out.emit(GateType::Nand, inputs)?;
                    self.not(out, nand)
                } else if self.has(GateType::Nor) {
                    let negated = self.negate_all(out, inputs)?;
                    out.emit(GateType::Nor, negated)
                } else if self.has(GateType::Or) {
                    let negated = self.negate_all(out, inputs)?;
                    let or = out.emit(GateType::Or, negated)?;
                    self.not(out, or)
                } else {
                    Err(unsynthesizable())
                }
            }
            GateType::Or => {
                if self.has(GateType::Nand) {
                    let negated = self.negate_all(out, inputs)?;
                    out.emit(GateType::Nand, negated)
                } else if self.has(GateType::Nor) {
                    let nor = out.emit(GateType::Nor, inputs)?;
                    self.not(out, nor)
                } else if self.has(GateType::And) {
                    let negated = self.negate_all(out, inputs)?;
                    let and = out.emit(GateType::And, negated)?;
                    self.not(out, and)
                } else {
                    Err(unsynthesizable())
                }
            }
            GateType::Nand => {
                let and = self.synthesize(out, GateType::And, inputs)?;
                self.not(out, and)
            }
            GateType::Nor => {
                let or = self.synthesize(out, GateType::Or, inputs)?;
                self.not(out, or)
            }
            GateType::Xor => {
                if self.has(GateType::Xnor) {
                    let xnor = out.emit(GateType::Xnor, inputs)?;
                    return self.not(out, xnor);
                }
                let mut operands = inputs.into_iter();
                let first = operands
                    .next()
                    .ok_or(SynthesisError::InvalidArity { gate, arity: 0 })?;
                operands.try_fold(first, |a, b| self.xor2(out, a, b))
            }
            GateType::Xnor => {
                let xor = self.synthesize(out, GateType::Xor, inputs)?;
                self.not(out, xor)
            }
            GateType::Buf | GateType::Vcc | GateType::Gnd => out.emit(gate, inputs),
        }
    }

    fn not(&self, out: &mut Emitter, a: NodeRef) -> Result<NodeRef, SynthesisError> {
        self.synthesize(out, GateType::Not, vec![a])
    }

    fn negate_all(
        &self,
        out: &mut Emitter,
        inputs: Vec<NodeRef>,
    ) -> Result<Vec<NodeRef>, SynthesisError> {
        inputs.into_iter().map(|a| self.not(out, a)).collect()
    }

    /// `a・¬b + ¬a・b`
    fn xor2(&self, out: &mut Emitter, a: NodeRef, b: NodeRef) -> Result<NodeRef, SynthesisError> {
        let not_a = self.not(out, a.clone())?;
        let not_b = self.not(out, b.clone())?;
        let left = self.synthesize(out, GateType::And, vec![a, not_b])?;
        let right = self.synthesize(out, GateType::And, vec![not_a, b])?;
        self.synthesize(out, GateType::Or, vec![left, right])
    }
}

impl GateRewrite for Custom<'_> {
    fn rewrite(
        &mut self,
        out: &mut Emitter,
        gate: GateType,
        inputs: Vec<NodeRef>,
    ) -> Result<NodeRef, SynthesisError> {
        self.synthesize(out, gate, inputs)
    }
}

/// Rewrite a circuit using only the gates in `enabled`
///
/// Gates that are enabled are kept as they are. Others are decomposed:
///
/// | gate   | replacements, in order of preference                     |
/// |--------|----------------------------------------------------------|
/// | `not`  | `nand(a, a)`, `nor(a, a)`                                |
/// | `and`  | `¬nand(a, b)`, `nor(¬a, ¬b)`, `¬or(¬a, ¬b)`              |
/// | `or`   | `nand(¬a, ¬b)`, `¬nor(a, b)`, `¬and(¬a, ¬b)`             |
/// | `nand` | `¬and(a, b)`                                             |
/// | `nor`  | `¬or(a, b)`                                              |
/// | `xor`  | `¬xnor(a, b)`, `or(and(a, ¬b), and(¬a, b))`              |
/// | `xnor` | `¬xor(a, b)`                                             |
///
/// where every `¬` and every inner gate is synthesized the same way. When
/// no replacement is possible the error names the gate type that has no
/// realization.
///
/// # Examples
///
/// ```
/// use logic_synth::circuit::{convert_ast_to_circuit, to_custom_gate_set, GateSet, GateType};
/// use logic_synth::expression::parse;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let y = parse("A ⊕ B")?;
/// let circuit = convert_ast_to_circuit([("Y", &y)])?;
///
/// let gates: GateSet = [GateType::And, GateType::Or, GateType::Not].into_iter().collect();
/// let mapped = to_custom_gate_set(&circuit, &gates)?;
/// assert!(!mapped.gate_types().contains(&GateType::Xor));
/// # Ok(())
/// # }
/// ```
pub fn to_custom_gate_set(circuit: &Circuit, enabled: &GateSet) -> Result<Circuit, SynthesisError> {
    debug!("mapping {} gates to {}", circuit.gate_count(), enabled);
    rebuild(circuit, &mut Custom { enabled })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_set_constructors() {
        assert_eq!(GateSet::all().iter().count(), GateType::ALL.len());
        assert!(GateSet::nand_only().contains(GateType::Nand));
        assert!(!GateSet::nand_only().contains(GateType::Not));
        assert!(GateSet::new().is_empty());
    }

    #[test]
    fn test_gate_set_enable_disable() {
        let mut set = GateSet::nor_only();
        set.enable(GateType::Xor).disable(GateType::Nor);
        assert_eq!(set.to_string(), "{xor}");
    }
}
