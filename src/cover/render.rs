//! Rendering selected implicants as SOP/POS strings and expressions

use std::sync::Arc;

use super::cubes::{Bit, Pattern};
use super::Form;
use crate::expression::{BinaryOp, Expr};

/// Literals of one cube; `positive_bit` is the bit that yields an
/// un-negated literal
fn literals<'a>(
    pattern: &'a Pattern,
    variables: &'a [Arc<str>],
    positive_bit: Bit,
) -> impl Iterator<Item = (&'a Arc<str>, bool)> + 'a {
    pattern
        .bits()
        .iter()
        .zip(variables)
        .filter(|(bit, _)| **bit != Bit::DontCare)
        .map(move |(&bit, name)| (name, bit == positive_bit))
}

fn literal_text(name: &str, positive: bool) -> String {
    if positive {
        name.to_string()
    } else {
        format!("¬{}", name)
    }
}

/// `A・¬B + C`; no implicants is `0`, a cube without literals is `1`
pub fn render_sop(patterns: &[Pattern], variables: &[Arc<str>]) -> String {
    if patterns.is_empty() {
        return "0".to_string();
    }
    patterns
        .iter()
        .map(|pattern| {
            let product: Vec<String> = literals(pattern, variables, Bit::One)
                .map(|(name, positive)| literal_text(name, positive))
                .collect();
            if product.is_empty() {
                "1".to_string()
            } else {
                product.join("・")
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

/// `(A + ¬B)・C` from implicants of the inverted function
///
/// A `0` bit gives a positive literal. No implicants is `1`, a cube without
/// literals is `0`, and single-literal sums are not parenthesized.
pub fn render_pos(patterns: &[Pattern], variables: &[Arc<str>]) -> String {
    if patterns.is_empty() {
        return "1".to_string();
    }
    patterns
        .iter()
        .map(|pattern| {
            let sum: Vec<String> = literals(pattern, variables, Bit::Zero)
                .map(|(name, positive)| literal_text(name, positive))
                .collect();
            match sum.len() {
                0 => "0".to_string(),
                1 => sum.join(""),
                _ => format!("({})", sum.join(" + ")),
            }
        })
        .collect::<Vec<_>>()
        .join("・")
}

/// The expression tree of a selected implicant set, matching what
/// [`render_sop`]/[`render_pos`] print
pub fn implicants_to_expr(patterns: &[Pattern], variables: &[Arc<str>], form: Form) -> Expr {
    let literal = |(name, positive): (&Arc<str>, bool)| {
        let variable = Expr::Variable(Arc::clone(name));
        if positive {
            variable
        } else {
            Expr::Not(Box::new(variable))
        }
    };

    match form {
        Form::Sop => {
            let products = patterns.iter().map(|pattern| {
                Expr::chain(BinaryOp::And, literals(pattern, variables, Bit::One).map(literal))
                    .unwrap_or(Expr::Constant(true))
            });
            Expr::chain(BinaryOp::Or, products).unwrap_or(Expr::Constant(false))
        }
        Form::Pos => {
            let sums = patterns.iter().map(|pattern| {
                Expr::chain(BinaryOp::Or, literals(pattern, variables, Bit::Zero).map(literal))
                    .unwrap_or(Expr::Constant(false))
            });
            Expr::chain(BinaryOp::And, sums).unwrap_or(Expr::Constant(true))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::parse;

    fn vars(names: &[&str]) -> Vec<Arc<str>> {
        names.iter().map(|&n| Arc::from(n)).collect()
    }

    fn patterns(list: &[&str]) -> Vec<Pattern> {
        list.iter().map(|p| Pattern::parse(p).unwrap()).collect()
    }

    #[test]
    fn test_sop_rendering() {
        let v = vars(&["A", "B", "C"]);
        assert_eq!(render_sop(&patterns(&["11-", "1-1"]), &v), "A・B + A・C");
        assert_eq!(render_sop(&patterns(&["0-1"]), &v), "¬A・C");
        assert_eq!(render_sop(&patterns(&["---"]), &v), "1");
        assert_eq!(render_sop(&[], &v), "0");
    }

    #[test]
    fn test_pos_rendering() {
        let v = vars(&["A", "B"]);
        assert_eq!(render_pos(&patterns(&["00"]), &v), "(A + B)");
        assert_eq!(render_pos(&patterns(&["1-", "-0"]), &v), "¬A・B");
        assert_eq!(render_pos(&patterns(&["10", "0-"]), &v), "(¬A + B)・A");
        assert_eq!(render_pos(&patterns(&["--"]), &v), "0");
        assert_eq!(render_pos(&[], &v), "1");
    }

    #[test]
    fn test_expr_matches_rendered_text() {
        let v = vars(&["A", "B", "C"]);
        for list in [vec!["11-", "1-1"], vec!["0-1", "---"], vec!["101"], vec![]] {
            let p = patterns(&list);
            assert_eq!(
                implicants_to_expr(&p, &v, Form::Sop),
                parse(&render_sop(&p, &v)).unwrap()
            );
            assert_eq!(
                implicants_to_expr(&p, &v, Form::Pos),
                parse(&render_pos(&p, &v)).unwrap()
            );
        }
    }
}
