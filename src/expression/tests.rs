//! Tests for the expression module

use super::*;
use crate::expr;

fn var(name: &str) -> Expr {
    Expr::variable(name)
}

fn assignment(values: &[(&str, bool)]) -> Assignment {
    values
        .iter()
        .map(|&(name, value)| (Arc::from(name), value))
        .collect()
}

// ========== Parsing ==========

#[test]
fn test_and_binds_tighter_than_or() {
    let expr = parse("A + B・C").unwrap();
    assert_eq!(expr, var("A").or(&var("B").and(&var("C"))));
}

#[test]
fn test_xor_sits_between_or_and_and() {
    let expr = parse("A + B ⊕ C・D").unwrap();
    let expected = var("A").or(&var("B").xor(&var("C").and(&var("D"))));
    assert_eq!(expr, expected);
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(
        parse("A + B + C").unwrap(),
        var("A").or(&var("B")).or(&var("C"))
    );
    assert_eq!(
        parse("A ^ B ^ C").unwrap(),
        var("A").xor(&var("B")).xor(&var("C"))
    );
}

#[test]
fn test_not_binds_tightest() {
    assert_eq!(parse("¬A・B").unwrap(), var("A").not().and(&var("B")));
    assert_eq!(parse("!(A & B)").unwrap(), var("A").and(&var("B")).not());
    assert_eq!(parse("~~A").unwrap(), var("A").not().not());
}

#[test]
fn test_alternate_spellings_parse_identically() {
    let canonical = parse("¬A・B + C ⊕ D").unwrap();
    for text in [
        "~A & B | C ^ D",
        "!A * B + C ^ D",
        "！A・B ＋ C ⊕ D",
        "（~A & B）｜ C ^ D",
        "~A\u{3000}&\u{3000}B | C ^ D",
    ] {
        assert_eq!(parse(text).unwrap(), canonical, "input: {}", text);
    }
}

#[test]
fn test_constants() {
    assert_eq!(parse("1").unwrap(), Expr::Constant(true));
    assert_eq!(parse("０ + A").unwrap(), Expr::Constant(false).or(&var("A")));
}

#[test]
fn test_subscript_variable_names() {
    let expr = parse("x₁・x₂").unwrap();
    assert_eq!(expr.variables(), vec![Arc::<str>::from("x₁"), Arc::from("x₂")]);
}

#[test]
fn test_parse_errors_carry_positions() {
    let err = parse("A + ").unwrap_err();
    assert_eq!(&*err.message, "Unexpected end of input");
    assert_eq!(err.position, 4);

    let err = parse("(A・B").unwrap_err();
    assert_eq!(&*err.message, "Expected closing parenthesis");
    assert_eq!(err.expected, Some(vec![Arc::from(")")]));

    let err = parse("A B").unwrap_err();
    assert_eq!(&*err.message, "Unexpected token after expression: B");
    assert_eq!(err.position, 2);

    let err = parse("+ A").unwrap_err();
    assert_eq!(&*err.message, "Unexpected token: +");
    assert_eq!(err.position, 0);

    let err = parse("A・#").unwrap_err();
    assert_eq!(&*err.message, "Unexpected character: #");
    assert_eq!(err.position, "A・".len());
}

#[test]
fn test_deep_nesting_is_an_error() {
    let negations = format!("{}A", "¬".repeat(10_000));
    let err = parse(&negations).unwrap_err();
    assert_eq!(&*err.message, "Expression nested too deeply");
    assert_eq!(err.position, MAX_NESTING_DEPTH * "¬".len());

    let parens = format!("{}A{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = parse(&parens).unwrap_err();
    assert_eq!(&*err.message, "Expression nested too deeply");
    assert_eq!(err.position, MAX_NESTING_DEPTH);

    let mixed = format!("{}A{}", "(¬".repeat(10_000), ")".repeat(10_000));
    assert!(parse(&mixed).is_err());
}

#[test]
fn test_nesting_up_to_the_limit_parses() {
    let text = format!(
        "{}A{}",
        "(".repeat(MAX_NESTING_DEPTH),
        ")".repeat(MAX_NESTING_DEPTH)
    );
    assert_eq!(parse(&text).unwrap(), var("A"));

    let text = format!("{}A", "~".repeat(MAX_NESTING_DEPTH));
    let expr = parse(&text).unwrap();
    // an even number of negations
    assert!(expr.evaluate(&assignment(&[("A", true)])).unwrap());
}

#[test]
fn test_empty_input_is_an_error() {
    assert!(parse("").is_err());
    assert!(parse("   ").is_err());
}

// ========== Evaluation ==========

#[test]
fn test_evaluate_all_operators() {
    let expr = parse("(A ⊕ B) + ¬C・A").unwrap();
    let values = assignment(&[("A", true), ("B", true), ("C", false)]);
    assert!(expr.evaluate(&values).unwrap());

    let values = assignment(&[("A", true), ("B", true), ("C", true)]);
    assert!(!expr.evaluate(&values).unwrap());
}

#[test]
fn test_evaluate_missing_variable() {
    let err = evaluate(&parse("A・B").unwrap(), &assignment(&[("A", true)])).unwrap_err();
    assert_eq!(
        err,
        EvaluationError::UndefinedVariable {
            name: Arc::from("B")
        }
    );
}

#[test]
fn test_evaluate_expression_wrapper() {
    let values = assignment(&[("A", false), ("B", true)]);
    assert!(evaluate_expression("A + B", &values).unwrap());
    assert!(evaluate_expression("A + ", &values).is_err());
}

// ========== Variables ==========

#[test]
fn test_variables_in_first_occurrence_order() {
    let names = get_variables("C・A + B・C + A").unwrap();
    let names: Vec<&str> = names.iter().map(|s| s.as_ref()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

// ========== Display ==========

#[test]
fn test_display_minimal_parentheses() {
    let cases = [
        ("A・B + C", "A・B + C"),
        ("(A + B)・C", "(A + B)・C"),
        ("A + (B + C)", "A + (B + C)"),
        ("(A + B) + C", "A + B + C"),
        ("¬(A ⊕ B)", "¬(A ⊕ B)"),
        ("¬¬A", "¬¬A"),
        ("A ⊕ B・C", "A ⊕ B・C"),
        ("(A ⊕ B)・C", "(A ⊕ B)・C"),
    ];
    for (input, expected) in cases {
        let expr = parse(input).unwrap();
        assert_eq!(expr.to_string(), expected, "input: {}", input);
        assert_eq!(parse(&expr.to_string()).unwrap(), expr);
    }
}

// ========== Builders ==========

#[test]
fn test_operators_build_same_tree_as_parser() {
    let a = var("A");
    let b = var("B");
    let c = var("C");
    assert_eq!(&a * &b + !&c, parse("A・B + ¬C").unwrap());
    assert_eq!(a.clone() ^ b.clone(), parse("A ⊕ B").unwrap());
}

#[test]
fn test_expr_macro() {
    let a = var("A");
    let b = var("B");
    assert_eq!(expr!(a * b + !a * !b), parse("A・B + ¬A・¬B").unwrap());
    assert_eq!(expr!("A" ^ "B" * 1), parse("A ⊕ B・1").unwrap());
    assert_eq!(expr!(("A" | "B") & ~"C"), parse("(A + B)・¬C").unwrap());
}

#[test]
fn test_chain_is_left_associative() {
    let chain = Expr::chain(BinaryOp::And, [var("A"), var("B"), var("C")]).unwrap();
    assert_eq!(chain, parse("A・B・C").unwrap());
    assert_eq!(Expr::chain(BinaryOp::Or, Vec::new()), None);
}
