//! Precedence-climbing parser
//!
//! Each binary operator has a `(left, right)` binding-power pair; a right power
//! one above the left one makes the operator left-associative. Prefix NOT binds
//! tighter than every binary operator.

use std::sync::Arc;

use super::lexer::{Lexer, TokenKind};
use super::{BinaryOp, Expr, ParseError, MAX_NESTING_DEPTH};

const NOT_BINDING_POWER: u8 = 7;

fn infix_binding_power(kind: TokenKind) -> Option<(u8, u8, BinaryOp)> {
    match kind {
        TokenKind::Or => Some((1, 2, BinaryOp::Or)),
        TokenKind::Xor => Some((3, 4, BinaryOp::Xor)),
        TokenKind::And => Some((5, 6, BinaryOp::And)),
        _ => None,
    }
}

/// Parse a complete expression
///
/// Fails if any token remains after the expression, or if parentheses and
/// negations nest deeper than [`MAX_NESTING_DEPTH`].
///
/// # Examples
///
/// ```
/// use logic_synth::expression::{parse, BinaryOp, Expr};
///
/// let expr = parse("A + B・C").unwrap();
/// assert!(matches!(expr, Expr::Binary { op: BinaryOp::Or, .. }));
///
/// let err = parse("(A + B").unwrap_err();
/// assert_eq!(err.position, 6);
/// ```
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser {
        lexer: Lexer::new(text),
        depth: 0,
    };
    let expr = parser.expression(0)?;
    let token = parser.lexer.next()?;
    if token.kind != TokenKind::Eof {
        return Err(ParseError::new(
            format!("Unexpected token after expression: {}", token.text),
            token.position,
        ));
    }
    Ok(expr)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
}

impl Parser<'_> {
    fn expression(&mut self, min_power: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.prefix()?;

        loop {
            let kind = self.lexer.peek()?.kind;
            let Some((left_power, right_power, op)) = infix_binding_power(kind) else {
                break;
            };
            if left_power < min_power {
                break;
            }
            self.lexer.next()?;
            let rhs = self.expression(right_power)?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<Expr, ParseError> {
        let token = self.lexer.next()?;
        match token.kind {
            TokenKind::Variable => Ok(Expr::Variable(Arc::from(token.text.as_ref()))),
            TokenKind::Constant => Ok(Expr::Constant(token.text == "1")),
            TokenKind::Not => {
                let operand = self.nested(token.position, |parser| {
                    parser.expression(NOT_BINDING_POWER)
                })?;
                Ok(Expr::Not(Box::new(operand)))
            }
            TokenKind::LeftParen => self.nested(token.position, |parser| {
                let inner = parser.expression(0)?;
                let close = parser.lexer.next()?;
                if close.kind != TokenKind::RightParen {
                    return Err(ParseError::expecting(
                        "Expected closing parenthesis",
                        close.position,
                        [")"],
                    ));
                }
                Ok(inner)
            }),
            TokenKind::Eof => Err(ParseError::new("Unexpected end of input", token.position)),
            _ => Err(ParseError::new(
                format!("Unexpected token: {}", token.text),
                token.position,
            )),
        }
    }

    /// Run `inner` one nesting level down
    fn nested<T>(
        &mut self,
        position: usize,
        inner: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new("Expression nested too deeply", position));
        }
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }
}
