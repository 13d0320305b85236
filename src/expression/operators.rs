//! Operator overloading for expressions
//!
//! `*` is AND, `+` is OR, `^` is XOR and `!` is NOT. Each operator is
//! available on references (`&a * &b`) and on owned values.

use std::ops::{Add, BitXor, Mul, Not};

use super::{BinaryOp, Expr};

/// Logical AND for references: `&a * &b`
///
/// ```
/// use logic_synth::Expr;
///
/// let a = Expr::variable("A");
/// let b = Expr::variable("B");
/// assert_eq!(&a * &b, a.and(&b));
/// ```
impl Mul for &Expr {
    type Output = Expr;

    fn mul(self, rhs: &Expr) -> Expr {
        self.and(rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::And, self, rhs)
    }
}

/// Logical OR for references: `&a + &b`
impl Add for &Expr {
    type Output = Expr;

    fn add(self, rhs: &Expr) -> Expr {
        self.or(rhs)
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::Or, self, rhs)
    }
}

/// Logical XOR for references: `&a ^ &b`
impl BitXor for &Expr {
    type Output = Expr;

    fn bitxor(self, rhs: &Expr) -> Expr {
        self.xor(rhs)
    }
}

impl BitXor for Expr {
    type Output = Expr;

    fn bitxor(self, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::Xor, self, rhs)
    }
}

/// Logical NOT for references: `!&a`
impl Not for &Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::not(self)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}
