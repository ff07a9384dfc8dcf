use super::{Expression, Operand, keyword::*, node::Node};
use crate::AsValue;
use rust_decimal::Decimal;

/// Types supporting arithmetic in SQL.
pub trait Numeric: AsValue {}

impl Numeric for i16 {}
impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for f32 {}
impl Numeric for f64 {}
impl Numeric for Decimal {}

impl<E, T: Numeric> Expression<E, T> {
    fn arithmetic(&self, op: &str, rhs: impl Into<Operand<E, T>>) -> Expression<E, T> {
        Expression::from_node(Node::binary(&self.node, op, rhs.into().0))
    }

    pub fn plus(&self, rhs: impl Into<Operand<E, T>>) -> Expression<E, T> {
        self.arithmetic(PLUS, rhs)
    }

    pub fn minus(&self, rhs: impl Into<Operand<E, T>>) -> Expression<E, T> {
        self.arithmetic(MINUS, rhs)
    }

    pub fn times(&self, rhs: impl Into<Operand<E, T>>) -> Expression<E, T> {
        self.arithmetic(TIMES, rhs)
    }

    pub fn divided_by(&self, rhs: impl Into<Operand<E, T>>) -> Expression<E, T> {
        self.arithmetic(DIVIDED_BY, rhs)
    }

    pub fn modulo(&self, rhs: impl Into<Operand<E, T>>) -> Expression<E, T> {
        self.arithmetic(MODULO, rhs)
    }

    /// Exponentiation, `^` in Postgres.
    pub fn pow(&self, rhs: impl Into<Operand<E, T>>) -> Expression<E, T> {
        self.arithmetic(POW, rhs)
    }
}
