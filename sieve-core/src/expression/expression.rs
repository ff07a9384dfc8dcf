use super::{keyword::*, node::Node};
use crate::{AsValue, Value};
use rust_decimal::Decimal;
use std::{
    fmt::{self, Debug, Display},
    marker::PhantomData,
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Immutable SQL fragment over the columns of entity `E`, evaluating to a `T`.
///
/// The type parameters only restrict which combinators are available: numeric
/// operators exist for `T: Numeric`, `LIKE` for `String`, `IS TRUE` for `bool`.
/// Every combinator returns a new value, the receiver can be reused.
///
/// ```rust
/// use sieve_core::Expression;
/// # struct Person;
/// const ID: Expression<Person, i64> = Expression::column("id");
/// let predicate = ID.greater_than(1);
/// assert_eq!(predicate.to_string(), "(id > $1)");
/// ```
pub struct Expression<E, T> {
    pub(crate) node: Node,
    _marker: PhantomData<fn() -> (E, T)>,
}

/// Expression evaluating to a boolean, usable in a `WHERE` clause.
pub type Predicate<E> = Expression<E, bool>;

impl<E, T> Expression<E, T> {
    /// Column reference, emitted verbatim.
    pub const fn column(name: &'static str) -> Self {
        Self::from_node(Node::raw(name))
    }

    pub(crate) const fn from_node(node: Node) -> Self {
        Self {
            node,
            _marker: PhantomData,
        }
    }

    /// Values bound by this fragment, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.node.params
    }

    pub fn param_count(&self) -> usize {
        self.node.params.len()
    }

    fn compare(&self, op: &str, rhs: impl Into<Operand<E, T>>) -> Predicate<E> {
        Expression::from_node(Node::binary(&self.node, op, rhs.into().0))
    }

    pub fn less_than(&self, rhs: impl Into<Operand<E, T>>) -> Predicate<E> {
        self.compare(LESS_THAN, rhs)
    }

    pub fn greater_than(&self, rhs: impl Into<Operand<E, T>>) -> Predicate<E> {
        self.compare(GREATER_THAN, rhs)
    }

    pub fn less_than_or_eq(&self, rhs: impl Into<Operand<E, T>>) -> Predicate<E> {
        self.compare(LESS_THAN_OR_EQ, rhs)
    }

    pub fn greater_than_or_eq(&self, rhs: impl Into<Operand<E, T>>) -> Predicate<E> {
        self.compare(GREATER_THAN_OR_EQ, rhs)
    }

    pub fn eq(&self, rhs: impl Into<Operand<E, T>>) -> Predicate<E> {
        self.compare(EQ, rhs)
    }

    pub fn not_eq(&self, rhs: impl Into<Operand<E, T>>) -> Predicate<E> {
        self.compare(NOT_EQ, rhs)
    }

    /// Null-safe inequality.
    pub fn is_distinct_from(&self, rhs: impl Into<Operand<E, T>>) -> Predicate<E> {
        self.compare(IS_DISTINCT_FROM, rhs)
    }

    /// Null-safe equality.
    pub fn is_not_distinct_from(&self, rhs: impl Into<Operand<E, T>>) -> Predicate<E> {
        self.compare(IS_NOT_DISTINCT_FROM, rhs)
    }

    pub fn is_null(&self) -> Predicate<E> {
        Expression::from_node(Node::postfix(&self.node, IS_NULL))
    }

    pub fn is_not_null(&self) -> Predicate<E> {
        Expression::from_node(Node::postfix(&self.node, IS_NOT_NULL))
    }

    /// First half of `BETWEEN`, completed by [`Between::and`].
    pub fn between(&self, lower: impl Into<Operand<E, T>>) -> Between<E, T> {
        Between::new(&self.node, BETWEEN, lower.into())
    }

    /// `BETWEEN SYMMETRIC`, the bounds may be given in any order.
    pub fn between_symmetric(&self, lower: impl Into<Operand<E, T>>) -> Between<E, T> {
        Between::new(&self.node, BETWEEN_SYMMETRIC, lower.into())
    }

    pub fn not_between_symmetric(&self, lower: impl Into<Operand<E, T>>) -> Between<E, T> {
        Between::new(&self.node, NOT_BETWEEN_SYMMETRIC, lower.into())
    }

    /// `(expr = ANY($n))`, all the values are bound as a single array.
    pub fn eq_any(&self, values: impl IntoIterator<Item = T>) -> Predicate<E>
    where
        T: AsValue,
    {
        let values = values.into_iter().collect::<Vec<T>>();
        let array = Node::function(ANY, [Node::bind(values.as_value())]);
        Expression::from_node(Node::binary(&self.node, EQ, array))
    }
}

impl<E, T> Clone for Expression<E, T> {
    fn clone(&self) -> Self {
        Self::from_node(self.node.clone())
    }
}

impl<E, T> Debug for Expression<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("sql", &self.node.numbered())
            .field("params", &self.node.params)
            .finish()
    }
}

/// Renders the fragment on its own, with placeholders numbered from `$1`.
impl<E, T> Display for Expression<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node.numbered())
    }
}

/// Right hand side of a typed operator: a bound literal or another expression
/// of the same type.
pub struct Operand<E, T>(pub(crate) Node, PhantomData<fn() -> (E, T)>);

impl<E, T> Operand<E, T> {
    pub(crate) fn new(node: Node) -> Self {
        Self(node, PhantomData)
    }
}

impl<E, T: AsValue> From<T> for Operand<E, T> {
    fn from(value: T) -> Self {
        Self::new(Node::bind(value.as_value()))
    }
}

impl<E> From<&str> for Operand<E, String> {
    fn from(value: &str) -> Self {
        Self::new(Node::bind(value.into()))
    }
}

impl<E, T> From<Expression<E, T>> for Operand<E, T> {
    fn from(value: Expression<E, T>) -> Self {
        Self::new(value.node)
    }
}

impl<E, T> From<&Expression<E, T>> for Operand<E, T> {
    fn from(value: &Expression<E, T>) -> Self {
        Self::new(value.node.clone())
    }
}

/// Untyped argument of a variadic function such as `CONCAT` or `CONCAT_WS`.
///
/// Build lists of them with [`args!`](crate::args).
pub struct Argument<E>(pub(crate) Node, PhantomData<fn() -> E>);

impl<E> Argument<E> {
    pub(crate) fn new(node: Node) -> Self {
        Self(node, PhantomData)
    }
}

impl<E, T> From<Expression<E, T>> for Argument<E> {
    fn from(value: Expression<E, T>) -> Self {
        Self::new(value.node)
    }
}

impl<E, T> From<&Expression<E, T>> for Argument<E> {
    fn from(value: &Expression<E, T>) -> Self {
        Self::new(value.node.clone())
    }
}

impl<E, T> From<Operand<E, T>> for Argument<E> {
    fn from(value: Operand<E, T>) -> Self {
        Self::new(value.0)
    }
}

impl<E> From<&str> for Argument<E> {
    fn from(value: &str) -> Self {
        Self::new(Node::bind(value.into()))
    }
}

macro_rules! impl_argument_literal {
    ($($source:ty),+ $(,)?) => {
        $(
            impl<E> From<$source> for Argument<E> {
                fn from(value: $source) -> Self {
                    Self::new(Node::bind(value.as_value()))
                }
            }
        )+
    };
}
impl_argument_literal!(
    bool,
    i16,
    i32,
    i64,
    f32,
    f64,
    Decimal,
    String,
    Date,
    Time,
    PrimitiveDateTime,
    OffsetDateTime,
    Uuid,
);

/// Array of [`Argument`]s mixing expressions and literals.
///
/// ```rust
/// use sieve_core::{Expression, args, functions::concat};
/// # struct Person;
/// const FIRST_NAME: Expression<Person, String> = Expression::column("first_name");
/// let full = concat(args![FIRST_NAME, " ", "Smith"]);
/// assert_eq!(full.to_string(), "CONCAT(first_name, $1, $2)");
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::Argument::from($arg)),*]
    };
}

/// `BETWEEN` waiting for its upper bound.
///
/// It cannot be rendered nor combined until [`Between::and`] turns it into a
/// [`Predicate`].
#[must_use = "complete it with `and`"]
pub struct Between<E, T> {
    node: Node,
    _marker: PhantomData<fn() -> (E, T)>,
}

impl<E, T> Between<E, T> {
    fn new(lhs: &Node, op: &str, lower: Operand<E, T>) -> Self {
        let lower = lower.0;
        let mut sql = String::with_capacity(lhs.sql.len() + op.len() + lower.sql.len() + 16);
        sql.push('(');
        sql.push_str(&lhs.sql);
        sql.push_str(op);
        sql.push_str(&lower.sql);
        let mut params = Vec::with_capacity(lhs.params.len() + lower.params.len() + 1);
        params.extend_from_slice(&lhs.params);
        params.extend(lower.params);
        Self {
            node: Node {
                sql: sql.into(),
                params,
            },
            _marker: PhantomData,
        }
    }

    pub fn and(self, upper: impl Into<Operand<E, T>>) -> Predicate<E> {
        let mut node = self.node;
        node.push_str(AND);
        node.append(upper.into().0);
        node.push_str(")");
        Expression::from_node(node)
    }
}
