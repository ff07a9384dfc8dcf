use crate::expression::{Expression, Operand, Predicate, keyword::*, node::Node};
use std::{
    fmt::{self, Debug, Display},
    marker::PhantomData,
};

/// Sort direction of a [`Sort`], fixed at the type level.
pub trait Direction {
    const SQL: &'static str;
    /// Postgres places nulls last when ascending and first when descending.
    const NULLS_FIRST_BY_DEFAULT: bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ascending;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descending;

impl Direction for Ascending {
    const SQL: &'static str = ASC;
    const NULLS_FIRST_BY_DEFAULT: bool = false;
}

impl Direction for Descending {
    const SQL: &'static str = DESC;
    const NULLS_FIRST_BY_DEFAULT: bool = true;
}

/// Whether the null placement of a [`Sort`] was overridden.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    #[default]
    Default,
    First,
    Last,
}

/// `ORDER BY` item, optionally carrying a seek (keyset pagination) predicate.
///
/// Only the override that differs from the direction's default is offered:
/// `nulls_first` on ascending sorts, `nulls_last` on descending ones. Applying
/// it a second time returns the sort unchanged.
pub struct Sort<E, T, D> {
    expr: Node,
    nulls: NullOrdering,
    seek: Option<Node>,
    _marker: PhantomData<fn() -> (E, T, D)>,
}

impl<E, T> Expression<E, T> {
    pub fn asc(&self) -> Sort<E, T, Ascending> {
        Sort::new(self.node.clone())
    }

    pub fn desc(&self) -> Sort<E, T, Descending> {
        Sort::new(self.node.clone())
    }
}

impl<E, T, D: Direction> Sort<E, T, D> {
    fn new(expr: Node) -> Self {
        Self {
            expr,
            nulls: NullOrdering::Default,
            seek: None,
            _marker: PhantomData,
        }
    }

    pub fn null_ordering(&self) -> NullOrdering {
        self.nulls
    }

    /// Effective placement of nulls, taking the override into account.
    pub fn places_nulls_first(&self) -> bool {
        match self.nulls {
            NullOrdering::Default => D::NULLS_FIRST_BY_DEFAULT,
            NullOrdering::First => true,
            NullOrdering::Last => false,
        }
    }

    /// Return a copy that also filters rows strictly after `value`.
    ///
    /// The seek predicate `(expr > value)` is added to the `WHERE` clause when
    /// the sort is passed to [`SpecBuilder::order_by`](crate::SpecBuilder::order_by).
    pub fn seek_greater_than(&self, value: impl Into<Operand<E, T>>) -> Self {
        self.with_seek(GREATER_THAN, value.into())
    }

    /// Return a copy that also filters rows strictly before `value`.
    pub fn seek_less_than(&self, value: impl Into<Operand<E, T>>) -> Self {
        self.with_seek(LESS_THAN, value.into())
    }

    fn with_seek(&self, op: &str, value: Operand<E, T>) -> Self {
        Self {
            expr: self.expr.clone(),
            nulls: self.nulls,
            seek: Some(Node::binary(&self.expr, op, value.0)),
            _marker: PhantomData,
        }
    }

    pub fn seek(&self) -> Option<Predicate<E>> {
        self.seek.clone().map(Expression::from_node)
    }

    pub fn params(&self) -> &[crate::Value] {
        &self.expr.params
    }

    pub(crate) fn into_parts(self) -> (Node, Option<Node>) {
        let mut node = self.expr;
        node.push_str(D::SQL);
        match self.nulls {
            NullOrdering::Default => {}
            NullOrdering::First => node.push_str(NULLS_FIRST),
            NullOrdering::Last => node.push_str(NULLS_LAST),
        }
        (node, self.seek)
    }
}

impl<E, T> Sort<E, T, Ascending> {
    pub fn nulls_first(self) -> Self {
        Self {
            nulls: NullOrdering::First,
            ..self
        }
    }
}

impl<E, T> Sort<E, T, Descending> {
    pub fn nulls_last(self) -> Self {
        Self {
            nulls: NullOrdering::Last,
            ..self
        }
    }
}

impl<E, T, D> Clone for Sort<E, T, D> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            nulls: self.nulls,
            seek: self.seek.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E, T, D> PartialEq for Sort<E, T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr && self.nulls == other.nulls && self.seek == other.seek
    }
}

impl<E, T, D: Direction> Debug for Sort<E, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sort")
            .field("sql", &self.to_string())
            .field("params", &self.expr.params)
            .field("seek", &self.seek.as_ref().map(Node::numbered))
            .finish()
    }
}

/// `expr ASC [NULLS FIRST]` with placeholders numbered from `$1`.
impl<E, T, D: Direction> Display for Sort<E, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (node, _) = self.clone().into_parts();
        f.write_str(&node.numbered())
    }
}
