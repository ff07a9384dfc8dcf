use crate::{
    Direction, Predicate, Sort, Value,
    expression::node::{Node, write_numbered},
    separated_by,
};
use std::{
    fmt::{self, Debug, Display, Write},
    marker::PhantomData,
};

/// Accumulates the filters, the sorting and the pagination of a query over `E`.
///
/// The builder is consumed by [`SpecBuilder::build`]:
///
/// ```rust
/// use sieve_core::{Expression, SpecBuilder};
/// # struct Person;
/// const ID: Expression<Person, i64> = Expression::column("id");
/// const LAST_NAME: Expression<Person, String> = Expression::column("last_name");
///
/// let spec = SpecBuilder::new()
///     .filter(ID.greater_than(1))
///     .order_by(LAST_NAME.asc())
///     .limit(2)
///     .build();
/// assert_eq!(spec.sql(), "WHERE (id > $1) ORDER BY last_name ASC LIMIT 2");
/// ```
///
/// and cannot be used afterwards:
///
/// ```compile_fail
/// use sieve_core::{Expression, SpecBuilder};
/// # struct Person;
/// const ID: Expression<Person, i64> = Expression::column("id");
/// let builder = SpecBuilder::new().filter(ID.greater_than(1));
/// let spec = builder.build();
/// let again = builder.limit(1);
/// ```
pub struct SpecBuilder<E> {
    predicates: Vec<Node>,
    sorts: Vec<Node>,
    limit: Option<u32>,
    offset: Option<u64>,
    total_params: usize,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SpecBuilder<E> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
            sorts: Vec::new(),
            limit: None,
            offset: None,
            total_params: 0,
            _entity: PhantomData,
        }
    }

    /// Add a condition, all the conditions are joined with `AND`.
    pub fn filter(mut self, predicate: Predicate<E>) -> Self {
        self.push_predicate(predicate.node);
        self
    }

    /// Add a sort item after the previous ones.
    ///
    /// A seek predicate carried by `sort` is added to the conditions right away,
    /// after the conditions added so far.
    pub fn order_by<T, D: Direction>(mut self, sort: Sort<E, T, D>) -> Self {
        let (node, seek) = sort.into_parts();
        self.total_params += node.params.len();
        self.sorts.push(node);
        if let Some(seek) = seek {
            self.push_predicate(seek);
        }
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    fn push_predicate(&mut self, node: Node) {
        self.total_params += node.params.len();
        self.predicates.push(node);
    }

    /// Assemble `WHERE ... ORDER BY ... LIMIT n OFFSET m` and number the
    /// placeholders from `$1`.
    ///
    /// Parameters of the conditions come first, in insertion order, followed
    /// by the parameters of the sort items.
    pub fn build(self) -> Spec<E> {
        let mut sql = String::with_capacity(
            self.predicates
                .iter()
                .chain(self.sorts.iter())
                .map(|v| v.sql.len() + 6)
                .sum::<usize>()
                + 48,
        );
        let mut next = 1;
        if !self.predicates.is_empty() {
            sql.push_str("WHERE ");
            separated_by(
                &mut sql,
                &self.predicates,
                |out, v| write_numbered(out, &v.sql, &mut next),
                " AND ",
            );
        }
        if !self.sorts.is_empty() {
            if !sql.is_empty() {
                sql.push(' ');
            }
            sql.push_str("ORDER BY ");
            separated_by(
                &mut sql,
                &self.sorts,
                |out, v| write_numbered(out, &v.sql, &mut next),
                ", ",
            );
        }
        if let Some(limit) = self.limit {
            if !sql.is_empty() {
                sql.push(' ');
            }
            let _ = write!(sql, "LIMIT {}", limit);
        }
        if let Some(offset) = self.offset {
            if !sql.is_empty() {
                sql.push(' ');
            }
            let _ = write!(sql, "OFFSET {}", offset);
        }
        let mut values = Vec::with_capacity(self.total_params);
        for node in self.predicates.into_iter().chain(self.sorts) {
            values.extend(node.params);
        }
        debug_assert_eq!(next - 1, values.len());
        Spec {
            sql,
            values,
            _entity: PhantomData,
        }
    }
}

impl<E> Default for SpecBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiled `WHERE`/`ORDER BY`/`LIMIT`/`OFFSET` fragment and its parameters.
///
/// Placeholder `$k` binds `bound_values()[k - 1]`. The fragment is empty when
/// nothing was added to the builder.
pub struct Spec<E> {
    sql: String,
    values: Vec<Value>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Spec<E> {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn bound_values(&self) -> &[Value] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.values)
    }
}

impl<E> Clone for Spec<E> {
    fn clone(&self) -> Self {
        Self {
            sql: self.sql.clone(),
            values: self.values.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> Debug for Spec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spec")
            .field("sql", &self.sql)
            .field("values", &self.values)
            .finish()
    }
}

impl<E> Display for Spec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
