use crate::{Value, separated_by};
use std::{borrow::Cow, fmt::Write};

/// Marks the position of a bound parameter inside a fragment.
///
/// Fragments only carry the marker, the `$n` numbering is resolved once when
/// the final text is assembled.
pub(crate) const PLACEHOLDER: char = '\0';
const PLACEHOLDER_STR: &str = "\0";

/// Untyped SQL fragment together with the values bound to its placeholders,
/// in the order the placeholders appear in `sql`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Node {
    pub(crate) sql: Cow<'static, str>,
    pub(crate) params: Vec<Value>,
}

impl Node {
    pub(crate) const fn raw(sql: &'static str) -> Self {
        Self {
            sql: Cow::Borrowed(sql),
            params: Vec::new(),
        }
    }

    /// Text built at runtime, the caller guarantees it holds no placeholder.
    pub(crate) fn text(sql: String) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub(crate) fn bind(value: Value) -> Self {
        Self {
            sql: Cow::Borrowed(PLACEHOLDER_STR),
            params: vec![value],
        }
    }

    fn with_capacity(sql: usize, params: usize) -> (String, Vec<Value>) {
        (String::with_capacity(sql), Vec::with_capacity(params))
    }

    /// `(lhs op rhs)`
    pub(crate) fn binary(lhs: &Node, op: &str, rhs: Node) -> Self {
        let (mut sql, mut params) = Self::with_capacity(
            lhs.sql.len() + op.len() + rhs.sql.len() + 2,
            lhs.params.len() + rhs.params.len(),
        );
        sql.push('(');
        sql.push_str(&lhs.sql);
        sql.push_str(op);
        sql.push_str(&rhs.sql);
        sql.push(')');
        params.extend_from_slice(&lhs.params);
        params.extend(rhs.params);
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// `(lhs op)`
    pub(crate) fn postfix(lhs: &Node, op: &str) -> Self {
        let mut sql = String::with_capacity(lhs.sql.len() + op.len() + 2);
        sql.push('(');
        sql.push_str(&lhs.sql);
        sql.push_str(op);
        sql.push(')');
        Self {
            sql: sql.into(),
            params: lhs.params.clone(),
        }
    }

    /// `(op rhs)`
    pub(crate) fn prefix(op: &str, rhs: &Node) -> Self {
        let mut sql = String::with_capacity(rhs.sql.len() + op.len() + 2);
        sql.push('(');
        sql.push_str(op);
        sql.push_str(&rhs.sql);
        sql.push(')');
        Self {
            sql: sql.into(),
            params: rhs.params.clone(),
        }
    }

    /// `name(arg1, arg2, ...)`, parameters merged left to right.
    pub(crate) fn function(name: &str, args: impl IntoIterator<Item = Node>) -> Self {
        let mut sql = String::with_capacity(name.len() + 16);
        let mut params = Vec::new();
        sql.push_str(name);
        sql.push('(');
        separated_by(
            &mut sql,
            args,
            |out, arg| {
                out.push_str(&arg.sql);
                params.extend(arg.params);
            },
            ", ",
        );
        sql.push(')');
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Text known to the caller at compile time, never user input.
    pub(crate) fn push_str(&mut self, value: &str) {
        self.sql.to_mut().push_str(value);
    }

    pub(crate) fn append(&mut self, other: Node) {
        self.sql.to_mut().push_str(&other.sql);
        self.params.extend(other.params);
    }

    /// Text with the placeholders numbered from `$1`.
    pub(crate) fn numbered(&self) -> String {
        let mut out = String::with_capacity(self.sql.len() + self.params.len() * 2);
        write_numbered(&mut out, &self.sql, &mut 1);
        out
    }
}

/// Copy `sql` into `out` replacing each placeholder with `$next`, incrementing
/// `next` every time.
pub(crate) fn write_numbered(out: &mut String, sql: &str, next: &mut usize) {
    let mut position = 0;
    for (i, c) in sql.char_indices() {
        if c == PLACEHOLDER {
            out.push_str(&sql[position..i]);
            let _ = write!(out, "${}", next);
            *next += 1;
            position = i + c.len_utf8();
        }
    }
    out.push_str(&sql[position..]);
}
