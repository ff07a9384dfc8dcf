use crate::{ColumnDef, Entity, Result, Spec, TableRef, Value, separated_by};
use std::fmt::Write;

/// Renders the statements issued by [`Entity`] operations.
///
/// Identifiers are quoted, values are never inlined: every statement uses
/// `$n` placeholders. Drivers override the methods where their dialect differs.
pub trait SqlWriter {
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', r#""""#);
        out.push('"');
    }

    fn write_table_ref(&self, out: &mut String, value: &TableRef) {
        if !value.schema.is_empty() {
            self.write_identifier_quoted(out, value.schema);
            out.push('.');
        }
        self.write_identifier_quoted(out, value.name);
    }

    fn write_column_type(&self, out: &mut String, value: &Value) {
        match value {
            Value::Boolean(..) => out.push_str("BOOLEAN"),
            Value::Int16(..) => out.push_str("SMALLINT"),
            Value::Int32(..) => out.push_str("INTEGER"),
            Value::Int64(..) => out.push_str("BIGINT"),
            Value::Float32(..) => out.push_str("FLOAT"),
            Value::Float64(..) => out.push_str("DOUBLE"),
            Value::Decimal(..) => out.push_str("DECIMAL"),
            Value::Varchar(..) => out.push_str("VARCHAR"),
            Value::Blob(..) => out.push_str("BLOB"),
            Value::Date(..) => out.push_str("DATE"),
            Value::Time(..) => out.push_str("TIME"),
            Value::Timestamp(..) => out.push_str("TIMESTAMP"),
            Value::TimestampWithTimezone(..) => out.push_str("TIMESTAMP WITH TIME ZONE"),
            Value::Uuid(..) => out.push_str("UUID"),
            Value::List(.., inner) => {
                self.write_column_type(out, inner);
                out.push_str("[]");
            }
            Value::Null => log::error!("Cannot get the sql type of an untyped NULL"),
        };
    }

    /// Makes the database generate the primary key on insert, nothing by default.
    fn write_column_identity(&self, _out: &mut String, _column: &ColumnDef) {}

    fn write_create_table_column_fragment(&self, out: &mut String, column: &ColumnDef) {
        self.write_identifier_quoted(out, column.name());
        out.push(' ');
        self.write_column_type(out, &column.value);
        if column.primary_key {
            self.write_column_identity(out, column);
        }
        if !column.nullable && !column.primary_key {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = column.default {
            out.push_str(" DEFAULT ");
            out.push_str(default);
        }
        if column.primary_key {
            out.push_str(" PRIMARY KEY");
        }
    }

    fn write_create_table<E>(&self, out: &mut String, if_not_exists: bool)
    where
        Self: Sized,
        E: Entity,
    {
        out.push_str("CREATE TABLE ");
        if if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        self.write_table_ref(out, E::table());
        out.push_str(" (\n");
        separated_by(
            out,
            E::columns(),
            |out, v| self.write_create_table_column_fragment(out, v),
            ",\n",
        );
        out.push_str("\n)");
    }

    fn write_drop_table<E>(&self, out: &mut String, if_exists: bool)
    where
        Self: Sized,
        E: Entity,
    {
        out.push_str("DROP TABLE ");
        if if_exists {
            out.push_str("IF EXISTS ");
        }
        self.write_table_ref(out, E::table());
    }

    /// `SELECT COUNT(*) FROM table`
    fn write_count<E>(&self, out: &mut String)
    where
        Self: Sized,
        E: Entity,
    {
        out.push_str("SELECT COUNT(*) FROM ");
        self.write_table_ref(out, E::table());
    }

    /// `SELECT * FROM table`
    fn write_select_all<E>(&self, out: &mut String)
    where
        Self: Sized,
        E: Entity,
    {
        out.push_str("SELECT * FROM ");
        self.write_table_ref(out, E::table());
    }

    /// `SELECT * FROM table WHERE ... ORDER BY ...`, the [`Spec`] parameters are
    /// bound as they are.
    fn write_select_spec<E>(&self, out: &mut String, spec: &Spec<E>)
    where
        Self: Sized,
        E: Entity,
    {
        self.write_select_all::<E>(out);
        if !spec.is_empty() {
            out.push(' ');
            out.push_str(spec.sql());
        }
    }

    /// `SELECT * FROM table WHERE pk = $1`
    fn write_select_pk<E>(&self, out: &mut String) -> Result<()>
    where
        Self: Sized,
        E: Entity,
    {
        self.write_select_all::<E>(out);
        self.write_where_pk::<E>(out, "$1")
    }

    /// `SELECT * FROM table WHERE pk = ANY($1)`
    fn write_select_any_pk<E>(&self, out: &mut String) -> Result<()>
    where
        Self: Sized,
        E: Entity,
    {
        self.write_select_all::<E>(out);
        self.write_where_pk::<E>(out, "ANY($1)")
    }

    fn write_where_pk<E>(&self, out: &mut String, rhs: &str) -> Result<()>
    where
        Self: Sized,
        E: Entity,
    {
        let pk = E::primary_key_def()?;
        out.push_str(" WHERE ");
        self.write_identifier_quoted(out, pk.name());
        out.push_str(" = ");
        out.push_str(rhs);
        Ok(())
    }

    /// `INSERT INTO table (c1, c2) VALUES ($1, $2) RETURNING pk`
    ///
    /// Every column but the primary key is listed, in declaration order.
    fn write_insert<E>(&self, out: &mut String) -> Result<()>
    where
        Self: Sized,
        E: Entity,
    {
        let pk = E::primary_key_index()?;
        let columns = E::columns()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pk)
            .map(|(_, c)| c);
        out.push_str("INSERT INTO ");
        self.write_table_ref(out, E::table());
        out.push_str(" (");
        separated_by(
            out,
            columns.clone(),
            |out, v| self.write_identifier_quoted(out, v.name()),
            ", ",
        );
        out.push_str(") VALUES (");
        separated_by(
            out,
            1..=columns.count(),
            |out, i| {
                let _ = write!(out, "${}", i);
            },
            ", ",
        );
        out.push_str(") RETURNING ");
        self.write_identifier_quoted(out, E::columns()[pk].name());
        Ok(())
    }

    /// `UPDATE table SET c1 = $1, c2 = $2 WHERE pk = $3`
    ///
    /// Placeholder `$i` is the position of the column in the full row, the
    /// primary key is bound through its own position.
    fn write_update<E>(&self, out: &mut String) -> Result<()>
    where
        Self: Sized,
        E: Entity,
    {
        let pk = E::primary_key_index()?;
        out.push_str("UPDATE ");
        self.write_table_ref(out, E::table());
        out.push_str(" SET ");
        separated_by(
            out,
            E::columns().iter().enumerate().filter(|(i, _)| *i != pk),
            |out, (i, v)| {
                self.write_identifier_quoted(out, v.name());
                let _ = write!(out, " = ${}", i + 1);
            },
            ", ",
        );
        out.push_str(" WHERE ");
        self.write_identifier_quoted(out, E::columns()[pk].name());
        let _ = write!(out, " = ${}", pk + 1);
        Ok(())
    }

    /// `DELETE FROM table`
    fn write_delete_all<E>(&self, out: &mut String)
    where
        Self: Sized,
        E: Entity,
    {
        out.push_str("DELETE FROM ");
        self.write_table_ref(out, E::table());
    }

    /// `DELETE FROM table WHERE pk = $1`
    fn write_delete_pk<E>(&self, out: &mut String) -> Result<()>
    where
        Self: Sized,
        E: Entity,
    {
        self.write_delete_all::<E>(out);
        self.write_where_pk::<E>(out, "$1")
    }

    /// `DELETE FROM table WHERE pk = ANY($1)`
    fn write_delete_any_pk<E>(&self, out: &mut String) -> Result<()>
    where
        Self: Sized,
        E: Entity,
    {
        self.write_delete_all::<E>(out);
        self.write_where_pk::<E>(out, "ANY($1)")
    }
}

pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for GenericSqlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlWriter for GenericSqlWriter {}
