use sieve_core::{ColumnDef, SqlWriter, Value};

pub struct PostgresSqlWriter {}

impl SqlWriter for PostgresSqlWriter {
    fn write_column_type(&self, out: &mut String, value: &Value) {
        match value {
            Value::Boolean(..) => out.push_str("BOOLEAN"),
            Value::Int16(..) => out.push_str("SMALLINT"),
            Value::Int32(..) => out.push_str("INTEGER"),
            Value::Int64(..) => out.push_str("BIGINT"),
            Value::Float32(..) => out.push_str("REAL"),
            Value::Float64(..) => out.push_str("DOUBLE PRECISION"),
            Value::Decimal(..) => out.push_str("NUMERIC"),
            Value::Varchar(..) => out.push_str("TEXT"),
            Value::Blob(..) => out.push_str("BYTEA"),
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

    /// Integer primary keys are generated by the server when omitted from an insert.
    fn write_column_identity(&self, out: &mut String, column: &ColumnDef) {
        if matches!(
            column.value,
            Value::Int16(..) | Value::Int32(..) | Value::Int64(..)
        ) {
            out.push_str(" GENERATED BY DEFAULT AS IDENTITY");
        }
    }
}
