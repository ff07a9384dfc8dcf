use bytes::BytesMut;
use postgres_types::{FromSql, IsNull, ToSql, Type, to_sql_checked};
use sieve_core::Value;
use std::error::Error;

#[derive(Debug)]
pub(crate) struct ValueHolder(pub(crate) Value);

impl From<Value> for ValueHolder {
    fn from(value: Value) -> Self {
        ValueHolder(value)
    }
}

fn decode<'a, T: FromSql<'a>>(
    ty: &Type,
    raw: Option<&'a [u8]>,
) -> Result<Option<T>, Box<dyn Error + Sync + Send>> {
    raw.map(|raw| T::from_sql(ty, raw)).transpose()
}

impl<'a> FromSql<'a> for ValueHolder {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Self::from_sql_nullable(ty, Some(raw))
    }
    fn from_sql_null(ty: &Type) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Self::from_sql_nullable(ty, None)
    }
    fn from_sql_nullable(
        ty: &Type,
        raw: Option<&'a [u8]>,
    ) -> Result<Self, Box<dyn Error + Sync + Send>> {
        let value = match postgres_type_to_value(ty) {
            Value::Null => match raw {
                Some(raw) => {
                    return Err(sieve_core::Error::msg(format!(
                        "Cannot decode sql type: `{}`, value: `{}`",
                        ty,
                        String::from_utf8_lossy(raw)
                    ))
                    .into());
                }
                None => Value::Null,
            },
            Value::Boolean(..) => Value::Boolean(decode(ty, raw)?),
            Value::Int16(..) => Value::Int16(decode(ty, raw)?),
            Value::Int32(..) => Value::Int32(decode(ty, raw)?),
            Value::Int64(..) => Value::Int64(decode(ty, raw)?),
            Value::Float32(..) => Value::Float32(decode(ty, raw)?),
            Value::Float64(..) => Value::Float64(decode(ty, raw)?),
            Value::Decimal(..) => Value::Decimal(decode(ty, raw)?),
            Value::Varchar(..) => Value::Varchar(decode(ty, raw)?),
            Value::Blob(..) => Value::Blob(decode::<Vec<u8>>(ty, raw)?.map(Into::into)),
            Value::Date(..) => Value::Date(decode(ty, raw)?),
            Value::Time(..) => Value::Time(decode(ty, raw)?),
            Value::Timestamp(..) => Value::Timestamp(decode(ty, raw)?),
            Value::TimestampWithTimezone(..) => Value::TimestampWithTimezone(decode(ty, raw)?),
            Value::Uuid(..) => Value::Uuid(decode(ty, raw)?),
            Value::List(.., inner) => Value::List(
                decode::<Vec<ValueHolder>>(ty, raw)?
                    .map(|items| items.into_iter().map(|v| v.0).collect()),
                inner,
            ),
        };
        Ok(value.into())
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

impl ToSql for ValueHolder {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>>
    where
        Self: Sized,
    {
        match &self.0 {
            Value::Null => None::<String>.to_sql(ty, out),
            Value::Boolean(v) => v.to_sql(ty, out),
            Value::Int16(v) => v.to_sql(ty, out),
            Value::Int32(v) => v.to_sql(ty, out),
            Value::Int64(v) => v.to_sql(ty, out),
            Value::Float32(v) => v.to_sql(ty, out),
            Value::Float64(v) => v.to_sql(ty, out),
            Value::Decimal(v) => v.to_sql(ty, out),
            Value::Varchar(v) => v.to_sql(ty, out),
            Value::Blob(v) => v.as_deref().to_sql(ty, out),
            Value::Date(v) => v.to_sql(ty, out),
            Value::Time(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
            Value::TimestampWithTimezone(v) => v.to_sql(ty, out),
            Value::Uuid(v) => v.to_sql(ty, out),
            Value::List(v, ..) => v
                .as_ref()
                .map(|v| v.iter().cloned().map(ValueHolder).collect::<Vec<_>>())
                .to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool
    where
        Self: Sized,
    {
        true
    }

    to_sql_checked!();
}

/// Empty value of the type Postgres reports for a parameter or a column,
/// used as the target of [`Value::try_as`].
pub fn postgres_type_to_value(ty: &Type) -> Value {
    match *ty {
        Type::BOOL => Value::Boolean(None),
        Type::INT2 => Value::Int16(None),
        Type::INT4 => Value::Int32(None),
        Type::INT8 => Value::Int64(None),
        Type::FLOAT4 => Value::Float32(None),
        Type::FLOAT8 => Value::Float64(None),
        Type::NUMERIC => Value::Decimal(None),
        Type::VARCHAR | Type::TEXT | Type::NAME | Type::BPCHAR | Type::JSON | Type::XML => {
            Value::Varchar(None)
        }
        Type::BYTEA => Value::Blob(None),
        Type::DATE => Value::Date(None),
        Type::TIME => Value::Time(None),
        Type::TIMESTAMP => Value::Timestamp(None),
        Type::TIMESTAMPTZ => Value::TimestampWithTimezone(None),
        Type::UUID => Value::Uuid(None),
        Type::BOOL_ARRAY => Value::List(None, Box::new(Value::Boolean(None))),
        Type::INT2_ARRAY => Value::List(None, Box::new(Value::Int16(None))),
        Type::INT4_ARRAY => Value::List(None, Box::new(Value::Int32(None))),
        Type::INT8_ARRAY => Value::List(None, Box::new(Value::Int64(None))),
        Type::FLOAT4_ARRAY => Value::List(None, Box::new(Value::Float32(None))),
        Type::FLOAT8_ARRAY => Value::List(None, Box::new(Value::Float64(None))),
        Type::NUMERIC_ARRAY => Value::List(None, Box::new(Value::Decimal(None))),
        Type::TEXT_ARRAY | Type::VARCHAR_ARRAY | Type::BPCHAR_ARRAY => {
            Value::List(None, Box::new(Value::Varchar(None)))
        }
        Type::BYTEA_ARRAY => Value::List(None, Box::new(Value::Blob(None))),
        Type::DATE_ARRAY => Value::List(None, Box::new(Value::Date(None))),
        Type::TIME_ARRAY => Value::List(None, Box::new(Value::Time(None))),
        Type::TIMESTAMP_ARRAY => Value::List(None, Box::new(Value::Timestamp(None))),
        Type::TIMESTAMPTZ_ARRAY => Value::List(None, Box::new(Value::TimestampWithTimezone(None))),
        Type::UUID_ARRAY => Value::List(None, Box::new(Value::Uuid(None))),
        _ => Value::Null,
    }
}

/// Parameter type declared when preparing a statement binding `value`.
///
/// Untyped nulls and unsupported lists are declared `UNKNOWN` so that the
/// server infers them from the context.
pub fn value_to_postgres_type(value: &Value) -> Type {
    match value {
        Value::Null => Type::UNKNOWN,
        Value::Boolean(..) => Type::BOOL,
        Value::Int16(..) => Type::INT2,
        Value::Int32(..) => Type::INT4,
        Value::Int64(..) => Type::INT8,
        Value::Float32(..) => Type::FLOAT4,
        Value::Float64(..) => Type::FLOAT8,
        Value::Decimal(..) => Type::NUMERIC,
        Value::Varchar(..) => Type::TEXT,
        Value::Blob(..) => Type::BYTEA,
        Value::Date(..) => Type::DATE,
        Value::Time(..) => Type::TIME,
        Value::Timestamp(..) => Type::TIMESTAMP,
        Value::TimestampWithTimezone(..) => Type::TIMESTAMPTZ,
        Value::Uuid(..) => Type::UUID,
        Value::List(.., inner) => match **inner {
            Value::Boolean(..) => Type::BOOL_ARRAY,
            Value::Int16(..) => Type::INT2_ARRAY,
            Value::Int32(..) => Type::INT4_ARRAY,
            Value::Int64(..) => Type::INT8_ARRAY,
            Value::Float32(..) => Type::FLOAT4_ARRAY,
            Value::Float64(..) => Type::FLOAT8_ARRAY,
            Value::Decimal(..) => Type::NUMERIC_ARRAY,
            Value::Varchar(..) => Type::TEXT_ARRAY,
            Value::Blob(..) => Type::BYTEA_ARRAY,
            Value::Date(..) => Type::DATE_ARRAY,
            Value::Time(..) => Type::TIME_ARRAY,
            Value::Timestamp(..) => Type::TIMESTAMP_ARRAY,
            Value::TimestampWithTimezone(..) => Type::TIMESTAMPTZ_ARRAY,
            Value::Uuid(..) => Type::UUID_ARRAY,
            _ => Type::UNKNOWN,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::ValueHolder;
    use bytes::BytesMut;
    use postgres_types::{FromSql, ToSql, Type};
    use sieve_core::Value;

    fn encoded<T: ToSql>(value: T, ty: &Type) -> BytesMut {
        let mut out = BytesMut::new();
        value.to_sql(ty, &mut out).unwrap();
        out
    }

    #[test]
    fn decode_scalars() {
        let raw = encoded(42_i32, &Type::INT4);
        assert_eq!(
            ValueHolder::from_sql(&Type::INT4, &raw).unwrap().0,
            Value::Int32(Some(42))
        );
        let raw = encoded("hello", &Type::TEXT);
        assert_eq!(
            ValueHolder::from_sql(&Type::TEXT, &raw).unwrap().0,
            Value::Varchar(Some("hello".into()))
        );
        assert_eq!(
            ValueHolder::from_sql_null(&Type::INT8).unwrap().0,
            Value::Int64(None)
        );
    }

    #[test]
    fn decode_arrays() {
        let raw = encoded(vec![Some(1_i64), None, Some(3)], &Type::INT8_ARRAY);
        assert_eq!(
            ValueHolder::from_sql(&Type::INT8_ARRAY, &raw).unwrap().0,
            Value::List(
                Some(vec![
                    Value::Int64(Some(1)),
                    Value::Int64(None),
                    Value::Int64(Some(3))
                ]),
                Box::new(Value::Int64(None))
            )
        );
    }

    #[test]
    fn decode_unknown_type() {
        assert!(ValueHolder::from_sql(&Type::POINT, b"(1,2)").is_err());
        assert_eq!(
            ValueHolder::from_sql_null(&Type::POINT).unwrap().0,
            Value::Null
        );
    }
}
