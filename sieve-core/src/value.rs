use crate::{Error, Result};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::fmt::{self, Display};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Dynamically typed value bound to a query or decoded from a row.
///
/// Every typed variant carries an `Option`: `None` is a NULL that still knows
/// its SQL type, while [`Value::Null`] is an untyped NULL.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
    List(Option<Vec<Value>>, /* type: */ Box<Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::TimestampWithTimezone(l), Self::TimestampWithTimezone(r)) => l == r,
            (Self::Uuid(l), Self::Uuid(r)) => l == r,
            (Self::List(l, ..), Self::List(r, ..)) => l == r && self.same_type(other),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Value {
    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(.., l), Self::List(.., r)) => l.same_type(r),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }

    /// True for the untyped NULL and for any typed variant holding `None`.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::TimestampWithTimezone(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
            Value::List(v, ..) => v.is_none(),
        }
    }

    /// A NULL of the same type as `self`.
    pub fn as_null(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(..) => Value::Boolean(None),
            Value::Int16(..) => Value::Int16(None),
            Value::Int32(..) => Value::Int32(None),
            Value::Int64(..) => Value::Int64(None),
            Value::Float32(..) => Value::Float32(None),
            Value::Float64(..) => Value::Float64(None),
            Value::Decimal(..) => Value::Decimal(None),
            Value::Varchar(..) => Value::Varchar(None),
            Value::Blob(..) => Value::Blob(None),
            Value::Date(..) => Value::Date(None),
            Value::Time(..) => Value::Time(None),
            Value::Timestamp(..) => Value::Timestamp(None),
            Value::TimestampWithTimezone(..) => Value::TimestampWithTimezone(None),
            Value::Uuid(..) => Value::Uuid(None),
            Value::List(.., ty) => Value::List(None, ty.clone()),
        }
    }

    /// Convert `self` into the type of `template`.
    ///
    /// Drivers use this to adapt bound values to the parameter types a prepared
    /// statement reports (binding `6_i64` where the server expects an `INT4`).
    /// Integer narrowing is range checked. [`Value::Null`] templates accept anything.
    pub fn try_as(self, template: &Value) -> Result<Value> {
        if self.same_type(template) || matches!(template, Value::Null) {
            return Ok(self);
        }
        if self.is_null() {
            return Ok(template.as_null());
        }
        let error = || {
            Error::msg(format!(
                "Cannot convert {:?} to the type of {:?}",
                self,
                template.as_null()
            ))
        };
        macro_rules! integer {
            ($v:expr) => {{
                let v = $v as i64;
                match template {
                    Value::Int16(..) => i16::try_from(v).ok().map(|v| Value::Int16(Some(v))),
                    Value::Int32(..) => i32::try_from(v).ok().map(|v| Value::Int32(Some(v))),
                    Value::Int64(..) => Some(Value::Int64(Some(v))),
                    Value::Float32(..) => Some(Value::Float32(Some(v as f32))),
                    Value::Float64(..) => Some(Value::Float64(Some(v as f64))),
                    Value::Decimal(..) => Some(Value::Decimal(Some(Decimal::from(v)))),
                    _ => None,
                }
            }};
        }
        let converted = match &self {
            Value::Int16(Some(v)) => integer!(*v),
            Value::Int32(Some(v)) => integer!(*v),
            Value::Int64(Some(v)) => integer!(*v),
            Value::Float32(Some(v)) => match template {
                Value::Float64(..) => Some(Value::Float64(Some(*v as f64))),
                Value::Decimal(..) => Decimal::from_f32(*v).map(|v| Value::Decimal(Some(v))),
                _ => None,
            },
            Value::Float64(Some(v)) => match template {
                Value::Float32(..) => Some(Value::Float32(Some(*v as f32))),
                Value::Decimal(..) => Decimal::from_f64(*v).map(|v| Value::Decimal(Some(v))),
                _ => None,
            },
            Value::Decimal(Some(v)) => match template {
                Value::Float32(..) => v.to_f32().map(|v| Value::Float32(Some(v))),
                Value::Float64(..) => v.to_f64().map(|v| Value::Float64(Some(v))),
                Value::Int16(..) if v.is_integer() => v.to_i16().map(|v| Value::Int16(Some(v))),
                Value::Int32(..) if v.is_integer() => v.to_i32().map(|v| Value::Int32(Some(v))),
                Value::Int64(..) if v.is_integer() => v.to_i64().map(|v| Value::Int64(Some(v))),
                _ => None,
            },
            Value::Timestamp(Some(v)) => match template {
                Value::TimestampWithTimezone(..) => {
                    Some(Value::TimestampWithTimezone(Some(v.assume_utc())))
                }
                Value::Date(..) => Some(Value::Date(Some(v.date()))),
                _ => None,
            },
            Value::TimestampWithTimezone(Some(v)) => match template {
                Value::Timestamp(..) => {
                    let utc = v.to_offset(time::UtcOffset::UTC);
                    Some(Value::Timestamp(Some(PrimitiveDateTime::new(
                        utc.date(),
                        utc.time(),
                    ))))
                }
                _ => None,
            },
            Value::Date(Some(v)) => match template {
                Value::Timestamp(..) => Some(Value::Timestamp(Some(v.midnight()))),
                _ => None,
            },
            Value::List(Some(values), ..) => match template {
                Value::List(.., ty) => Some(Value::List(
                    Some(
                        values
                            .iter()
                            .cloned()
                            .map(|v| v.try_as(ty))
                            .collect::<Result<_>>()?,
                    ),
                    ty.clone(),
                )),
                _ => None,
            },
            _ => None,
        };
        converted.ok_or_else(error)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        macro_rules! show {
            ($v:expr) => {
                match $v {
                    Some(v) => write!(f, "{}", v),
                    None => f.write_str("NULL"),
                }
            };
        }
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => show!(v),
            Value::Int16(v) => show!(v),
            Value::Int32(v) => show!(v),
            Value::Int64(v) => show!(v),
            Value::Float32(v) => show!(v),
            Value::Float64(v) => show!(v),
            Value::Decimal(v) => show!(v),
            Value::Varchar(v) => match v {
                Some(v) => write!(f, "'{}'", v),
                None => f.write_str("NULL"),
            },
            Value::Blob(v) => match v {
                Some(v) => write!(f, "<{} bytes>", v.len()),
                None => f.write_str("NULL"),
            },
            Value::Date(v) => show!(v),
            Value::Time(v) => show!(v),
            Value::Timestamp(v) => show!(v),
            Value::TimestampWithTimezone(v) => show!(v),
            Value::Uuid(v) => show!(v),
            Value::List(v, ..) => match v {
                Some(v) => {
                    f.write_str("[")?;
                    for (i, v) in v.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        v.fmt(f)?;
                    }
                    f.write_str("]")
                }
                None => f.write_str("NULL"),
            },
        }
    }
}
