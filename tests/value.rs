#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sieve::{AsValue, Value};
    use std::{borrow::Cow, str::FromStr};
    use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, macros::datetime};
    use uuid::Uuid;

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float32(Some(1.0)), Value::Null);
        assert!(Value::Null.is_null());
        assert!(Value::Varchar(None).is_null());
        assert!(!Value::Boolean(Some(false)).is_null());
    }

    #[test]
    fn value_bool() {
        let val = true.as_value();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(Some(false)));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        assert!(bool::try_from_value(val).unwrap());
        assert!(bool::try_from_value(Value::Int32(Some(1))).is_err());
    }

    #[test]
    fn value_integers() {
        assert_eq!(7_i16.as_value(), Value::Int16(Some(7)));
        assert_eq!(7_i32.as_value(), Value::Int32(Some(7)));
        assert_eq!(7_i64.as_value(), Value::Int64(Some(7)));
        assert_eq!(i64::try_from_value(Value::Int32(Some(-3))).unwrap(), -3);
        assert_eq!(i32::try_from_value(Value::Int64(Some(70_000))).unwrap(), 70_000);
        assert!(i32::try_from_value(Value::Int64(Some(i64::MAX))).is_err());
        assert!(i16::try_from_value(Value::Int32(Some(40_000))).is_err());
        assert_eq!(
            i64::try_from_value(Value::Decimal(Some(Decimal::new(42, 0)))).unwrap(),
            42
        );
        assert!(i64::try_from_value(Value::Decimal(Some(Decimal::new(425, 1)))).is_err());
        assert!(i64::try_from_value(Value::Varchar(Some("1".into()))).is_err());
    }

    #[test]
    fn value_floats() {
        assert_eq!(1.5_f64.as_value(), Value::Float64(Some(1.5)));
        assert_eq!(f64::try_from_value(Value::Float32(Some(0.5))).unwrap(), 0.5);
        assert_eq!(f64::try_from_value(Value::Int32(Some(3))).unwrap(), 3.0);
        assert_eq!(
            Decimal::try_from_value(Value::Int64(Some(12))).unwrap(),
            Decimal::from_str("12").unwrap()
        );
    }

    #[test]
    fn value_strings() {
        assert_eq!(
            String::from("hello").as_value(),
            Value::Varchar(Some("hello".into()))
        );
        assert_eq!(Value::from("hi"), Value::Varchar(Some("hi".into())));
        assert_eq!(
            Cow::<str>::try_from_value(Value::Varchar(Some("cow".into()))).unwrap(),
            "cow"
        );
        assert_eq!(Value::Varchar(Some("it's".into())).to_string(), "'it's'");
    }

    #[test]
    fn value_option() {
        assert_eq!(None::<String>.as_value(), Value::Varchar(None));
        assert_eq!(Some(5_i64).as_value(), Value::Int64(Some(5)));
        assert_eq!(Option::<i64>::try_from_value(Value::Int64(None)).unwrap(), None);
        assert_eq!(Option::<i64>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i64>::try_from_value(Value::Int32(Some(2))).unwrap(),
            Some(2)
        );
        assert!(i64::try_from_value(Value::Int64(None)).is_err());
    }

    #[test]
    fn value_list() {
        let val = vec![1_i64, 2, 3].as_value();
        assert_eq!(
            val,
            Value::List(
                Some(vec![
                    Value::Int64(Some(1)),
                    Value::Int64(Some(2)),
                    Value::Int64(Some(3))
                ]),
                Box::new(Value::Int64(None))
            )
        );
        assert_ne!(val, vec![1_i32, 2, 3].as_value());
        assert_eq!(Vec::<i64>::try_from_value(val).unwrap(), [1, 2, 3]);
        assert!(Vec::<i64>::try_from_value(Value::List(None, Box::new(Value::Int64(None)))).unwrap().is_empty());
    }

    #[test]
    fn value_temporal() {
        let date = Date::from_calendar_date(1997, Month::July, 4).unwrap();
        assert_eq!(date.as_value(), Value::Date(Some(date)));
        let time = Time::from_hms(12, 30, 0).unwrap();
        assert_eq!(time.as_value(), Value::Time(Some(time)));
        let timestamp = PrimitiveDateTime::new(date, time);
        let with_zone = datetime!(1997-07-04 12:30 UTC);
        assert_eq!(
            OffsetDateTime::try_from_value(timestamp.as_value()).unwrap(),
            with_zone
        );
        assert_eq!(
            PrimitiveDateTime::try_from_value(with_zone.as_value()).unwrap(),
            timestamp
        );
        let id = Uuid::from_u128(0x1234);
        assert_eq!(Uuid::try_from_value(id.as_value()).unwrap(), id);
    }

    #[test]
    fn value_try_as() {
        assert_eq!(
            Value::Int64(Some(6)).try_as(&Value::Int32(None)).unwrap(),
            Value::Int32(Some(6))
        );
        assert!(Value::Int64(Some(i64::MAX)).try_as(&Value::Int32(None)).is_err());
        assert_eq!(
            Value::Int32(Some(2)).try_as(&Value::Float64(None)).unwrap(),
            Value::Float64(Some(2.0))
        );
        assert_eq!(
            Value::Varchar(None).try_as(&Value::Int64(None)).unwrap(),
            Value::Int64(None)
        );
        assert_eq!(
            Value::Varchar(Some("x".into())).try_as(&Value::Null).unwrap(),
            Value::Varchar(Some("x".into()))
        );
        assert!(
            Value::Varchar(Some("x".into()))
                .try_as(&Value::Int64(None))
                .is_err()
        );
        assert_eq!(
            vec![1_i64, 2]
                .as_value()
                .try_as(&Value::List(None, Box::new(Value::Int32(None))))
                .unwrap(),
            vec![1_i32, 2].as_value()
        );
    }
}
