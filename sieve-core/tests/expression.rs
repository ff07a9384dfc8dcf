#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sieve_core::{Expression, Predicate, Value};
    use std::str::FromStr;

    struct Person;

    const ID: Expression<Person, i64> = Expression::column("id");
    const AGE: Expression<Person, i32> = Expression::column("age");
    const SCORE: Expression<Person, f64> = Expression::column("score");
    const BALANCE: Expression<Person, Decimal> = Expression::column("balance");
    const FIRST_NAME: Expression<Person, String> = Expression::column("first_name");
    const LAST_NAME: Expression<Person, String> = Expression::column("last_name");
    const IS_ADMIN: Expression<Person, bool> = Expression::column("is_admin");

    #[test]
    fn comparisons() {
        let cases: [(Predicate<Person>, &str); 8] = [
            (ID.less_than(1), "(id < $1)"),
            (ID.greater_than(1), "(id > $1)"),
            (ID.less_than_or_eq(1), "(id <= $1)"),
            (ID.greater_than_or_eq(1), "(id >= $1)"),
            (ID.eq(1), "(id = $1)"),
            (ID.not_eq(1), "(id <> $1)"),
            (ID.is_distinct_from(1), "(id IS DISTINCT FROM $1)"),
            (ID.is_not_distinct_from(1), "(id IS NOT DISTINCT FROM $1)"),
        ];
        for (predicate, expected) in cases {
            assert_eq!(predicate.to_string(), expected);
            assert_eq!(predicate.params(), [Value::Int64(Some(1))]);
        }
    }

    #[test]
    fn compare_two_columns() {
        let predicate = FIRST_NAME.eq(&LAST_NAME);
        assert_eq!(predicate.to_string(), "(first_name = last_name)");
        assert!(predicate.params().is_empty());
    }

    #[test]
    fn standalone_greater_than() {
        let predicate = ID.greater_than(1);
        assert_eq!(predicate.to_string(), "(id > $1)");
        assert_eq!(predicate.param_count(), 1);
        assert_eq!(predicate.params(), [Value::Int64(Some(1))]);
    }

    #[test]
    fn null_checks() {
        assert_eq!(FIRST_NAME.is_null().to_string(), "(first_name IS NULL)");
        assert_eq!(
            FIRST_NAME.is_not_null().to_string(),
            "(first_name IS NOT NULL)"
        );
        assert_eq!(FIRST_NAME.is_null().param_count(), 0);
    }

    #[test]
    fn boolean_tests() {
        assert_eq!(IS_ADMIN.is_true().to_string(), "(is_admin IS TRUE)");
        assert_eq!(IS_ADMIN.is_not_true().to_string(), "(is_admin IS NOT TRUE)");
        assert_eq!(IS_ADMIN.is_false().to_string(), "(is_admin IS FALSE)");
        assert_eq!(
            IS_ADMIN.is_not_false().to_string(),
            "(is_admin IS NOT FALSE)"
        );
        assert_eq!(IS_ADMIN.is_unknown().to_string(), "(is_admin IS UNKNOWN)");
        assert_eq!(
            IS_ADMIN.is_not_unknown().to_string(),
            "(is_admin IS NOT UNKNOWN)"
        );
    }

    #[test]
    fn logical_operators() {
        let predicate = ID.greater_than(1).and(ID.less_than(10)).or(IS_ADMIN.not());
        assert_eq!(
            predicate.to_string(),
            "(((id > $1) AND (id < $2)) OR (NOT is_admin))"
        );
        assert_eq!(
            predicate.params(),
            [Value::Int64(Some(1)), Value::Int64(Some(10))]
        );
    }

    #[test]
    fn between() {
        let predicate = ID.between(1).and(10);
        assert_eq!(predicate.to_string(), "(id BETWEEN $1 AND $2)");
        assert_eq!(
            predicate.params(),
            [Value::Int64(Some(1)), Value::Int64(Some(10))]
        );
        assert_eq!(
            ID.between_symmetric(10).and(1).to_string(),
            "(id BETWEEN SYMMETRIC $1 AND $2)"
        );
        let predicate = ID.not_between_symmetric(10).and(1);
        assert_eq!(
            predicate.to_string(),
            "(id NOT BETWEEN SYMMETRIC $1 AND $2)"
        );
        assert_eq!(
            predicate.params(),
            [Value::Int64(Some(10)), Value::Int64(Some(1))]
        );
    }

    #[test]
    fn between_expressions() {
        let predicate = AGE.between(AGE.minus(1)).and(AGE.plus(1));
        assert_eq!(
            predicate.to_string(),
            "(age BETWEEN (age - $1) AND (age + $2))"
        );
        assert_eq!(
            predicate.params(),
            [Value::Int32(Some(1)), Value::Int32(Some(1))]
        );
    }

    #[test]
    fn arithmetic() {
        let expr = AGE.plus(1).times(2).minus(3).divided_by(4).modulo(5).pow(6);
        assert_eq!(
            expr.to_string(),
            "((((((age + $1) * $2) - $3) / $4) % $5) ^ $6)"
        );
        assert_eq!(
            expr.params(),
            (1..=6).map(|v| Value::Int32(Some(v))).collect::<Vec<_>>()
        );
        assert_eq!(SCORE.times(0.5).to_string(), "(score * $1)");
        let balance = BALANCE.plus(Decimal::from_str("10.25").unwrap());
        assert_eq!(balance.to_string(), "(balance + $1)");
        assert_eq!(
            balance.params(),
            [Value::Decimal(Some(Decimal::from_str("10.25").unwrap()))]
        );
    }

    #[test]
    fn nested_literals_are_numbered_in_order() {
        let predicate = AGE
            .plus(1)
            .greater_than(AGE.minus(2))
            .and(FIRST_NAME.eq("George"))
            .or(ID.between(3).and(4));
        assert_eq!(
            predicate.to_string(),
            "((((age + $1) > (age - $2)) AND (first_name = $3)) OR (id BETWEEN $4 AND $5))"
        );
        assert_eq!(
            predicate.params(),
            [
                Value::Int32(Some(1)),
                Value::Int32(Some(2)),
                Value::Varchar(Some("George".into())),
                Value::Int64(Some(3)),
                Value::Int64(Some(4)),
            ]
        );
    }

    #[test]
    fn strings() {
        let expr = FIRST_NAME.concat(&LAST_NAME);
        assert_eq!(expr.to_string(), "CONCAT(first_name, last_name)");
        let expr = FIRST_NAME.concat("Washing").concat("ton");
        assert_eq!(expr.to_string(), "CONCAT(CONCAT(first_name, $1), $2)");
        assert_eq!(
            expr.params(),
            [
                Value::Varchar(Some("Washing".into())),
                Value::Varchar(Some("ton".into())),
            ]
        );
        assert_eq!(FIRST_NAME.like("Geo%").to_string(), "(first_name LIKE $1)");
        assert_eq!(
            FIRST_NAME.not_like("Geo%").to_string(),
            "(first_name NOT LIKE $1)"
        );
        let predicate = FIRST_NAME.like_escape("100!%", '!');
        assert_eq!(predicate.to_string(), "(first_name LIKE $1 ESCAPE '!')");
        assert_eq!(predicate.params(), [Value::Varchar(Some("100!%".into()))]);
        assert_eq!(
            FIRST_NAME.not_like_escape("a''b", '\'').to_string(),
            "(first_name NOT LIKE $1 ESCAPE '''')"
        );
    }

    #[test]
    fn eq_any_binds_one_array() {
        let predicate = ID.eq_any([1, 2, 3]);
        assert_eq!(predicate.to_string(), "(id = ANY($1))");
        assert_eq!(predicate.param_count(), 1);
        assert!(matches!(
            &predicate.params()[0],
            Value::List(Some(values), ..) if values.len() == 3
        ));
    }

    #[test]
    fn receiver_is_not_modified() {
        let base = AGE.plus(1);
        let first = base.times(2);
        let second = base.minus(3);
        assert_eq!(base.to_string(), "(age + $1)");
        assert_eq!(first.to_string(), "((age + $1) * $2)");
        assert_eq!(second.to_string(), "((age + $1) - $2)");
        assert_eq!(base.param_count(), 1);
    }

    #[test]
    fn shared_between_threads() {
        let predicate = ID.greater_than(5);
        let handle = {
            let predicate = predicate.clone();
            std::thread::spawn(move || predicate.to_string())
        };
        assert_eq!(handle.join().unwrap(), predicate.to_string());
    }
}
