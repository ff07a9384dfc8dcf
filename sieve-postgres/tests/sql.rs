#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sieve_core::{
        AsValue, ColumnDef, Driver, Entity, Result, Row, RowLabeled, SqlWriter, TableRef, Value,
    };
    use sieve_postgres::{PostgresDriver, postgres_type_to_value, value_to_postgres_type};
    use std::sync::LazyLock;
    use tokio_postgres::types::Type;

    struct Reading {
        id: Option<i32>,
        sensor: String,
        value: f64,
        samples: Vec<f32>,
        payload: Option<Box<[u8]>>,
    }

    static TABLE: TableRef = TableRef {
        name: "reading",
        schema: "telemetry",
    };
    static COLUMNS: LazyLock<[ColumnDef; 5]> = LazyLock::new(|| {
        [
            ColumnDef {
                name: "id",
                value: Value::Int32(None),
                primary_key: true,
                ..Default::default()
            },
            ColumnDef {
                name: "sensor",
                value: Value::Varchar(None),
                ..Default::default()
            },
            ColumnDef {
                name: "value",
                value: Value::Float64(None),
                ..Default::default()
            },
            ColumnDef {
                name: "samples",
                value: Value::List(None, Box::new(Value::Float32(None))),
                ..Default::default()
            },
            ColumnDef {
                name: "payload",
                value: Value::Blob(None),
                nullable: true,
                ..Default::default()
            },
        ]
    });

    impl Entity for Reading {
        type PrimaryKey = i32;

        fn table() -> &'static TableRef {
            &TABLE
        }
        fn columns() -> &'static [ColumnDef] {
            &*COLUMNS
        }
        fn primary_key(&self) -> Option<i32> {
            self.id
        }
        fn with_primary_key(self, primary_key: i32) -> Self {
            Self {
                id: Some(primary_key),
                ..self
            }
        }
        fn row(&self) -> Row {
            [
                self.id.as_value(),
                self.sensor.clone().as_value(),
                self.value.as_value(),
                self.samples.clone().as_value(),
                self.payload.clone().as_value(),
            ]
            .into()
        }
        fn from_row(row: RowLabeled) -> Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                sensor: row.get("sensor")?,
                value: row.get("value")?,
                samples: row.get("samples")?,
                payload: row.get("payload")?,
            })
        }
    }

    #[test]
    fn create_table() {
        let mut out = String::new();
        PostgresDriver::new()
            .sql_writer()
            .write_create_table::<Reading>(&mut out, true);
        assert_eq!(
            out,
            indoc! {r#"
                CREATE TABLE IF NOT EXISTS "telemetry"."reading" (
                "id" INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "sensor" TEXT NOT NULL,
                "value" DOUBLE PRECISION NOT NULL,
                "samples" REAL[] NOT NULL,
                "payload" BYTEA
                )
            "#}
            .trim()
        );
    }

    #[test]
    fn insert_and_update() {
        let writer = PostgresDriver::new().sql_writer();
        let mut out = String::new();
        writer.write_insert::<Reading>(&mut out).unwrap();
        assert_eq!(
            out,
            r#"INSERT INTO "telemetry"."reading" ("sensor", "value", "samples", "payload") VALUES ($1, $2, $3, $4) RETURNING "id""#
        );
        let mut out = String::new();
        writer.write_update::<Reading>(&mut out).unwrap();
        assert_eq!(
            out,
            r#"UPDATE "telemetry"."reading" SET "sensor" = $2, "value" = $3, "samples" = $4, "payload" = $5 WHERE "id" = $1"#
        );
    }

    #[test]
    fn parameter_types() {
        assert_eq!(value_to_postgres_type(&Value::Null), Type::UNKNOWN);
        assert_eq!(value_to_postgres_type(&Value::Int64(Some(6))), Type::INT8);
        assert_eq!(
            value_to_postgres_type(&Value::Varchar(Some("text".into()))),
            Type::TEXT
        );
        assert_eq!(
            value_to_postgres_type(&vec![1_i64, 2].as_value()),
            Type::INT8_ARRAY
        );
        assert_eq!(
            value_to_postgres_type(&Value::TimestampWithTimezone(None)),
            Type::TIMESTAMPTZ
        );
    }

    #[test]
    fn coerced_to_parameter_types() {
        let value = Value::Int64(Some(6))
            .try_as(&postgres_type_to_value(&Type::INT4))
            .unwrap();
        assert_eq!(value, Value::Int32(Some(6)));
        assert!(
            Value::Int64(Some(i64::MAX))
                .try_as(&postgres_type_to_value(&Type::INT4))
                .is_err()
        );
        assert_eq!(
            Value::Null.try_as(&postgres_type_to_value(&Type::TEXT)).unwrap(),
            Value::Varchar(None)
        );
        assert_eq!(postgres_type_to_value(&Type::POINT), Value::Null);
    }
}
