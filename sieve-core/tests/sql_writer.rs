#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sieve_core::{
        AsValue, ColumnDef, Entity, Expression, GenericSqlWriter, Result, Row, RowLabeled,
        SpecBuilder, SqlWriter, TableRef, Value,
    };
    use std::sync::LazyLock;

    struct Trade {
        id: Option<i32>,
        symbol: String,
        price: f64,
        tags: Vec<String>,
    }

    static TABLE: TableRef = TableRef {
        name: "trade",
        schema: "market",
    };
    static COLUMNS: LazyLock<[ColumnDef; 4]> = LazyLock::new(|| {
        [
            ColumnDef {
                name: "id",
                value: Value::Int32(None),
                primary_key: true,
                ..Default::default()
            },
            ColumnDef {
                name: "symbol",
                value: Value::Varchar(None),
                ..Default::default()
            },
            ColumnDef {
                name: "price",
                value: Value::Float64(None),
                default: Some("0"),
                ..Default::default()
            },
            ColumnDef {
                name: "tags",
                value: Value::List(None, Box::new(Value::Varchar(None))),
                nullable: true,
                ..Default::default()
            },
        ]
    });

    impl Entity for Trade {
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
                self.symbol.clone().as_value(),
                self.price.as_value(),
                self.tags.clone().as_value(),
            ]
            .into()
        }
        fn from_row(row: RowLabeled) -> Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                symbol: row.get("symbol")?,
                price: row.get("price")?,
                tags: row.get("tags")?,
            })
        }
    }

    const PRICE: Expression<Trade, f64> = Expression::column("price");
    const WRITER: GenericSqlWriter = GenericSqlWriter;

    #[test]
    fn ddl() {
        let mut out = String::new();
        WRITER.write_create_table::<Trade>(&mut out, true);
        assert_eq!(
            out,
            indoc! {r#"
                CREATE TABLE IF NOT EXISTS "market"."trade" (
                "id" INTEGER PRIMARY KEY,
                "symbol" VARCHAR NOT NULL,
                "price" DOUBLE NOT NULL DEFAULT 0,
                "tags" VARCHAR[]
                )
            "#}
            .trim()
        );
        let mut out = String::new();
        WRITER.write_drop_table::<Trade>(&mut out, true);
        assert_eq!(out, r#"DROP TABLE IF EXISTS "market"."trade""#);
    }

    #[test]
    fn select() {
        let mut out = String::new();
        WRITER.write_count::<Trade>(&mut out);
        assert_eq!(out, r#"SELECT COUNT(*) FROM "market"."trade""#);

        let mut out = String::new();
        WRITER.write_select_pk::<Trade>(&mut out).unwrap();
        assert_eq!(out, r#"SELECT * FROM "market"."trade" WHERE "id" = $1"#);

        let mut out = String::new();
        WRITER.write_select_any_pk::<Trade>(&mut out).unwrap();
        assert_eq!(
            out,
            r#"SELECT * FROM "market"."trade" WHERE "id" = ANY($1)"#
        );

        let spec = SpecBuilder::new()
            .filter(PRICE.greater_than(10.0))
            .order_by(PRICE.desc())
            .build();
        let mut out = String::new();
        WRITER.write_select_spec::<Trade>(&mut out, &spec);
        assert_eq!(
            out,
            r#"SELECT * FROM "market"."trade" WHERE (price > $1) ORDER BY price DESC"#
        );

        let mut out = String::new();
        WRITER.write_select_spec::<Trade>(&mut out, &SpecBuilder::new().build());
        assert_eq!(out, r#"SELECT * FROM "market"."trade""#);
    }

    #[test]
    fn modify() {
        let mut out = String::new();
        WRITER.write_insert::<Trade>(&mut out).unwrap();
        assert_eq!(
            out,
            r#"INSERT INTO "market"."trade" ("symbol", "price", "tags") VALUES ($1, $2, $3) RETURNING "id""#
        );

        let mut out = String::new();
        WRITER.write_update::<Trade>(&mut out).unwrap();
        assert_eq!(
            out,
            r#"UPDATE "market"."trade" SET "symbol" = $2, "price" = $3, "tags" = $4 WHERE "id" = $1"#
        );

        let mut out = String::new();
        WRITER.write_delete_pk::<Trade>(&mut out).unwrap();
        assert_eq!(out, r#"DELETE FROM "market"."trade" WHERE "id" = $1"#);

        let mut out = String::new();
        WRITER.write_delete_any_pk::<Trade>(&mut out).unwrap();
        assert_eq!(out, r#"DELETE FROM "market"."trade" WHERE "id" = ANY($1)"#);
    }

    #[test]
    fn quoted_identifiers() {
        let mut out = String::new();
        WRITER.write_identifier_quoted(&mut out, r#"odd"name"#);
        assert_eq!(out, r#""odd""name""#);
    }

    #[test]
    fn primary_key_lookup() {
        assert_eq!(Trade::primary_key_index().unwrap(), 0);
        assert_eq!(Trade::primary_key_def().unwrap().name(), "id");
    }
}
