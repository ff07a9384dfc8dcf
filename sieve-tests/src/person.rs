use sieve::{
    AsValue, ColumnDef, Entity, Executor, Expression, Result, Row, RowLabeled, TableRef, Value,
};
use std::sync::LazyLock;
use time::{OffsetDateTime, macros::datetime};

#[derive(Debug, Clone, PartialEq)]
pub struct TestPerson {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub id: Option<i64>,
    pub is_admin: bool,
    pub created: Option<OffsetDateTime>,
}

impl TestPerson {
    pub fn new(first_name: Option<&str>, last_name: Option<&str>, is_admin: bool) -> Self {
        Self {
            first_name: first_name.map(Into::into),
            last_name: last_name.map(Into::into),
            id: None,
            is_admin,
            created: None,
        }
    }
}

pub const FIRST_NAME: Expression<TestPerson, String> = Expression::column("first_name");
pub const LAST_NAME: Expression<TestPerson, String> = Expression::column("last_name");
pub const ID: Expression<TestPerson, i64> = Expression::column("id");
pub const IS_ADMIN: Expression<TestPerson, bool> = Expression::column("is_admin");
pub const CREATED: Expression<TestPerson, OffsetDateTime> = Expression::column("created");

static TABLE: TableRef = TableRef::new("test_person");
static COLUMNS: LazyLock<[ColumnDef; 5]> = LazyLock::new(|| {
    [
        ColumnDef {
            name: "first_name",
            value: Value::Varchar(None),
            nullable: true,
            ..Default::default()
        },
        ColumnDef {
            name: "last_name",
            value: Value::Varchar(None),
            ..Default::default()
        },
        ColumnDef {
            name: "id",
            value: Value::Int64(None),
            primary_key: true,
            ..Default::default()
        },
        ColumnDef {
            name: "is_admin",
            value: Value::Boolean(None),
            ..Default::default()
        },
        ColumnDef {
            name: "created",
            value: Value::TimestampWithTimezone(None),
            nullable: true,
            ..Default::default()
        },
    ]
});

impl Entity for TestPerson {
    type PrimaryKey = i64;

    fn table() -> &'static TableRef {
        &TABLE
    }
    fn columns() -> &'static [ColumnDef] {
        &*COLUMNS
    }
    fn primary_key(&self) -> Option<i64> {
        self.id
    }
    fn with_primary_key(self, primary_key: i64) -> Self {
        Self {
            id: Some(primary_key),
            ..self
        }
    }
    fn row(&self) -> Row {
        [
            self.first_name.clone().as_value(),
            self.last_name.clone().as_value(),
            self.id.as_value(),
            self.is_admin.as_value(),
            self.created.as_value(),
        ]
        .into()
    }
    fn from_row(row: RowLabeled) -> Result<Self> {
        Ok(Self {
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            id: row.get("id")?,
            is_admin: row.get("is_admin")?,
            created: row.get("created")?,
        })
    }
}

/// The eight people every group of tests starts from, saved in this order
/// they get the keys from 1 to 8.
pub fn people() -> Vec<TestPerson> {
    let now = OffsetDateTime::now_utc();
    let person = |first_name: Option<&str>, last_name: &str, is_admin: bool| TestPerson {
        created: Some(now),
        ..TestPerson::new(first_name, Some(last_name), is_admin)
    };
    vec![
        person(Some("George"), "Washington", true),
        person(Some("John"), "Adams", false),
        person(Some("Thomas"), "Jefferson", false),
        person(Some("Benjamin"), "Franklin", false),
        person(Some("Alexander"), "Hamilton", false),
        person(Some("John"), "Jay", false),
        person(Some("James"), "Madison", false),
        TestPerson {
            created: Some(datetime!(1997-07-04 12:00 UTC)),
            ..TestPerson::new(None, Some("Nagro"), true)
        },
    ]
}

/// Recreate the table and save [`people`] into it.
pub async fn reset_people<Exec: Executor>(executor: &mut Exec) -> Vec<TestPerson> {
    TestPerson::drop_table(executor, true)
        .await
        .expect("Failed to drop the test_person table");
    TestPerson::create_table(executor, false)
        .await
        .expect("Failed to create the test_person table");
    TestPerson::save_all_in(executor, people())
        .await
        .expect("Failed to save the people")
}
