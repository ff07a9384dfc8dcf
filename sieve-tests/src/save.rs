use crate::{TestPerson, reset_people};
use sieve::{Connection, Entity};
use std::sync::LazyLock;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

fn renamed(person: TestPerson, first_name: &str) -> TestPerson {
    TestPerson {
        first_name: Some(first_name.into()),
        ..person
    }
}

pub async fn save<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    reset_people(connection).await;

    // Insert
    let john = TestPerson::new(Some("John"), Some("Smith"), false)
        .save(connection)
        .await
        .expect("Failed to save John Smith");
    assert_eq!(john.last_name.as_deref(), Some("Smith"));
    assert_eq!(john.id, Some(9));
    assert_eq!(
        TestPerson::find_pk(connection, &9)
            .await
            .expect("Failed to find 9"),
        Some(john)
    );

    // Update
    let george = TestPerson::find_pk(connection, &1)
        .await
        .expect("Failed to find 1")
        .expect("1 should be there");
    let geo = renamed(george, "Geo")
        .save(connection)
        .await
        .expect("Failed to save Geo");
    assert_eq!(geo.id, Some(1));
    assert_eq!(geo.first_name.as_deref(), Some("Geo"));
    assert_eq!(geo.last_name.as_deref(), Some("Washington"));
    assert_eq!(
        TestPerson::find_pk(connection, &1)
            .await
            .expect("Failed to find 1")
            .and_then(|v| v.first_name),
        Some("Geo".into())
    );
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 9);

    // Not null violation
    assert!(
        TestPerson::new(None, None, false)
            .save(connection)
            .await
            .is_err(),
        "Saving a person without last name should fail"
    );
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 9);

    // Batch without transaction, the rows before the failing one stay
    reset_people(connection).await;
    let result = TestPerson::save_all_in(
        connection,
        [
            TestPerson::new(Some("Kanye"), Some("West"), false),
            TestPerson::new(None, None, true),
        ],
    )
    .await;
    assert!(result.is_err(), "The second insert should fail");
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 9);
}

#[cfg(not(feature = "disable-transactions"))]
pub async fn save_all_transactional<C: Connection>(connection: &mut C) {
    use sieve::{Transaction, stream::TryStreamExt};
    use time::OffsetDateTime;

    let _lock = MUTEX.lock().await;
    reset_people(connection).await;

    // One update and two inserts
    let saved = TestPerson::save_all(
        connection,
        [
            TestPerson {
                id: Some(1),
                created: Some(OffsetDateTime::now_utc()),
                ..TestPerson::new(Some("Geo"), Some("Washington"), true)
            },
            TestPerson::new(Some("Kanye"), Some("West"), false),
            TestPerson::new(Some("Dwane"), Some("Johnson"), false),
        ],
    )
    .await
    .expect("Failed to save all");
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 10);
    assert!(saved.iter().all(|v| v.id.is_some()));
    // More inserts than updates, the inserted come first
    assert_eq!(
        saved
            .iter()
            .map(|v| v.first_name.as_deref().unwrap_or_default())
            .collect::<Vec<_>>(),
        ["Kanye", "Dwane", "Geo"]
    );
    assert_eq!(
        saved.iter().map(|v| v.id).collect::<Vec<_>>(),
        [Some(9), Some(10), Some(1)]
    );

    // Every entity or none
    reset_people(connection).await;
    let result = TestPerson::save_all(
        connection,
        [
            TestPerson {
                id: Some(1),
                ..TestPerson::new(Some("Geo"), Some("Washington"), true)
            },
            TestPerson::new(Some("Kanye"), Some("West"), false),
            TestPerson::new(Some("Dwane"), Some("Johnson"), false),
            TestPerson::new(None, None, true),
        ],
    )
    .await;
    assert!(result.is_err(), "Saving a person without last name should fail");
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 8);
    assert_eq!(
        TestPerson::find_pk(connection, &1)
            .await
            .expect("Failed to find 1")
            .and_then(|v| v.first_name),
        Some("George".into())
    );

    // Updates failing after the inserts went through
    reset_people(connection).await;
    let result = TestPerson::save_all(
        connection,
        [
            TestPerson::new(Some("Kanye"), Some("West"), false),
            TestPerson {
                id: Some(1),
                ..TestPerson::new(Some("Geo"), None, true)
            },
        ],
    )
    .await;
    assert!(result.is_err(), "Updating a person without last name should fail");
    let people = TestPerson::find_all(connection)
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to find all");
    assert_eq!(people.len(), 8);
    assert!(
        people.iter().all(|v| v.last_name.as_deref() != Some("West")),
        "The insert should be rolled back"
    );

    // A transaction opened by the caller
    let mut transaction = connection
        .begin()
        .await
        .expect("Could not begin a transaction");
    TestPerson::save_all_in(
        &mut transaction,
        [TestPerson::new(Some("Kanye"), Some("West"), false)],
    )
    .await
    .expect("Failed to save Kanye");
    assert_eq!(
        TestPerson::count(&mut transaction)
            .await
            .expect("Failed to count"),
        9
    );
    transaction
        .rollback()
        .await
        .expect("Failed to roll back the transaction");
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 8);
}
