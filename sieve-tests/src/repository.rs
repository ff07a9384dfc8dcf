use crate::{TestPerson, reset_people};
use sieve::{Connection, Entity, Query, Value, stream::TryStreamExt};
use std::sync::LazyLock;
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn repository<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;

    // Seeding
    let people = reset_people(connection).await;
    assert_eq!(
        people.iter().map(|v| v.id).collect::<Vec<_>>(),
        (1..=8).map(Some).collect::<Vec<_>>()
    );
    assert_eq!(
        TestPerson::count(connection)
            .await
            .expect("Failed to count the people"),
        8
    );

    // Lookup
    assert!(
        TestPerson::exists_pk(connection, &2)
            .await
            .expect("Failed to check the existence of 2")
    );
    assert!(
        !TestPerson::exists_pk(connection, &9999)
            .await
            .expect("Failed to check the existence of 9999")
    );
    let all = TestPerson::find_all(connection)
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to find all the people");
    assert_eq!(all.len(), 8);
    let george = TestPerson::find_pk(connection, &1)
        .await
        .expect("Failed to find 1")
        .expect("1 should be there");
    assert_eq!(george.last_name.as_deref(), Some("Washington"));
    assert_eq!(george.first_name.as_deref(), Some("George"));
    assert!(george.is_admin);
    assert!(
        TestPerson::find_pk(connection, &999)
            .await
            .expect("Failed to find 999")
            .is_none()
    );
    let mut found = TestPerson::find_all_pk(connection, [1, 8, 999])
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to find 1, 8 and 999");
    found.sort_by_key(|v| v.id);
    assert_eq!(
        found.iter().map(|v| v.id).collect::<Vec<_>>(),
        [Some(1), Some(8)]
    );
    assert_eq!(found[1].first_name, None);
    assert_eq!(found[1].last_name.as_deref(), Some("Nagro"));
    assert!(
        TestPerson::find_all_pk(connection, [])
            .try_collect::<Vec<_>>()
            .await
            .expect("Failed to find no key")
            .is_empty()
    );

    // Parameters typed from the values bound
    let count = connection
        .fetch(Query::new(
            "SELECT COUNT(*) FROM test_person WHERE (CONCAT(first_name, $1) = $2)",
            vec![
                Value::Varchar(Some("Washington".into())),
                Value::Varchar(Some("GeorgeWashington".into())),
            ],
        ))
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to count with CONCAT");
    assert_eq!(count.len(), 1);
    assert_eq!(count[0].values()[0], Value::Int64(Some(1)));

    // Delete one
    george
        .delete(connection)
        .await
        .expect("Failed to delete George");
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 7);
    george
        .delete(connection)
        .await
        .expect("Deleting a missing row should succeed");
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 7);
    let unsaved = TestPerson::new(Some("John"), Some("Smith"), false);
    assert!(
        unsaved.delete(connection).await.is_err(),
        "Deleting an entity without key should fail"
    );

    // Delete many
    reset_people(connection).await;
    let first_two = TestPerson::find_all_pk(connection, [1, 2])
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to find 1 and 2");
    let deleted = TestPerson::delete_many(connection, &first_two)
        .await
        .expect("Failed to delete 1 and 2");
    assert_eq!(deleted.rows_affected, 2);
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 6);

    // Delete by key
    reset_people(connection).await;
    let deleted = TestPerson::delete_all_pk(connection, [1, 2, 3, 4])
        .await
        .expect("Failed to delete from 1 to 4");
    assert_eq!(deleted.rows_affected, 4);
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 4);
    let deleted = TestPerson::delete_pk(connection, &5)
        .await
        .expect("Failed to delete 5");
    assert_eq!(deleted.rows_affected, 1);
    let deleted = TestPerson::delete_all(connection)
        .await
        .expect("Failed to delete everyone");
    assert_eq!(deleted.rows_affected, 3);
    assert_eq!(TestPerson::count(connection).await.expect("Failed to count"), 0);
}
