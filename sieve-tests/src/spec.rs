use crate::{CREATED, FIRST_NAME, ID, IS_ADMIN, LAST_NAME, TestPerson, reset_people};
use sieve::{
    Connection, Entity, Spec, SpecBuilder, args,
    functions::{self, ExtractField, TrimType, TruncField},
    stream::TryStreamExt,
};
use std::sync::LazyLock;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

async fn find<C: Connection>(connection: &mut C, spec: &Spec<TestPerson>) -> Vec<TestPerson> {
    TestPerson::find_spec(connection, spec)
        .try_collect::<Vec<_>>()
        .await
        .unwrap_or_else(|e| panic!("Failed to find the people matching `{}`: {:#}", spec, e))
}

fn last_names(people: &[TestPerson]) -> Vec<&str> {
    people
        .iter()
        .map(|v| v.last_name.as_deref().unwrap_or_default())
        .collect()
}

pub async fn spec_functions<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    reset_people(connection).await;

    let people = find(
        connection,
        &SpecBuilder::new().filter(ID.greater_than(1)).build(),
    )
    .await;
    assert_eq!(people.len(), 7);
    assert!(people.iter().all(|v| v.id > Some(1)));

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(functions::length(&LAST_NAME).eq(3))
            .build(),
    )
    .await;
    assert_eq!(last_names(&people), ["Jay"]);
    assert_eq!(people[0].first_name.as_deref(), Some("John"));

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(functions::trim_chars(TrimType::Leading, "W", &LAST_NAME).eq("ashington"))
            .build(),
    )
    .await;
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].first_name.as_deref(), Some("George"));

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(functions::upper(&LAST_NAME).eq("WASHINGTON"))
            .build(),
    )
    .await;
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].first_name.as_deref(), Some("George"));

    let full_name = "GeorgeWashington";
    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(FIRST_NAME.concat(&LAST_NAME).eq(full_name))
            .filter(FIRST_NAME.concat(&LAST_NAME).eq(full_name))
            .filter(FIRST_NAME.concat("Washing").concat("ton").eq(full_name))
            .build(),
    )
    .await;
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].first_name.as_deref(), Some("George"));

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(functions::concat(args![FIRST_NAME, " ", LAST_NAME]).eq("George Washington"))
            .filter(
                functions::concat_ws(", ", args![LAST_NAME, FIRST_NAME])
                    .eq("Washington, George"),
            )
            .build(),
    )
    .await;
    assert_eq!(last_names(&people), ["Washington"]);

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(functions::starts_with(&functions::lower(&FIRST_NAME), "geo"))
            .build(),
    )
    .await;
    assert_eq!(last_names(&people), ["Washington"]);

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(functions::coalesce(&FIRST_NAME, ["George"]).eq("George"))
            .build(),
    )
    .await;
    assert_eq!(people.len(), 2);

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(functions::coalesce(&FIRST_NAME, [&LAST_NAME]).not_eq("Nagro"))
            .build(),
    )
    .await;
    assert_eq!(people.len(), 7);

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(IS_ADMIN.is_true())
            .order_by(ID.asc())
            .build(),
    )
    .await;
    assert_eq!(last_names(&people), ["Washington", "Nagro"]);

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(FIRST_NAME.is_null().or(LAST_NAME.like("J%")))
            .order_by(ID.asc())
            .build(),
    )
    .await;
    assert_eq!(last_names(&people), ["Jefferson", "Jay", "Nagro"]);
}

pub async fn spec_temporal<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    reset_people(connection).await;

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(CREATED.less_than(OffsetDateTime::now_utc() - Duration::days(10)))
            .build(),
    )
    .await;
    assert_eq!(last_names(&people), ["Nagro"]);

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(functions::extract(ExtractField::Year, &CREATED).eq(1997.0))
            .build(),
    )
    .await;
    assert_eq!(last_names(&people), ["Nagro"]);

    let today = OffsetDateTime::now_utc().replace_time(time::Time::MIDNIGHT);
    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(functions::date_trunc_zone(TruncField::Day, &CREATED, "UTC").eq(today))
            .build(),
    )
    .await;
    assert_eq!(people.len(), 7);

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(CREATED.less_than(functions::now()))
            .filter(functions::extract(ExtractField::Year, &CREATED).less_than(2000.0))
            .build(),
    )
    .await;
    assert_eq!(last_names(&people), ["Nagro"]);
}

pub async fn spec_paging<C: Connection>(connection: &mut C) {
    let _lock = MUTEX.lock().await;
    reset_people(connection).await;

    let people = find(connection, &SpecBuilder::new().limit(2).build()).await;
    assert_eq!(people.len(), 2);

    let people = find(connection, &SpecBuilder::new().offset(1).build()).await;
    assert_eq!(people.len(), 7);

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(ID.greater_than(3))
            .order_by(LAST_NAME.asc())
            .limit(1)
            .build(),
    )
    .await;
    assert_eq!(people[0].first_name.as_deref(), Some("Benjamin"));

    let people = find(
        connection,
        &SpecBuilder::new().filter(ID.between(1).and(2)).build(),
    )
    .await;
    assert_eq!(people.len(), 2);

    let people = find(
        connection,
        &SpecBuilder::new()
            .order_by(functions::length(&FIRST_NAME).asc())
            .order_by(ID.desc())
            .build(),
    )
    .await;
    assert_eq!(last_names(&people[..2]), ["Jay", "Adams"]);
    assert_eq!(people.last().and_then(|v| v.first_name.as_deref()), None);

    // Keyset pagination after (Jefferson, 6)
    let people = find(
        connection,
        &SpecBuilder::new()
            .order_by(LAST_NAME.asc().seek_greater_than("Jefferson"))
            .order_by(ID.asc().seek_greater_than(6))
            .limit(2)
            .build(),
    )
    .await;
    assert_eq!(last_names(&people), ["Madison", "Nagro"]);

    let people = find(
        connection,
        &SpecBuilder::new()
            .order_by(ID.desc().seek_less_than(3))
            .build(),
    )
    .await;
    assert_eq!(
        people.iter().map(|v| v.id).collect::<Vec<_>>(),
        [Some(2), Some(1)]
    );

    let people = find(
        connection,
        &SpecBuilder::new()
            .filter(IS_ADMIN.is_false())
            .order_by(ID.asc())
            .offset(2)
            .limit(3)
            .build(),
    )
    .await;
    assert_eq!(last_names(&people), ["Franklin", "Hamilton", "Jay"]);
}
