use crate::{
    AsValue, Driver, Entity, Error, Executor, Result, Row, SqlWriter, entity::first_value,
};

/// Entities to save split into the rows to insert and the rows to update.
///
/// Both lists keep the relative order of the input. Insert tuples hold every
/// column but the primary key, update tuples hold the full row.
pub struct SavePlan<E: Entity> {
    inserts: Vec<E>,
    insert_batch: Vec<Row>,
    updates: Vec<E>,
    update_batch: Vec<Row>,
}

impl<E: Entity> SavePlan<E> {
    pub fn new(entities: impl IntoIterator<Item = E>) -> Result<Self> {
        let primary_key = E::primary_key_index()?;
        let entities = entities.into_iter();
        let (lower, _) = entities.size_hint();
        let mut plan = Self {
            inserts: Vec::with_capacity(lower),
            insert_batch: Vec::with_capacity(lower),
            updates: Vec::new(),
            update_batch: Vec::new(),
        };
        for entity in entities {
            let row = entity.row();
            if entity.primary_key().is_some() {
                plan.update_batch.push(row);
                plan.updates.push(entity);
            } else {
                plan.insert_batch.push(
                    row.into_vec()
                        .into_iter()
                        .enumerate()
                        .filter(|(i, _)| *i != primary_key)
                        .map(|(_, v)| v)
                        .collect(),
                );
                plan.inserts.push(entity);
            }
        }
        Ok(plan)
    }

    pub fn inserts(&self) -> &[E] {
        &self.inserts
    }

    pub fn updates(&self) -> &[E] {
        &self.updates
    }

    pub fn insert_batch(&self) -> &[Row] {
        &self.insert_batch
    }

    pub fn update_batch(&self) -> &[Row] {
        &self.update_batch
    }

    /// Join the inserted and the updated entities.
    ///
    /// Updated entities follow the inserted ones only when strictly more
    /// entities were inserted, otherwise the inserted ones follow the updated.
    /// The input order is not preserved when both kinds are present.
    pub fn recombine(inserted: Vec<E>, updated: Vec<E>) -> Vec<E> {
        let (mut result, rest) = if inserted.len() > updated.len() {
            (inserted, updated)
        } else {
            (updated, inserted)
        };
        result.extend(rest);
        result
    }

    /// Run the insert batch, then the update batch. Empty batches are not sent.
    pub(crate) async fn execute<Exec: Executor>(self, executor: &mut Exec) -> Result<Vec<E>> {
        let (insert_sql, update_sql) = {
            let writer = executor.driver().sql_writer();
            let mut insert_sql = String::new();
            let mut update_sql = String::new();
            if !self.insert_batch.is_empty() {
                writer.write_insert::<E>(&mut insert_sql)?;
            }
            if !self.update_batch.is_empty() {
                writer.write_update::<E>(&mut update_sql)?;
            }
            (insert_sql, update_sql)
        };
        let SavePlan {
            inserts,
            insert_batch,
            updates,
            update_batch,
        } = self;
        let inserted = if insert_batch.is_empty() {
            Vec::new()
        } else {
            let keys = executor.fetch_batch(insert_sql, insert_batch).await?;
            if keys.len() != inserts.len() {
                let error = Error::msg(format!(
                    "The insert into `{}` returned {} keys for {} rows",
                    E::table().full_name(),
                    keys.len(),
                    inserts.len()
                ));
                log::error!("{:#}", error);
                return Err(error);
            }
            inserts
                .into_iter()
                .zip(keys)
                .map(|(entity, row)| {
                    let key = E::PrimaryKey::try_from_value(first_value(row))?;
                    Ok(entity.with_primary_key(key))
                })
                .collect::<Result<Vec<_>>>()?
        };
        if !update_batch.is_empty() {
            executor.execute_batch(update_sql, update_batch).await?;
        }
        Ok(Self::recombine(inserted, updates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnDef, RowLabeled, TableRef, Value};
    use std::sync::LazyLock;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        id: Option<i64>,
    }

    static TABLE: TableRef = TableRef::new("item");
    static COLUMNS: LazyLock<[ColumnDef; 2]> = LazyLock::new(|| {
        [
            ColumnDef {
                name: "name",
                value: Value::Varchar(None),
                ..Default::default()
            },
            ColumnDef {
                name: "id",
                value: Value::Int64(None),
                primary_key: true,
                ..Default::default()
            },
        ]
    });

    impl Entity for Item {
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
            [self.name.clone().as_value(), self.id.as_value()].into()
        }
        fn from_row(row: RowLabeled) -> Result<Self> {
            Ok(Self {
                name: row.get("name")?,
                id: row.get("id")?,
            })
        }
    }

    fn item(name: &str, id: Option<i64>) -> Item {
        Item {
            name: name.into(),
            id,
        }
    }

    #[test]
    fn partition_keeps_relative_order() {
        let plan = SavePlan::new([
            item("a", Some(1)),
            item("b", None),
            item("c", Some(2)),
            item("d", None),
        ])
        .unwrap();
        assert_eq!(plan.inserts(), [item("b", None), item("d", None)]);
        assert_eq!(plan.updates(), [item("a", Some(1)), item("c", Some(2))]);
        assert_eq!(
            plan.insert_batch(),
            [
                Row::from([Value::Varchar(Some("b".into()))]),
                Row::from([Value::Varchar(Some("d".into()))]),
            ]
        );
        assert_eq!(
            plan.update_batch()[1],
            Row::from([Value::Varchar(Some("c".into())), Value::Int64(Some(2))])
        );
    }

    #[test]
    fn recombine_puts_the_larger_list_first() {
        let inserted = vec![item("i1", Some(10))];
        let updated = vec![item("u1", Some(1)), item("u2", Some(2))];
        assert_eq!(
            SavePlan::recombine(inserted.clone(), updated.clone()),
            [item("u1", Some(1)), item("u2", Some(2)), item("i1", Some(10))]
        );
        assert_eq!(
            SavePlan::recombine(updated.clone(), inserted.clone()),
            [item("u1", Some(1)), item("u2", Some(2)), item("i1", Some(10))]
        );
    }

    #[test]
    fn recombine_ties_put_updates_first() {
        assert_eq!(
            SavePlan::recombine(vec![item("i", Some(3))], vec![item("u", Some(1))]),
            [item("u", Some(1)), item("i", Some(3))]
        );
    }

    #[test]
    fn empty_plan() {
        let plan = SavePlan::<Item>::new([]).unwrap();
        assert!(plan.inserts().is_empty());
        assert!(plan.update_batch().is_empty());
    }
}
