use crate::{
    AsValue, ColumnDef, Connection, Driver, Error, Executor, Query, Result, Row, RowLabeled,
    RowsAffected, SavePlan, Spec, SqlWriter, TableRef, Transaction, Value,
    stream::{self, Stream, StreamExt, TryStreamExt},
};
use futures::{TryFutureExt, future};
use log::Level;
use std::{future::Future, pin::pin};

/// Record stored in a table with a single primary key column.
///
/// Implementors describe the table and convert between the record and its
/// row, every repository operation is provided on top of that.
pub trait Entity: Send + Sync + Sized {
    type PrimaryKey: AsValue + Clone + Send + Sync;

    fn table() -> &'static TableRef;

    /// Columns in row order, exactly one of them is the primary key.
    fn columns() -> &'static [ColumnDef];

    /// `None` until the row has been inserted.
    fn primary_key(&self) -> Option<Self::PrimaryKey>;

    fn with_primary_key(self, primary_key: Self::PrimaryKey) -> Self;

    /// Every field, in the order of [`Entity::columns`].
    fn row(&self) -> Row;

    fn from_row(row: RowLabeled) -> Result<Self>;

    fn primary_key_index() -> Result<usize> {
        let mut keys = Self::columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.primary_key)
            .map(|(i, _)| i);
        match (keys.next(), keys.next()) {
            (Some(i), None) => Ok(i),
            (None, _) => Err(Error::msg(format!(
                "Table `{}` has no primary key column",
                Self::table().full_name()
            ))),
            (Some(..), Some(..)) => Err(Error::msg(format!(
                "Table `{}` has more than one primary key column",
                Self::table().full_name()
            ))),
        }
    }

    fn primary_key_def() -> Result<&'static ColumnDef> {
        Ok(&Self::columns()[Self::primary_key_index()?])
    }

    fn create_table<Exec: Executor>(
        executor: &mut Exec,
        if_not_exists: bool,
    ) -> impl Future<Output = Result<()>> + Send {
        let mut sql = String::with_capacity(512);
        executor
            .driver()
            .sql_writer()
            .write_create_table::<Self>(&mut sql, if_not_exists);
        executor.execute(sql.into()).map_ok(|_| ())
    }

    fn drop_table<Exec: Executor>(
        executor: &mut Exec,
        if_exists: bool,
    ) -> impl Future<Output = Result<()>> + Send {
        let mut sql = String::with_capacity(64);
        executor
            .driver()
            .sql_writer()
            .write_drop_table::<Self>(&mut sql, if_exists);
        executor.execute(sql.into()).map_ok(|_| ())
    }

    fn count<Exec: Executor>(executor: &mut Exec) -> impl Future<Output = Result<i64>> + Send {
        let mut sql = String::with_capacity(64);
        executor.driver().sql_writer().write_count::<Self>(&mut sql);
        let stream = executor.fetch(sql.into());
        async move {
            let row = pin!(stream)
                .try_next()
                .await?
                .ok_or_else(|| Error::msg("COUNT(*) did not return any row"))?;
            i64::try_from_value(first_value(row))
        }
    }

    fn exists_pk<Exec: Executor>(
        executor: &mut Exec,
        primary_key: &Self::PrimaryKey,
    ) -> impl Future<Output = Result<bool>> + Send {
        let query = write_query(executor, vec![primary_key.clone().as_value()], |w, out| {
            w.write_select_pk::<Self>(out)
        });
        async move {
            let stream = executor.fetch(query?);
            Ok(pin!(stream).try_next().await?.is_some())
        }
    }

    fn find_all<Exec: Executor>(executor: &mut Exec) -> impl Stream<Item = Result<Self>> + Send {
        let mut sql = String::with_capacity(64);
        executor
            .driver()
            .sql_writer()
            .write_select_all::<Self>(&mut sql);
        executor
            .fetch(sql.into())
            .map(|row| row.and_then(Self::from_row))
    }

    /// Rows matching `spec`, in the order it defines.
    fn find_spec<Exec: Executor>(
        executor: &mut Exec,
        spec: &Spec<Self>,
    ) -> impl Stream<Item = Result<Self>> + Send {
        let mut sql = String::with_capacity(64 + spec.sql().len());
        executor
            .driver()
            .sql_writer()
            .write_select_spec::<Self>(&mut sql, spec);
        executor
            .fetch(Query::new(sql, spec.bound_values().to_vec()))
            .map(|row| row.and_then(Self::from_row))
    }

    fn find_pk<Exec: Executor>(
        executor: &mut Exec,
        primary_key: &Self::PrimaryKey,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        let query = write_query(executor, vec![primary_key.clone().as_value()], |w, out| {
            w.write_select_pk::<Self>(out)
        });
        async move {
            let stream = executor.fetch(query?);
            pin!(stream)
                .try_next()
                .await?
                .map(Self::from_row)
                .transpose()
        }
    }

    /// Rows whose key is in `primary_keys`, in no particular order. Unknown
    /// keys are skipped.
    fn find_all_pk<Exec: Executor>(
        executor: &mut Exec,
        primary_keys: impl IntoIterator<Item = Self::PrimaryKey>,
    ) -> impl Stream<Item = Result<Self>> + Send {
        let keys = primary_keys.into_iter().collect::<Vec<_>>().as_value();
        match write_query(executor, vec![keys], |w, out| {
            w.write_select_any_pk::<Self>(out)
        }) {
            Ok(query) => executor
                .fetch(query)
                .map(|row| row.and_then(Self::from_row))
                .left_stream(),
            Err(e) => stream::once(future::ready(Err(e))).right_stream(),
        }
    }

    /// Delete this row, a row that is already gone is not an error.
    fn delete<Exec: Executor>(&self, executor: &mut Exec) -> impl Future<Output = Result<()>> + Send {
        let primary_key = self.primary_key();
        async move {
            let Some(primary_key) = primary_key else {
                return Err(Error::msg(format!(
                    "Cannot delete from `{}` an entity without primary key",
                    Self::table().full_name()
                )));
            };
            let affected = Self::delete_pk(executor, &primary_key).await?;
            if affected.rows_affected != 1 {
                log::log!(
                    if affected.rows_affected == 0 {
                        Level::Info
                    } else {
                        Level::Warn
                    },
                    "Deleting from `{}` affected {} rows",
                    Self::table().full_name(),
                    affected.rows_affected
                );
            }
            Ok(())
        }
    }

    fn delete_pk<Exec: Executor>(
        executor: &mut Exec,
        primary_key: &Self::PrimaryKey,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        let query = write_query(executor, vec![primary_key.clone().as_value()], |w, out| {
            w.write_delete_pk::<Self>(out)
        });
        async move { executor.execute(query?).await }
    }

    fn delete_all<Exec: Executor>(
        executor: &mut Exec,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        let mut sql = String::with_capacity(64);
        executor
            .driver()
            .sql_writer()
            .write_delete_all::<Self>(&mut sql);
        executor.execute(sql.into())
    }

    /// Delete the given rows, entities never saved are ignored.
    fn delete_many<'a, Exec, It>(
        executor: &mut Exec,
        entities: It,
    ) -> impl Future<Output = Result<RowsAffected>> + Send
    where
        Self: 'a,
        Exec: Executor,
        It: IntoIterator<Item = &'a Self>,
    {
        Self::delete_all_pk(
            executor,
            entities
                .into_iter()
                .filter_map(Self::primary_key)
                .collect::<Vec<_>>(),
        )
    }

    fn delete_all_pk<Exec: Executor>(
        executor: &mut Exec,
        primary_keys: impl IntoIterator<Item = Self::PrimaryKey>,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        let keys = primary_keys.into_iter().collect::<Vec<_>>().as_value();
        let query = write_query(executor, vec![keys], |w, out| {
            w.write_delete_any_pk::<Self>(out)
        });
        async move { executor.execute(query?).await }
    }

    /// Insert the entity when it has no key yet, update it otherwise.
    ///
    /// Returns the saved entity, carrying the generated key after an insert.
    fn save<Exec: Executor>(self, executor: &mut Exec) -> impl Future<Output = Result<Self>> + Send {
        async move {
            Self::save_all_in(executor, [self])
                .await?
                .pop()
                .ok_or_else(|| Error::msg("Saving one entity returned nothing"))
        }
    }

    /// Batched save on `executor`, no transaction is started.
    ///
    /// New entities are inserted first, then the existing ones are updated.
    /// See [`SavePlan::recombine`] for the order of the result.
    fn save_all_in<Exec: Executor>(
        executor: &mut Exec,
        entities: impl IntoIterator<Item = Self>,
    ) -> impl Future<Output = Result<Vec<Self>>> + Send {
        let plan = SavePlan::new(entities);
        async move { plan?.execute(executor).await }
    }

    /// Batched save in a new transaction on `connection`, either every entity
    /// is saved or none is.
    fn save_all<C: Connection>(
        connection: &mut C,
        entities: impl IntoIterator<Item = Self>,
    ) -> impl Future<Output = Result<Vec<Self>>> + Send {
        let plan = SavePlan::new(entities);
        async move {
            let plan = plan?;
            let mut transaction = connection.begin().await?;
            match plan.execute(&mut transaction).await {
                Ok(saved) => {
                    transaction.commit().await?;
                    Ok(saved)
                }
                Err(error) => {
                    if let Err(e) = transaction.rollback().await {
                        log::error!("{:#}", e.context("While rolling back a failed save"));
                    }
                    Err(error)
                }
            }
        }
    }
}

fn write_query<Exec: Executor>(
    executor: &Exec,
    params: Vec<Value>,
    write: impl FnOnce(&<Exec::Driver as Driver>::SqlWriter, &mut String) -> Result<()>,
) -> Result<Query> {
    let mut sql = String::with_capacity(128);
    write(&executor.driver().sql_writer(), &mut sql)?;
    Ok(Query::new(sql, params))
}

pub(crate) fn first_value(row: RowLabeled) -> Value {
    row.values.into_vec().into_iter().next().unwrap_or(Value::Null)
}
