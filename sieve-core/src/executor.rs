use crate::{
    Driver, Query, QueryResult, Result, Row, RowLabeled, RowsAffected,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::future::Future;

pub trait Executor: Send + Sized {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// General method to send any query and return any result type (either row or count)
    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send;

    /// Execute the query and returns the rows.
    fn fetch(&mut self, query: Query) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.run(query).filter_map(|v| async move {
            match v {
                Ok(QueryResult::Row(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the query and return the total number of rows affected.
    fn execute(&mut self, query: Query) -> impl Future<Output = Result<RowsAffected>> + Send {
        self.run(query)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }

    /// Run the same statement once for every parameter tuple, in order, and
    /// collect all the rows returned.
    ///
    /// Stops at the first failure. Drivers able to prepare the statement once
    /// should override it.
    fn fetch_batch(
        &mut self,
        sql: String,
        batch: Vec<Row>,
    ) -> impl Future<Output = Result<Vec<RowLabeled>>> + Send {
        async move {
            let mut result = Vec::with_capacity(batch.len());
            for params in batch {
                let rows = self
                    .fetch(Query::new(sql.clone(), params.into_vec()))
                    .try_collect::<Vec<_>>()
                    .await?;
                result.extend(rows);
            }
            Ok(result)
        }
    }

    /// Same as [`Executor::fetch_batch`] for statements that do not return rows.
    fn execute_batch(
        &mut self,
        sql: String,
        batch: Vec<Row>,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        async move {
            let mut result = RowsAffected::default();
            for params in batch {
                let affected = self
                    .execute(Query::new(sql.clone(), params.into_vec()))
                    .await?;
                result.extend([affected]);
            }
            Ok(result)
        }
    }
}
