use crate::{PostgresConnection, PostgresDriver, util};
use sieve_core::{
    Executor, Query, QueryResult, Result, Row, RowLabeled, RowsAffected, Transaction,
    future::TryFutureExt, stream::Stream,
};
use std::future::Future;

pub struct PostgresTransaction<'c>(pub(crate) tokio_postgres::Transaction<'c>);

impl<'c> PostgresTransaction<'c> {
    pub async fn new(connection: &'c mut PostgresConnection) -> Result<Self> {
        Ok(Self(connection.client.transaction().await.map_err(|e| {
            let e = sieve_core::Error::new(e).context("While starting a transaction");
            log::error!("{:#}", e);
            e
        })?))
    }
}

impl<'c> Executor for PostgresTransaction<'c> {
    type Driver = PostgresDriver;

    fn driver(&self) -> &Self::Driver {
        &PostgresDriver {}
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        util::run_query(&self.0, query)
    }

    fn fetch_batch(
        &mut self,
        sql: String,
        batch: Vec<Row>,
    ) -> impl Future<Output = Result<Vec<RowLabeled>>> + Send {
        util::fetch_batch(&self.0, sql, batch)
    }

    fn execute_batch(
        &mut self,
        sql: String,
        batch: Vec<Row>,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        util::execute_batch(&self.0, sql, batch)
    }
}

impl<'c> Transaction<'c> for PostgresTransaction<'c> {
    fn commit(self) -> impl Future<Output = Result<()>> + Send {
        self.0.commit().map_err(Into::into)
    }

    fn rollback(self) -> impl Future<Output = Result<()>> + Send {
        self.0.rollback().map_err(Into::into)
    }
}
