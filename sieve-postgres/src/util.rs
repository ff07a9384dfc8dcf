use crate::{ValueHolder, postgres_type_to_value, value_to_postgres_type};
use async_stream::try_stream;
use sieve_core::{
    Error, Query, QueryResult, Result, Row, RowLabeled, RowNames, RowsAffected, Value,
    stream::{Stream, StreamExt, TryStreamExt},
    truncate_long,
};
use std::{pin::pin, sync::Arc};
use tokio_postgres::{GenericClient, Statement};

pub(crate) fn row_to_sieve_row(row: tokio_postgres::Row) -> Result<Row> {
    (0..row.len())
        .map(|i| match row.try_get::<_, ValueHolder>(i) {
            Ok(v) => Ok(v.0),
            Err(e) => {
                let col = &row.columns()[i];
                Err(Error::new(e).context(format!(
                    "Could not deserialize column {} `{}`: {}",
                    i,
                    col.name(),
                    col.type_()
                )))
            }
        })
        .collect()
}

fn labels_of(row: &tokio_postgres::Row) -> RowNames {
    row.columns().iter().map(|c| c.name().to_string()).collect()
}

/// Prepare `sql` declaring the parameter types from the values bound to it.
///
/// Untyped nulls are left for the server to infer.
async fn prepare<C>(client: &C, sql: &str, params: &[Value]) -> Result<Statement>
where
    C: GenericClient + Sync,
{
    let types = params.iter().map(value_to_postgres_type).collect::<Vec<_>>();
    client.prepare_typed(sql, &types).await.map_err(|e| {
        Error::new(e).context(format!(
            "While preparing the query:\n{}",
            truncate_long!(sql)
        ))
    })
}

/// Convert every value to the type the statement expects at its position.
fn coerce(statement: &Statement, params: Vec<Value>) -> Result<Vec<ValueHolder>> {
    let types = statement.params();
    if types.len() != params.len() {
        return Err(Error::msg(format!(
            "The query expects {} parameters but {} were bound",
            types.len(),
            params.len()
        )));
    }
    params
        .into_iter()
        .zip(types)
        .enumerate()
        .map(|(i, (value, ty))| {
            value
                .try_as(&postgres_type_to_value(ty))
                .map(ValueHolder)
                .map_err(|e| e.context(format!("While binding parameter ${}", i + 1)))
        })
        .collect()
}

fn log_error(context: Arc<String>) -> impl Fn(Error) -> Error {
    move |e| {
        let e = e.context(context.clone());
        log::error!("{:#}", e);
        e
    }
}

pub(crate) fn run_query<'a, C>(
    client: &'a C,
    query: Query,
) -> impl Stream<Item = Result<QueryResult>> + Send + 'a
where
    C: GenericClient + Sync,
{
    let context = Arc::new(format!("While running the query:\n{}", query));
    try_stream! {
        let statement = prepare(client, &query.sql, &query.params).await?;
        let params = coerce(&statement, query.params)?;
        let stream = client.query_raw(&statement, params).await?;
        let mut stream = pin!(stream);
        let mut labels: Option<RowNames> = None;
        while let Some(row) = stream.next().await.transpose()? {
            let labels = labels.get_or_insert_with(|| labels_of(&row));
            yield QueryResult::Row(RowLabeled::new(labels.clone(), row_to_sieve_row(row)?));
        }
        yield QueryResult::Affected(RowsAffected {
            rows_affected: stream.rows_affected().unwrap_or_default(),
        });
    }
    .map_err(log_error(context))
}

pub(crate) async fn fetch_batch<C>(
    client: &C,
    sql: String,
    batch: Vec<Row>,
) -> Result<Vec<RowLabeled>>
where
    C: GenericClient + Sync,
{
    if batch.is_empty() {
        return Ok(Vec::new());
    }
    let context = Arc::new(format!(
        "While fetching a batch of {} queries:\n{}",
        batch.len(),
        truncate_long!(sql)
    ));
    let result: Result<Vec<RowLabeled>> = async {
        let statement = prepare(client, &sql, &batch[0]).await?;
        let mut result = Vec::with_capacity(batch.len());
        let mut labels: Option<RowNames> = None;
        for params in batch {
            let params = coerce(&statement, params.into_vec())?;
            let rows = client
                .query_raw(&statement, params)
                .await?
                .try_collect::<Vec<_>>()
                .await?;
            for row in rows {
                let labels = labels.get_or_insert_with(|| labels_of(&row));
                result.push(RowLabeled::new(labels.clone(), row_to_sieve_row(row)?));
            }
        }
        Ok(result)
    }
    .await;
    result.map_err(log_error(context))
}

pub(crate) async fn execute_batch<C>(client: &C, sql: String, batch: Vec<Row>) -> Result<RowsAffected>
where
    C: GenericClient + Sync,
{
    if batch.is_empty() {
        return Ok(RowsAffected::default());
    }
    let context = Arc::new(format!(
        "While executing a batch of {} queries:\n{}",
        batch.len(),
        truncate_long!(sql)
    ));
    let result: Result<RowsAffected> = async {
        let statement = prepare(client, &sql, &batch[0]).await?;
        let mut result = RowsAffected::default();
        for params in batch {
            let params = coerce(&statement, params.into_vec())?;
            result.rows_affected += client.execute_raw(&statement, params).await?;
        }
        Ok(result)
    }
    .await;
    result.map_err(log_error(context))
}
