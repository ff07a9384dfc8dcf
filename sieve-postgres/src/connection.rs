use crate::{PostgresDriver, PostgresTransaction, util};
use sieve_core::{
    Connection, Context, Driver, Error, Executor, Query, QueryResult, Result, Row, RowLabeled,
    RowsAffected, stream::Stream,
};
use std::{borrow::Cow, env, future::Future};
use tokio::spawn;
use tokio_postgres::NoTls;
use url::Url;
use urlencoding::decode;

pub struct PostgresConnection {
    pub(crate) client: tokio_postgres::Client,
}

impl Executor for PostgresConnection {
    type Driver = PostgresDriver;

    fn driver(&self) -> &Self::Driver {
        &PostgresDriver {}
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        util::run_query(&self.client, query)
    }

    fn fetch_batch(
        &mut self,
        sql: String,
        batch: Vec<Row>,
    ) -> impl Future<Output = Result<Vec<RowLabeled>>> + Send {
        util::fetch_batch(&self.client, sql, batch)
    }

    fn execute_batch(
        &mut self,
        sql: String,
        batch: Vec<Row>,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        util::execute_batch(&self.client, sql, batch)
    }
}

impl Connection for PostgresConnection {
    #[allow(refining_impl_trait)]
    async fn connect(url: Cow<'static, str>) -> Result<PostgresConnection> {
        let context = || format!("While trying to connect to `{}`", url);
        let log_error = |e: Error| {
            log::error!("{:#}", e);
            e
        };
        let url = decode(&url)
            .with_context(context)
            .map_err(log_error)?;
        let prefix = format!("{}://", <Self::Driver as Driver>::NAME);
        if !url.starts_with(&prefix) {
            let error = Error::msg(format!(
                "Postgres connection url must start with `{}`",
                &prefix
            ))
            .context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        let mut url = Url::parse(&url)
            .with_context(context)
            .map_err(log_error)?;
        let mut take_url_param = |key: &str, env_var: &str| {
            let mut value = None;
            let mut pairs: Vec<(String, String)> = url
                .query_pairs()
                .map(|(k, v)| (k.into(), v.into()))
                .collect();
            if let Some(pos) = pairs.iter().position(|(k, _)| k == key) {
                let (_, v) = pairs.remove(pos);
                value = Some(v);
            }
            if pairs.is_empty() {
                url.set_query(None);
            } else {
                url.query_pairs_mut()
                    .clear()
                    .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            }
            value.or_else(|| env::var(env_var).ok())
        };
        let sslmode = take_url_param("sslmode", "PGSSLMODE").unwrap_or("disable".into());
        if sslmode != "disable" {
            let error = Error::msg(format!(
                "Unsupported sslmode `{}`, only `disable` is available",
                sslmode
            ))
            .context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        let (client, connection) = tokio_postgres::connect(url.as_str(), NoTls)
            .await
            .map_err(|e| {
                let e = Error::new(e).context(context());
                log::error!("{:#}", e);
                e
            })?;
        spawn(async move {
            if let Err(e) = connection.await
                && !e.is_closed()
            {
                log::error!("Postgres connection error: {:#}", e);
            }
        });
        Ok(Self { client })
    }

    #[allow(refining_impl_trait)]
    fn begin(&mut self) -> impl Future<Output = Result<PostgresTransaction<'_>>> + Send {
        PostgresTransaction::new(self)
    }
}
