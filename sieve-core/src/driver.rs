use crate::{Connection, SqlWriter, Transaction};

pub trait Driver {
    type Connection: Connection;
    type SqlWriter: SqlWriter;
    type Transaction<'c>: Transaction<'c>;

    /// Scheme of the connection urls, `postgres` for `postgres://...`.
    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;
}
