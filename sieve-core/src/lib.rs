mod as_value;
mod batch;
mod column;
mod connection;
mod driver;
mod entity;
mod executor;
mod expression;
pub mod functions;
mod query;
mod sort;
mod spec;
mod sql_writer;
mod table_ref;
mod transaction;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use batch::*;
pub use column::*;
pub use connection::*;
pub use driver::*;
pub use entity::*;
pub use executor::*;
pub use expression::*;
pub use query::*;
pub use sort::*;
pub use spec::*;
pub use sql_writer::*;
pub use table_ref::*;
pub use transaction::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
