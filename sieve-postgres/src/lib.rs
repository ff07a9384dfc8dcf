mod connection;
mod driver;
mod sql_writer;
mod transaction;
mod util;
mod value_holder;

pub use connection::*;
pub use driver::*;
pub use sql_writer::*;
pub use transaction::*;
pub use value_holder::{postgres_type_to_value, value_to_postgres_type};
pub(crate) use value_holder::ValueHolder;
