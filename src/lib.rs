//! Typed, composable query specifications for Postgres.
//!
//! Filters, sorting and pagination over an [`Entity`] are described with
//! typed [`Expression`]s and compiled by a [`SpecBuilder`] into one SQL
//! fragment with `$n` placeholders and the values bound to them:
//!
//! ```rust
//! use sieve::{Expression, SpecBuilder, Value, functions};
//! # struct Person;
//! const ID: Expression<Person, i64> = Expression::column("id");
//! const LAST_NAME: Expression<Person, String> = Expression::column("last_name");
//!
//! let spec = SpecBuilder::new()
//!     .filter(functions::length(&LAST_NAME).eq(3))
//!     .order_by(LAST_NAME.asc().seek_greater_than("Jefferson"))
//!     .order_by(ID.asc().seek_greater_than(6))
//!     .limit(2)
//!     .build();
//! assert_eq!(
//!     spec.sql(),
//!     "WHERE (LENGTH(last_name) = $1) AND (last_name > $2) AND (id > $3) \
//!      ORDER BY last_name ASC, id ASC LIMIT 2"
//! );
//! assert_eq!(spec.bound_values()[2], Value::Int64(Some(6)));
//! ```
//!
//! The repository operations ([`Entity::find_spec`], [`Entity::save_all`] and
//! the others) run on any [`Executor`], drivers such as `sieve-postgres`
//! provide the [`Connection`].

pub use sieve_core::*;
