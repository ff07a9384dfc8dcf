mod expression;
pub(crate) mod keyword;
pub(crate) mod node;
mod numeric;
mod predicate;
mod string;
mod temporal;

pub use expression::*;
pub use numeric::*;
pub use temporal::*;
