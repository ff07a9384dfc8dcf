//! Operator and function keywords emitted into the query text.

pub(crate) const LESS_THAN: &str = " < ";
pub(crate) const GREATER_THAN: &str = " > ";
pub(crate) const LESS_THAN_OR_EQ: &str = " <= ";
pub(crate) const GREATER_THAN_OR_EQ: &str = " >= ";
pub(crate) const EQ: &str = " = ";
pub(crate) const NOT_EQ: &str = " <> ";
pub(crate) const IS_DISTINCT_FROM: &str = " IS DISTINCT FROM ";
pub(crate) const IS_NOT_DISTINCT_FROM: &str = " IS NOT DISTINCT FROM ";
pub(crate) const BETWEEN: &str = " BETWEEN ";
pub(crate) const BETWEEN_SYMMETRIC: &str = " BETWEEN SYMMETRIC ";
pub(crate) const NOT_BETWEEN_SYMMETRIC: &str = " NOT BETWEEN SYMMETRIC ";
pub(crate) const AND: &str = " AND ";
pub(crate) const OR: &str = " OR ";
pub(crate) const NOT: &str = "NOT ";
pub(crate) const ANY: &str = "ANY";

pub(crate) const IS_NULL: &str = " IS NULL";
pub(crate) const IS_NOT_NULL: &str = " IS NOT NULL";
pub(crate) const IS_TRUE: &str = " IS TRUE";
pub(crate) const IS_NOT_TRUE: &str = " IS NOT TRUE";
pub(crate) const IS_FALSE: &str = " IS FALSE";
pub(crate) const IS_NOT_FALSE: &str = " IS NOT FALSE";
pub(crate) const IS_UNKNOWN: &str = " IS UNKNOWN";
pub(crate) const IS_NOT_UNKNOWN: &str = " IS NOT UNKNOWN";

pub(crate) const PLUS: &str = " + ";
pub(crate) const MINUS: &str = " - ";
pub(crate) const TIMES: &str = " * ";
pub(crate) const DIVIDED_BY: &str = " / ";
pub(crate) const MODULO: &str = " % ";
pub(crate) const POW: &str = " ^ ";
pub(crate) const LIKE: &str = " LIKE ";
pub(crate) const NOT_LIKE: &str = " NOT LIKE ";
pub(crate) const ESCAPE: &str = " ESCAPE ";

pub(crate) const ASC: &str = " ASC";
pub(crate) const DESC: &str = " DESC";
pub(crate) const NULLS_FIRST: &str = " NULLS FIRST";
pub(crate) const NULLS_LAST: &str = " NULLS LAST";

pub(crate) const ABS: &str = "ABS";
pub(crate) const CEIL: &str = "CEIL";
pub(crate) const FLOOR: &str = "FLOOR";
pub(crate) const LN: &str = "LN";
pub(crate) const LOG: &str = "LOG";
pub(crate) const ROUND: &str = "ROUND";
pub(crate) const SIGN: &str = "SIGN";
pub(crate) const SQRT: &str = "SQRT";
pub(crate) const TRUNC: &str = "TRUNC";
pub(crate) const CHAR_LENGTH: &str = "CHAR_LENGTH";
pub(crate) const LOWER: &str = "LOWER";
pub(crate) const UPPER: &str = "UPPER";
pub(crate) const TRIM: &str = "TRIM";
pub(crate) const CONCAT: &str = "CONCAT";
pub(crate) const CONCAT_WS: &str = "CONCAT_WS";
pub(crate) const LENGTH: &str = "LENGTH";
pub(crate) const STARTS_WITH: &str = "STARTS_WITH";
pub(crate) const CURRENT_DATE: &str = "CURRENT_DATE";
pub(crate) const CURRENT_TIME: &str = "CURRENT_TIME";
pub(crate) const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";
pub(crate) const EXTRACT: &str = "EXTRACT";
pub(crate) const DATE_TRUNC: &str = "DATE_TRUNC";
pub(crate) const NOW: &str = "NOW()";
pub(crate) const COALESCE: &str = "COALESCE";
pub(crate) const FROM: &str = " FROM ";
