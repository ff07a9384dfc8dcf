//! Postgres functions over [`Expression`]s.
//!
//! Each function returns a new expression, the parameters of its arguments
//! are merged in argument order.

use crate::{
    Argument, Expression, Numeric, Operand, Predicate, Temporal, Value,
    expression::{keyword::*, node::Node},
    push_quoted,
};
use time::{Date, OffsetDateTime, Time};

fn unary<E, T, R>(name: &str, x: &Expression<E, T>) -> Expression<E, R> {
    Expression::from_node(Node::function(name, [x.node.clone()]))
}

pub fn abs<E, T: Numeric>(x: &Expression<E, T>) -> Expression<E, T> {
    unary(ABS, x)
}

pub fn ceil<E, T: Numeric>(x: &Expression<E, T>) -> Expression<E, T> {
    unary(CEIL, x)
}

pub fn floor<E, T: Numeric>(x: &Expression<E, T>) -> Expression<E, T> {
    unary(FLOOR, x)
}

/// Natural logarithm.
pub fn ln<E, T: Numeric>(x: &Expression<E, T>) -> Expression<E, T> {
    unary(LN, x)
}

/// Base 10 logarithm.
pub fn log<E, T: Numeric>(x: &Expression<E, T>) -> Expression<E, T> {
    unary(LOG, x)
}

/// Same as [`log`].
pub fn log10<E, T: Numeric>(x: &Expression<E, T>) -> Expression<E, T> {
    log(x)
}

pub fn round<E, T: Numeric>(x: &Expression<E, T>) -> Expression<E, T> {
    unary(ROUND, x)
}

pub fn sign<E, T: Numeric>(x: &Expression<E, T>) -> Expression<E, T> {
    unary(SIGN, x)
}

pub fn sqrt<E, T: Numeric>(x: &Expression<E, T>) -> Expression<E, T> {
    unary(SQRT, x)
}

/// Truncate toward zero.
pub fn trunc<E, T: Numeric>(x: &Expression<E, T>) -> Expression<E, T> {
    unary(TRUNC, x)
}

/// Truncate to `places` decimal places, `places` is written into the text.
pub fn trunc_places<E, T: Numeric>(x: &Expression<E, T>, places: i32) -> Expression<E, T> {
    Expression::from_node(Node::function(
        TRUNC,
        [x.node.clone(), Node::text(places.to_string())],
    ))
}

pub fn char_length<E>(x: &Expression<E, String>) -> Expression<E, i32> {
    unary(CHAR_LENGTH, x)
}

pub fn length<E>(x: &Expression<E, String>) -> Expression<E, i32> {
    unary(LENGTH, x)
}

pub fn lower<E>(x: &Expression<E, String>) -> Expression<E, String> {
    unary(LOWER, x)
}

pub fn upper<E>(x: &Expression<E, String>) -> Expression<E, String> {
    unary(UPPER, x)
}

/// Remove the whitespace on both sides.
pub fn trim<E>(x: &Expression<E, String>) -> Expression<E, String> {
    unary(TRIM, x)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimType {
    Leading,
    Trailing,
    Both,
}

impl TrimType {
    pub fn sql(&self) -> &'static str {
        match self {
            TrimType::Leading => "LEADING",
            TrimType::Trailing => "TRAILING",
            TrimType::Both => "BOTH",
        }
    }
}

/// `TRIM(LEADING 'chars' FROM x)`
///
/// Unlike every other literal, `chars` is written into the query text instead
/// of being bound. It is quoted and escaped, still it is meant for characters
/// known at compile time and never for user input.
pub fn trim_chars<E>(
    kind: TrimType,
    chars: &'static str,
    x: &Expression<E, String>,
) -> Expression<E, String> {
    let mut sql = String::with_capacity(x.node.sql.len() + chars.len() + 24);
    sql.push_str(TRIM);
    sql.push('(');
    sql.push_str(kind.sql());
    sql.push(' ');
    push_quoted(&mut sql, chars);
    sql.push_str(FROM);
    sql.push_str(&x.node.sql);
    sql.push(')');
    Expression::from_node(Node {
        sql: sql.into(),
        params: x.node.params.clone(),
    })
}

/// `CONCAT(args...)`, expressions and literals can be mixed with [`args!`](crate::args).
pub fn concat<E>(args: impl IntoIterator<Item = Argument<E>>) -> Expression<E, String> {
    Expression::from_node(Node::function(CONCAT, args.into_iter().map(|v| v.0)))
}

/// `CONCAT_WS(separator, args...)`, the separator is bound like any other literal.
pub fn concat_ws<E>(
    separator: &str,
    args: impl IntoIterator<Item = Argument<E>>,
) -> Expression<E, String> {
    Expression::from_node(Node::function(
        CONCAT_WS,
        [Node::bind(Value::Varchar(Some(separator.into())))]
            .into_iter()
            .chain(args.into_iter().map(|v| v.0)),
    ))
}

pub fn starts_with<E>(
    string: &Expression<E, String>,
    prefix: impl Into<Operand<E, String>>,
) -> Predicate<E> {
    Expression::from_node(Node::function(
        STARTS_WITH,
        [string.node.clone(), prefix.into().0],
    ))
}

pub fn current_date<E>() -> Expression<E, Date> {
    Expression::from_node(Node::raw(CURRENT_DATE))
}

pub fn current_time<E>() -> Expression<E, Time> {
    Expression::from_node(Node::raw(CURRENT_TIME))
}

pub fn current_timestamp<E>() -> Expression<E, OffsetDateTime> {
    Expression::from_node(Node::raw(CURRENT_TIMESTAMP))
}

pub fn now<E>() -> Expression<E, OffsetDateTime> {
    Expression::from_node(Node::raw(NOW))
}

/// Field extracted by [`extract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractField {
    Century,
    Day,
    Decade,
    Dow,
    Doy,
    Epoch,
    Hour,
    IsoDow,
    IsoYear,
    Microseconds,
    Millennium,
    Milliseconds,
    Minute,
    Month,
    Quarter,
    Second,
    Timezone,
    TimezoneHour,
    TimezoneMinute,
    Week,
    Year,
}

impl ExtractField {
    pub fn sql(&self) -> &'static str {
        match self {
            ExtractField::Century => "CENTURY",
            ExtractField::Day => "DAY",
            ExtractField::Decade => "DECADE",
            ExtractField::Dow => "DOW",
            ExtractField::Doy => "DOY",
            ExtractField::Epoch => "EPOCH",
            ExtractField::Hour => "HOUR",
            ExtractField::IsoDow => "ISODOW",
            ExtractField::IsoYear => "ISOYEAR",
            ExtractField::Microseconds => "MICROSECONDS",
            ExtractField::Millennium => "MILLENNIUM",
            ExtractField::Milliseconds => "MILLISECONDS",
            ExtractField::Minute => "MINUTE",
            ExtractField::Month => "MONTH",
            ExtractField::Quarter => "QUARTER",
            ExtractField::Second => "SECOND",
            ExtractField::Timezone => "TIMEZONE",
            ExtractField::TimezoneHour => "TIMEZONE_HOUR",
            ExtractField::TimezoneMinute => "TIMEZONE_MINUTE",
            ExtractField::Week => "WEEK",
            ExtractField::Year => "YEAR",
        }
    }
}

/// `EXTRACT(field FROM x)`
pub fn extract<E, T: Temporal>(field: ExtractField, x: &Expression<E, T>) -> Expression<E, f64> {
    let mut sql = String::with_capacity(x.node.sql.len() + 32);
    sql.push_str(EXTRACT);
    sql.push('(');
    sql.push_str(field.sql());
    sql.push_str(FROM);
    sql.push_str(&x.node.sql);
    sql.push(')');
    Expression::from_node(Node {
        sql: sql.into(),
        params: x.node.params.clone(),
    })
}

/// Precision of [`date_trunc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncField {
    Microseconds,
    Milliseconds,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Decade,
    Century,
    Millennium,
}

impl TruncField {
    pub fn sql(&self) -> &'static str {
        match self {
            TruncField::Microseconds => "microseconds",
            TruncField::Milliseconds => "milliseconds",
            TruncField::Second => "second",
            TruncField::Minute => "minute",
            TruncField::Hour => "hour",
            TruncField::Day => "day",
            TruncField::Week => "week",
            TruncField::Month => "month",
            TruncField::Quarter => "quarter",
            TruncField::Year => "year",
            TruncField::Decade => "decade",
            TruncField::Century => "century",
            TruncField::Millennium => "millennium",
        }
    }
}

fn quoted(value: &str) -> Node {
    let mut sql = String::with_capacity(value.len() + 2);
    push_quoted(&mut sql, value);
    Node::text(sql)
}

fn date_trunc_node(field: TruncField, x: &Node, zone: Option<&str>) -> Node {
    let mut args = vec![quoted(field.sql()), x.clone()];
    if let Some(zone) = zone {
        args.push(quoted(zone));
    }
    Node::function(DATE_TRUNC, args)
}

/// `DATE_TRUNC('field', x)`
pub fn date_trunc<E, T: Temporal>(field: TruncField, x: &Expression<E, T>) -> Expression<E, T> {
    Expression::from_node(date_trunc_node(field, &x.node, None))
}

/// `DATE_TRUNC('field', x, 'zone')`, the zone name is written into the text.
pub fn date_trunc_zone<E, T: Temporal>(
    field: TruncField,
    x: &Expression<E, T>,
    zone: &'static str,
) -> Expression<E, T> {
    Expression::from_node(date_trunc_node(field, &x.node, Some(zone)))
}

/// `COALESCE(first, rest...)`, the first non null value.
///
/// ```rust
/// use sieve_core::{Expression, functions::coalesce};
/// # struct Person;
/// const FIRST_NAME: Expression<Person, String> = Expression::column("first_name");
/// let name = coalesce(&FIRST_NAME, ["George"]);
/// assert_eq!(name.to_string(), "COALESCE(first_name, $1)");
/// ```
pub fn coalesce<E, T>(
    first: &Expression<E, T>,
    rest: impl IntoIterator<Item = impl Into<Operand<E, T>>>,
) -> Expression<E, T> {
    Expression::from_node(Node::function(
        COALESCE,
        [first.node.clone()]
            .into_iter()
            .chain(rest.into_iter().map(|v| v.into().0)),
    ))
}
