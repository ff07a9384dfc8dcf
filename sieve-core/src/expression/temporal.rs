use crate::AsValue;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Date and time types accepted by `EXTRACT` and `DATE_TRUNC`.
pub trait Temporal: AsValue {}

impl Temporal for Date {}
impl Temporal for Time {}
impl Temporal for PrimitiveDateTime {}
impl Temporal for OffsetDateTime {}
