use super::{DateOffset, OffsetBase, Timedelta, Timestamp};
use crate::error::{Result, TypingError};
use chrono::Datelike;
use core::cmp::Ordering;
use core::str::FromStr;

/// a span of time, identified by its `ordinal` under `freq`
///
/// ordinals count whole base units since the unix epoch, e.g. days for `"D"` and
/// months for `"M"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub ordinal: i64,
    pub freq: DateOffset,
}

impl Period {
    pub const fn new(ordinal: i64, freq: DateOffset) -> Self {
        Self { ordinal, freq }
    }

    /// the period of `freq` containing `ts` (in its wall-clock time)
    pub fn from_timestamp(ts: Timestamp, freq: DateOffset) -> Result<Self> {
        let local = ts
            .to_local()
            .ok_or_else(|| TypingError::parse("NaT", "period"))?;
        let ordinal = match freq.base {
            OffsetBase::Tick(unit) => {
                let value = local
                    .and_utc()
                    .timestamp_nanos_opt()
                    .ok_or(TypingError::OutOfBounds("timestamp"))?;
                value.div_euclid(unit.nanos())
            }
            OffsetBase::Week => {
                let days = local.and_utc().timestamp().div_euclid(86_400);
                // 1970-01-01 is a thursday, weeks end on sundays
                (days + 3).div_euclid(7)
            }
            OffsetBase::MonthEnd => (local.year() as i64 - 1970) * 12 + local.month0() as i64,
            OffsetBase::QuarterEnd => {
                (local.year() as i64 - 1970) * 4 + (local.month0() / 3) as i64
            }
            OffsetBase::YearEnd => local.year() as i64 - 1970,
        };
        Ok(Self::new(ordinal, freq))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Closed {
    Left,
    #[default]
    Right,
    Both,
    Neither,
}

impl FromStr for Closed {
    type Err = TypingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Closed::Left),
            "right" => Ok(Closed::Right),
            "both" => Ok(Closed::Both),
            "neither" => Ok(Closed::Neither),
            _ => Err(TypingError::parse(s, "interval closed side")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntervalBound {
    Int(i64),
    Float(f64),
    Timestamp(Timestamp),
    Timedelta(Timedelta),
}

impl IntervalBound {
    fn partial_cmp_bound(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) if a.tz() == b.tz() => {
                Some(a.value().cmp(&b.value()))
            }
            (Self::Timedelta(a), Self::Timedelta(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    left: IntervalBound,
    right: IntervalBound,
    closed: Closed,
}

impl Interval {
    pub fn new(left: IntervalBound, right: IntervalBound, closed: Closed) -> Result<Self> {
        match left.partial_cmp_bound(&right) {
            Some(Ordering::Greater) => Err(TypingError::InvalidInterval),
            Some(_) => Ok(Self {
                left,
                right,
                closed,
            }),
            None => Err(TypingError::parse(
                format!("({left:?}, {right:?})"),
                "interval",
            )),
        }
    }

    pub fn left(&self) -> IntervalBound {
        self.left
    }

    pub fn right(&self) -> IntervalBound {
        self.right
    }

    pub fn closed(&self) -> Closed {
        self.closed
    }
}
