use crate::error::{Result, TypingError};
use crate::scalar::{to_offset, DateOffset, Interval, Period, TimeUnit, Timedelta, Timestamp};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeDelta, Utc};
use numpy::datetime::{self, units::Nanoseconds};

pub type Datetime64 = datetime::Datetime<Nanoseconds>;
pub type Timedelta64 = datetime::Timedelta<Nanoseconds>;

#[derive(Debug, Clone, PartialEq)]
pub enum PythonScalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<&str> for PythonScalar {
    fn from(s: &str) -> Self {
        PythonScalar::Str(s.to_string())
    }
}
impl From<String> for PythonScalar {
    fn from(s: String) -> Self {
        PythonScalar::Str(s)
    }
}
impl From<i64> for PythonScalar {
    fn from(i: i64) -> Self {
        PythonScalar::Int(i)
    }
}
impl From<f64> for PythonScalar {
    fn from(x: f64) -> Self {
        PythonScalar::Float(x)
    }
}
impl From<bool> for PythonScalar {
    fn from(b: bool) -> Self {
        PythonScalar::Bool(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatetimeLikeScalar {
    Period(Period),
    Timestamp(Timestamp),
    Timedelta(Timedelta),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PandasScalar {
    Period(Period),
    Timestamp(Timestamp),
    Timedelta(Timedelta),
    Interval(Interval),
}

impl From<DatetimeLikeScalar> for PandasScalar {
    fn from(scalar: DatetimeLikeScalar) -> Self {
        match scalar {
            DatetimeLikeScalar::Period(p) => PandasScalar::Period(p),
            DatetimeLikeScalar::Timestamp(ts) => PandasScalar::Timestamp(ts),
            DatetimeLikeScalar::Timedelta(td) => PandasScalar::Timedelta(td),
        }
    }
}

impl TryFrom<PandasScalar> for DatetimeLikeScalar {
    type Error = PandasScalar;

    fn try_from(scalar: PandasScalar) -> core::result::Result<Self, PandasScalar> {
        match scalar {
            PandasScalar::Period(p) => Ok(DatetimeLikeScalar::Period(p)),
            PandasScalar::Timestamp(ts) => Ok(DatetimeLikeScalar::Timestamp(ts)),
            PandasScalar::Timedelta(td) => Ok(DatetimeLikeScalar::Timedelta(td)),
            other => Err(other),
        }
    }
}

/// any single value: a python builtin or one of the library's own scalar kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Python(PythonScalar),
    Pandas(PandasScalar),
}

impl From<PythonScalar> for Scalar {
    fn from(scalar: PythonScalar) -> Self {
        Scalar::Python(scalar)
    }
}
impl From<PandasScalar> for Scalar {
    fn from(scalar: PandasScalar) -> Self {
        Scalar::Pandas(scalar)
    }
}
impl From<DatetimeLikeScalar> for Scalar {
    fn from(scalar: DatetimeLikeScalar) -> Self {
        Scalar::Pandas(scalar.into())
    }
}

impl TryFrom<Scalar> for PythonScalar {
    type Error = Scalar;

    fn try_from(scalar: Scalar) -> core::result::Result<Self, Scalar> {
        match scalar {
            Scalar::Python(scalar) => Ok(scalar),
            other => Err(other),
        }
    }
}
impl TryFrom<Scalar> for PandasScalar {
    type Error = Scalar;

    fn try_from(scalar: Scalar) -> core::result::Result<Self, Scalar> {
        match scalar {
            Scalar::Pandas(scalar) => Ok(scalar),
            other => Err(other),
        }
    }
}

/// everything accepted where a timestamp is expected
///
/// integers and floats are read as multiples of a [`TimeUnit`] since the epoch
/// (nanoseconds unless told otherwise).
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampConvertible {
    Timestamp(Timestamp),
    Datetime {
        naive: NaiveDateTime,
        tz: Option<FixedOffset>,
    },
    Datetime64(Datetime64),
    Int(i64),
    Int64(i64),
    Float(f64),
    Str(String),
}

impl TimestampConvertible {
    pub fn to_timestamp(&self, unit: Option<TimeUnit>) -> Result<Timestamp> {
        let unit = unit.unwrap_or(TimeUnit::Nano);
        match self {
            TimestampConvertible::Timestamp(ts) => Ok(*ts),
            TimestampConvertible::Datetime { naive, tz: None } => Timestamp::from_naive(*naive),
            TimestampConvertible::Datetime {
                naive,
                tz: Some(tz),
            } => naive
                .and_local_timezone(*tz)
                .single()
                .ok_or_else(|| TypingError::parse(naive.to_string(), "timestamp"))
                .and_then(Timestamp::from_datetime),
            TimestampConvertible::Datetime64(dt) => Ok(Timestamp::new(i64::from(*dt))),
            TimestampConvertible::Int(n) | TimestampConvertible::Int64(n) => {
                Timestamp::from_units(*n, unit)
            }
            TimestampConvertible::Float(x) => Timestamp::from_float(*x, unit),
            TimestampConvertible::Str(s) => s.parse(),
        }
    }
}

impl From<Timestamp> for TimestampConvertible {
    fn from(ts: Timestamp) -> Self {
        TimestampConvertible::Timestamp(ts)
    }
}
impl From<NaiveDateTime> for TimestampConvertible {
    fn from(naive: NaiveDateTime) -> Self {
        TimestampConvertible::Datetime { naive, tz: None }
    }
}
impl From<DateTime<FixedOffset>> for TimestampConvertible {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        TimestampConvertible::Datetime {
            naive: dt.naive_local(),
            tz: Some(*dt.offset()),
        }
    }
}
impl From<Datetime64> for TimestampConvertible {
    fn from(dt: Datetime64) -> Self {
        TimestampConvertible::Datetime64(dt)
    }
}
impl From<i64> for TimestampConvertible {
    fn from(n: i64) -> Self {
        TimestampConvertible::Int(n)
    }
}
impl From<f64> for TimestampConvertible {
    fn from(x: f64) -> Self {
        TimestampConvertible::Float(x)
    }
}
impl From<&str> for TimestampConvertible {
    fn from(s: &str) -> Self {
        TimestampConvertible::Str(s.to_string())
    }
}

/// everything accepted where a timedelta is expected
#[derive(Debug, Clone, PartialEq)]
pub enum TimedeltaConvertible {
    Timedelta(Timedelta),
    Duration(TimeDelta),
    Timedelta64(Timedelta64),
    Int(i64),
    Int64(i64),
    Float(f64),
    Str(String),
}

impl TimedeltaConvertible {
    pub fn to_timedelta(&self, unit: Option<TimeUnit>) -> Result<Timedelta> {
        let unit = unit.unwrap_or(TimeUnit::Nano);
        match self {
            TimedeltaConvertible::Timedelta(td) => Ok(*td),
            TimedeltaConvertible::Duration(duration) => Timedelta::from_duration(*duration),
            TimedeltaConvertible::Timedelta64(td) => Ok(Timedelta::new(i64::from(*td))),
            TimedeltaConvertible::Int(n) | TimedeltaConvertible::Int64(n) => {
                Timedelta::from_units(*n, unit)
            }
            TimedeltaConvertible::Float(x) => Timedelta::from_float(*x, unit),
            TimedeltaConvertible::Str(s) => s.parse(),
        }
    }
}

impl From<Timedelta> for TimedeltaConvertible {
    fn from(td: Timedelta) -> Self {
        TimedeltaConvertible::Timedelta(td)
    }
}
impl From<TimeDelta> for TimedeltaConvertible {
    fn from(duration: TimeDelta) -> Self {
        TimedeltaConvertible::Duration(duration)
    }
}
impl From<Timedelta64> for TimedeltaConvertible {
    fn from(td: Timedelta64) -> Self {
        TimedeltaConvertible::Timedelta64(td)
    }
}
impl From<i64> for TimedeltaConvertible {
    fn from(n: i64) -> Self {
        TimedeltaConvertible::Int(n)
    }
}
impl From<f64> for TimedeltaConvertible {
    fn from(x: f64) -> Self {
        TimedeltaConvertible::Float(x)
    }
}
impl From<&str> for TimedeltaConvertible {
    fn from(s: &str) -> Self {
        TimedeltaConvertible::Str(s.to_string())
    }
}

/// a timezone, by name or as a `tzinfo`-like fixed offset
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Timezone {
    Name(String),
    TzInfo(FixedOffset),
}

/// `±HH`, `±HHMM` or `±HH:MM`
fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|&c| c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.as_str(), "0"),
        4 => digits.split_at(2),
        _ => return None,
    };
    let secs = hours.parse::<i32>().ok()? * 3600 + minutes.parse::<i32>().ok()? * 60;
    FixedOffset::east_opt(sign * secs)
}

impl Timezone {
    pub fn to_offset(&self) -> Result<FixedOffset> {
        match self {
            Timezone::TzInfo(offset) => Ok(*offset),
            Timezone::Name(name) => match name.as_str() {
                "UTC" | "utc" | "Z" | "GMT" | "Etc/UTC" => Ok(Utc.fix()),
                other => parse_fixed_offset(other)
                    .ok_or_else(|| TypingError::UnknownTimezone(name.clone())),
            },
        }
    }

    /// the same instant, displayed in this timezone
    pub fn convert(&self, ts: Timestamp) -> Result<Timestamp> {
        Ok(ts.with_tz(self.to_offset()?))
    }
}

impl From<&str> for Timezone {
    fn from(name: &str) -> Self {
        Timezone::Name(name.to_string())
    }
}
impl From<FixedOffset> for Timezone {
    fn from(offset: FixedOffset) -> Self {
        Timezone::TzInfo(offset)
    }
}

/// a frequency, as an alias (`"5min"`) or an offset object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Frequency {
    Alias(String),
    Offset(DateOffset),
}

impl Frequency {
    pub fn to_offset(&self) -> Result<DateOffset> {
        match self {
            Frequency::Alias(alias) => to_offset(alias),
            Frequency::Offset(offset) => Ok(*offset),
        }
    }
}

impl From<&str> for Frequency {
    fn from(alias: &str) -> Self {
        Frequency::Alias(alias.to_string())
    }
}
impl From<DateOffset> for Frequency {
    fn from(offset: DateOffset) -> Self {
        Frequency::Offset(offset)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Scalar(PythonScalar),
    List(Vec<serde_json::Value>),
    Dict(serde_json::Map<String, serde_json::Value>),
}

pub type JsonSerializable = Option<JsonValue>;

impl From<PythonScalar> for serde_json::Value {
    fn from(scalar: PythonScalar) -> Self {
        match scalar {
            PythonScalar::Str(s) => serde_json::Value::String(s),
            PythonScalar::Int(i) => serde_json::Value::from(i),
            PythonScalar::Bool(b) => serde_json::Value::Bool(b),
            PythonScalar::Float(x) => match serde_json::Number::from_f64(x) {
                Some(number) => serde_json::Value::Number(number),
                None => {
                    log::warn!("non-finite float {x} is serialized as null");
                    serde_json::Value::Null
                }
            },
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Scalar(scalar) => scalar.into(),
            JsonValue::List(list) => serde_json::Value::Array(list),
            JsonValue::Dict(dict) => serde_json::Value::Object(dict),
        }
    }
}

pub fn json_value(value: JsonSerializable) -> serde_json::Value {
    value.map_or(serde_json::Value::Null, Into::into)
}
