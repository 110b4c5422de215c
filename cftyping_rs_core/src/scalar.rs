//! # scalar
//!
//! leaf-tier scalar kinds: [`Timestamp`], [`Timedelta`], [`Period`] and [`Interval`].
//!
//! these types never refer back to the containers of the host library, so they are
//! defined concretely here instead of being declared on [`crate::typing::Host`].
//!
//! both [`Timestamp`] and [`Timedelta`] are stored as `i64` nanoseconds (the same
//! layout as numpy's `datetime64[ns]` / `timedelta64[ns]`), and `i64::MIN` is reserved
//! for `NaT`.

use crate::error::{Result, TypingError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::num::IntErrorKind;
use core::str::FromStr;

mod offset;
mod period;

pub use offset::{to_offset, DateOffset, OffsetBase};
pub use period::{Closed, Interval, IntervalBound, Period};

pub const NAT_VALUE: i64 = i64::MIN;

const NAT_STRINGS: [&str; 4] = ["", "NaT", "nat", "NAT"];
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const AWARE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

#[inline]
fn is_nat_str(s: &str) -> bool {
    NAT_STRINGS.contains(&s)
}

/// resolution of an integer / float input, also used as the tick of a [`DateOffset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Day,
    Hour,
    Minute,
    Second,
    Milli,
    Micro,
    Nano,
}

impl TimeUnit {
    pub const fn nanos(self) -> i64 {
        match self {
            TimeUnit::Day => 86_400_000_000_000,
            TimeUnit::Hour => 3_600_000_000_000,
            TimeUnit::Minute => 60_000_000_000,
            TimeUnit::Second => 1_000_000_000,
            TimeUnit::Milli => 1_000_000,
            TimeUnit::Micro => 1_000,
            TimeUnit::Nano => 1,
        }
    }

    /// numpy's unit code, as used in `datetime64[<code>]`
    pub const fn code(self) -> &'static str {
        match self {
            TimeUnit::Day => "D",
            TimeUnit::Hour => "h",
            TimeUnit::Minute => "m",
            TimeUnit::Second => "s",
            TimeUnit::Milli => "ms",
            TimeUnit::Micro => "us",
            TimeUnit::Nano => "ns",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = TypingError;

    fn from_str(s: &str) -> Result<Self> {
        let unit = match s {
            "D" | "d" | "day" | "days" => TimeUnit::Day,
            "h" | "H" | "hr" | "hour" | "hours" => TimeUnit::Hour,
            "m" | "T" | "min" | "minute" | "minutes" => TimeUnit::Minute,
            "s" | "S" | "sec" | "second" | "seconds" => TimeUnit::Second,
            "ms" | "L" | "milli" | "millis" | "millisecond" | "milliseconds" => TimeUnit::Milli,
            "us" | "U" | "µs" | "micro" | "micros" | "microsecond" | "microseconds" => {
                TimeUnit::Micro
            }
            "ns" | "N" | "nano" | "nanos" | "nanosecond" | "nanoseconds" => TimeUnit::Nano,
            _ => return Err(TypingError::parse(s, "time unit")),
        };
        Ok(unit)
    }
}

fn scale_int(n: i64, unit: TimeUnit, target: &'static str) -> Result<i64> {
    match n.checked_mul(unit.nanos()) {
        Some(value) if value != NAT_VALUE => Ok(value),
        _ => Err(TypingError::OutOfBounds(target)),
    }
}

fn scale_float(x: f64, unit: TimeUnit, target: &'static str) -> Result<Option<i64>> {
    if x.is_nan() {
        return Ok(None);
    }
    let value = (x * unit.nanos() as f64).round();
    if !value.is_finite() || value >= i64::MAX as f64 || value <= i64::MIN as f64 {
        return Err(TypingError::OutOfBounds(target));
    }
    Ok(Some(value as i64))
}

// timestamp

/// aware timestamps compare by instant, whatever their offsets; a naive timestamp
/// never equals an aware one
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    value: i64,
    tz: Option<FixedOffset>,
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.tz.is_some() == other.tz.is_some()
    }
}
impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.tz.is_some().hash(state);
    }
}

impl Timestamp {
    pub const NAT: Timestamp = Timestamp {
        value: NAT_VALUE,
        tz: None,
    };

    /// `value` is the number of nanoseconds since the unix epoch (UTC)
    pub const fn new(value: i64) -> Self {
        Self { value, tz: None }
    }

    pub fn with_tz(self, tz: FixedOffset) -> Self {
        Self {
            value: self.value,
            tz: Some(tz),
        }
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    pub fn tz(&self) -> Option<FixedOffset> {
        self.tz
    }

    #[inline]
    pub fn is_nat(&self) -> bool {
        self.value == NAT_VALUE
    }

    pub fn from_units(n: i64, unit: TimeUnit) -> Result<Self> {
        scale_int(n, unit, "timestamp").map(Self::new)
    }

    pub fn from_float(x: f64, unit: TimeUnit) -> Result<Self> {
        Ok(scale_float(x, unit, "timestamp")?.map_or(Self::NAT, Self::new))
    }

    pub fn from_naive(dt: NaiveDateTime) -> Result<Self> {
        dt.and_utc()
            .timestamp_nanos_opt()
            .map(Self::new)
            .ok_or(TypingError::OutOfBounds("timestamp"))
    }

    pub fn from_datetime(dt: DateTime<FixedOffset>) -> Result<Self> {
        dt.timestamp_nanos_opt()
            .map(|value| Self::new(value).with_tz(*dt.offset()))
            .ok_or(TypingError::OutOfBounds("timestamp"))
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        if self.is_nat() {
            return None;
        }
        let secs = self.value.div_euclid(1_000_000_000);
        let nsecs = self.value.rem_euclid(1_000_000_000) as u32;
        DateTime::from_timestamp(secs, nsecs)
    }

    /// wall-clock time in the attached offset (UTC when naive)
    pub fn to_local(&self) -> Option<NaiveDateTime> {
        let utc = self.to_utc()?;
        Some(match self.tz {
            Some(tz) => utc.with_timezone(&tz).naive_local(),
            None => utc.naive_utc(),
        })
    }
}

impl FromStr for Timestamp {
    type Err = TypingError;

    fn from_str(input: &str) -> Result<Self> {
        let s = input.trim();
        if is_nat_str(s) {
            return Ok(Self::NAT);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Self::from_datetime(dt);
        }
        for fmt in AWARE_DATETIME_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Self::from_datetime(dt);
            }
        }
        for fmt in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Self::from_naive(dt);
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| TypingError::parse(input, "timestamp"))
            .and_then(Self::from_naive)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_local() {
            None => write!(f, "NaT"),
            Some(local) => {
                write!(f, "{}", local.format("%Y-%m-%d %H:%M:%S%.f"))?;
                if let Some(tz) = self.tz {
                    write!(f, "{}", tz)?;
                }
                Ok(())
            }
        }
    }
}

// timedelta

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timedelta {
    value: i64,
}

impl Timedelta {
    pub const NAT: Timedelta = Timedelta { value: NAT_VALUE };

    pub const fn new(value: i64) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    pub fn is_nat(&self) -> bool {
        self.value == NAT_VALUE
    }

    pub fn from_units(n: i64, unit: TimeUnit) -> Result<Self> {
        scale_int(n, unit, "timedelta").map(Self::new)
    }

    pub fn from_float(x: f64, unit: TimeUnit) -> Result<Self> {
        Ok(scale_float(x, unit, "timedelta")?.map_or(Self::NAT, Self::new))
    }

    pub fn from_duration(duration: TimeDelta) -> Result<Self> {
        duration
            .num_nanoseconds()
            .filter(|&value| value != NAT_VALUE)
            .map(Self::new)
            .ok_or(TypingError::OutOfBounds("timedelta"))
    }

    pub fn to_duration(&self) -> Option<TimeDelta> {
        if self.is_nat() {
            None
        } else {
            Some(TimeDelta::nanoseconds(self.value))
        }
    }
}

/// `"12"` / `"1.5"` in `unit`, as nanoseconds
///
/// saturates on overflow, the total is bounds-checked by the caller.
fn scale_number(number: &str, unit: TimeUnit) -> Option<i128> {
    let nanos = unit.nanos() as i128;
    let (int, frac) = number.split_once('.').unwrap_or((number, ""));
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (int.is_empty() && frac.is_empty()) || !is_digits(int) || !is_digits(frac) {
        return None;
    }
    let int = match int.parse::<i128>() {
        _ if int.is_empty() => 0,
        Ok(int) => int,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i128::MAX,
        Err(_) => return None,
    };
    let frac = if frac.is_empty() {
        0
    } else {
        let frac = format!("0.{frac}").parse::<f64>().ok()?;
        (frac * nanos as f64).round() as i128
    };
    Some(int.saturating_mul(nanos).saturating_add(frac))
}

/// `HH:MM[:SS[.f]]`
fn parse_clock(token: &str) -> Option<i128> {
    let parts: Vec<&str> = token.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m] => (*h, *m, "0"),
        [h, m, s] => (*h, *m, *s),
        _ => return None,
    };
    if hours.contains('.') || minutes.contains('.') {
        return None;
    }
    Some(
        scale_number(hours, TimeUnit::Hour)?
            .saturating_add(scale_number(minutes, TimeUnit::Minute)?)
            .saturating_add(scale_number(seconds, TimeUnit::Second)?),
    )
}

impl FromStr for Timedelta {
    type Err = TypingError;

    fn from_str(input: &str) -> Result<Self> {
        let err = || TypingError::parse(input, "timedelta");
        let s = input.trim();
        if is_nat_str(s) {
            return Ok(Self::NAT);
        }
        let (negative, mut rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let mut total: i128 = 0;
        let mut matched = false;
        loop {
            rest = rest.trim_start_matches([' ', ',']);
            if rest.is_empty() {
                break;
            }
            let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            if rest[..token_end].contains(':') {
                total = total.saturating_add(parse_clock(&rest[..token_end]).ok_or_else(err)?);
                rest = &rest[token_end..];
                matched = true;
                continue;
            }
            let num_len = rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(rest.len());
            if num_len == 0 {
                return Err(err());
            }
            let (number, tail) = rest.split_at(num_len);
            let tail = tail.trim_start();
            let unit_len = tail
                .find(|c: char| !c.is_alphabetic())
                .unwrap_or(tail.len());
            if unit_len == 0 {
                return Err(err());
            }
            let (unit, tail) = tail.split_at(unit_len);
            let unit: TimeUnit = unit.parse().map_err(|_| err())?;
            total = total.saturating_add(scale_number(number, unit).ok_or_else(err)?);
            rest = tail;
            matched = true;
        }
        if !matched {
            return Err(err());
        }
        if negative {
            total = -total;
        }
        match i64::try_from(total) {
            Ok(value) if value != NAT_VALUE => Ok(Self::new(value)),
            _ => Err(TypingError::OutOfBounds("timedelta")),
        }
    }
}

impl fmt::Display for Timedelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nat() {
            return write!(f, "NaT");
        }
        let sign = if self.value < 0 { "-" } else { "" };
        let abs = self.value.unsigned_abs();
        let day = TimeUnit::Day.nanos() as u64;
        let days = abs / day;
        let rem = abs % day;
        let secs = rem / 1_000_000_000;
        let nanos = rem % 1_000_000_000;
        write!(
            f,
            "{sign}{days} days {:02}:{:02}:{:02}",
            secs / 3600,
            secs % 3600 / 60,
            secs % 60
        )?;
        if nanos != 0 {
            write!(f, ".{nanos:09}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_unit_aliases() {
        assert_eq!("min".parse::<TimeUnit>().unwrap(), TimeUnit::Minute);
        assert_eq!("T".parse::<TimeUnit>().unwrap(), TimeUnit::Minute);
        assert_eq!("L".parse::<TimeUnit>().unwrap(), TimeUnit::Milli);
        assert_eq!("days".parse::<TimeUnit>().unwrap(), TimeUnit::Day);
        assert!("M".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_timestamp_from_str() {
        let ts: Timestamp = "2021-01-02".parse().unwrap();
        assert_eq!(ts.value(), 1_609_545_600_000_000_000);
        assert_eq!(ts.tz(), None);
        let ts: Timestamp = "2021-01-02 03:04:05.5".parse().unwrap();
        assert_eq!(ts.value(), 1_609_556_645_500_000_000);
        let aware: Timestamp = "2021-01-02T08:00:00+05:00".parse().unwrap();
        assert_eq!(aware.value(), 1_609_556_400_000_000_000);
        assert_eq!(aware.tz(), FixedOffset::east_opt(5 * 3600));
        assert_eq!(aware.to_string(), "2021-01-02 08:00:00+05:00");
        assert!("NaT".parse::<Timestamp>().unwrap().is_nat());
        assert!("not a date".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_timestamp_eq_by_instant() {
        use std::collections::HashSet;

        let utc: Timestamp = "2021-01-02T03:00:00+00:00".parse().unwrap();
        let east: Timestamp = "2021-01-02T08:00:00+05:00".parse().unwrap();
        assert_eq!(utc, east);
        assert_ne!(utc.tz(), east.tz());
        let naive: Timestamp = "2021-01-02 03:00:00".parse().unwrap();
        assert_eq!(naive.value(), utc.value());
        assert_ne!(naive, utc);
        let unique: HashSet<Timestamp> = [utc, east, naive].into_iter().collect();
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_timestamp_from_numbers() {
        let ts = Timestamp::from_units(1, TimeUnit::Second).unwrap();
        assert_eq!(ts.value(), 1_000_000_000);
        let ts = Timestamp::from_float(1.5, TimeUnit::Second).unwrap();
        assert_eq!(ts.value(), 1_500_000_000);
        assert!(Timestamp::from_float(f64::NAN, TimeUnit::Nano)
            .unwrap()
            .is_nat());
        assert!(matches!(
            Timestamp::from_units(i64::MAX, TimeUnit::Day),
            Err(TypingError::OutOfBounds("timestamp"))
        ));
    }

    #[test]
    fn test_timedelta_from_str() {
        let parse = |s: &str| s.parse::<Timedelta>().unwrap().value();
        assert_eq!(parse("1 days"), TimeUnit::Day.nanos());
        assert_eq!(parse("1d"), TimeUnit::Day.nanos());
        assert_eq!(parse("2h 30min"), 150 * TimeUnit::Minute.nanos());
        assert_eq!(parse("1.5s"), 1_500_000_000);
        assert_eq!(parse("-3ms"), -3_000_000);
        assert_eq!(
            parse("1 days 02:00:00.5"),
            TimeUnit::Day.nanos() + 2 * TimeUnit::Hour.nanos() + 500_000_000
        );
        assert_eq!(parse("00:01"), TimeUnit::Minute.nanos());
        assert!("nat".parse::<Timedelta>().unwrap().is_nat());
        assert!("10".parse::<Timedelta>().is_err());
        assert!("3 fortnights".parse::<Timedelta>().is_err());
        assert!(".s".parse::<Timedelta>().is_err());
        assert!("00:.".parse::<Timedelta>().is_err());
        assert_eq!(parse("1.s"), 1_000_000_000);
        assert_eq!(parse(".5s"), 500_000_000);
    }

    #[test]
    fn test_timedelta_out_of_bounds() {
        let out_of_bounds = |s: &str| {
            matches!(
                s.parse::<Timedelta>(),
                Err(TypingError::OutOfBounds("timedelta"))
            )
        };
        assert!(out_of_bounds("99999999999999999999999999999999d"));
        assert!(out_of_bounds(&format!("{}d", "9".repeat(60))));
        assert!(out_of_bounds("-106752 days"));
        assert!(out_of_bounds("106751 days 106751 days"));
        assert!(out_of_bounds(&format!("{}:00", "9".repeat(40))));
        assert!("106751 days".parse::<Timedelta>().is_ok());
    }

    #[test]
    fn test_timedelta_display() {
        let td: Timedelta = "1 days 02:03:04".parse().unwrap();
        assert_eq!(td.to_string(), "1 days 02:03:04");
        let td: Timedelta = "-1.5s".parse().unwrap();
        assert_eq!(td.to_string(), "-0 days 00:00:01.500000000");
        assert_eq!(Timedelta::NAT.to_string(), "NaT");
    }

    #[test]
    fn test_timedelta_duration() {
        let td = Timedelta::from_duration(TimeDelta::milliseconds(1500)).unwrap();
        assert_eq!(td.value(), 1_500_000_000);
        assert_eq!(td.to_duration(), Some(TimeDelta::milliseconds(1500)));
        assert_eq!(Timedelta::NAT.to_duration(), None);
    }
}
