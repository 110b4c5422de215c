use super::TimeUnit;
use crate::error::{Result, TypingError};
use core::fmt;
use core::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetBase {
    Tick(TimeUnit),
    Week,
    MonthEnd,
    QuarterEnd,
    YearEnd,
}

impl OffsetBase {
    pub const fn alias(self) -> &'static str {
        match self {
            OffsetBase::Tick(TimeUnit::Day) => "D",
            OffsetBase::Tick(TimeUnit::Hour) => "H",
            OffsetBase::Tick(TimeUnit::Minute) => "T",
            OffsetBase::Tick(TimeUnit::Second) => "S",
            OffsetBase::Tick(TimeUnit::Milli) => "L",
            OffsetBase::Tick(TimeUnit::Micro) => "U",
            OffsetBase::Tick(TimeUnit::Nano) => "N",
            OffsetBase::Week => "W",
            OffsetBase::MonthEnd => "M",
            OffsetBase::QuarterEnd => "Q",
            OffsetBase::YearEnd => "A",
        }
    }

    fn from_alias(alias: &str) -> Option<Self> {
        let base = match alias {
            "D" | "d" => OffsetBase::Tick(TimeUnit::Day),
            "H" | "h" => OffsetBase::Tick(TimeUnit::Hour),
            "T" | "min" => OffsetBase::Tick(TimeUnit::Minute),
            "S" | "s" => OffsetBase::Tick(TimeUnit::Second),
            "L" | "ms" => OffsetBase::Tick(TimeUnit::Milli),
            "U" | "us" => OffsetBase::Tick(TimeUnit::Micro),
            "N" | "ns" => OffsetBase::Tick(TimeUnit::Nano),
            "W" => OffsetBase::Week,
            "M" => OffsetBase::MonthEnd,
            "Q" => OffsetBase::QuarterEnd,
            "A" | "Y" => OffsetBase::YearEnd,
            _ => return None,
        };
        Some(base)
    }
}

/// `n` multiples of a calendar or tick `base`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateOffset {
    pub n: i64,
    pub base: OffsetBase,
}

impl DateOffset {
    pub const fn new(n: i64, base: OffsetBase) -> Self {
        Self { n, base }
    }

    pub fn freqstr(&self) -> String {
        if self.n == 1 {
            self.base.alias().to_string()
        } else {
            format!("{}{}", self.n, self.base.alias())
        }
    }

    /// fixed length in nanoseconds, `None` for calendar offsets
    pub fn nanos(&self) -> Option<i64> {
        match self.base {
            OffsetBase::Tick(unit) => self.n.checked_mul(unit.nanos()),
            OffsetBase::Week => self.n.checked_mul(7 * TimeUnit::Day.nanos()),
            _ => None,
        }
    }
}

impl fmt::Display for DateOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.freqstr())
    }
}

/// parse a frequency alias such as `"D"`, `"5min"` or `"-2H"`
pub fn to_offset(freq: &str) -> Result<DateOffset> {
    let err = || TypingError::InvalidFrequency(freq.to_string());
    let s = freq.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let num_len = digits
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(err)?;
    let (number, alias) = digits.split_at(num_len);
    let n = if number.is_empty() {
        1
    } else {
        number.parse::<i64>().map_err(|_| err())?
    };
    let base = OffsetBase::from_alias(alias.trim()).ok_or_else(err)?;
    let offset = DateOffset::new(if negative { -n } else { n }, base);
    log::debug!("resolved frequency '{freq}' to {offset}");
    Ok(offset)
}

impl FromStr for DateOffset {
    type Err = TypingError;

    fn from_str(s: &str) -> Result<Self> {
        to_offset(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_offset() {
        let _ = env_logger::builder().is_test(true).try_init();
        let offset = to_offset("5min").unwrap();
        assert_eq!(offset, DateOffset::new(5, OffsetBase::Tick(TimeUnit::Minute)));
        assert_eq!(offset.freqstr(), "5T");
        assert_eq!(offset.nanos(), Some(5 * 60_000_000_000));
        assert_eq!(to_offset("D").unwrap().freqstr(), "D");
        assert_eq!(to_offset("-2H").unwrap().n, -2);
        assert_eq!(to_offset("Y").unwrap().base, OffsetBase::YearEnd);
        assert_eq!(to_offset("M").unwrap().nanos(), None);
    }

    #[test]
    fn test_to_offset_invalid() {
        for freq in ["", "5", "3X", "1.5D"] {
            assert!(
                matches!(to_offset(freq), Err(TypingError::InvalidFrequency(_))),
                "{freq} should be rejected"
            );
        }
    }
}
