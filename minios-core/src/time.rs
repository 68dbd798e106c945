//! Wall-clock time and calendar date as kept by the RTC

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// First year the RTC's two-digit year register can represent
pub const BASE_YEAR: u16 = 2000;

/// Last year the RTC's two-digit year register can represent
pub const MAX_YEAR: u16 = 2099;

/// Time of day, 24-hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TimeFields"))]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
}

impl Time {
    /// Create a time, or `None` if any field is out of range
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    /// Hour, 0-23
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute, 0-59
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second, 0-59
    pub const fn second(&self) -> u8 {
        self.second
    }
}

/// Calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DateFields"))]
pub struct Date {
    day: u8,
    weekday: u8,
    month: u8,
    year: u16,
}

impl Date {
    /// Create a date, or `None` if any field is out of range
    ///
    /// `weekday` is 0-6 with 0 = Sunday; the RTC stores it verbatim and
    /// does not check it against the calendar.
    pub const fn new(year: u16, month: u8, day: u8, weekday: u8) -> Option<Self> {
        if year >= BASE_YEAR
            && year <= MAX_YEAR
            && month >= 1
            && month <= 12
            && day >= 1
            && day <= 31
            && weekday <= 6
        {
            Some(Self {
                day,
                weekday,
                month,
                year,
            })
        } else {
            None
        }
    }

    /// Day of month, 1-31
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Day of week, 0 = Sunday
    pub const fn weekday(&self) -> u8 {
        self.weekday
    }

    /// Month, 1-12
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Four-digit year
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Two-digit year offset from [`BASE_YEAR`]
    pub const fn year_offset(&self) -> u8 {
        self.year.saturating_sub(BASE_YEAR) as u8
    }
}

/// Unvalidated wire form of [`Time`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct TimeFields {
    hour: u8,
    minute: u8,
    second: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<TimeFields> for Time {
    type Error = &'static str;

    fn try_from(f: TimeFields) -> Result<Self, Self::Error> {
        Time::new(f.hour, f.minute, f.second).ok_or("time field out of range")
    }
}

/// Unvalidated wire form of [`Date`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct DateFields {
    day: u8,
    weekday: u8,
    month: u8,
    year: u16,
}

#[cfg(feature = "serde")]
impl TryFrom<DateFields> for Date {
    type Error = &'static str;

    fn try_from(f: DateFields) -> Result<Self, Self::Error> {
        Date::new(f.year, f.month, f.day, f.weekday).ok_or("date field out of range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_validation() {
        assert!(Time::new(23, 59, 59).is_some());
        assert!(Time::new(24, 0, 0).is_none());
        assert!(Time::new(12, 60, 0).is_none());
        assert!(Time::new(12, 0, 60).is_none());
    }

    #[test]
    fn test_date_validation() {
        assert!(Date::new(2000, 1, 1, 6).is_some());
        assert!(Date::new(2099, 12, 31, 0).is_some());
        assert!(Date::new(1999, 12, 31, 0).is_none());
        assert!(Date::new(2100, 1, 1, 0).is_none());
        assert!(Date::new(2024, 13, 1, 0).is_none());
        assert!(Date::new(2024, 2, 0, 0).is_none());
        assert!(Date::new(2024, 2, 1, 7).is_none());
    }

    #[test]
    fn test_year_offset() {
        assert_eq!(Date::new(2026, 10, 19, 1).unwrap().year_offset(), 26);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use crate::time::{Date, Time};
        use serde::de::value::{Error, SeqDeserializer};
        use serde::Deserialize;

        fn from_seq<'de, T: Deserialize<'de>>(fields: &[u16]) -> Result<T, Error> {
            T::deserialize(SeqDeserializer::<_, Error>::new(fields.iter().copied()))
        }

        #[test]
        fn test_time_deserialize_validates() {
            assert_eq!(from_seq::<Time>(&[12, 30, 45]).ok(), Time::new(12, 30, 45));
            assert!(from_seq::<Time>(&[99, 0, 0]).is_err());
        }

        #[test]
        fn test_date_deserialize_validates() {
            assert_eq!(
                from_seq::<Date>(&[19, 1, 10, 2026]).ok(),
                Date::new(2026, 10, 19, 1)
            );
            assert!(from_seq::<Date>(&[40, 2, 99, 1999]).is_err());
            assert!(from_seq::<Date>(&[1, 0, 1, 1999]).is_err());
        }
    }
}
