//! Partial-precision historical dates.
//!
//! Clinical histories often record dates as "2019", "3/2019" or "12/3/2019".
//! [`PartialDate`] keeps exactly the precision that was written. Its ordering
//! is partial: two dates that tie on the components they share cannot be
//! ordered, and [`PartialDate::try_cmp`] reports that as
//! [`TranslateError::IncomparableDates`]. The separate
//! [`overlaps`](PartialDate::overlaps) relation treats a missing component as a
//! wildcard.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{TranslateError, TranslateResult};

/// Two-digit years below this value are placed in the 2000s, the rest in the 1900s.
pub const DEFAULT_CENTURY_PIVOT: u16 = 70;

/// Separator between day, month and year.
pub const DATE_SEPARATOR: char = '/';

/// Days per month, February fixed at 28.
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Precision of a [`PartialDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DatePrecision {
    /// `yyyy`
    Year,
    /// `m/yyyy`
    YearMonth,
    /// `d/m/yyyy`
    Full,
}

/// A date known to year, year and month, or full-day precision.
///
/// # Example
///
/// ```rust
/// use labtext::PartialDate;
///
/// let date: PartialDate = "3/19".parse().unwrap();
/// assert_eq!(date.year(), 2019);
/// assert_eq!(date.month(), Some(3));
/// assert_eq!(date.to_string(), "3/2019");
///
/// let year_only = PartialDate::new(2019, None, None).unwrap();
/// assert!(year_only.overlaps(&date));
/// assert!(year_only.try_lt(&date).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct PartialDate {
    year: u16,
    month: Option<u8>,
    day: Option<u8>,
}

impl PartialDate {
    /// Builds a date from components, resolving two-digit years with
    /// [`DEFAULT_CENTURY_PIVOT`].
    pub fn new(year: i32, month: Option<u32>, day: Option<u32>) -> TranslateResult<Self> {
        Self::with_pivot(year, month, day, DEFAULT_CENTURY_PIVOT)
    }

    /// Builds a date from components with a custom century pivot.
    pub fn with_pivot(
        year: i32,
        month: Option<u32>,
        day: Option<u32>,
        pivot: u16,
    ) -> TranslateResult<Self> {
        let year = resolve_year(year, pivot)?;

        let month = match month {
            Some(m) if (1..=12).contains(&m) => Some(m as u8),
            Some(m) => return Err(invalid(format!("month {m} is not in 1..=12"))),
            None => None,
        };

        let day = match (day, month) {
            (None, _) => None,
            (Some(d), None) => return Err(invalid(format!("day {d} given without a month"))),
            (Some(d), Some(m)) => {
                let last = days_in_month(m);
                if d == 0 || d > u32::from(last) {
                    return Err(invalid(format!("day {d} is not in 1..={last} for month {m}")));
                }
                Some(d as u8)
            }
        };

        Ok(Self { year, month, day })
    }

    /// Parses `[[d/]m/]y` with the default century pivot.
    pub fn parse(text: &str) -> TranslateResult<Self> {
        Self::parse_with_pivot(text, DEFAULT_CENTURY_PIVOT)
    }

    /// Parses `[[d/]m/]y` with a custom century pivot.
    pub fn parse_with_pivot(text: &str, pivot: u16) -> TranslateResult<Self> {
        let mut parts = text.split(DATE_SEPARATOR).rev();

        let year = match parts.next() {
            Some(token) => component(token)?,
            None => return Err(invalid("empty date".to_string())),
        };
        let month = parts.next().map(component).transpose()?;
        let day = parts.next().map(component).transpose()?;

        if parts.next().is_some() {
            return Err(invalid(format!("'{text}' has more than three components")));
        }

        let month = month.map(non_negative).transpose()?;
        let day = day.map(non_negative).transpose()?;
        Self::with_pivot(year, month, day, pivot)
    }

    /// Four-digit year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Month, if known.
    pub fn month(&self) -> Option<u8> {
        self.month
    }

    /// Day of month, if known.
    pub fn day(&self) -> Option<u8> {
        self.day
    }

    /// Which components are present.
    pub fn precision(&self) -> DatePrecision {
        match (self.month, self.day) {
            (Some(_), Some(_)) => DatePrecision::Full,
            (Some(_), None) => DatePrecision::YearMonth,
            _ => DatePrecision::Year,
        }
    }

    /// Orders two dates.
    ///
    /// Years decide first. On equal years the months decide when both are
    /// present and different; when they are present and equal the days decide.
    /// Any tie that would need a missing component fails with
    /// [`TranslateError::IncomparableDates`].
    pub fn try_cmp(&self, other: &Self) -> TranslateResult<Ordering> {
        match self.year.cmp(&other.year) {
            Ordering::Equal => {}
            ord => return Ok(ord),
        }

        match (self.month, other.month) {
            (Some(a), Some(b)) if a == b => match (self.day, other.day) {
                (Some(x), Some(y)) => Ok(x.cmp(&y)),
                _ => Err(self.incomparable(other)),
            },
            (Some(a), Some(b)) => Ok(a.cmp(&b)),
            _ => Err(self.incomparable(other)),
        }
    }

    /// `self < other`, failing when the dates cannot be ordered.
    pub fn try_lt(&self, other: &Self) -> TranslateResult<bool> {
        Ok(self.try_cmp(other)? == Ordering::Less)
    }

    /// `self > other`, failing when the dates cannot be ordered.
    pub fn try_gt(&self, other: &Self) -> TranslateResult<bool> {
        Ok(self.try_cmp(other)? == Ordering::Greater)
    }

    /// `self <= other`. Equal dates are always true.
    pub fn try_le(&self, other: &Self) -> TranslateResult<bool> {
        if self == other {
            return Ok(true);
        }
        self.try_lt(other)
    }

    /// `self >= other`. Equal dates are always true.
    pub fn try_ge(&self, other: &Self) -> TranslateResult<bool> {
        if self == other {
            return Ok(true);
        }
        self.try_gt(other)
    }

    /// Whether the two dates could denote the same day.
    ///
    /// | months            | days              | result      |
    /// |-------------------|-------------------|-------------|
    /// | both absent       | -                 | true        |
    /// | equal             | either absent     | true        |
    /// | equal             | both present      | days equal  |
    /// | one absent        | -                 | true        |
    /// | both present, ≠   | -                 | false       |
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.year != other.year {
            return false;
        }

        match (self.month, other.month) {
            (None, None) => true,
            (Some(a), Some(b)) if a == b => match (self.day, other.day) {
                (Some(x), Some(y)) => x == y,
                _ => true,
            },
            (Some(_), Some(_)) => false,
            _ => true,
        }
    }

    /// Converts to a calendar date, defaulting a missing month or day to 1.
    #[cfg(feature = "chrono")]
    pub fn to_naive_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month.unwrap_or(1)),
            u32::from(self.day.unwrap_or(1)),
        )
    }

    fn incomparable(&self, other: &Self) -> TranslateError {
        TranslateError::IncomparableDates {
            left: self.to_string(),
            right: other.to_string(),
        }
    }
}

impl PartialOrd for PartialDate {
    /// `None` whenever [`try_cmp`](PartialDate::try_cmp) fails, except that
    /// equal values compare as `Equal`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(day) = self.day {
            write!(f, "{day}{DATE_SEPARATOR}")?;
        }
        if let Some(month) = self.month {
            write!(f, "{month}{DATE_SEPARATOR}")?;
        }
        write!(f, "{}", self.year)
    }
}

impl FromStr for PartialDate {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PartialDate {
    type Error = TranslateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PartialDate> for String {
    fn from(date: PartialDate) -> Self {
        date.to_string()
    }
}

fn resolve_year(year: i32, pivot: u16) -> TranslateResult<u16> {
    match year {
        y if y < 0 => Err(invalid(format!("year {y} is negative"))),
        0..=99 => {
            let y = year as u16;
            Ok(if y < pivot { 2000 + y } else { 1900 + y })
        }
        1000..=9999 => Ok(year as u16),
        y => Err(invalid(format!("year {y} must have 2 or 4 digits"))),
    }
}

fn days_in_month(month: u8) -> u8 {
    DAYS_IN_MONTH[usize::from(month - 1)]
}

fn component(token: &str) -> TranslateResult<i32> {
    token
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid(format!("'{token}' is not a number")))
}

fn non_negative(value: i32) -> TranslateResult<u32> {
    u32::try_from(value).map_err(|_| invalid(format!("{value} is negative")))
}

fn invalid(message: String) -> TranslateError {
    TranslateError::InvalidDateComponents(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> PartialDate {
        PartialDate::parse(text).unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn test_full_date() {
            let d = PartialDate::new(2019, Some(1), Some(31)).unwrap();
            assert_eq!((d.year(), d.month(), d.day()), (2019, Some(1), Some(31)));
            assert_eq!(d.precision(), DatePrecision::Full);
        }

        #[test]
        fn test_two_digit_year_pivot() {
            assert_eq!(PartialDate::new(19, None, None).unwrap().year(), 2019);
            assert_eq!(PartialDate::new(69, None, None).unwrap().year(), 2069);
            assert_eq!(PartialDate::new(70, None, None).unwrap().year(), 1970);
            assert_eq!(PartialDate::new(0, None, None).unwrap().year(), 2000);
        }

        #[test]
        fn test_custom_pivot() {
            let d = PartialDate::with_pivot(30, None, None, 25).unwrap();
            assert_eq!(d.year(), 1930);
        }

        #[test]
        fn test_negative_year() {
            assert!(matches!(
                PartialDate::new(-1, None, None),
                Err(TranslateError::InvalidDateComponents(_))
            ));
        }

        #[test]
        fn test_three_and_five_digit_years() {
            assert!(PartialDate::new(999, None, None).is_err());
            assert!(PartialDate::new(10000, None, None).is_err());
        }

        #[test]
        fn test_month_out_of_range() {
            assert!(PartialDate::new(2019, Some(0), None).is_err());
            assert!(PartialDate::new(2019, Some(13), None).is_err());
        }

        #[test]
        fn test_day_without_month() {
            assert!(matches!(
                PartialDate::new(2019, None, Some(3)),
                Err(TranslateError::InvalidDateComponents(_))
            ));
        }

        #[test]
        fn test_day_table_is_not_leap_aware() {
            assert!(PartialDate::new(2020, Some(2), Some(28)).is_ok());
            assert!(PartialDate::new(2020, Some(2), Some(29)).is_err());
            assert!(PartialDate::new(2019, Some(4), Some(31)).is_err());
            assert!(PartialDate::new(2019, Some(4), Some(0)).is_err());
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn test_reads_right_to_left() {
            assert_eq!(date("12/3/2019"), PartialDate::new(2019, Some(3), Some(12)).unwrap());
            assert_eq!(date("3/2019"), PartialDate::new(2019, Some(3), None).unwrap());
            assert_eq!(date("2019"), PartialDate::new(2019, None, None).unwrap());
        }

        #[test]
        fn test_zero_padded_components() {
            assert_eq!(date("01/01/19").to_string(), "1/1/2019");
        }

        #[test]
        fn test_rejects_garbage() {
            assert!(PartialDate::parse("").is_err());
            assert!(PartialDate::parse("march/2019").is_err());
            assert!(PartialDate::parse("1/1/1/2019").is_err());
            assert!(PartialDate::parse("-3/2019").is_err());
        }

        #[test]
        fn test_from_str() {
            let d: PartialDate = "7/85".parse().unwrap();
            assert_eq!(d.to_string(), "7/1985");
        }
    }

    mod display {
        use super::*;

        #[test]
        fn test_omits_absent_components() {
            assert_eq!(PartialDate::new(2019, None, None).unwrap().to_string(), "2019");
            assert_eq!(PartialDate::new(2019, Some(3), None).unwrap().to_string(), "3/2019");
            assert_eq!(
                PartialDate::new(2019, Some(3), Some(9)).unwrap().to_string(),
                "9/3/2019"
            );
        }

        #[test]
        fn test_round_trip() {
            for text in ["2019", "3/2019", "9/3/2019", "31/12/1999"] {
                let d = date(text);
                assert_eq!(PartialDate::parse(&d.to_string()).unwrap(), d);
            }
        }
    }

    mod ordering {
        use super::*;

        #[test]
        fn test_year_decides() {
            assert!(date("2018").try_lt(&date("3/2019")).unwrap());
            assert!(date("1/1/2020").try_gt(&date("2019")).unwrap());
        }

        #[test]
        fn test_month_decides() {
            assert!(date("2/2019").try_lt(&date("3/2019")).unwrap());
            assert!(date("28/2/2019").try_lt(&date("3/2019")).unwrap());
        }

        #[test]
        fn test_day_decides() {
            assert!(date("1/3/2019").try_lt(&date("2/3/2019")).unwrap());
            assert!(!date("2/3/2019").try_lt(&date("2/3/2019")).unwrap());
        }

        #[test]
        fn test_year_vs_year_month_is_incomparable_both_ways() {
            let y = date("2019");
            let ym = date("3/2019");
            assert!(matches!(y.try_lt(&ym), Err(TranslateError::IncomparableDates { .. })));
            assert!(matches!(y.try_gt(&ym), Err(TranslateError::IncomparableDates { .. })));
            assert!(matches!(ym.try_lt(&y), Err(TranslateError::IncomparableDates { .. })));
        }

        #[test]
        fn test_same_month_missing_day_is_incomparable() {
            assert!(date("3/2019").try_lt(&date("5/3/2019")).is_err());
            assert!(date("3/2019").try_lt(&date("3/2019")).is_err());
        }

        #[test]
        fn test_le_ge_are_reflexive() {
            for text in ["2019", "3/2019", "5/3/2019"] {
                let d = date(text);
                assert!(d.try_le(&d).unwrap());
                assert!(d.try_ge(&d).unwrap());
            }
        }

        #[test]
        fn test_partial_ord() {
            assert!(date("2018") < date("2019"));
            assert_eq!(date("2019").partial_cmp(&date("3/2019")), None);
            assert_eq!(date("2019").partial_cmp(&date("2019")), Some(Ordering::Equal));
        }
    }

    mod overlap {
        use super::*;

        #[test]
        fn test_different_years() {
            assert!(!date("2018").overlaps(&date("2019")));
        }

        #[test]
        fn test_month_wildcard() {
            assert!(date("2019").overlaps(&date("3/2019")));
            assert!(date("5/3/2019").overlaps(&date("2019")));
        }

        #[test]
        fn test_day_wildcard() {
            assert!(date("3/2019").overlaps(&date("5/3/2019")));
        }

        #[test]
        fn test_conflicts() {
            assert!(!date("3/2019").overlaps(&date("4/2019")));
            assert!(!date("5/3/2019").overlaps(&date("6/3/2019")));
        }
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_to_naive_date_defaults() {
        let d = date("3/2019").to_naive_date().unwrap();
        assert_eq!(d, chrono::NaiveDate::from_ymd_opt(2019, 3, 1).unwrap());
    }
}
