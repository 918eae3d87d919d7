//! Interpretation of the date token at the head of a dictated line.

use std::fmt;

use chrono::NaiveDate;
use labtext::{PartialDate, DATE_SEPARATOR};

use crate::error::{ImportError, ImportResult};

/// How the raw date token of a line is turned into a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DateTokenPolicy {
    /// Keep the written precision as a [`PartialDate`].
    #[default]
    Partial,
    /// Build a full calendar date, defaulting missing month and day to 1.
    Calendar,
}

/// A date resolved from a line header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ClinicalDate {
    /// Year, year-month or full date as written.
    Partial(PartialDate),
    /// Full calendar date.
    Calendar(NaiveDate),
}

impl ClinicalDate {
    /// Calendar date, filling missing components with 1.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        match self {
            ClinicalDate::Partial(d) => d.to_naive_date(),
            ClinicalDate::Calendar(d) => Some(*d),
        }
    }
}

impl fmt::Display for ClinicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClinicalDate::Partial(d) => write!(f, "{d}"),
            ClinicalDate::Calendar(d) => write!(f, "{}", d.format("%-d/%-m/%Y")),
        }
    }
}

/// Interprets `token` according to `policy`.
///
/// ```rust
/// use labtext_import::{interpret_date_token, ClinicalDate, DateTokenPolicy};
///
/// let date = interpret_date_token("3/2019", DateTokenPolicy::Partial, 70).unwrap();
/// assert_eq!(date.to_string(), "3/2019");
///
/// let date = interpret_date_token("29/2/2020", DateTokenPolicy::Calendar, 70).unwrap();
/// assert!(matches!(date, ClinicalDate::Calendar(_)));
/// ```
pub fn interpret_date_token(
    token: &str,
    policy: DateTokenPolicy,
    century_pivot: u16,
) -> ImportResult<ClinicalDate> {
    match policy {
        DateTokenPolicy::Partial => Ok(ClinicalDate::Partial(PartialDate::parse_with_pivot(
            token,
            century_pivot,
        )?)),
        DateTokenPolicy::Calendar => calendar_date(token, century_pivot).map(ClinicalDate::Calendar),
    }
}

/// `[[d/]m/]y` as a leap-aware calendar date.
fn calendar_date(token: &str, century_pivot: u16) -> ImportResult<NaiveDate> {
    let invalid = || ImportError::InvalidDate(token.to_string());

    let parts = token
        .split(DATE_SEPARATOR)
        .map(|p| p.trim().parse::<u32>().map_err(|_| invalid()))
        .collect::<ImportResult<Vec<_>>>()?;

    let (day, month, year) = match parts.as_slice() {
        [y] => (1, 1, *y),
        [m, y] => (1, *m, *y),
        [d, m, y] => (*d, *m, *y),
        _ => return Err(invalid()),
    };

    let year = match year {
        0..=99 if year < u32::from(century_pivot) => 2000 + year,
        0..=99 => 1900 + year,
        1000..=9999 => year,
        _ => return Err(invalid()),
    };

    let year = i32::try_from(year).map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
