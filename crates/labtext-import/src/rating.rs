//! Qualitative rating codes and automatic rating against a reference interval.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Fraction of the reference interval width treated as borderline.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Qualitative result level, as dictated or as computed from the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RatingCode {
    /// `0`: analyte absent.
    Zero,
    /// `b`: below the interval.
    Low,
    /// `li`: at the lower limit.
    LowerLimit,
    /// `n`: inside the interval.
    Normal,
    /// `ls`: at the upper limit.
    UpperLimit,
    /// `a`: above the interval.
    High,
}

impl RatingCode {
    /// All codes, lowest first.
    pub const ALL: [RatingCode; 6] = [
        RatingCode::Zero,
        RatingCode::Low,
        RatingCode::LowerLimit,
        RatingCode::Normal,
        RatingCode::UpperLimit,
        RatingCode::High,
    ];

    /// The dictated short code.
    pub fn code(&self) -> &'static str {
        match self {
            RatingCode::Zero => "0",
            RatingCode::Low => "b",
            RatingCode::LowerLimit => "li",
            RatingCode::Normal => "n",
            RatingCode::UpperLimit => "ls",
            RatingCode::High => "a",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RatingCode::Zero => "zero",
            RatingCode::Low => "low",
            RatingCode::LowerLimit => "lower limit",
            RatingCode::Normal => "normal",
            RatingCode::UpperLimit => "upper limit",
            RatingCode::High => "high",
        }
    }
}

impl fmt::Display for RatingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string is not a known rating code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown rating code '{0}'")]
pub struct UnknownRatingCode(pub String);

impl FromStr for RatingCode {
    type Err = UnknownRatingCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RatingCode::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or_else(|| UnknownRatingCode(s.to_string()))
    }
}

/// Rates `value` against `[lower, upper]`.
///
/// Returns `None` when the value or either bound is missing. A zero value is
/// always [`RatingCode::Zero`]. The borderline bands are `tolerance` times the
/// interval width on each side of each bound.
///
/// A bound of `0.0` is a real bound, not a missing one: `3.0` in `(0-5)` is
/// [`RatingCode::Normal`].
///
/// ```rust
/// use labtext_import::{rate_value, RatingCode};
///
/// assert_eq!(rate_value(Some(100.0), Some(50.0), Some(150.0), 0.05), Some(RatingCode::Normal));
/// assert_eq!(rate_value(Some(115.0), Some(2.4), Some(8.3), 0.05), Some(RatingCode::High));
/// ```
pub fn rate_value(
    value: Option<f64>,
    lower: Option<f64>,
    upper: Option<f64>,
    tolerance: f64,
) -> Option<RatingCode> {
    let (value, lower, upper) = (value?, lower?, upper?);
    let delta = (upper - lower) * tolerance;

    let rating = if value == 0.0 {
        RatingCode::Zero
    } else if value < lower - delta {
        RatingCode::Low
    } else if value <= lower + delta {
        RatingCode::LowerLimit
    } else if value < upper - delta {
        RatingCode::Normal
    } else if value <= upper + delta {
        RatingCode::UpperLimit
    } else {
        RatingCode::High
    };
    Some(rating)
}
