//! # labtext
//!
//! Translator for hand-typed laboratory result lines and a partial-precision
//! date type for clinical histories.
//!
//! This crate provides:
//! - **Translator**: turn `- 01/01/2019 FT4 1.2 mmol/L (0.7-1.9), TSH n` into
//!   one record per analyte
//! - **PartialDate**: dates known to year, month or day with a partial
//!   ordering and an overlap test
//!
//! ## Translator Usage
//!
//! ```rust
//! use labtext::translate;
//!
//! let result = translate("- 01/01/2019 testosterone 5.5 ng/dl, corti 19.1 (<22)").unwrap();
//! assert_eq!(result.date_token, "01/01/2019");
//! assert_eq!(result.analyses[0].analyte_token, "testosterone");
//! assert_eq!(result.analyses[0].unit.as_deref(), Some("ng/dl"));
//! assert_eq!(result.analyses[1].upper_limit, Some(22.0));
//! ```
//!
//! ## PartialDate Usage
//!
//! ```rust
//! use labtext::PartialDate;
//!
//! let onset: PartialDate = "2019".parse().unwrap();
//! let visit: PartialDate = "14/3/2019".parse().unwrap();
//!
//! assert!(onset.overlaps(&visit));
//! assert!(onset.try_lt(&visit).is_err());
//! ```
//!
//! ## Line Grammar Quick Reference
//!
//! | Part | Form | Example |
//! |------|------|---------|
//! | Marker | optional `- ` | `- ` |
//! | Date | `[[d/]m/]y` | `01/01/2019` |
//! | Segment | `name first [second] [third]` | `ft4 1.2 mmol/l (0.7-1.9)` |
//! | First token | number ⇒ value, else rate | `3.15`, `n` |
//! | Second token | `(...)` ⇒ range, else unit | `ng/dl` |
//! | Third token | `(...)` ⇒ range | `(0.7-1.9)` |
//! | Range | `(a-b)`, `(<b)`, `(>a)` | `(<22)` |
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/deserialize records; `PartialDate` uses its string form
//! - `chrono` - `PartialDate::to_naive_date`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod date;
mod error;
mod parser;
mod record;

pub use date::{DatePrecision, PartialDate, DATE_SEPARATOR, DEFAULT_CENTURY_PIVOT};
pub use error::{TranslateError, TranslateResult};
pub use parser::{
    classify, is_range, normalize, parse_range, segment, split_header, translate, HEADER_MARKER,
    SEGMENT_SEPARATOR,
};
pub use record::{AnalysisFieldSet, TranslationResult};
