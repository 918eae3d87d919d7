//! # labtext-import
//!
//! Turns dictated lab-result lines into validated, rated measurements.
//!
//! This crate sits on top of the [`labtext`] translator. The translator only
//! splits a line into raw fields; the importer resolves every typed analyte
//! name against a catalogue, interprets the date token, rejects inconsistent
//! measurements and rates each value against its reference interval.
//!
//! ## Key Features
//!
//! - **Catalogue agnostic** - resolve names through any [`AnalyteDirectory`]
//! - **Whole-line semantics** - a line is accepted or rejected as a unit
//! - **Configurable caching** - LRU cache for repeated abbreviations
//! - **Optional parallelism** - Enable `parallel` feature for batch import
//!
//! ## Quick Start
//!
//! ```rust
//! use labtext_import::{AnalyteName, Importer, InMemoryDirectory, RatingCode};
//!
//! let directory: InMemoryDirectory = [
//!     AnalyteName::new("tireotropina", "TSH"),
//!     AnalyteName::new("tiroxina libera", "FT4"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let importer = Importer::new(&directory);
//! let report = importer.import_line("- 3/2019 TSH n, FT4 1.6 (0.8-1.9)").unwrap();
//!
//! assert_eq!(report.count(), 2);
//! assert_eq!(report.date.to_string(), "3/2019");
//! assert_eq!(report.analyses[1].rating, Some(RatingCode::Normal));
//! ```
//!
//! ## With Configuration
//!
//! ```rust
//! use labtext_import::{CacheConfig, DateTokenPolicy, ImportConfig, Importer, InMemoryDirectory};
//!
//! let config = ImportConfig::builder()
//!     .with_cache(CacheConfig { max_entries: 256 })
//!     .with_date_policy(DateTokenPolicy::Calendar)
//!     .with_require_known_analyte(false)
//!     .build();
//!
//! let directory = InMemoryDirectory::new();
//! let importer = Importer::with_config(&directory, config);
//! let report = importer.import_line("- 29/2/2020 acth 12").unwrap();
//! assert_eq!(report.date.to_string(), "29/2/2020");
//! ```
//!
//! ## Validation Rules
//!
//! | Check | Error |
//! |-------|-------|
//! | Token matches no analyte (when required) | [`ImportError::UnknownAnalyte`] |
//! | Neither value nor rating code | [`ImportError::MissingMeasurement`] |
//! | Negative or NaN value | [`ImportError::InvalidValue`] |
//! | Rating code not in `0 b li n ls a` | [`ImportError::UnknownRating`] |
//! | Unit longer than [`MAX_UNIT_LEN`] | [`ImportError::UnitTooLong`] |
//!
//! ## Feature Flags
//!
//! - `parallel` - Imports batches on the rayon thread pool
//! - `serde` - Serialize/Deserialize for configuration and results
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      labtext-import                          │
//! │                                                              │
//! │  Importer                                                    │
//! │  ├── translate line → TranslationResult (labtext)           │
//! │  ├── interpret date token (DateTokenPolicy)                 │
//! │  ├── resolve analytes (via AnalyteDirectory trait + cache)  │
//! │  ├── validate and rate each measurement                     │
//! │  └── return ImportReport with stats                         │
//! │                                                              │
//! │  Dependencies:                                               │
//! │  ├── labtext - line translator and PartialDate              │
//! │  └── chrono  - calendar dates                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod config;
mod dates;
mod error;
mod importer;
mod rating;
mod result;
mod traits;

// Public re-exports
pub use cache::{CacheStats, ResolutionCache};
pub use config::{CacheConfig, ImportConfig, ImportConfigBuilder};
pub use dates::{interpret_date_token, ClinicalDate, DateTokenPolicy};
pub use error::{ImportError, ImportResult};
pub use importer::{Importer, MAX_UNIT_LEN};
pub use rating::{rate_value, RatingCode, UnknownRatingCode, DEFAULT_TOLERANCE};
pub use result::{ImportReport, ImportStats, ImportedAnalysis};
pub use traits::{AnalyteDirectory, AnalyteName, InMemoryDirectory};

// Re-export commonly used types from dependencies for convenience
pub use labtext::{AnalysisFieldSet, PartialDate, TranslateError, TranslationResult};
