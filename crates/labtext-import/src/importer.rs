//! Import of dictated lab-result lines.

use std::sync::Arc;
use std::time::Instant;

use labtext::AnalysisFieldSet;
use tracing::{debug, trace, warn};

use crate::cache::ResolutionCache;
use crate::config::ImportConfig;
use crate::dates::{interpret_date_token, ClinicalDate};
use crate::error::{ImportError, ImportResult};
use crate::rating::{rate_value, RatingCode};
use crate::result::{ImportReport, ImportStats, ImportedAnalysis};
use crate::traits::{AnalyteDirectory, AnalyteName};

/// Longest unit string that can be stored.
pub const MAX_UNIT_LEN: usize = 10;

/// Main import engine.
///
/// The importer bridges the translator (`labtext`) and any analyte catalogue
/// that implements [`AnalyteDirectory`]: it translates a line, interprets its
/// date, resolves every analyte token, validates the measurement and rates it.
///
/// # Example
///
/// ```rust
/// use labtext_import::{AnalyteName, Importer, InMemoryDirectory, RatingCode};
///
/// let directory: InMemoryDirectory = [AnalyteName::new("tireotropina", "TSH")]
///     .into_iter()
///     .collect();
/// let importer = Importer::new(&directory);
///
/// let report = importer.import_line("- 01/01/2019 TSH 2.1 (0.4-4.0)").unwrap();
/// let tsh = &report.analyses[0];
/// assert_eq!(tsh.analyte.as_ref().unwrap().name, "tireotropina");
/// assert_eq!(tsh.rating, Some(RatingCode::Normal));
/// ```
pub struct Importer<'a> {
    /// Reference to the analyte catalogue.
    directory: &'a dyn AnalyteDirectory,
    /// Importer configuration.
    config: ImportConfig,
    /// Resolution cache (optional).
    cache: Option<Arc<ResolutionCache>>,
}

impl<'a> Importer<'a> {
    /// Creates a new importer with default configuration.
    pub fn new(directory: &'a dyn AnalyteDirectory) -> Self {
        Self {
            directory,
            config: ImportConfig::default(),
            cache: None,
        }
    }

    /// Creates an importer with custom configuration.
    ///
    /// ```rust
    /// use labtext_import::{CacheConfig, ImportConfig, Importer, InMemoryDirectory};
    ///
    /// let directory = InMemoryDirectory::new();
    /// let config = ImportConfig::builder()
    ///     .with_cache(CacheConfig::default())
    ///     .with_require_known_analyte(false)
    ///     .build();
    ///
    /// let importer = Importer::with_config(&directory, config);
    /// assert!(importer.cache().is_some());
    /// ```
    pub fn with_config(directory: &'a dyn AnalyteDirectory, config: ImportConfig) -> Self {
        let cache = config
            .cache
            .as_ref()
            .map(|c| Arc::new(ResolutionCache::new(c.clone())));
        Self {
            directory,
            config,
            cache,
        }
    }

    /// Returns a reference to the cache if enabled.
    pub fn cache(&self) -> Option<&ResolutionCache> {
        self.cache.as_deref()
    }

    /// Returns a reference to the importer configuration.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Imports one dictated line.
    ///
    /// The line is accepted or rejected as a whole: the first failing segment
    /// aborts the import.
    pub fn import_line(&self, line: &str) -> ImportResult<ImportReport> {
        let result = self.try_import(line);
        if let Err(err) = &result {
            warn!(error = %err, "dictated line rejected");
        }
        result
    }

    /// Imports several lines, returning one result per line in input order.
    ///
    /// Lines are independent; a rejected line does not affect the others.
    /// With the `parallel` feature and [`ImportConfig::parallel`] set, lines
    /// are imported on the rayon thread pool.
    pub fn import_batch<S>(&self, lines: &[S]) -> Vec<ImportResult<ImportReport>>
    where
        S: AsRef<str> + Sync,
    {
        if self.config.parallel {
            self.import_parallel(lines)
        } else {
            lines.iter().map(|l| self.import_line(l.as_ref())).collect()
        }
    }

    #[cfg(feature = "parallel")]
    fn import_parallel<S>(&self, lines: &[S]) -> Vec<ImportResult<ImportReport>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;
        lines.par_iter().map(|l| self.import_line(l.as_ref())).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn import_parallel<S>(&self, lines: &[S]) -> Vec<ImportResult<ImportReport>>
    where
        S: AsRef<str> + Sync,
    {
        lines.iter().map(|l| self.import_line(l.as_ref())).collect()
    }

    fn try_import(&self, line: &str) -> ImportResult<ImportReport> {
        let start = Instant::now();

        let translation = labtext::translate(line)?;
        let date = interpret_date_token(
            &translation.date_token,
            self.config.date_policy,
            self.config.century_pivot,
        )?;

        let segments = translation.len();
        let mut cache_hits = 0;
        let mut analyses = Vec::with_capacity(segments);

        for fields in translation {
            let (analyte, from_cache) = self.resolve(&fields.analyte_token);
            if from_cache {
                cache_hits += 1;
            }
            analyses.push(self.validate(fields, analyte, date)?);
        }

        let stats = ImportStats::new(start.elapsed(), segments, cache_hits);
        debug!(
            date = %date,
            segments,
            cache_hits,
            duration_us = stats.duration.as_micros() as u64,
            "dictated line imported"
        );

        Ok(ImportReport {
            date,
            analyses,
            stats,
        })
    }

    /// Resolves a token, returning the analyte and whether the cache answered.
    fn resolve(&self, token: &str) -> (Option<AnalyteName>, bool) {
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.get(token) {
                trace!(token, "analyte resolved from cache");
                return (cached, true);
            }
        }

        let found = self.directory.resolve(token);

        if let Some(ref cache) = self.cache {
            cache.set(token.to_string(), found.clone());
        }
        (found, false)
    }

    fn validate(
        &self,
        fields: AnalysisFieldSet,
        analyte: Option<AnalyteName>,
        date: ClinicalDate,
    ) -> ImportResult<ImportedAnalysis> {
        let AnalysisFieldSet {
            analyte_token,
            value,
            rate,
            lower_limit,
            upper_limit,
            unit,
        } = fields;

        if analyte.is_none() && self.config.require_known_analyte {
            return Err(ImportError::UnknownAnalyte(analyte_token));
        }

        if value.is_none() && rate.is_none() {
            return Err(ImportError::MissingMeasurement {
                analyte: analyte_token,
            });
        }

        if let Some(v) = value {
            if !(v >= 0.0) || v.is_infinite() {
                return Err(ImportError::InvalidValue {
                    analyte: analyte_token,
                    value: v,
                });
            }
        }

        let rate = match rate {
            Some(code) => match code.parse::<RatingCode>() {
                Ok(r) => Some(r),
                Err(_) => {
                    return Err(ImportError::UnknownRating {
                        analyte: analyte_token,
                        code,
                    })
                }
            },
            None => None,
        };

        if let Some(ref u) = unit {
            if u.chars().count() > MAX_UNIT_LEN {
                return Err(ImportError::UnitTooLong {
                    analyte: analyte_token,
                    unit: u.clone(),
                    max: MAX_UNIT_LEN,
                });
            }
        }

        let rating = rate.or_else(|| {
            rate_value(value, lower_limit, upper_limit, self.config.rating_tolerance)
        });

        Ok(ImportedAnalysis {
            analyte_token,
            analyte,
            date,
            value,
            rate,
            lower_limit,
            upper_limit,
            unit,
            rating,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use crate::traits::InMemoryDirectory;

    fn directory() -> InMemoryDirectory {
        [
            ("testosterone", "testo"),
            ("paratormone", "PTH"),
            ("tireotropina", "TSH"),
            ("tiroxina libera", "FT4"),
        ]
        .into_iter()
        .map(|(n, s)| AnalyteName::new(n, s))
        .collect()
    }

    #[test]
    fn test_import_single_rate() {
        let dir = directory();
        let report = Importer::new(&dir).import_line("- 01/01/2019 TSH n").unwrap();
        assert_eq!(report.count(), 1);
        assert_eq!(report.date.to_string(), "1/1/2019");

        let tsh = &report.analyses[0];
        assert_eq!(tsh.analyte_token, "tsh");
        assert_eq!(tsh.rate, Some(RatingCode::Normal));
        assert_eq!(tsh.rating, Some(RatingCode::Normal));
    }

    #[test]
    fn test_rating_computed_from_interval() {
        let dir = directory();
        let report = Importer::new(&dir)
            .import_line("- 2019 testo 115 ng/dl (2.4-8.3)")
            .unwrap();
        assert_eq!(report.analyses[0].rate, None);
        assert_eq!(report.analyses[0].rating, Some(RatingCode::High));
    }

    #[test]
    fn test_unknown_analyte_rejected_by_default() {
        let dir = directory();
        let err = Importer::new(&dir).import_line("- 2019 acth 5").unwrap_err();
        assert_eq!(err, ImportError::UnknownAnalyte("acth".to_string()));
    }

    #[test]
    fn test_unknown_analyte_accepted_when_configured() {
        let dir = directory();
        let config = ImportConfig::builder()
            .with_require_known_analyte(false)
            .build();
        let report = Importer::with_config(&dir, config)
            .import_line("- 2019 acth 5")
            .unwrap();
        assert!(report.analyses[0].analyte.is_none());
    }

    #[test]
    fn test_unknown_rating_code() {
        let dir = directory();
        let err = Importer::new(&dir).import_line("- 2019 tsh zz").unwrap_err();
        assert!(matches!(err, ImportError::UnknownRating { .. }));
    }

    #[test]
    fn test_negative_and_nan_values() {
        let dir = directory();
        let importer = Importer::new(&dir);
        assert!(matches!(
            importer.import_line("- 2019 tsh -1.5"),
            Err(ImportError::InvalidValue { .. })
        ));
        assert!(matches!(
            importer.import_line("- 2019 tsh nan"),
            Err(ImportError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_measurement() {
        let dir = directory();
        let importer = Importer::new(&dir);
        let date = interpret_date_token("2019", Default::default(), 70).unwrap();
        let err = importer
            .validate(AnalysisFieldSet::new("tsh"), dir.resolve("tsh"), date)
            .unwrap_err();
        assert_eq!(
            err,
            ImportError::MissingMeasurement {
                analyte: "tsh".to_string()
            }
        );
    }

    #[test]
    fn test_unit_too_long() {
        let dir = directory();
        let err = Importer::new(&dir)
            .import_line("- 2019 tsh 2.1 microunits/ml")
            .unwrap_err();
        assert!(matches!(err, ImportError::UnitTooLong { max: 10, .. }));
    }

    #[test]
    fn test_translation_error_propagates() {
        let dir = directory();
        let err = Importer::new(&dir).import_line("- 2019 tsh").unwrap_err();
        assert!(matches!(err, ImportError::Translate(_)));
    }

    #[test]
    fn test_cache_hits_counted() {
        let dir = directory();
        let config = ImportConfig::builder()
            .with_cache(CacheConfig::default())
            .build();
        let importer = Importer::with_config(&dir, config);

        let first = importer.import_line("- 2019 tsh n, ft4 1.1").unwrap();
        assert_eq!(first.stats.cache_hits, 0);
        assert_eq!(first.stats.segments, 2);

        let second = importer.import_line("- 2020 tsh a, tsh b").unwrap();
        assert_eq!(second.stats.cache_hits, 2);
        assert_eq!(importer.cache().map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let dir = directory();
        let importer = Importer::new(&dir);
        let results = importer.import_batch(&["- 2019 tsh n", "- 2019 tsh", "- 2020 pth 40"]);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().date.to_string(), "2020");
    }
}
