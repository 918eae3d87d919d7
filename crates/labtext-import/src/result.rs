//! Result types for line import.

use std::time::Duration;

use crate::dates::ClinicalDate;
use crate::rating::RatingCode;
use crate::traits::AnalyteName;

/// One validated analyte measurement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportedAnalysis {
    /// Analyte token as typed.
    pub analyte_token: String,
    /// Resolved analyte; `None` only when unknown analytes are accepted.
    pub analyte: Option<AnalyteName>,
    /// Date of the line.
    pub date: ClinicalDate,
    /// Numeric result.
    pub value: Option<f64>,
    /// Dictated rating.
    pub rate: Option<RatingCode>,
    /// Lower bound of the reference interval.
    pub lower_limit: Option<f64>,
    /// Upper bound of the reference interval.
    pub upper_limit: Option<f64>,
    /// Unit of measure.
    pub unit: Option<String>,
    /// The dictated rate, or one computed from value and interval.
    pub rating: Option<RatingCode>,
}

/// Result of importing one line.
///
/// # Example
///
/// ```ignore
/// let report = importer.import_line("- 01/01/2019 TSH n, FT4 1.2")?;
///
/// println!("{} analyses on {}", report.count(), report.date);
/// for analysis in &report {
///     println!("{:?}", analysis.analyte);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Date of the line.
    pub date: ClinicalDate,
    /// Analyses in dictation order.
    pub analyses: Vec<ImportedAnalysis>,
    /// Import statistics.
    pub stats: ImportStats,
}

impl ImportReport {
    /// Returns the number of analyses.
    pub fn count(&self) -> usize {
        self.analyses.len()
    }

    /// Returns true if the line produced no analyses.
    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty()
    }

    /// Returns an iterator over the analyses in dictation order.
    pub fn iter(&self) -> impl Iterator<Item = &ImportedAnalysis> {
        self.analyses.iter()
    }
}

impl IntoIterator for ImportReport {
    type Item = ImportedAnalysis;
    type IntoIter = std::vec::IntoIter<ImportedAnalysis>;

    fn into_iter(self) -> Self::IntoIter {
        self.analyses.into_iter()
    }
}

impl<'a> IntoIterator for &'a ImportReport {
    type Item = &'a ImportedAnalysis;
    type IntoIter = std::slice::Iter<'a, ImportedAnalysis>;

    fn into_iter(self) -> Self::IntoIter {
        self.analyses.iter()
    }
}

/// Statistics from importing one line.
#[derive(Debug, Clone, Default)]
pub struct ImportStats {
    /// Total import duration.
    pub duration: Duration,
    /// Number of analyte segments in the line.
    pub segments: usize,
    /// Analyte tokens resolved from the cache.
    pub cache_hits: usize,
}

impl ImportStats {
    /// Creates new import stats.
    pub fn new(duration: Duration, segments: usize, cache_hits: usize) -> Self {
        Self {
            duration,
            segments,
            cache_hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labtext::PartialDate;

    fn analysis(value: Option<f64>, rate: Option<RatingCode>) -> ImportedAnalysis {
        ImportedAnalysis {
            analyte_token: "tsh".into(),
            analyte: Some(AnalyteName::new("tireotropina", "TSH")),
            date: ClinicalDate::Partial(PartialDate::new(2019, None, None).unwrap()),
            value,
            rate,
            lower_limit: Some(50.0),
            upper_limit: Some(150.0),
            unit: None,
            rating: rate,
        }
    }

    #[test]
    fn test_report_iteration() {
        let report = ImportReport {
            date: ClinicalDate::Partial(PartialDate::new(2019, None, None).unwrap()),
            analyses: vec![analysis(Some(1.0), None), analysis(None, Some(RatingCode::Normal))],
            stats: ImportStats::default(),
        };
        assert_eq!(report.count(), 2);
        assert!(!report.is_empty());
        assert_eq!(report.iter().filter(|a| a.rate.is_some()).count(), 1);
    }

    #[test]
    fn test_import_stats() {
        let stats = ImportStats::new(Duration::from_millis(2), 3, 1);
        assert_eq!(stats.duration, Duration::from_millis(2));
        assert_eq!(stats.segments, 3);
        assert_eq!(stats.cache_hits, 1);
    }
}
