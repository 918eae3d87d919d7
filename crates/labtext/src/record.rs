//! Records produced by the translator.

use crate::date::PartialDate;
use crate::error::TranslateResult;

/// Fields extracted from one analyte segment, e.g. `ft4 1.2 mmol/l (0.7-1.9)`.
///
/// `value` and `rate` are independent: the translator sets whichever the first
/// token looks like and leaves acceptability to downstream consumers.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisFieldSet {
    /// Analyte name or abbreviation as typed (lower-cased, unresolved).
    pub analyte_token: String,
    /// Numeric result.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<f64>,
    /// Qualitative rating code, passed through unvalidated.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rate: Option<String>,
    /// Lower bound of the reference interval.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub lower_limit: Option<f64>,
    /// Upper bound of the reference interval.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub upper_limit: Option<f64>,
    /// Unit of measure.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub unit: Option<String>,
}

impl AnalysisFieldSet {
    /// Creates an empty record for the given analyte token.
    pub fn new(analyte_token: impl Into<String>) -> Self {
        Self {
            analyte_token: analyte_token.into(),
            ..Self::default()
        }
    }

    /// Sets both range bounds at once, replacing any previous range.
    pub fn with_range(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.set_range((lower, upper));
        self
    }

    pub(crate) fn set_range(&mut self, (lower, upper): (Option<f64>, Option<f64>)) {
        self.lower_limit = lower;
        self.upper_limit = upper;
    }

    /// Returns true if either range bound is present.
    pub fn has_range(&self) -> bool {
        self.lower_limit.is_some() || self.upper_limit.is_some()
    }
}

/// Output of translating one dictated line.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslationResult {
    /// The raw date token at the start of the line; interpretation is up to the caller.
    pub date_token: String,
    /// One record per comma-separated segment, in input order.
    pub analyses: Vec<AnalysisFieldSet>,
}

impl TranslationResult {
    /// Reads the date token as a [`PartialDate`] with the default century pivot.
    ///
    /// Callers that want a different interpretation work from `date_token` directly.
    pub fn partial_date(&self) -> TranslateResult<PartialDate> {
        PartialDate::parse(&self.date_token)
    }

    /// Number of analyte records.
    pub fn len(&self) -> usize {
        self.analyses.len()
    }

    /// Returns true if no records were produced.
    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty()
    }

    /// Iterates over the records in input order.
    pub fn iter(&self) -> impl Iterator<Item = &AnalysisFieldSet> {
        self.analyses.iter()
    }
}

impl IntoIterator for TranslationResult {
    type Item = AnalysisFieldSet;
    type IntoIter = std::vec::IntoIter<AnalysisFieldSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.analyses.into_iter()
    }
}

impl<'a> IntoIterator for &'a TranslationResult {
    type Item = &'a AnalysisFieldSet;
    type IntoIter = std::slice::Iter<'a, AnalysisFieldSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.analyses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let record = AnalysisFieldSet::new("tsh");
        assert_eq!(record.analyte_token, "tsh");
        assert!(record.value.is_none());
        assert!(record.rate.is_none());
        assert!(record.unit.is_none());
        assert!(!record.has_range());
    }

    #[test]
    fn test_with_range_replaces_bounds() {
        let record = AnalysisFieldSet::new("ft4")
            .with_range(Some(0.7), Some(1.9))
            .with_range(None, Some(22.0));
        assert_eq!(record.lower_limit, None);
        assert_eq!(record.upper_limit, Some(22.0));
        assert!(record.has_range());
    }

    #[test]
    fn test_translation_result_iteration_keeps_order() {
        let result = TranslationResult {
            date_token: "01/01/2019".into(),
            analyses: vec![AnalysisFieldSet::new("tsh"), AnalysisFieldSet::new("ft4")],
        };
        assert_eq!(result.len(), 2);
        let names: Vec<&str> = result.iter().map(|r| r.analyte_token.as_str()).collect();
        assert_eq!(names, vec!["tsh", "ft4"]);
    }

    #[test]
    fn test_partial_date_from_token() {
        let result = TranslationResult {
            date_token: "3/19".into(),
            analyses: Vec::new(),
        };
        assert_eq!(result.partial_date().unwrap().to_string(), "3/2019");
    }
}
