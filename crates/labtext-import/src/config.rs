//! Configuration types for the importer.

use labtext::DEFAULT_CENTURY_PIVOT;

use crate::dates::DateTokenPolicy;
use crate::rating::DEFAULT_TOLERANCE;

/// Configuration for the [`Importer`](crate::Importer).
///
/// # Example
///
/// ```rust
/// use labtext_import::{CacheConfig, DateTokenPolicy, ImportConfig};
///
/// let config = ImportConfig::builder()
///     .with_cache(CacheConfig::default())
///     .with_date_policy(DateTokenPolicy::Calendar)
///     .with_century_pivot(50)
///     .with_parallel(true)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Analyte resolution cache (None = caching disabled).
    pub cache: Option<CacheConfig>,
    /// How the date token of a line is interpreted.
    pub date_policy: DateTokenPolicy,
    /// Two-digit years below this value land in the 2000s.
    pub century_pivot: u16,
    /// Fraction of the reference interval treated as borderline when rating.
    pub rating_tolerance: f64,
    /// Reject records whose analyte is not in the directory.
    pub require_known_analyte: bool,
    /// Import batches in parallel (requires `parallel` feature).
    pub parallel: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            cache: None,
            date_policy: DateTokenPolicy::default(),
            century_pivot: DEFAULT_CENTURY_PIVOT,
            rating_tolerance: DEFAULT_TOLERANCE,
            require_known_analyte: true,
            parallel: false,
        }
    }
}

impl ImportConfig {
    /// Creates a new builder for ImportConfig.
    pub fn builder() -> ImportConfigBuilder {
        ImportConfigBuilder::default()
    }
}

/// Builder for ImportConfig.
#[derive(Debug, Clone, Default)]
pub struct ImportConfigBuilder {
    config: ImportConfig,
}

impl ImportConfigBuilder {
    /// Enables resolution caching with the given configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = Some(cache);
        self
    }

    /// Sets the date-token policy.
    pub fn with_date_policy(mut self, policy: DateTokenPolicy) -> Self {
        self.config.date_policy = policy;
        self
    }

    /// Sets the century pivot for two-digit years.
    pub fn with_century_pivot(mut self, pivot: u16) -> Self {
        self.config.century_pivot = pivot;
        self
    }

    /// Sets the rating tolerance.
    pub fn with_rating_tolerance(mut self, tolerance: f64) -> Self {
        self.config.rating_tolerance = tolerance;
        self
    }

    /// Accept or reject analytes missing from the directory.
    pub fn with_require_known_analyte(mut self, require: bool) -> Self {
        self.config.require_known_analyte = require;
        self
    }

    /// Enables or disables parallel batch import.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Builds the ImportConfig.
    pub fn build(self) -> ImportConfig {
        self.config
    }
}

/// Configuration for the analyte resolution cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached tokens.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 1024 }
    }
}
