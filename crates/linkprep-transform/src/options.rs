use std::num::NonZeroUsize;
use std::thread;

use linkprep_model::InputFields;

use crate::normalization::YearRange;

/// Options for record transformation.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Source columns for the four required roles.
    pub fields: InputFields,

    /// Accepted years of birth.
    pub years: YearRange,

    /// Worker threads for batch transformation.
    /// Default: one per available core.
    pub workers: Option<NonZeroUsize>,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(mut self, fields: InputFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_year_range(mut self, years: YearRange) -> Self {
        self.years = years;
        self
    }

    pub fn with_workers(mut self, workers: Option<NonZeroUsize>) -> Self {
        self.workers = workers;
        self
    }

    pub fn worker_count(&self) -> usize {
        self.workers
            .or_else(|| thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }
}
