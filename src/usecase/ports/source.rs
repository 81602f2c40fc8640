use thiserror::Error;

use crate::domain::entities::listing::{FilterCriteria, SortState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.page_size
    }
}

/// What a list asks its source for. `page: None` means every matching record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchParams {
    pub criteria: FilterCriteria,
    pub sort: Option<SortState>,
    pub page: Option<PageRequest>,
}

impl FetchParams {
    pub fn all() -> Self {
        Self::default()
    }
}

/// One batch from the source. `total` counts every record matching the
/// filters, not just the ones on this page.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPage<R> {
    pub records: Vec<R>,
    pub total: usize,
}

impl<R> FetchPage<R> {
    pub fn complete(records: Vec<R>) -> Self {
        let total = records.len();
        Self { records, total }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("record source unavailable: {0}")]
    Unavailable(String),
    #[error("not authorized to read {0}")]
    Unauthorized(String),
    #[error("record source failed: {0}")]
    Backend(String),
}

impl From<anyhow::Error> for SourceError {
    fn from(err: anyhow::Error) -> Self {
        SourceError::Backend(format!("{err:#}"))
    }
}

pub trait RecordSource<R>: Send + Sync {
    fn fetch(&self, params: &FetchParams) -> Result<FetchPage<R>, SourceError>;
}
