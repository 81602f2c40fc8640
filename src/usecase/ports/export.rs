use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub row_count: usize,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load rows for export: {0}")]
    Load(#[from] crate::usecase::ports::source::SourceError),
}

/// Receives the full filtered and sorted set, already rendered to cells.
pub trait Exporter {
    fn export(&self, columns: &[&str], rows: &[Vec<String>])
        -> Result<ExportSummary, ExportError>;
}
