use std::path::PathBuf;

use crate::usecase::ports::export::{ExportError, ExportSummary, Exporter};

/// Writes the exported rows as a CSV spreadsheet.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    pub path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write(&self, columns: &[&str], rows: &[Vec<String>]) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(columns)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Exporter for CsvExporter {
    fn export(
        &self,
        columns: &[&str],
        rows: &[Vec<String>],
    ) -> Result<ExportSummary, ExportError> {
        self.write(columns, rows).map_err(|source| ExportError::Write {
            path: self.path.clone(),
            source: source.into(),
        })?;
        Ok(ExportSummary {
            path: self.path.clone(),
            row_count: rows.len(),
        })
    }
}
