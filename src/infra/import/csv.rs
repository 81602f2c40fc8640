use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::infra::import::{ImportResult, MovementColumns};
use crate::infra::sqlite::queries::insert_movements;
use crate::infra::sqlite::schema::init_db;

pub fn import_movements_csv(db_path: &Path, csv_path: &Path) -> Result<ImportResult> {
    init_db(db_path)?;

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let header_names: Vec<&str> = headers.iter().collect();
    let columns = MovementColumns::from_headers(&header_names)?;

    let mut movements = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.context("failed to parse csv record")?;
        let cells: Vec<&str> = record.iter().collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        movements.push(columns.parse_row(&cells, row_idx + 2)?);
    }

    let row_count = insert_movements(db_path, &movements)?;
    info!(path = %csv_path.display(), rows = row_count, "imported movements from csv");
    Ok(ImportResult { row_count })
}
