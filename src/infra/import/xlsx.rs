use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::infra::import::{ImportResult, MovementColumns};
use crate::infra::sqlite::queries::insert_movements;
use crate::infra::sqlite::schema::init_db;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => excel_serial_to_string(v.as_f64()),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Excel stores dates as days since 1899-12-30 with the time as a fraction.
fn excel_serial_to_string(serial: f64) -> String {
    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return serial.to_string();
    };
    let seconds = (serial * 86_400.0).round() as i64;
    let value = epoch + Duration::seconds(seconds);
    if serial.fract() == 0.0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Imports one sheet whose first row holds the column headers. Without a
/// sheet name the first sheet of the workbook is used.
pub fn import_movements_xlsx(
    db_path: &Path,
    xlsx_path: &Path,
    sheet: Option<&str>,
) -> Result<ImportResult> {
    init_db(db_path)?;

    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open xlsx: {}", xlsx_path.display()))?;
    let sheet = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .with_context(|| format!("workbook has no sheets: {}", xlsx_path.display()))?,
    };
    let sheet = sheet.as_str();
    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("failed to read sheet: {sheet}"))?;

    let mut rows = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect::<Vec<_>>());
    let headers = rows
        .next()
        .with_context(|| format!("sheet {sheet} has no header row"))?;
    let columns = MovementColumns::from_headers(&headers)?;

    let mut movements = Vec::new();
    for (row_idx, cells) in rows.enumerate() {
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        movements.push(columns.parse_row(&cells, row_idx + 2)?);
    }

    let row_count = insert_movements(db_path, &movements)?;
    info!(path = %xlsx_path.display(), sheet, rows = row_count, "imported movements from xlsx");
    Ok(ImportResult { row_count })
}
