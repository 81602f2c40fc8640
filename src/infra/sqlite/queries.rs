use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::types::{Type, Value};
use rusqlite::{params, Row, Transaction};

use crate::domain::entities::ledger::{Expense, Movement};
use crate::domain::entities::listing::{parse_date, DATE_FORMAT};
use crate::domain::entities::record::FilterValue;
use crate::domain::list::text::fold;
use crate::infra::sqlite::schema::{open_connection, FOLD_COLLATION};
use crate::usecase::ports::source::{FetchPage, FetchParams};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A ledger table the record source can page through.
pub trait LedgerTable: Sized {
    const TABLE: &'static str;
    const SELECT: &'static str;
    const SORTABLE: &'static [&'static str];
    /// Sort keys holding free text, ordered with the FOLD collation.
    const TEXT_KEYS: &'static [&'static str];
    const FILTERABLE: &'static [&'static str];
    /// Folded copy of each searchable field, matched one column at a time.
    const SEARCH_COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

impl LedgerTable for Movement {
    const TABLE: &'static str = "movement";
    const SELECT: &'static str =
        "id, caja_id, fecha, concepto, categoria, debe, haber, saldo, created_at";
    const SORTABLE: &'static [&'static str] =
        &["fecha", "concepto", "categoria", "debe", "haber", "saldo", "created_at"];
    const TEXT_KEYS: &'static [&'static str] = &["concepto", "categoria"];
    const FILTERABLE: &'static [&'static str] = &["caja_id", "categoria"];
    const SEARCH_COLUMNS: &'static [&'static str] = &["concepto_key", "categoria_key"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Movement {
            id: row.get(0)?,
            caja_id: row.get(1)?,
            fecha: date_column(row, 2)?,
            concepto: row.get(3)?,
            categoria: row.get(4)?,
            debe: row.get(5)?,
            haber: row.get(6)?,
            saldo: row.get(7)?,
            created_at: timestamp_column(row, 8)?,
        })
    }
}

impl LedgerTable for Expense {
    const TABLE: &'static str = "expense";
    const SELECT: &'static str =
        "id, caja_id, fecha, descripcion, categoria, monto, created_at";
    const SORTABLE: &'static [&'static str] =
        &["fecha", "descripcion", "categoria", "monto", "created_at"];
    const TEXT_KEYS: &'static [&'static str] = &["descripcion", "categoria"];
    const FILTERABLE: &'static [&'static str] = &["caja_id", "categoria"];
    const SEARCH_COLUMNS: &'static [&'static str] = &["descripcion_key", "categoria_key"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Expense {
            id: row.get(0)?,
            caja_id: row.get(1)?,
            fecha: date_column(row, 2)?,
            descripcion: row.get(3)?,
            categoria: row.get(4)?,
            monto: row.get(5)?,
            created_at: timestamp_column(row, 6)?,
        })
    }
}

fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<chrono::NaiveDate> {
    let raw: String = row.get(idx)?;
    parse_date(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("invalid date: {raw}").into(),
        )
    })
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(idx)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn where_clause<T: LedgerTable>(params: &FetchParams) -> Result<(String, Vec<Value>)> {
    let mut clauses = vec!["1 = 1".to_string()];
    let mut values = Vec::new();
    let criteria = &params.criteria;

    if let Some(from) = criteria.date_range.from {
        clauses.push("fecha >= ?".to_string());
        values.push(Value::Text(from.format(DATE_FORMAT).to_string()));
    }
    if let Some(to) = criteria.date_range.to {
        clauses.push("fecha <= ?".to_string());
        values.push(Value::Text(to.format(DATE_FORMAT).to_string()));
    }

    for (field, expected) in &criteria.equality {
        if !T::FILTERABLE.iter().any(|name| *name == field) {
            anyhow::bail!("{} cannot be filtered by {field}", T::TABLE);
        }
        clauses.push(format!("{field} = ?"));
        values.push(match expected {
            FilterValue::Text(text) => Value::Text(text.clone()),
            FilterValue::Number(number) => Value::Real(*number),
        });
    }

    let search = fold(criteria.search_text.trim());
    if !search.is_empty() {
        let pattern = format!("%{}%", escape_like(&search));
        let mut per_column = Vec::with_capacity(T::SEARCH_COLUMNS.len());
        for column in T::SEARCH_COLUMNS {
            per_column.push(format!("{column} LIKE ? ESCAPE '\\'"));
            values.push(Value::Text(pattern.clone()));
        }
        clauses.push(format!("({})", per_column.join(" OR ")));
    }

    Ok((clauses.join(" AND "), values))
}

/// Filtered count plus the requested page, ordered by the sort key and then
/// `created_at` ascending regardless of direction. Text keys sort with the
/// FOLD collation and treat an empty string like NULL, so pages line up with
/// the in-memory comparator.
pub fn query_page<T: LedgerTable>(db_path: &Path, params: &FetchParams) -> Result<FetchPage<T>> {
    let conn = open_connection(db_path)?;
    let (where_sql, filter_values) = where_clause::<T>(params)?;

    let count_sql = format!("SELECT COUNT(*) FROM {} WHERE {where_sql}", T::TABLE);
    let total: i64 = conn
        .query_row(
            &count_sql,
            rusqlite::params_from_iter(filter_values.iter().cloned()),
            |row| row.get(0),
        )
        .context("failed to query filtered row count")?;

    let mut row_sql = format!(
        "SELECT {} FROM {} WHERE {where_sql} ORDER BY ",
        T::SELECT,
        T::TABLE
    );
    if let Some(sort) = &params.sort {
        if !T::SORTABLE.iter().any(|name| *name == sort.key) {
            anyhow::bail!("{} cannot be sorted by {}", T::TABLE, sort.key);
        }
        let key = if T::TEXT_KEYS.iter().any(|name| *name == sort.key) {
            format!("NULLIF({}, '') COLLATE {FOLD_COLLATION}", sort.key)
        } else {
            sort.key.clone()
        };
        row_sql.push_str(&format!("{key} {}, ", sort.direction.as_sql()));
    }
    row_sql.push_str("created_at ASC, id ASC");

    let mut row_values = filter_values;
    if let Some(page) = params.page {
        row_sql.push_str(" LIMIT ? OFFSET ?");
        row_values.push(Value::Integer(page.page_size as i64));
        row_values.push(Value::Integer(page.offset() as i64));
    }

    let mut stmt = conn
        .prepare(&row_sql)
        .with_context(|| format!("failed to prepare {} page query", T::TABLE))?;
    let records = stmt
        .query_map(rusqlite::params_from_iter(row_values), T::from_row)
        .with_context(|| format!("failed to query {} rows", T::TABLE))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("failed to read {} rows", T::TABLE))?;

    Ok(FetchPage {
        records,
        total: total.max(0) as usize,
    })
}

fn ensure_caja(tx: &Transaction<'_>, caja_id: i64) -> Result<()> {
    tx.execute(
        "INSERT OR IGNORE INTO caja(id, nombre) VALUES (?1, ?2)",
        params![caja_id, format!("Caja #{caja_id}")],
    )
    .with_context(|| format!("failed to register caja #{caja_id}"))?;
    Ok(())
}

fn search_column(value: Option<&str>) -> Option<String> {
    value.map(fold)
}

fn optional_id(id: i64) -> Option<i64> {
    (id > 0).then_some(id)
}

pub fn insert_movements(db_path: &Path, movements: &[Movement]) -> Result<usize> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start movement insert transaction")?;

    let mut insert = tx
        .prepare(
            "INSERT INTO movement(id, caja_id, fecha, concepto, categoria, debe, haber, saldo, created_at, concepto_key, categoria_key)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .context("failed to prepare movement insert")?;
    for movement in movements {
        ensure_caja(&tx, movement.caja_id)?;
        insert
            .execute(params![
                optional_id(movement.id),
                movement.caja_id,
                movement.fecha.format(DATE_FORMAT).to_string(),
                movement.concepto,
                movement.categoria,
                movement.debe,
                movement.haber,
                movement.saldo,
                movement.created_at.as_ref().map(format_timestamp),
                fold(&movement.concepto),
                search_column(movement.categoria.as_deref()),
            ])
            .with_context(|| format!("failed to insert movement {:?}", movement.concepto))?;
    }
    drop(insert);

    tx.commit().context("failed to commit movement insert")?;
    Ok(movements.len())
}

pub fn insert_expenses(db_path: &Path, expenses: &[Expense]) -> Result<usize> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start expense insert transaction")?;

    let mut insert = tx
        .prepare(
            "INSERT INTO expense(id, caja_id, fecha, descripcion, categoria, monto, created_at, descripcion_key, categoria_key)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .context("failed to prepare expense insert")?;
    for expense in expenses {
        ensure_caja(&tx, expense.caja_id)?;
        insert
            .execute(params![
                optional_id(expense.id),
                expense.caja_id,
                expense.fecha.format(DATE_FORMAT).to_string(),
                expense.descripcion,
                expense.categoria,
                expense.monto,
                expense.created_at.as_ref().map(format_timestamp),
                fold(&expense.descripcion),
                search_column(expense.categoria.as_deref()),
            ])
            .with_context(|| format!("failed to insert expense {:?}", expense.descripcion))?;
    }
    drop(insert);

    tx.commit().context("failed to commit expense insert")?;
    Ok(expenses.len())
}

/// Distinct categories, for the category filter dropdown.
pub fn list_categories<T: LedgerTable>(db_path: &Path) -> Result<Vec<String>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(&format!(
            "SELECT DISTINCT categoria FROM {} WHERE categoria IS NOT NULL AND categoria <> '' ORDER BY categoria ASC",
            T::TABLE
        ))
        .context("failed to prepare categories query")?;
    let categories = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("failed to query categories")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect categories")?;
    Ok(categories)
}
