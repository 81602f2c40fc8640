use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::entities::record::{FieldValue, Record};

/// A movimiento: one debit/credit row of a caja. `saldo` arrives
/// precomputed from the backend and is only displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    pub id: i64,
    pub caja_id: i64,
    pub fecha: NaiveDate,
    pub concepto: String,
    pub categoria: Option<String>,
    pub debe: f64,
    pub haber: f64,
    pub saldo: f64,
    pub created_at: Option<NaiveDateTime>,
}

impl Movement {
    pub const COLUMNS: [&'static str; 7] = [
        "fecha",
        "concepto",
        "categoria",
        "debe",
        "haber",
        "saldo",
        "created_at",
    ];
}

impl Record for Movement {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Number(self.id as f64),
            "caja_id" => FieldValue::Number(self.caja_id as f64),
            "fecha" => FieldValue::Date(self.fecha),
            "concepto" => FieldValue::Text(Cow::Borrowed(&self.concepto)),
            "categoria" => optional_text(self.categoria.as_deref()),
            "debe" => FieldValue::Number(self.debe),
            "haber" => FieldValue::Number(self.haber),
            "saldo" => FieldValue::Number(self.saldo),
            "created_at" => self
                .created_at
                .map(FieldValue::Timestamp)
                .unwrap_or(FieldValue::Missing),
            _ => FieldValue::Missing,
        }
    }
}

/// A gasto registered against a caja.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub caja_id: i64,
    pub fecha: NaiveDate,
    pub descripcion: String,
    pub categoria: Option<String>,
    pub monto: f64,
    pub created_at: Option<NaiveDateTime>,
}

impl Expense {
    pub const COLUMNS: [&'static str; 5] =
        ["fecha", "descripcion", "categoria", "monto", "created_at"];
}

impl Record for Expense {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Number(self.id as f64),
            "caja_id" => FieldValue::Number(self.caja_id as f64),
            "fecha" => FieldValue::Date(self.fecha),
            "descripcion" => FieldValue::Text(Cow::Borrowed(&self.descripcion)),
            "categoria" => optional_text(self.categoria.as_deref()),
            "monto" => FieldValue::Number(self.monto),
            "created_at" => self
                .created_at
                .map(FieldValue::Timestamp)
                .unwrap_or(FieldValue::Missing),
            _ => FieldValue::Missing,
        }
    }
}

fn optional_text(value: Option<&str>) -> FieldValue<'_> {
    match value {
        Some(text) if !text.is_empty() => FieldValue::Text(Cow::Borrowed(text)),
        _ => FieldValue::Missing,
    }
}
