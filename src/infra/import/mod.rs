pub mod csv;
pub mod xlsx;

use anyhow::{anyhow, Context, Result};

use crate::domain::entities::ledger::Movement;
use crate::domain::entities::listing::parse_date;
use crate::domain::list::text::fold;
use crate::infra::sqlite::queries::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportResult {
    pub row_count: usize,
}

/// Column positions of a movement sheet, looked up by header name.
#[derive(Debug, Clone, Copy)]
pub struct MovementColumns {
    fecha: usize,
    concepto: usize,
    categoria: Option<usize>,
    debe: Option<usize>,
    haber: Option<usize>,
    saldo: Option<usize>,
    caja_id: Option<usize>,
    created_at: Option<usize>,
}

impl MovementColumns {
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| fold(h.as_ref().trim()) == name);
        Ok(Self {
            fecha: find("fecha").ok_or_else(|| anyhow!("missing column: fecha"))?,
            concepto: find("concepto").ok_or_else(|| anyhow!("missing column: concepto"))?,
            categoria: find("categoria"),
            debe: find("debe"),
            haber: find("haber"),
            saldo: find("saldo"),
            caja_id: find("caja").or_else(|| find("caja_id")),
            created_at: find("created_at").or_else(|| find("creado")),
        })
    }

    /// `line` is the 1-based source line, used in error messages.
    pub fn parse_row<S: AsRef<str>>(&self, cells: &[S], line: usize) -> Result<Movement> {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| cells.get(i))
                .map(|value| value.as_ref().trim())
                .filter(|value| !value.is_empty())
        };
        let amount = |idx: Option<usize>, name: &str| -> Result<f64> {
            match cell(idx) {
                Some(raw) => parse_amount(raw)
                    .ok_or_else(|| anyhow!("line {line}: invalid {name} {raw:?}")),
                None => Ok(0.0),
            }
        };

        let raw_fecha =
            cell(Some(self.fecha)).ok_or_else(|| anyhow!("line {line}: empty fecha"))?;
        let fecha = parse_date(raw_fecha)
            .ok_or_else(|| anyhow!("line {line}: invalid fecha {raw_fecha:?}"))?;
        let caja_id = cell(self.caja_id)
            .map(|raw| raw.parse::<i64>())
            .transpose()
            .with_context(|| format!("line {line}: invalid caja"))?
            .unwrap_or(1);

        Ok(Movement {
            id: 0,
            caja_id,
            fecha,
            concepto: cell(Some(self.concepto)).unwrap_or_default().to_string(),
            categoria: cell(self.categoria).map(str::to_string),
            debe: amount(self.debe, "debe")?,
            haber: amount(self.haber, "haber")?,
            saldo: amount(self.saldo, "saldo")?,
            created_at: cell(self.created_at).and_then(parse_timestamp),
        })
    }
}

/// Parses a spreadsheet amount in either of the two common notations.
///
/// A single comma followed by one or two digits is the decimal separator and
/// dots group thousands (`1.234,56`). Otherwise commas group thousands and a
/// dot is the decimal point (`1,234.56`). Groups must hold exactly three
/// digits; anything else is rejected rather than guessed.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let normalized = match raw.rfind(',') {
        None => raw.to_string(),
        Some(pos) => {
            let (int_part, fraction) = (&raw[..pos], &raw[pos + 1..]);
            let decimal_comma = raw.matches(',').count() == 1
                && (1..=2).contains(&fraction.len())
                && fraction.chars().all(|c| c.is_ascii_digit());
            if decimal_comma {
                if !thousands_grouped(int_part, '.') {
                    return None;
                }
                format!("{}.{fraction}", int_part.replace('.', ""))
            } else {
                let (int_part, rest) = raw.split_at(raw.find('.').unwrap_or(raw.len()));
                if !thousands_grouped(int_part, ',') {
                    return None;
                }
                format!("{}{rest}", int_part.replace(',', ""))
            }
        }
    };
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn thousands_grouped(int_part: &str, separator: char) -> bool {
    let digits = int_part.strip_prefix('-').unwrap_or(int_part);
    if !digits.contains(separator) {
        return true;
    }
    digits.split(separator).enumerate().all(|(idx, group)| {
        let width_ok = if idx == 0 {
            (1..=3).contains(&group.len())
        } else {
            group.len() == 3
        };
        width_ok && group.chars().all(|c| c.is_ascii_digit())
    })
}
