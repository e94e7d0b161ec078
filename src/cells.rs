use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::CellError;
use crate::models::Cell;

fn describe(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.clone(),
        Cell::Number(n) => n.to_string(),
        Cell::Date(d) => d.to_string(),
        Cell::Bool(b) => b.to_string(),
    }
}

static EMPTY: Cell = Cell::Empty;

/// Cells past the end of a short row read as empty.
pub fn cell_at(row: &[Cell], idx: usize) -> &Cell {
    row.get(idx).unwrap_or(&EMPTY)
}

pub fn parse_date(cell: &Cell, format: &'static str) -> Result<NaiveDate, CellError> {
    match cell {
        Cell::Date(d) => Ok(*d),
        Cell::Text(s) => NaiveDate::parse_from_str(s.trim(), format).map_err(|_| CellError::Date {
            format,
            found: s.clone(),
        }),
        Cell::Empty => Err(CellError::Missing),
        other => Err(CellError::Date {
            format,
            found: describe(other),
        }),
    }
}

pub fn parse_decimal(cell: &Cell) -> Result<Decimal, CellError> {
    match cell {
        Cell::Text(s) => s.trim().parse::<Decimal>().map_err(|_| CellError::Decimal {
            found: s.clone(),
        }),
        Cell::Number(n) => Decimal::from_f64(*n).ok_or_else(|| CellError::Decimal {
            found: n.to_string(),
        }),
        Cell::Empty => Err(CellError::Missing),
        other => Err(CellError::Decimal {
            found: describe(other),
        }),
    }
}

/// Text content of a cell, with numbers rendered the way the sheet shows them.
pub fn parse_text(cell: &Cell) -> Result<String, CellError> {
    match cell {
        Cell::Text(s) => Ok(s.clone()),
        Cell::Number(n) => Ok(render_number(*n)),
        Cell::Empty => Err(CellError::Missing),
        other => Err(CellError::Text {
            found: describe(other),
        }),
    }
}

pub fn parse_optional_text(cell: &Cell) -> Result<String, CellError> {
    match cell {
        Cell::Empty => Ok(String::new()),
        other => parse_text(other),
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::days(serial.trunc() as i64))
}
