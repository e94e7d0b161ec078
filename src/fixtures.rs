//! In-memory SEB export rows for tests.

use std::path::Path;

use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};

use crate::models::{Cell, RawRow};

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<Option<&str>> for Cell {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Cell::Empty, Cell::from)
    }
}

pub fn row(cells: &[Option<&str>]) -> RawRow {
    cells.iter().map(|c| Cell::from(*c)).collect()
}

pub fn header_rows(footer: &str) -> Vec<RawRow> {
    vec![
        row(&[
            Some("Privatkonto"),
            Some("Saldo"),
            Some("Disponibelt belopp"),
            Some("Beviljad kredit"),
            None,
            None,
        ]),
        row(&[
            Some("12345"),
            Some("1000.00"),
            Some("900.00"),
            Some("500.00"),
            None,
            None,
        ]),
        row(&[Some(footer), None, None, None, None, None]),
        row(&[None, None, None, None, None, None]),
        row(&[
            Some("Bokföringsdatum"),
            Some("Valutadatum"),
            Some("Verifikationsnummer"),
            Some("Text / mottagare"),
            Some("Belopp"),
            Some("Saldo"),
        ]),
    ]
}

pub fn data_row(date: &str, refnum: &str, memo: &str, amount: &str, balance: &str) -> RawRow {
    row(&[
        Some(date),
        Some(date),
        Some(refnum),
        Some(memo),
        Some(amount),
        Some(balance),
    ])
}

pub fn export(footer: &str, data: Vec<RawRow>) -> Vec<RawRow> {
    let mut rows = header_rows(footer);
    rows.extend(data);
    rows
}

/// Writes rows to a single-sheet xlsx; `Cell::Date` becomes a date-formatted number.
pub fn write_xlsx(path: &Path, rows: &[RawRow]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();
    for (r, cells) in rows.iter().enumerate() {
        let r = r as u32;
        for (c, cell) in cells.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    sheet.write_string(r, c, s)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(r, c, *n)?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(r, c, *b)?;
                }
                Cell::Date(d) => {
                    let dt =
                        ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)?;
                    sheet.write_datetime_with_format(r, c, &dt, &date_format)?;
                }
            }
        }
    }
    workbook.save(path)?;
    Ok(())
}
