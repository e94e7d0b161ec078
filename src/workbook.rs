use std::path::Path;

use calamine::{Data, Range, Reader};
use chrono::NaiveDate;
use log::info;

use crate::cells::excel_serial_to_date;
use crate::error::{LayoutError, Result};
use crate::models::{Cell, RawRow};

/// Forward-only rows of the first worksheet, anchored at cell A1.
pub struct SheetRows {
    range: Range<Data>,
    top: usize,
    left: usize,
    width: usize,
    next: usize,
}

impl SheetRows {
    pub fn new(range: Range<Data>) -> Self {
        let (top, left) = range
            .start()
            .map_or((0, 0), |(r, c)| (r as usize, c as usize));
        let width = left + range.width();
        Self {
            range,
            top,
            left,
            width,
            next: 0,
        }
    }
}

impl Iterator for SheetRows {
    type Item = RawRow;

    fn next(&mut self) -> Option<RawRow> {
        let idx = self.next;
        if idx >= self.top + self.range.height() {
            return None;
        }
        self.next += 1;
        if idx < self.top {
            return Some(vec![Cell::Empty; self.width]);
        }
        let r = idx - self.top;
        let row = (0..self.width)
            .map(|c| {
                if c < self.left {
                    Cell::Empty
                } else {
                    self.range
                        .get((r, c - self.left))
                        .map_or(Cell::Empty, to_cell)
                }
            })
            .collect();
        Some(row)
    }
}

pub fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map_or_else(|| Cell::Number(dt.as_f64()), Cell::Date),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map_or_else(|| Cell::Text(s.clone()), Cell::Date),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
    }
}

/// Opens a workbook and returns the rows of its first sheet.
pub fn open_rows(path: &Path) -> Result<SheetRows> {
    info!("Opening workbook {}", path.display());
    let mut workbook = calamine::open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LayoutError::new("worksheet", "workbook contains no worksheets"))??;
    Ok(SheetRows::new(range))
}
