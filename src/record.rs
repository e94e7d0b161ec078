use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::cells::{cell_at, parse_date, parse_decimal, parse_optional_text, parse_text};
use crate::error::{CellError, Result, StatementError};
use crate::format::{ParseOptions, SebFormat};
use crate::models::{RawRow, TransactionRecord};

/// Deterministic identity of a transaction line.
///
/// SHA-256 over posting date, amount, memo and reference number joined by
/// U+001F. The amount is normalized, so `-150.00` and `-150` agree.
pub fn fingerprint(date: NaiveDate, amount: Decimal, memo: &str, refnum: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.format("%Y-%m-%d").to_string().as_bytes());
    hasher.update([0x1f]);
    hasher.update(amount.normalize().to_string().as_bytes());
    hasher.update([0x1f]);
    hasher.update(memo.as_bytes());
    hasher.update([0x1f]);
    hasher.update(refnum.as_bytes());
    hex::encode(hasher.finalize())
}

/// Splits a card memo such as `WIRSTRÖMS PU/14-12-31` into its text and
/// point-of-sale date.
pub fn split_card_memo<'a>(memo: &'a str, format: &SebFormat) -> Option<(&'a str, NaiveDate)> {
    let caps = format.card_memo.captures(memo)?;
    let text = caps.get(1)?.as_str();
    let date = NaiveDate::parse_from_str(caps.get(2)?.as_str(), format.card_date_format).ok()?;
    Some((text, date))
}

pub struct RecordParser<'a> {
    format: &'a SebFormat,
    options: ParseOptions,
}

impl<'a> RecordParser<'a> {
    pub fn new(format: &'a SebFormat, options: ParseOptions) -> Self {
        Self { format, options }
    }

    /// Converts one data row; `row_number` is the 1-based sheet row used in errors.
    pub fn parse(&self, row: &RawRow, row_number: usize) -> Result<TransactionRecord> {
        let fmt = self.format;
        let at = move |idx: usize| cell_at(row, idx);
        let wrap = |idx: usize| {
            let column = fmt.column_names[idx];
            move |source: CellError| StatementError::Value {
                row: row_number,
                column,
                source,
            }
        };

        let date = parse_date(at(0), fmt.date_format).map_err(wrap(0))?;
        // Value date is validated but not carried into the record.
        parse_date(at(1), fmt.date_format).map_err(wrap(1))?;
        let refnum = parse_optional_text(at(2)).map_err(wrap(2))?;
        let raw_memo = parse_text(at(3)).map_err(wrap(3))?;
        let amount = parse_decimal(at(4)).map_err(wrap(4))?;

        let (memo, date_user) = match split_card_memo(&raw_memo, fmt) {
            Some((text, card_date)) if self.options.clean_memo => (text.to_string(), Some(card_date)),
            Some((_, card_date)) => (raw_memo.clone(), Some(card_date)),
            None => (raw_memo.clone(), None),
        };

        let id = fingerprint(date, amount, &memo, &refnum);
        debug!("Row {row_number}: {date} {amount} {memo:?} -> {id}");

        Ok(TransactionRecord {
            id,
            date,
            date_user,
            refnum,
            memo,
            amount,
        })
    }
}
