use std::path::Path;

use log::{debug, info, warn};

use crate::error::Result;
use crate::format::{ParseOptions, SebFormat};
use crate::layout::{self, HeaderBlock, HEADER_ROWS};
use crate::models::{CanonicalStatement, RawRow, StatementSummary, TransactionRecord};
use crate::record::RecordParser;
use crate::summary::extract_summary;
use crate::workbook::{open_rows, SheetRows};

/// Validates the header block up front, then hands out the transaction lines.
pub struct StatementParser<R> {
    rows: R,
    format: SebFormat,
    options: ParseOptions,
    summary: StatementSummary,
}

impl StatementParser<SheetRows> {
    pub fn open(path: &Path, options: ParseOptions) -> Result<Self> {
        let format = SebFormat::new()?;
        Self::new(open_rows(path)?, format, options)
    }
}

impl<R> StatementParser<R>
where
    R: Iterator<Item = RawRow>,
{
    pub fn new(mut rows: R, format: SebFormat, options: ParseOptions) -> Result<Self> {
        let block = HeaderBlock::take(&mut rows)?;
        if let Err(err) = layout::validate(&block, &format) {
            for violation in layout::audit(&block, &format) {
                warn!("Layout check failed: {violation}");
            }
            return Err(err.into());
        }
        let summary = extract_summary(&block, &format)?;
        info!(
            "Account {} closing balance {} {}",
            summary.account_id, summary.end_balance, summary.currency
        );
        Ok(Self {
            rows,
            format,
            options,
            summary,
        })
    }

    pub fn summary(&self) -> &StatementSummary {
        &self.summary
    }

    pub fn records(self) -> Records<R> {
        Records {
            rows: self.rows,
            format: self.format,
            options: self.options,
            row_number: HEADER_ROWS,
            failed: false,
        }
    }

    /// Parses every line; the first bad row fails the whole statement.
    pub fn parse(self) -> Result<CanonicalStatement> {
        let summary = self.summary.clone();
        let lines = self.records().collect::<Result<Vec<_>>>()?;
        debug!("Parsed {} transaction lines", lines.len());
        Ok(CanonicalStatement { summary, lines })
    }
}

/// Transaction lines in sheet order. Yields nothing more after an error.
pub struct Records<R> {
    rows: R,
    format: SebFormat,
    options: ParseOptions,
    row_number: usize,
    failed: bool,
}

impl<R> Iterator for Records<R>
where
    R: Iterator<Item = RawRow>,
{
    type Item = Result<TransactionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let row = self.rows.next()?;
        self.row_number += 1;
        let result = RecordParser::new(&self.format, self.options).parse(&row, self.row_number);
        self.failed = result.is_err();
        Some(result)
    }
}

impl<R> std::iter::FusedIterator for Records<R> where R: std::iter::FusedIterator<Item = RawRow> {}
