use chrono::NaiveDate;
use log::warn;

use crate::cells::{cell_at, parse_decimal, parse_text};
use crate::error::{CellError, Result, StatementError};
use crate::format::SebFormat;
use crate::layout::HeaderBlock;
use crate::models::StatementSummary;

// Spreadsheet rows are 1-based.
const ACCOUNT_ROW: usize = 2;
const FOOTER_ROW: usize = 3;

/// Builds the statement summary from an already validated header block.
pub fn extract_summary(block: &HeaderBlock, format: &SebFormat) -> Result<StatementSummary> {
    let account_id = parse_text(cell_at(&block.account, 0)).map_err(|source| {
        StatementError::Value {
            row: ACCOUNT_ROW,
            column: "account",
            source,
        }
    })?;
    let end_balance = parse_decimal(cell_at(&block.account, 1)).map_err(|source| {
        StatementError::Value {
            row: ACCOUNT_ROW,
            column: "balance",
            source,
        }
    })?;

    let (start_date, end_date) = match statement_period(block, format)? {
        Some((start, end)) => (Some(start), Some(end)),
        None => {
            warn!("Statement footer carries no date range; leaving the period unset.");
            (None, None)
        }
    };

    Ok(StatementSummary {
        account_id,
        bank_id: format.bank_id.to_string(),
        currency: format.currency.to_string(),
        end_balance,
        start_date,
        end_date,
    })
}

fn statement_period(block: &HeaderBlock, format: &SebFormat) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let Some(text) = cell_at(&block.footer, 0).as_str() else {
        return Ok(None);
    };
    let Some(caps) = format.footer_range.captures(text) else {
        return Ok(None);
    };
    let parse = |idx: usize| {
        NaiveDate::parse_from_str(&caps[idx], format.date_format).map_err(|_| StatementError::Value {
            row: FOOTER_ROW,
            column: "period",
            source: CellError::Date {
                format: format.date_format,
                found: caps[idx].to_string(),
            },
        })
    };
    Ok(Some((parse(1)?, parse(2)?)))
}
