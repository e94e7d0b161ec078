use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single spreadsheet cell as handed over by the workbook reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

pub type RawRow = Vec<Cell>;

/// Statement-level facts taken from the header block of an export.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementSummary {
    pub account_id: String,
    pub bank_id: String,
    pub currency: String,
    pub end_balance: Decimal,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: String,
    pub date: NaiveDate,
    /// Point-of-sale date embedded in card transaction memos.
    pub date_user: Option<NaiveDate>,
    pub refnum: String,
    pub memo: String,
    pub amount: Decimal,
}

/// The summary plus every transaction line, in sheet order.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalStatement {
    pub summary: StatementSummary,
    pub lines: Vec<TransactionRecord>,
}
