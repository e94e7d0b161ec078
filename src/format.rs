use regex::Regex;

use crate::error::{Result, StatementError};

/// Everything that is fixed about the SEB export layout.
#[derive(Debug, Clone)]
pub struct SebFormat {
    pub bank_id: &'static str,
    pub currency: &'static str,
    pub date_format: &'static str,
    pub card_date_format: &'static str,
    pub summary_labels: [&'static str; 3],
    pub column_names: [&'static str; 6],
    pub footer_range: Regex,
    pub footer_empty: Regex,
    pub column_headers: [Regex; 6],
    pub card_memo: Regex,
}

/// Width of the header block and of the data rows.
pub const COLUMNS: usize = 6;

impl SebFormat {
    pub fn new() -> Result<Self> {
        Ok(Self {
            bank_id: "SEB",
            currency: "SEK",
            date_format: "%Y-%m-%d",
            card_date_format: "%y-%m-%d",
            summary_labels: ["Saldo", "Disponibelt belopp", "Beviljad kredit"],
            column_names: [
                "posting date",
                "value date",
                "reference number",
                "description",
                "amount",
                "balance",
            ],
            footer_range: Regex::new(
                r"^(?:Datum|Date): ([0-9]{4}-[0-9]{2}-[0-9]{2}) - ([0-9]{4}-[0-9]{2}-[0-9]{2})$",
            )?,
            footer_empty: Regex::new(r"^(?:Datum|Date): +-")?,
            column_headers: [
                Regex::new("^Bokförings(?:\u{ad}|-?\r?\n)?datum$")?,
                Regex::new("^Valuta(?:\u{ad}|-?\r?\n)?datum$")?,
                Regex::new("^Verifikations(?:\u{ad}|-?\r?\n)?nummer$")?,
                Regex::new("^Text / mottagare$")?,
                Regex::new("^Belopp$")?,
                Regex::new("^Saldo$")?,
            ],
            card_memo: Regex::new(r"^(.*)/([0-9]{2}-[0-9]{2}-[0-9]{2})$")?,
        })
    }

    pub fn is_footer(&self, text: &str) -> bool {
        self.footer_range.is_match(text) || self.footer_empty.is_match(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Strip the `/YY-MM-DD` card date suffix from memos.
    pub clean_memo: bool,
}

pub fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "True" | "true" | "1" => Ok(true),
        "False" | "false" | "0" => Ok(false),
        _ => Err(StatementError::Config(format!(
            "Can't parse boolean value for clean-memo: {value}"
        ))),
    }
}
