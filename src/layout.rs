use log::info;

use crate::error::LayoutError;
use crate::format::{SebFormat, COLUMNS};
use crate::models::{Cell, RawRow};

/// Rows preceding the first transaction line.
pub const HEADER_ROWS: usize = 5;

/// The first five rows of an export, buffered once from the forward-only source.
#[derive(Debug, Clone)]
pub struct HeaderBlock {
    pub summary_header: RawRow,
    pub account: RawRow,
    pub footer: RawRow,
    pub padding: RawRow,
    pub statement_header: RawRow,
}

impl HeaderBlock {
    pub fn take<I>(rows: &mut I) -> Result<Self, LayoutError>
    where
        I: Iterator<Item = RawRow>,
    {
        info!("Checking that sheet has at least {HEADER_ROWS} rows.");
        let taken: Vec<RawRow> = rows.by_ref().take(HEADER_ROWS).collect();
        let found = taken.len();
        let [summary_header, account, footer, padding, statement_header]: [RawRow; HEADER_ROWS] =
            taken.try_into().map_err(|_| {
                LayoutError::new(
                    "row count",
                    format!("expected at least {HEADER_ROWS} rows, found {found}"),
                )
            })?;
        Ok(Self {
            summary_header,
            account,
            footer,
            padding,
            statement_header,
        })
    }
}

pub type RuleCheck = fn(&HeaderBlock, &SebFormat) -> Result<(), String>;

pub struct LayoutRule {
    pub name: &'static str,
    pub check: RuleCheck,
}

impl LayoutRule {
    pub fn apply(&self, block: &HeaderBlock, format: &SebFormat) -> Result<(), LayoutError> {
        info!("Verifying {}.", self.name);
        (self.check)(block, format).map_err(|message| LayoutError::new(self.name, message))
    }
}

pub const RULES: &[LayoutRule] = &[
    LayoutRule {
        name: "summary header",
        check: check_summary_header,
    },
    LayoutRule {
        name: "summary footer",
        check: check_summary_footer,
    },
    LayoutRule {
        name: "padding row",
        check: check_padding_row,
    },
    LayoutRule {
        name: "statement header",
        check: check_statement_header,
    },
];

/// Stops at the first rule that fails.
pub fn validate(block: &HeaderBlock, format: &SebFormat) -> Result<(), LayoutError> {
    for rule in RULES {
        rule.apply(block, format)?;
    }
    info!("Everything is OK!");
    Ok(())
}

/// Runs every rule and reports all violations.
pub fn audit(block: &HeaderBlock, format: &SebFormat) -> Vec<LayoutError> {
    RULES
        .iter()
        .filter_map(|rule| rule.apply(block, format).err())
        .collect()
}

fn show(cell: Option<&Cell>) -> String {
    match cell {
        None | Some(Cell::Empty) => "<empty>".to_string(),
        Some(Cell::Text(s)) => format!("{s:?}"),
        Some(other) => format!("{other:?}"),
    }
}

fn require_empty_from(row: &[Cell], from: usize) -> Result<(), String> {
    match row.iter().enumerate().skip(from).find(|(_, c)| !c.is_empty()) {
        Some((idx, cell)) => Err(format!(
            "column {} should be empty, found {}",
            idx + 1,
            show(Some(cell))
        )),
        None => Ok(()),
    }
}

fn check_summary_header(block: &HeaderBlock, format: &SebFormat) -> Result<(), String> {
    let row = &block.summary_header;
    for (offset, label) in format.summary_labels.iter().enumerate() {
        let idx = offset + 1;
        let cell = row.get(idx);
        if cell.and_then(Cell::as_str) != Some(*label) {
            return Err(format!(
                "column {} should be {label:?}, found {}",
                idx + 1,
                show(cell)
            ));
        }
    }
    require_empty_from(row, format.summary_labels.len() + 1)
}

fn check_summary_footer(block: &HeaderBlock, format: &SebFormat) -> Result<(), String> {
    let row = &block.footer;
    let first = row.first();
    match first.and_then(Cell::as_str) {
        Some(text) if format.is_footer(text) => require_empty_from(row, 1),
        _ if !block.account.iter().all(Cell::is_empty)
            && row.get(1).is_some_and(|c| !c.is_empty()) =>
        {
            Err(format!(
                "expected the date range footer after one account row, found another account row {}; multi-account exports are unsupported",
                show(first)
            ))
        }
        _ => Err(format!(
            "expected the date range footer after one account row, found {}",
            show(first)
        )),
    }
}

fn check_padding_row(block: &HeaderBlock, _format: &SebFormat) -> Result<(), String> {
    require_empty_from(&block.padding, 0)
}

fn check_statement_header(block: &HeaderBlock, format: &SebFormat) -> Result<(), String> {
    let row = &block.statement_header;
    for (idx, pattern) in format.column_headers.iter().enumerate() {
        let cell = row.get(idx);
        let matched = cell
            .and_then(Cell::as_str)
            .is_some_and(|text| pattern.is_match(text));
        if !matched {
            return Err(format!(
                "column {} ({}) should match {}, found {}",
                idx + 1,
                format.column_names[idx],
                pattern.as_str(),
                show(cell)
            ));
        }
    }
    require_empty_from(row, COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{export, header_rows, row};

    fn block(rows: Vec<RawRow>) -> HeaderBlock {
        HeaderBlock::take(&mut rows.into_iter()).unwrap()
    }

    fn valid_block() -> HeaderBlock {
        block(header_rows("Datum: 2014-01-01 - 2014-01-31"))
    }

    fn fmt() -> SebFormat {
        SebFormat::new().unwrap()
    }

    #[test]
    fn test_valid_layout_passes() {
        let fmt = fmt();
        assert!(validate(&valid_block(), &fmt).is_ok());
        assert!(audit(&valid_block(), &fmt).is_empty());
    }

    #[test]
    fn test_sentinel_footer_passes() {
        let fmt = fmt();
        let b = block(header_rows("Datum:  -"));
        assert!(validate(&b, &fmt).is_ok());
    }

    #[test]
    fn test_too_few_rows() {
        let mut rows = header_rows("Datum:  -");
        rows.truncate(4);
        let err = HeaderBlock::take(&mut rows.into_iter()).unwrap_err();
        assert_eq!(err.rule, "row count");
        assert!(err.message.contains("found 4"));
    }

    #[test]
    fn test_take_leaves_data_rows_in_source() {
        let rows = export("Datum:  -", vec![row(&[Some("data")])]);
        let mut iter = rows.into_iter();
        HeaderBlock::take(&mut iter).unwrap();
        assert_eq!(iter.next(), Some(row(&[Some("data")])));
    }

    #[test]
    fn test_wrong_summary_label() {
        let mut b = valid_block();
        b.summary_header[2] = Cell::from("Disponibelt");
        let err = validate(&b, &fmt()).unwrap_err();
        assert_eq!(err.rule, "summary header");
        assert!(err.message.contains("Disponibelt belopp"));
    }

    #[test]
    fn test_extra_cell_in_summary_header() {
        let mut b = valid_block();
        b.summary_header[5] = Cell::from("Extra");
        let err = validate(&b, &fmt()).unwrap_err();
        assert_eq!(err.rule, "summary header");
        assert!(err.message.contains("column 6"));
    }

    #[test]
    fn test_wider_sheet_must_be_empty_beyond_layout() {
        let mut b = valid_block();
        b.padding.push(Cell::from("stray"));
        let err = validate(&b, &fmt()).unwrap_err();
        assert_eq!(err.rule, "padding row");
        assert!(err.message.contains("column 7"));
    }

    #[test]
    fn test_footer_must_match_pattern() {
        let b = block(header_rows("Period 2014"));
        let err = validate(&b, &fmt()).unwrap_err();
        assert_eq!(err.rule, "summary footer");
    }

    #[test]
    fn test_footer_extra_cell() {
        let mut b = valid_block();
        b.footer[3] = Cell::from("x");
        let err = validate(&b, &fmt()).unwrap_err();
        assert_eq!(err.rule, "summary footer");
    }

    #[test]
    fn test_second_account_row_rejected() {
        let mut rows = header_rows("Datum:  -");
        let second_account = row(&[
            Some("67890"),
            Some("10.00"),
            Some("10.00"),
            Some("0.00"),
            None,
            None,
        ]);
        rows.insert(2, second_account);
        let b = block(rows);
        let err = validate(&b, &fmt()).unwrap_err();
        assert_eq!(err.rule, "summary footer");
        assert!(err.message.contains("multi-account"));
    }

    #[test]
    fn test_padding_row_must_be_empty() {
        let mut b = valid_block();
        b.padding[0] = Cell::from(" ");
        let err = validate(&b, &fmt()).unwrap_err();
        assert_eq!(err.rule, "padding row");
    }

    #[test]
    fn test_statement_header_label_mismatch() {
        let mut b = valid_block();
        b.statement_header[4] = Cell::from("Amount");
        let err = validate(&b, &fmt()).unwrap_err();
        assert_eq!(err.rule, "statement header");
        assert!(err.message.contains("amount"));
    }

    #[test]
    fn test_statement_header_is_case_sensitive() {
        let mut b = valid_block();
        b.statement_header[5] = Cell::from("saldo");
        assert!(validate(&b, &fmt()).is_err());
    }

    #[test]
    fn test_statement_header_accepts_hyphenated_labels() {
        let mut b = valid_block();
        b.statement_header[0] = Cell::from("Bokförings-\ndatum");
        b.statement_header[1] = Cell::from("Valuta\u{ad}datum");
        assert!(validate(&b, &fmt()).is_ok());
    }

    #[test]
    fn test_validate_stops_at_first_failure_audit_reports_all() {
        let mut b = valid_block();
        b.summary_header[1] = Cell::from("Balance");
        b.padding[2] = Cell::from("x");
        let fmt = fmt();
        assert_eq!(validate(&b, &fmt).unwrap_err().rule, "summary header");
        let rules: Vec<_> = audit(&b, &fmt).iter().map(|e| e.rule).collect();
        assert_eq!(rules, vec!["summary header", "padding row"]);
    }

    #[test]
    fn test_each_rule_runs_independently() {
        let fmt = fmt();
        let mut b = valid_block();
        b.statement_header[0] = Cell::Empty;
        for rule in RULES {
            let result = rule.apply(&b, &fmt);
            assert_eq!(result.is_err(), rule.name == "statement header", "{}", rule.name);
        }
    }
}
