use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, Table};
use log::info;

use crate::error::Result;
use crate::fmt::money;
use crate::format::ParseOptions;
use crate::models::CanonicalStatement;
use crate::ofx::to_ofx;
use crate::parser::StatementParser;
use crate::settings::load_settings;

pub fn output_path(input: &Path, output: Option<&str>) -> PathBuf {
    match output {
        Some(out) => PathBuf::from(out),
        None => input.with_extension("ofx"),
    }
}

pub fn run(path: &str, clean_memo: Option<&str>, dump: bool, output: Option<&str>) -> Result<()> {
    // Settle the configuration before touching the export.
    let clean_memo = load_settings()?.resolve_clean_memo(clean_memo)?;
    let input = PathBuf::from(path);

    let parser = StatementParser::open(&input, ParseOptions { clean_memo })?;
    info!(
        "Reading transactions for account {} (clean memo: {clean_memo})",
        parser.summary().account_id
    );
    let statement = parser.parse()?;

    if dump {
        print_statement(&statement);
        return Ok(());
    }

    let target = output_path(&input, output);
    let generated = chrono::Local::now().naive_local();
    std::fs::write(&target, to_ofx(&statement, generated))?;
    info!("Wrote {} lines to {}", statement.lines.len(), target.display());
    println!(
        "{} transactions written to {}",
        statement.lines.len(),
        target.display()
    );
    Ok(())
}

fn print_statement(statement: &CanonicalStatement) {
    let summary = &statement.summary;
    let period = match (summary.start_date, summary.end_date) {
        (Some(start), Some(end)) => format!("{start} - {end}"),
        _ => "unknown period".to_string(),
    };
    println!(
        "{} {} ({})",
        summary.bank_id.bold(),
        summary.account_id.bold(),
        period
    );
    println!(
        "Closing balance: {}",
        money(summary.end_balance, &summary.currency)
    );

    let mut table = Table::new();
    table.set_header(vec!["Date", "Card date", "Ref", "Memo", "Amount", "Id"]);
    for line in &statement.lines {
        let amount = money(line.amount, &summary.currency);
        let amount = if line.amount.is_sign_negative() {
            amount.red().to_string()
        } else {
            amount.green().to_string()
        };
        table.add_row(vec![
            Cell::new(line.date),
            Cell::new(line.date_user.map(|d| d.to_string()).unwrap_or_default()),
            Cell::new(&line.refnum),
            Cell::new(&line.memo),
            Cell::new(amount),
            Cell::new(&line.id[..12]),
        ]);
    }
    println!("{table}");
}
