use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{CanonicalStatement, TransactionRecord};

const HEADER: &str = "OFXHEADER:100
DATA:OFXSGML
VERSION:102
SECURITY:NONE
ENCODING:UTF-8
CHARSET:NONE
COMPRESSION:NONE
OLDFILEUID:NONE
NEWFILEUID:NONE
";

struct SgmlWriter {
    out: String,
}

impl SgmlWriter {
    fn open(&mut self, tag: &str) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn close(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn elem(&mut self, tag: &str, value: &str) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        self.out.push_str(&escape(value));
        self.out.push('\n');
    }

    fn status(&mut self) {
        self.open("STATUS");
        self.elem("CODE", "0");
        self.elem("SEVERITY", "INFO");
        self.close("STATUS");
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn ofx_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn ofx_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

fn write_line(w: &mut SgmlWriter, line: &TransactionRecord) {
    w.open("STMTTRN");
    let kind = if line.amount.is_sign_negative() { "DEBIT" } else { "CREDIT" };
    w.elem("TRNTYPE", kind);
    w.elem("DTPOSTED", &ofx_date(line.date));
    if let Some(user) = line.date_user {
        w.elem("DTUSER", &ofx_date(user));
    }
    w.elem("TRNAMT", &ofx_amount(line.amount));
    w.elem("FITID", &line.id);
    if !line.refnum.is_empty() {
        w.elem("CHECKNUM", &line.refnum);
    }
    w.elem("MEMO", &line.memo);
    w.close("STMTTRN");
}

/// Renders a statement as an OFX 1.02 SGML document.
pub fn to_ofx(statement: &CanonicalStatement, generated: NaiveDateTime) -> String {
    let summary = &statement.summary;
    let mut w = SgmlWriter {
        out: format!("{HEADER}\n"),
    };

    w.open("OFX");
    w.open("SIGNONMSGSRSV1");
    w.open("SONRS");
    w.status();
    w.elem("DTSERVER", &generated.format("%Y%m%d%H%M%S").to_string());
    w.elem("LANGUAGE", "ENG");
    w.close("SONRS");
    w.close("SIGNONMSGSRSV1");

    w.open("BANKMSGSRSV1");
    w.open("STMTTRNRS");
    w.elem("TRNUID", "0");
    w.status();
    w.open("STMTRS");
    w.elem("CURDEF", &summary.currency);
    w.open("BANKACCTFROM");
    w.elem("BANKID", &summary.bank_id);
    w.elem("ACCTID", &summary.account_id);
    w.elem("ACCTTYPE", "CHECKING");
    w.close("BANKACCTFROM");

    w.open("BANKTRANLIST");
    if let Some(start) = summary.start_date {
        w.elem("DTSTART", &ofx_date(start));
    }
    if let Some(end) = summary.end_date {
        w.elem("DTEND", &ofx_date(end));
    }
    for line in &statement.lines {
        write_line(&mut w, line);
    }
    w.close("BANKTRANLIST");

    w.open("LEDGERBAL");
    w.elem("BALAMT", &ofx_amount(summary.end_balance));
    let as_of = summary.end_date.unwrap_or_else(|| generated.date());
    w.elem("DTASOF", &ofx_date(as_of));
    w.close("LEDGERBAL");

    w.close("STMTRS");
    w.close("STMTTRNRS");
    w.close("BANKMSGSRSV1");
    w.close("OFX");
    w.out
}
