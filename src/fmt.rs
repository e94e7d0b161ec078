use rust_decimal::Decimal;

/// Format an amount with thousands separators and currency: -1,234.56 SEK
pub fn money(val: Decimal, currency: &str) -> String {
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    let sign = if val.is_sign_negative() && !val.is_zero() { "-" } else { "" };
    format!("{sign}{with_commas}.{dec_part} {currency}")
}
