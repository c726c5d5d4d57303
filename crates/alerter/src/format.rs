//! Number formatting for messages shown to agents (Brazilian Portuguese
//! conventions: `.` groups thousands, `,` separates decimals).

use rust_decimal::Decimal;

/// Groups an integer by thousands: `1234567` becomes `1.234.567`.
pub fn format_integer(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Formats a decimal with at most three fraction digits and no trailing zeros:
/// `150.50` becomes `150,5`, `1500.0` becomes `1.500`.
pub fn format_decimal(value: Decimal) -> String {
    let rendered = value.round_dp(3).normalize().to_string();
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => format!("{sign}{},{frac_part}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(unsigned)),
    }
}

/// `$` followed by the grouped amount.
pub fn format_currency(value: u64) -> String {
    format!("${}", format_integer(value))
}

pub fn format_currency_decimal(value: Decimal) -> String {
    format!("${}", format_decimal(value))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
