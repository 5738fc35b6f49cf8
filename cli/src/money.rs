//! Dollar/cent conversion for command-line input and output

use anyhow::{bail, Result};

/// Parse a dollar amount ("12", "12.5", "$1,250.75") into cents, exactly
pub fn parse_dollars(input: &str) -> Result<i64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        bail!("invalid dollar amount '{}'", input);
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        bail!("invalid dollar amount '{}'", input);
    }
    if fraction.len() > 2 {
        bail!("dollar amount '{}' has more than two decimal places", input);
    }

    let dollars: i64 = if whole.is_empty() { 0 } else { whole.parse()? };
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>()? * 10,
        _ => fraction.parse()?,
    };

    let total = dollars
        .checked_mul(100)
        .and_then(|d| d.checked_add(cents))
        .ok_or_else(|| anyhow::anyhow!("dollar amount '{}' is too large", input))?;

    Ok(if negative { -total } else { total })
}

/// Format cents as dollars, e.g. `-123456` → `-$1,234.56`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dollars() {
        assert_eq!(parse_dollars("100").unwrap(), 10_000);
        assert_eq!(parse_dollars("12.5").unwrap(), 1_250);
        assert_eq!(parse_dollars("$1,250.75").unwrap(), 125_075);
        assert_eq!(parse_dollars(".99").unwrap(), 99);
        assert_eq!(parse_dollars("-3.10").unwrap(), -310);
    }

    #[test]
    fn test_parse_dollars_rejects_garbage() {
        assert!(parse_dollars("").is_err());
        assert!(parse_dollars("abc").is_err());
        assert!(parse_dollars("1.234").is_err());
        assert!(parse_dollars("1e3").is_err());
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(6_000), "$60.00");
        assert_eq!(format_cents(123_456_789), "$1,234,567.89");
        assert_eq!(format_cents(-5), "-$0.05");
    }
}
