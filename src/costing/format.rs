//! Display formatting for money and percentages

/// Format an amount as US dollars, e.g. `$1,234.56` or `-$2.00`
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let remainder = cents % 100;

    // "-$0.00" never shows up for tiny negative amounts
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    format!("{}${}.{:02}", sign, group_thousands(dollars), remainder)
}

/// Format a percentage with one decimal place, e.g. `80.0%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(2.0), "$2.00");
        assert_eq!(format_currency(8.5), "$8.50");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-2.0), "-$2.00");
        assert_eq!(format_currency(-1500.25), "-$1,500.25");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(80.0), "80.0%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(-60.0), "-60.0%");
        assert_eq!(format_percent(33.333), "33.3%");
    }
}
