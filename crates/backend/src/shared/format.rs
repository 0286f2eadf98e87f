/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Formats a percentage rounded to one decimal with an explicit sign.
///
/// Exactly zero (after rounding) carries no sign; non-finite values render
/// as zero.
///
/// ```
/// use backend::shared::format::format_percent_label;
/// assert_eq!(format_percent_label(12.345), "+12.3%");
/// assert_eq!(format_percent_label(-7.0), "-7.0%");
/// assert_eq!(format_percent_label(0.0), "0.0%");
/// ```
pub fn format_percent_label(value: f64) -> String {
    if !value.is_finite() {
        return "0.0%".to_string();
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded > 0.0 {
        format!("+{:.1}%", rounded)
    } else if rounded < 0.0 {
        format!("-{:.1}%", rounded.abs())
    } else {
        "0.0%".to_string()
    }
}

/// Two-decimal amount with thousands separators, e.g. `PEN 1.234,50`.
pub fn format_money(currency: &str, amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{} {}{},{:02}",
        currency,
        sign,
        format_number((cents / 100) as usize),
        cents % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_percent_label() {
        assert_eq!(format_percent_label(100.0), "+100.0%");
        assert_eq!(format_percent_label(-100.0), "-100.0%");
        assert_eq!(format_percent_label(0.04), "0.0%");
        assert_eq!(format_percent_label(-0.04), "0.0%");
        assert_eq!(format_percent_label(0.05), "+0.1%");
        assert_eq!(format_percent_label(f64::NAN), "0.0%");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("PEN", 1234.5), "PEN 1.234,50");
        assert_eq!(format_money("USD", 0.0), "USD 0,00");
        assert_eq!(format_money("PEN", -12.5), "PEN -12,50");
    }
}
