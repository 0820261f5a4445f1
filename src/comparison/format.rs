//! Display formatting for comparison cells

/// Thousands separator used in every comparison table
pub const THOUSANDS_SEPARATOR: char = ' ';

/// Round to the nearest integer and group thousands, e.g. 1234567.4 -> "1 234 567".
/// Missing and NaN values render as an empty cell.
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(v) if v.is_nan() => String::new(),
        Some(v) if v.is_infinite() => v.to_string(),
        Some(v) => group_thousands(&format!("{:.0}", v), THOUSANDS_SEPARATOR),
    }
}

/// Insert `separator` between each group of three integer digits
fn group_thousands(digits: &str, separator: char) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(sign.len() + digits.len() + digits.len() / 3);
    grouped.push_str(sign);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_groups_with_space() {
        assert_eq!(format_amount(Some(1234567.0)), "1 234 567");
        assert_eq!(format_amount(Some(100.0)), "100");
        assert_eq!(format_amount(Some(1000.0)), "1 000");
        assert_eq!(format_amount(Some(0.0)), "0");
        assert_eq!(format_amount(Some(999_999.7)), "1 000 000");
    }

    #[test]
    fn test_format_amount_rounds() {
        assert_eq!(format_amount(Some(64.3)), "64");
        assert_eq!(format_amount(Some(64.7)), "65");
        assert_eq!(format_amount(Some(-1234.6)), "-1 235");
        assert_eq!(format_amount(Some(-20.0)), "-20");
    }

    #[test]
    fn test_format_missing_is_blank() {
        assert_eq!(format_amount(None), "");
        assert_eq!(format_amount(Some(f64::NAN)), "");
    }
}
