//! Number and currency formatting (Indonesian grouping: `.` for thousands)

fn group_thousands(digits: &str, separator: char) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Integer with `.` thousand separators, e.g. `1234567` -> `"1.234.567"`
pub fn format_int(value: i64) -> String {
    let grouped = group_thousands(&value.unsigned_abs().to_string(), '.');
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// "Rp 150.000"
pub fn format_rupiah(amount: i64) -> String {
    format!("Rp {}", format_int(amount))
}

/// Volume with at most two decimals and `,` as decimal mark: "3,5 m³"
pub fn format_volume(volume_m3: f64) -> String {
    let text = format!("{:.2}", volume_m3);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} m³", text.replace('.', ","))
}

/// Decimal typed by a user; accepts both `2.5` and `2,5`
pub fn parse_decimal(text: &str) -> Option<f64> {
    let value = text.trim().replace(',', ".").parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_int() {
        assert_eq!(format_int(0), "0");
        assert_eq!(format_int(999), "999");
        assert_eq!(format_int(1000), "1.000");
        assert_eq!(format_int(-250000), "-250.000");
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(150_000), "Rp 150.000");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("2,5"), Some(2.5));
        assert_eq!(parse_decimal(" 4 "), Some(4.0));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(3.5), "3,5 m³");
        assert_eq!(format_volume(2.0), "2 m³");
        assert_eq!(format_volume(1.25), "1,25 m³");
    }
}
