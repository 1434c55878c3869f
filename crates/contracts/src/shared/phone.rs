//! Indonesian mobile numbers as used for WhatsApp OTP delivery

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-().]").expect("valid regex"));
static NORMALIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^62[0-9]{8,13}$").expect("valid regex"));

/// Canonical `62…` form: separators removed, a leading `0` or `+62`
/// rewritten to `62`.
pub fn normalize_phone(raw: &str) -> String {
    let compact = SEPARATORS.replace_all(raw.trim(), "");
    if let Some(rest) = compact.strip_prefix("+62") {
        format!("62{}", rest)
    } else if let Some(rest) = compact.strip_prefix('0') {
        format!("62{}", rest)
    } else {
        compact.into_owned()
    }
}

pub fn is_valid_phone(raw: &str) -> bool {
    NORMALIZED.is_match(&normalize_phone(raw))
}

/// `6281234567890` → `628123*****90`, for "code sent to …" messages
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 8 {
        return phone.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_variants() {
        assert_eq!(normalize_phone("0812-3456-7890"), "6281234567890");
        assert_eq!(normalize_phone("+62 812 3456 7890"), "6281234567890");
        assert_eq!(normalize_phone("6281234567890"), "6281234567890");
        assert_eq!(normalize_phone(" (0812) 345.678 "), "62812345678");
    }

    #[test]
    fn test_validity() {
        assert!(is_valid_phone("081234567890"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("0812abc4567"));
        assert!(!is_valid_phone("1812345678901"));
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask_phone("6281234567890"), "628123*****90");
        assert_eq!(mask_phone("62812"), "62812");
    }
}
