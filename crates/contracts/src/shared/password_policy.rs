//! Password policy checked on the client before any auth request is sent

use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_LENGTH: usize = 8;

static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Ll}").expect("valid regex"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Lu}").expect("valid regex"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("valid regex"));

/// Per-rule outcome, so the form can tick rules off as the user types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordCheck {
    pub min_length: bool,
    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl PasswordCheck {
    pub fn is_valid(&self) -> bool {
        self.min_length && self.has_lowercase && self.has_uppercase && self.has_digit && self.has_symbol
    }

    /// Rule descriptions paired with whether they are met, in display order
    pub fn rules(&self) -> [(&'static str, bool); 5] {
        [
            ("Minimal 8 karakter", self.min_length),
            ("Mengandung huruf kecil", self.has_lowercase),
            ("Mengandung huruf besar", self.has_uppercase),
            ("Mengandung angka", self.has_digit),
            ("Mengandung simbol", self.has_symbol),
        ]
    }

    pub fn missing(&self) -> Vec<&'static str> {
        self.rules()
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(label, _)| label)
            .collect()
    }
}

pub fn check_password(password: &str) -> PasswordCheck {
    PasswordCheck {
        min_length: password.chars().count() >= MIN_LENGTH,
        has_lowercase: LOWERCASE.is_match(password),
        has_uppercase: UPPERCASE.is_match(password),
        has_digit: DIGIT.is_match(password),
        has_symbol: SYMBOL.is_match(password),
    }
}

/// Full check for a new password and its confirmation
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), String> {
    let check = check_password(password);
    if !check.is_valid() {
        return Err(format!("Kata sandi belum memenuhi syarat: {}", check.missing().join(", ")));
    }
    if password != confirm {
        return Err("Konfirmasi kata sandi tidak sama".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password() {
        let c = check_password("Sedot#2024");
        assert!(c.is_valid());
        assert!(c.missing().is_empty());
    }

    #[test]
    fn test_each_rule_independently() {
        assert!(!check_password("Ab1!").min_length);
        assert!(!check_password("ABCDEFG1!").has_lowercase);
        assert!(!check_password("abcdefg1!").has_uppercase);
        assert!(!check_password("Abcdefgh!").has_digit);
        assert!(!check_password("Abcdefgh1").has_symbol);
        assert!(!check_password("Abcdefg 1").has_symbol);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(!check_password("Ää1!äää").min_length);
        assert!(check_password("Ää1!ääää").min_length);
    }

    #[test]
    fn test_missing_lists_unmet_rules() {
        assert_eq!(
            check_password("abc").missing(),
            vec!["Minimal 8 karakter", "Mengandung huruf besar", "Mengandung angka", "Mengandung simbol"]
        );
    }

    #[test]
    fn test_validate_new_password() {
        assert!(validate_new_password("Sedot#2024", "Sedot#2024").is_ok());
        assert_eq!(
            validate_new_password("Sedot#2024", "Sedot#2025").unwrap_err(),
            "Konfirmasi kata sandi tidak sama"
        );
        assert!(validate_new_password("lemah", "lemah").unwrap_err().starts_with("Kata sandi belum"));
    }
}
