//! Page category constants.
//!
//! Every routed page declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"a003_reservation--wizard"`) and a `data-page-category`.

/// Table with filters and pagination
pub const PAGE_CAT_LIST: &str = "list";

/// Single record, form or detail
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Dashboard (admin calendar)
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Multi-step flow (reservation wizard, OTP)
pub const PAGE_CAT_USECASE: &str = "usecase";

/// Sign-in and account pages shown outside the shell
pub const PAGE_CAT_AUTH: &str = "auth";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_USECASE,
    PAGE_CAT_AUTH,
];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, cat)) if !entity.is_empty() && !cat.is_empty())
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("d400_admin_calendar--dashboard"));
        assert!(!is_valid_page_id("calendar"));
        assert!(!is_valid_page_id("--list"));
        assert!(is_known_category(PAGE_CAT_AUTH));
        assert!(!is_known_category("legacy"));
    }
}
