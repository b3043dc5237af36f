//! Page category constants.
//!
//! Every page root carries an `id` of the form `{entity}--{category}` and a
//! `data-page-category` attribute with one of the values below, so a DOM id
//! copied from the inspector leads straight to the module that renders it.

/// Table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Analytical dashboard: cards, charts, summary tables.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_DASHBOARD];

/// `{entity}--{category}` with both parts non-empty and a known category.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && is_known_category(category),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("d410_inventory--dashboard"));
        assert!(is_valid_page_id("d410_inventory--list"));
        assert!(!is_valid_page_id("d410_inventory"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("d410_inventory--detail"));
    }
}
