/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Trimmed, non-empty text, or `None` when the input is blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_ignores_case() {
        assert!(contains_ignore_case("Anna", "ann"));
        assert!(contains_ignore_case("COAT-002", "coat"));
        assert!(!contains_ignore_case("Ben", "ann"));
    }

    #[test]
    fn blank_values_are_none() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some(" ann ")), Some("ann"));
    }
}
