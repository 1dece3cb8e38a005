//! Text matching helpers for keyword search.

/// Case-insensitive substring match. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Same as [`contains_ignore_case`] for optional fields; `None` never matches a non-empty needle.
pub fn opt_contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(h) => contains_ignore_case(h, needle),
        None => needle.is_empty(),
    }
}

/// Canonical form used for email comparisons and uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        assert!(contains_ignore_case("Engineering", "gIN"));
        assert!(!contains_ignore_case("Sales", "eng"));
        assert!(contains_ignore_case("anything", ""));
    }

    #[test]
    fn optional_fields() {
        assert!(opt_contains_ignore_case(Some("Berlin"), "ber"));
        assert!(!opt_contains_ignore_case(None, "ber"));
        assert!(opt_contains_ignore_case(None, ""));
    }
}
