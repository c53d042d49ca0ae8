//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a wedding slug.
pub const MAX_SLUG_LENGTH: usize = 64;

/// Maximum party size accepted on any path.
pub const MAX_PARTY_SIZE: i32 = 20;

lazy_static::lazy_static! {
    static ref SLUG_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
}

/// Validates a wedding slug: lowercase alphanumeric segments joined by
/// single hyphens, no leading/trailing hyphen.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        let mut err = ValidationError::new("slug_length");
        err.message = Some(format!("Slug must be 1-{} characters", MAX_SLUG_LENGTH).into());
        return Err(err);
    }
    if !SLUG_REGEX.is_match(slug) {
        let mut err = ValidationError::new("slug_format");
        err.message =
            Some("Slug may contain only lowercase letters, digits and hyphens".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a party size is within the accepted range.
pub fn validate_party_size(size: i32) -> Result<(), ValidationError> {
    if (1..=MAX_PARTY_SIZE).contains(&size) {
        Ok(())
    } else {
        let mut err = ValidationError::new("party_size_range");
        err.message =
            Some(format!("number_of_guests must be between 1 and {}", MAX_PARTY_SIZE).into());
        Err(err)
    }
}

/// Lowercases and trims an email for storage and lookup.
///
/// The (wedding, email) pair is the public RSVP identity; normalizing here
/// keeps the upsert key stable regardless of how the visitor typed it.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        for slug in ["anna-and-ben", "wedding2026", "a", "x-1-y"] {
            assert!(validate_slug(slug).is_ok(), "slug '{}' should pass", slug);
        }
    }

    #[test]
    fn test_invalid_slugs() {
        for slug in ["", "-leading", "trailing-", "double--hyphen", "UpperCase", "with space", "unicode-café"] {
            assert!(validate_slug(slug).is_err(), "slug '{}' should fail", slug);
        }
    }

    #[test]
    fn test_slug_length_limit() {
        let long = "a".repeat(MAX_SLUG_LENGTH);
        assert!(validate_slug(&long).is_ok());
        let too_long = "a".repeat(MAX_SLUG_LENGTH + 1);
        assert!(validate_slug(&too_long).is_err());
    }

    #[test]
    fn test_party_size_bounds() {
        assert!(validate_party_size(1).is_ok());
        assert!(validate_party_size(MAX_PARTY_SIZE).is_ok());
        assert!(validate_party_size(0).is_err());
        assert!(validate_party_size(-3).is_err());
        assert!(validate_party_size(MAX_PARTY_SIZE + 1).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Anna@Example.COM "), "anna@example.com");
        assert_eq!(normalize_email("plain@x.com"), "plain@x.com");
    }
}
