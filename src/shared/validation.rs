use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Regex for URL slugs (categories, image folders)
    /// Must be lowercase alphanumeric with single hyphens between segments
    /// - Valid: "mens-shoes", "sale2024", "a"
    /// - Invalid: "-shoes", "shoes-", "mens--shoes", "Shoes", "mens_shoes"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for customer phone numbers: optional leading "+", 8 to 15 digits
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{8,15}$").unwrap();
}

/// Derive a slug from a display name ("Men's Shoes & Bags" -> "men-s-shoes-bags")
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// `validator` hook for money amounts
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("must not be negative".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("mens-shoes"));
        assert!(SLUG_REGEX.is_match("sale2024"));
        assert!(SLUG_REGEX.is_match("a"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-shoes")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("shoes-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("mens--shoes")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Shoes")); // uppercase
        assert!(!SLUG_REGEX.is_match("mens_shoes")); // underscore
        assert!(!SLUG_REGEX.is_match(""));
        assert!(!SLUG_REGEX.is_match("mens shoes"));
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("+6281234567890"));
        assert!(PHONE_REGEX.is_match("02112345678"));
        assert!(!PHONE_REGEX.is_match("1234567"));
        assert!(!PHONE_REGEX.is_match("0812-3456-7890"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Men's Shoes & Bags"), "men-s-shoes-bags");
        assert_eq!(slugify("  Summer Sale 2024  "), "summer-sale-2024");
        assert_eq!(slugify("Électronique"), "lectronique");
        assert_eq!(slugify("---"), "");
        assert!(SLUG_REGEX.is_match(&slugify("Home & Living")));
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(1999, 2)).is_ok());
        assert!(validate_non_negative(&Decimal::new(-1, 2)).is_err());
    }
}
