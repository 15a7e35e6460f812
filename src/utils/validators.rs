use crate::error::{AppError, AppResult};
use regex::Regex;

/// Loose email shape check: something@something.something
pub fn validate_email(email: &str) -> AppResult<()> {
    let email_regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();

    if !email_regex.is_match(email) {
        return Err(AppError::ValidationError(format!(
            "Invalid email address: {email}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last+tag@shop.example.in").is_ok());
        assert!(validate_email("missing-at.example.com").is_err());
        assert!(validate_email("no@tld").is_err());
        assert!(validate_email("two@@signs.com").is_err());
        assert!(validate_email("").is_err());
    }
}
