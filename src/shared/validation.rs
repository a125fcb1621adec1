use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();

    /// Regex for Indonesian telephone numbers, local (08xx) or international (+628xx / 628xx)
    pub static ref TELEPHONE_REGEX: Regex = Regex::new(r"^(\+62|62|0)8[0-9]{7,12}$").unwrap();

    /// Six digit one-time password
    pub static ref OTP_REGEX: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_regex() {
        assert!(USERNAME_REGEX.is_match("john_doe"));
        assert!(USERNAME_REGEX.is_match("_admin"));
        assert!(!USERNAME_REGEX.is_match("123user"));
        assert!(!USERNAME_REGEX.is_match("user name"));
        assert!(!USERNAME_REGEX.is_match(""));
    }

    #[test]
    fn test_telephone_regex() {
        assert!(TELEPHONE_REGEX.is_match("081234567890"));
        assert!(TELEPHONE_REGEX.is_match("+6281234567890"));
        assert!(TELEPHONE_REGEX.is_match("6281234567"));
        assert!(!TELEPHONE_REGEX.is_match("0212345678"));
        assert!(!TELEPHONE_REGEX.is_match("08-1234"));
    }

    #[test]
    fn test_otp_regex() {
        assert!(OTP_REGEX.is_match("012345"));
        assert!(!OTP_REGEX.is_match("12345"));
        assert!(!OTP_REGEX.is_match("12a456"));
    }
}
