use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9]{10,15}$").unwrap();
}

/// A contact identifier - the routing key for OTP challenges.
///
/// Classification is by format, never by an explicit flag: anything
/// containing '@' must parse as an email address, everything else must look
/// like a phone number (10-15 digits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    Phone(String),
}

impl Identifier {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.contains('@') {
            EMAIL_RE
                .is_match(raw)
                .then(|| Self::Email(raw.to_string()))
        } else {
            PHONE_RE
                .is_match(raw)
                .then(|| Self::Phone(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(s) | Self::Phone(s) => s,
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(self, Self::Email(_))
    }

    /// Human-readable kind, used in conflict messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Phone(_) => "phone number",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_email() {
        assert_eq!(
            Identifier::parse("user@example.com"),
            Some(Identifier::Email("user@example.com".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_email() {
        assert_eq!(Identifier::parse("user@example"), None);
        assert_eq!(Identifier::parse("@example.com"), None);
    }

    #[test]
    fn parses_valid_phone() {
        assert_eq!(
            Identifier::parse("9999999999"),
            Some(Identifier::Phone("9999999999".to_string()))
        );
        assert_eq!(
            Identifier::parse("+15551234567"),
            Some(Identifier::Phone("+15551234567".to_string()))
        );
    }

    #[test]
    fn rejects_short_phone() {
        assert_eq!(Identifier::parse("12345"), None);
    }

    #[test]
    fn rejects_phone_with_letters() {
        assert_eq!(Identifier::parse("99999abc99"), None);
    }

    #[test]
    fn anything_with_at_sign_is_classified_as_email() {
        // Must be a valid email then; it never falls back to phone parsing
        assert_eq!(Identifier::parse("12345@67890"), None);
    }
}
