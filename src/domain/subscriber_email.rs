use {unicode_segmentation::UnicodeSegmentation, validator::validate_email};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SubscriberEmailValidationError {
    #[error("Please enter a valid email address")]
    InvalidFormat,
    #[error("Email must be less than 255 characters")]
    TooLong,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub const MAX_LENGTH: usize = 255;

    pub fn parse(s: String) -> Result<Self, SubscriberEmailValidationError> {
        let s = s.trim();

        if !validate_email(s) || !has_top_level_domain(s) {
            Err(SubscriberEmailValidationError::InvalidFormat)
        } else if s.graphemes(true).count() > Self::MAX_LENGTH {
            Err(SubscriberEmailValidationError::TooLong)
        } else {
            Ok(Self(s.to_string()))
        }
    }
}

/// Requires a dotted domain ending in an alphabetic label of 2+ characters,
/// so `user@localhost` and `a@b.c` are rejected.
fn has_top_level_domain(s: &str) -> bool {
    s.rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .map_or(false, |(_, tld)| {
            tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        })
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
