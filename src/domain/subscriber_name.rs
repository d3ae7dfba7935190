use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SubscriberNameValidationError {
    #[error("Name must be at least 2 characters")]
    TooShort,
    #[error("Name must be less than 100 characters")]
    TooLong,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubscriberName(String);

impl SubscriberName {
    pub const MIN_LENGTH: usize = 2;
    pub const MAX_LENGTH: usize = 100;

    pub fn parse(s: String) -> Result<Self, SubscriberNameValidationError> {
        let s = s.trim();
        let length = s.graphemes(true).count();

        if length < Self::MIN_LENGTH {
            Err(SubscriberNameValidationError::TooShort)
        } else if length > Self::MAX_LENGTH {
            Err(SubscriberNameValidationError::TooLong)
        } else {
            Ok(Self(s.to_string()))
        }
    }
}

impl AsRef<str> for SubscriberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
