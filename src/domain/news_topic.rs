use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum NewsTopicValidationError {
    #[error("Topic must be at least 2 characters")]
    TooShort,
    #[error("Topic must be less than 100 characters")]
    TooLong,
}

/// A free-form news topic, e.g. "Technology" or "Formula 1".
#[derive(Clone, Debug, PartialEq)]
pub struct NewsTopic(String);

impl NewsTopic {
    pub const MIN_LENGTH: usize = 2;
    pub const MAX_LENGTH: usize = 100;

    pub fn parse(s: String) -> Result<Self, NewsTopicValidationError> {
        let s = s.trim();
        let length = s.graphemes(true).count();

        if length < Self::MIN_LENGTH {
            Err(NewsTopicValidationError::TooShort)
        } else if length > Self::MAX_LENGTH {
            Err(NewsTopicValidationError::TooLong)
        } else {
            Ok(Self(s.to_string()))
        }
    }
}

impl AsRef<str> for NewsTopic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
