use super::{NewsTopic, SubscriberEmail, SubscriberName};

use std::collections::BTreeMap;

/// A subscription that passed validation and may be sent to the store.
#[derive(Clone, Debug, PartialEq)]
pub struct SubscriptionRequest {
    pub name: SubscriberName,
    pub email: SubscriberEmail,
    pub topic: NewsTopic,
}

impl SubscriptionRequest {
    /// Validates all three fields independently, so every invalid field is
    /// reported at once.
    pub fn parse(name: String, email: String, topic: String) -> Result<Self, FieldErrors> {
        let name = SubscriberName::parse(name);
        let email = SubscriberEmail::parse(email);
        let topic = NewsTopic::parse(topic);

        match (name, email, topic) {
            (Ok(name), Ok(email), Ok(topic)) => Ok(Self { name, email, topic }),
            (name, email, topic) => {
                let mut errors = FieldErrors::default();
                if let Err(e) = name {
                    errors.insert(Field::Name, e.to_string());
                }
                if let Err(e) = email {
                    errors.insert(Field::Email, e.to_string());
                }
                if let Err(e) = topic {
                    errors.insert(Field::Topic, e.to_string());
                }
                Err(errors)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Topic,
}

impl Field {
    /// The form field this maps to.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Topic => "topic",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: String) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
