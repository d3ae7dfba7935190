mod news_topic;
mod subscriber_email;
mod subscriber_name;
mod subscription_request;

pub use {
    news_topic::{NewsTopic, NewsTopicValidationError},
    subscriber_email::{SubscriberEmail, SubscriberEmailValidationError},
    subscriber_name::{SubscriberName, SubscriberNameValidationError},
    subscription_request::{Field, FieldErrors, SubscriptionRequest},
};
