mod postgres;
mod rest;

pub use {postgres::PostgresSubscriptionStore, rest::RestSubscriptionStore};

use crate::{domain::SubscriptionRequest, utils::error_chain_fmt};

use async_trait::async_trait;

/// SQLSTATE raised by Postgres on a unique constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("A subscription for this email and topic already exists")]
    Conflict,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// The persistence service recording subscription requests.
///
/// Implementations must report a rejected insert of an already existing
/// `(email, topic)` pair as [`StoreError::Conflict`] and everything else,
/// transport failures included, as [`StoreError::Unexpected`].
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn create(&self, request: &SubscriptionRequest) -> Result<(), StoreError>;
}

fn is_unique_violation(code: Option<&str>) -> bool {
    code == Some(UNIQUE_VIOLATION)
}
