use super::{is_unique_violation, StoreError, SubscriptionStore};
use crate::domain::SubscriptionRequest;

use {async_trait::async_trait, chrono::Utc, sqlx::PgPool, uuid::Uuid};

#[derive(Clone, Debug)]
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    #[tracing::instrument(
        name = "Saving new subscription details in the database",
        skip(self, request),
        fields(news_topic = %request.topic.as_ref())
    )]
    async fn create(&self, request: &SubscriptionRequest) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO news_subscriptions (id, name, email, news_topic, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.as_ref())
        .bind(request.email.as_ref())
        .bind(request.topic.as_ref())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(())
    }
}

fn classify(error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_error) = &error {
        if is_unique_violation(db_error.code().as_deref()) {
            return StoreError::Conflict;
        }
    }
    StoreError::Unexpected(
        anyhow::Error::new(error).context("Failed to insert a new subscription in the database"),
    )
}
