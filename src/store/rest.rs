use super::{is_unique_violation, StoreError, SubscriptionStore};
use crate::domain::SubscriptionRequest;

use std::time::Duration;

use {
    anyhow::Context,
    async_trait::async_trait,
    reqwest::{Client, Url},
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Inserts rows through a hosted database's PostgREST-style HTTP API.
pub struct RestSubscriptionStore {
    http_client: Client,
    endpoint: Url,
    api_key: Secret<String>,
}

impl RestSubscriptionStore {
    pub fn new(
        base_url: String,
        table: &str,
        api_key: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the HTTP client for the subscription store")?;
        let endpoint = Url::parse(&base_url)
            .context("Invalid subscription store base url")?
            .join(&format!("rest/v1/{}", table))
            .context("Failed to build the subscription store table endpoint")?;

        Ok(Self {
            http_client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl SubscriptionStore for RestSubscriptionStore {
    #[tracing::instrument(
        name = "Inserting a new subscription through the REST API",
        skip(self, request),
        fields(news_topic = %request.topic.as_ref())
    )]
    async fn create(&self, request: &SubscriptionRequest) -> Result<(), StoreError> {
        let rows = [InsertRow {
            name: request.name.as_ref(),
            email: request.email.as_ref(),
            news_topic: request.topic.as_ref(),
        }];

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await
            .context("Failed to reach the subscription store")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // The body is only a hint; a missing or malformed one is still a failure.
        let body = response.json::<RestErrorBody>().await.ok();
        match body {
            Some(body) if is_unique_violation(body.code.as_deref()) => Err(StoreError::Conflict),
            body => Err(StoreError::Unexpected(anyhow::anyhow!(
                "The subscription store rejected the insert with status {}: {}",
                status,
                body.and_then(|b| b.message)
                    .unwrap_or_else(|| "no error details".into())
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
struct InsertRow<'a> {
    name: &'a str,
    email: &'a str,
    news_topic: &'a str,
}

#[derive(Debug, Deserialize)]
struct RestErrorBody {
    code: Option<String>,
    message: Option<String>,
}
