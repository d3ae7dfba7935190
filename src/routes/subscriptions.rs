use crate::{
    controller::{FormInput, SubmitOutcome, SubscriptionController},
    notifications::notification_channel,
    routes::home::page,
    store::SubscriptionStore,
    utils::error_chain_fmt,
};

use {
    actix_web::{
        http::{header::ContentType, StatusCode},
        web, HttpResponse, ResponseError,
    },
    anyhow::Context,
};

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[tracing::instrument(
    name = "Adding a new news subscription",
    skip(form, store),
    fields(
        subscriber_email = %form.email,
        news_topic = %form.topic,
    )
)]
pub async fn subscribe(
    form: web::Form<FormInput>,
    store: web::Data<dyn SubscriptionStore>,
) -> Result<HttpResponse, SubscribeError> {
    // Every post is a fresh form instance.
    let (notifier, mut notices) = notification_channel();
    let controller = SubscriptionController::new(store.into_inner(), notifier);

    let outcome = controller
        .submit(form.0)
        .await
        .context("A new subscription form refused the submission")?;
    let notices = notices.drain();

    let (status, body) = match outcome {
        SubmitOutcome::Subscribed => (StatusCode::OK, page::subscribed_view(&notices)),
        SubmitOutcome::Rejected(errors) => (
            StatusCode::BAD_REQUEST,
            page::form_view(&controller.values(), &errors, &notices),
        ),
        SubmitOutcome::AlreadySubscribed => (
            StatusCode::CONFLICT,
            page::form_view(&controller.values(), &controller.field_errors(), &notices),
        ),
        SubmitOutcome::Failed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            page::form_view(&controller.values(), &controller.field_errors(), &notices),
        ),
    };

    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body))
}
