use crate::{
    domain::{FieldErrors, SubscriptionRequest},
    notifications::{Notice, NotificationSender},
    store::{StoreError, SubscriptionStore},
};

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    /// The form is visible and editable.
    Idle,
    /// A request is in flight; the form is disabled.
    Submitting,
    /// The confirmation view replaces the form until reset.
    Subscribed,
}

/// Raw values as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; the store was not called.
    Rejected(FieldErrors),
    Subscribed,
    AlreadySubscribed,
    Failed,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("A submission is already in flight")]
    InFlight,
    #[error("The form is closed until the subscription is reset")]
    FormClosed,
}

#[derive(Debug)]
struct FormSnapshot {
    state: FormState,
    values: FormInput,
    field_errors: FieldErrors,
}

/// Drives one subscription form from input to a stored subscription.
pub struct SubscriptionController {
    store: Arc<dyn SubscriptionStore>,
    notifier: NotificationSender,
    form: Mutex<FormSnapshot>,
}

impl SubscriptionController {
    pub fn new(store: Arc<dyn SubscriptionStore>, notifier: NotificationSender) -> Self {
        Self {
            store,
            notifier,
            form: Mutex::new(FormSnapshot {
                state: FormState::Idle,
                values: FormInput::default(),
                field_errors: FieldErrors::default(),
            }),
        }
    }

    pub fn state(&self) -> FormState {
        self.lock().state
    }

    pub fn values(&self) -> FormInput {
        self.lock().values.clone()
    }

    pub fn field_errors(&self) -> FieldErrors {
        self.lock().field_errors.clone()
    }

    /// The "subscribe to another topic" action.
    pub fn reset(&self) -> Result<(), SubmitError> {
        let mut form = self.lock();
        match form.state {
            FormState::Submitting => Err(SubmitError::InFlight),
            FormState::Idle | FormState::Subscribed => {
                form.state = FormState::Idle;
                Ok(())
            }
        }
    }

    #[tracing::instrument(
        name = "Submitting a news subscription",
        skip(self, input),
        fields(news_topic = %input.topic)
    )]
    pub async fn submit(&self, input: FormInput) -> Result<SubmitOutcome, SubmitError> {
        let request = {
            let mut form = self.lock();
            match form.state {
                FormState::Submitting => return Err(SubmitError::InFlight),
                FormState::Subscribed => return Err(SubmitError::FormClosed),
                FormState::Idle => {}
            }

            form.values = input.clone();
            match SubscriptionRequest::parse(input.name, input.email, input.topic) {
                Ok(request) => {
                    form.field_errors = FieldErrors::default();
                    form.state = FormState::Submitting;
                    request
                }
                Err(errors) => {
                    tracing::info!(%errors, "Subscription form failed validation");
                    form.field_errors = errors.clone();
                    return Ok(SubmitOutcome::Rejected(errors));
                }
            }
        };

        let in_flight = InFlightGuard {
            controller: self,
            armed: true,
        };
        let result = self.store.create(&request).await;
        in_flight.disarm();

        let mut form = self.lock();
        let (state, notice, outcome) = match result {
            Ok(()) => {
                form.values = FormInput::default();
                (
                    FormState::Subscribed,
                    Notice::Subscribed,
                    SubmitOutcome::Subscribed,
                )
            }
            Err(StoreError::Conflict) => {
                tracing::info!("Email is already subscribed to this topic");
                (
                    FormState::Idle,
                    Notice::AlreadySubscribed,
                    SubmitOutcome::AlreadySubscribed,
                )
            }
            Err(error) => {
                tracing::error!(error.cause_chain = ?error, "Failed to store a subscription");
                (FormState::Idle, Notice::Failed, SubmitOutcome::Failed)
            }
        };
        form.state = state;
        drop(form);

        self.notifier.send(notice);
        Ok(outcome)
    }

    fn lock(&self) -> MutexGuard<'_, FormSnapshot> {
        // The snapshot is always left consistent, so a poisoned lock is still usable.
        self.form
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Releases the `Submitting` guard when `submit` is dropped before the store answers.
struct InFlightGuard<'a> {
    controller: &'a SubscriptionController,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut form = self.controller.lock();
        if form.state == FormState::Submitting {
            form.state = FormState::Idle;
        }
        drop(form);

        tracing::warn!("Submission was abandoned before the store answered");
        self.controller.notifier.send(Notice::Failed);
    }
}
