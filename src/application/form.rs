//! Registration form state machine.
//!
//! ```text
//!          submit()                 Ok
//!   Idle ------------> Submitting -------> Succeeded --(timeout | reset)--> Idle
//!    ^                     |
//!    |                     | Err
//!    +------ reset() ----- Failed(message)
//! ```
//!
//! Field validation runs before the transition to `Submitting`; an invalid
//! draft never reaches the API. State is published on a `watch` channel so
//! a UI can render straight off [`FormState`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::{
    validate_draft, Field, FieldError, ImageUpload, SchoolForm, SchoolId, UploadPolicy,
    ValidationError,
};
use crate::error::{Error, Result};
use crate::port::outbound::api::SchoolApi;

pub const SUCCESS_MESSAGE: &str = "School added successfully!";
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";
pub const DEFAULT_SUCCESS_TIMEOUT: Duration = Duration::from_secs(3);

/// What the form is doing right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        school_id: SchoolId,
        message: String,
    },
    Failed(String),
}

impl FormState {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Unsubmitted form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub form: SchoolForm,
    pub image: Option<ImageUpload>,
}

/// Client-side registration form bound to a [`SchoolApi`].
pub struct RegistrationForm<A> {
    api: Arc<A>,
    policy: UploadPolicy,
    success_timeout: Duration,
    draft: Mutex<Draft>,
    state: Arc<watch::Sender<FormState>>,
    /// Bumped on every success and reset so a stale success timer is ignored.
    generation: Arc<AtomicU64>,
}

impl<A: SchoolApi + 'static> RegistrationForm<A> {
    pub fn new(api: Arc<A>, policy: UploadPolicy, success_timeout: Duration) -> Self {
        let (state, _) = watch::channel(FormState::Idle);
        Self {
            api,
            policy,
            success_timeout,
            draft: Mutex::new(Draft::default()),
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.draft.lock().form.set(field, value);
    }

    pub fn set_image(&self, image: Option<ImageUpload>) {
        self.draft.lock().image = image;
    }

    #[must_use]
    pub fn draft(&self) -> Draft {
        self.draft.lock().clone()
    }

    /// Field-level problems with the current draft.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldError> {
        let draft = self.draft.lock();
        validate_draft(&draft.form, draft.image.as_ref(), &self.policy)
    }

    #[must_use]
    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Clear the draft and return to `Idle`. A submission in flight keeps
    /// running and still reports its outcome.
    pub fn reset(&self) {
        *self.draft.lock() = Draft::default();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_if_modified(|state| {
            if state.is_submitting() || *state == FormState::Idle {
                false
            } else {
                *state = FormState::Idle;
                true
            }
        });
    }

    /// Validate the draft and send it.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] with one entry per offending field; the state
    ///   does not change
    /// - [`Error::SubmissionInFlight`] when another submit has not finished
    /// - the API error when the request fails; the state moves to `Failed`
    pub async fn submit(&self) -> Result<SchoolId> {
        let draft = self.draft();
        let errors = validate_draft(&draft.form, draft.image.as_ref(), &self.policy);
        if !errors.is_empty() {
            return Err(ValidationError::InvalidFields(errors).into());
        }

        let started = self.state.send_if_modified(|state| {
            if state.is_submitting() {
                false
            } else {
                *state = FormState::Submitting;
                true
            }
        });
        if !started {
            return Err(Error::SubmissionInFlight);
        }

        let image = draft.image.as_ref().filter(|image| !image.is_empty());
        match self.api.create_school(&draft.form, image).await {
            Ok(school_id) => {
                debug!(school_id = %school_id, "Registration submitted");
                {
                    let mut current = self.draft.lock();
                    if *current == draft {
                        *current = Draft::default();
                    }
                }
                // After the request, so an in-flight reset does not cancel it.
                let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
                self.state.send_replace(FormState::Succeeded {
                    school_id,
                    message: SUCCESS_MESSAGE.to_string(),
                });
                self.schedule_idle(generation);
                Ok(school_id)
            }
            Err(err) => {
                warn!(error = %err, "Registration failed");
                self.state.send_replace(FormState::Failed(failure_message(&err)));
                Err(err)
            }
        }
    }

    fn schedule_idle(&self, generation: u64) {
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let timeout = self.success_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            state.send_if_modified(|state| {
                if matches!(state, FormState::Succeeded { .. }) {
                    *state = FormState::Idle;
                    true
                } else {
                    false
                }
            });
        });
    }
}

/// Text shown for a failed submission.
fn failure_message(err: &Error) -> String {
    match err {
        Error::Api { message, .. } if !message.is_empty() => message.clone(),
        Error::Api { .. } => "Failed to add school".to_string(),
        _ => GENERIC_FAILURE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use tokio::sync::Notify;

    use super::*;
    use crate::domain::School;

    enum Outcome {
        Created(i64),
        Rejected(u16, &'static str),
        Unreachable,
    }

    struct FakeApi {
        outcome: Outcome,
        gate: Option<Arc<Notify>>,
        calls: AtomicUsize,
    }

    impl FakeApi {
        fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                gate: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn gated(outcome: Outcome, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(outcome)
            }
        }
    }

    impl SchoolApi for FakeApi {
        async fn list_schools(&self) -> Result<Vec<School>> {
            Ok(Vec::new())
        }

        async fn create_school(
            &self,
            _form: &SchoolForm,
            _image: Option<&ImageUpload>,
        ) -> Result<SchoolId> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match self.outcome {
                Outcome::Created(id) => Ok(SchoolId::new(id)),
                Outcome::Rejected(status, message) => Err(Error::Api {
                    status,
                    message: message.to_string(),
                }),
                Outcome::Unreachable => Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
            }
        }
    }

    fn fill<A: SchoolApi + 'static>(form: &RegistrationForm<A>) {
        form.set_field(Field::Name, "Alpha High");
        form.set_field(Field::Address, "12 Long Road, Metro");
        form.set_field(Field::City, "Metro");
        form.set_field(Field::State, "North");
        form.set_field(Field::Contact, "0123456789");
        form.set_field(Field::EmailId, "office@alpha.edu");
    }

    fn form_with(api: FakeApi, timeout: Duration) -> (RegistrationForm<FakeApi>, Arc<FakeApi>) {
        let api = Arc::new(api);
        let form = RegistrationForm::new(Arc::clone(&api), UploadPolicy::default(), timeout);
        (form, api)
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_api() {
        let (form, api) = form_with(FakeApi::new(Outcome::Created(1)), DEFAULT_SUCCESS_TIMEOUT);
        form.set_field(Field::Name, "Al");
        form.set_field(Field::Contact, "12345");

        let err = form.submit().await.unwrap_err();

        let Error::Validation(ValidationError::InvalidFields(errors)) = err else {
            panic!("expected field errors");
        };
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&Field::Name));
        assert!(fields.contains(&Field::Contact));
        assert!(fields.contains(&Field::EmailId));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.state(), FormState::Idle);
    }

    #[tokio::test]
    async fn oversized_image_blocks_submission() {
        let (form, api) = form_with(FakeApi::new(Outcome::Created(1)), DEFAULT_SUCCESS_TIMEOUT);
        fill(&form);
        form.set_image(Some(ImageUpload::new(
            Some("huge.png".into()),
            "image/png",
            vec![0; 5 * 1024 * 1024 + 1],
        )));

        let errors = form.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::Image);
        assert_eq!(errors[0].message, "Image must be 5MB or smaller");

        assert!(form.submit().await.is_err());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_clears_draft_and_returns_to_idle() {
        let (form, _) = form_with(FakeApi::new(Outcome::Created(7)), Duration::from_millis(50));
        fill(&form);
        let mut rx = form.subscribe();

        let id = form.submit().await.unwrap();

        assert_eq!(id, SchoolId::new(7));
        assert_eq!(
            form.state(),
            FormState::Succeeded {
                school_id: id,
                message: SUCCESS_MESSAGE.to_string()
            }
        );
        assert_eq!(form.draft(), Draft::default());

        tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|s| *s == FormState::Idle))
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn second_submit_is_refused_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let (form, api) = form_with(
            FakeApi::gated(Outcome::Created(3), Arc::clone(&gate)),
            DEFAULT_SUCCESS_TIMEOUT,
        );
        fill(&form);
        let form = Arc::new(form);
        let mut rx = form.subscribe();

        let first = tokio::spawn({
            let form = Arc::clone(&form);
            async move { form.submit().await }
        });
        rx.wait_for(FormState::is_submitting).await.unwrap();

        assert!(matches!(form.submit().await, Err(Error::SubmissionInFlight)));

        gate.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), SchoolId::new(3));
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn api_error_text_is_surfaced() {
        let (form, _) = form_with(
            FakeApi::new(Outcome::Rejected(400, "All fields except image are required")),
            DEFAULT_SUCCESS_TIMEOUT,
        );
        fill(&form);

        assert!(form.submit().await.is_err());

        assert_eq!(
            form.state(),
            FormState::Failed("All fields except image are required".into())
        );
        assert_eq!(form.draft().form.name, "Alpha High");
    }

    #[tokio::test]
    async fn transport_error_gets_generic_message() {
        let (form, _) = form_with(FakeApi::new(Outcome::Unreachable), DEFAULT_SUCCESS_TIMEOUT);
        fill(&form);

        assert!(form.submit().await.is_err());
        assert_eq!(form.state(), FormState::Failed(GENERIC_FAILURE.into()));

        form.reset();
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.draft(), Draft::default());
    }

    #[tokio::test]
    async fn reset_during_submission_still_returns_to_idle() {
        let gate = Arc::new(Notify::new());
        let (form, _) = form_with(
            FakeApi::gated(Outcome::Created(1), Arc::clone(&gate)),
            Duration::from_millis(50),
        );
        fill(&form);
        let form = Arc::new(form);
        let mut rx = form.subscribe();

        let pending = tokio::spawn({
            let form = Arc::clone(&form);
            async move { form.submit().await }
        });
        rx.wait_for(FormState::is_submitting).await.unwrap();

        form.reset();
        assert_eq!(form.state(), FormState::Submitting);

        gate.notify_one();
        assert_eq!(pending.await.unwrap().unwrap(), SchoolId::new(1));
        assert!(matches!(form.state(), FormState::Succeeded { .. }));

        tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|s| *s == FormState::Idle))
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn resubmit_after_reset_still_times_out() {
        let (form, _) = form_with(FakeApi::new(Outcome::Created(1)), Duration::from_millis(50));
        fill(&form);
        form.submit().await.unwrap();

        form.reset();
        fill(&form);
        form.submit().await.unwrap();
        let mut rx = form.subscribe();

        tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|s| *s == FormState::Idle))
            .await
            .unwrap()
            .unwrap();
    }
}
