use std::future::Future;

use storefront_models::contact::{
    ContactFormField, ContactFormFlags, ContactFormSnapshot, ContactSubmission,
};
use thiserror::Error;

/// Shown when one or more fields are invalid.
pub const VALIDATION_ERROR_MESSAGE: &str = "Por favor, completa todos los campos correctamente.";
/// Shown after the submission has been downloaded.
pub const SUCCESS_MESSAGE: &str =
    "¡Mensaje enviado con éxito! Nos pondremos en contacto pronto. ✨";
/// Shown when the submission could not be serialized or downloaded.
pub const SUBMISSION_ERROR_MESSAGE: &str =
    "Hubo un problema al enviar tu mensaje. Por favor, intenta nuevamente.";

/// Controller behind the contact page.
///
/// The outcome of every operation is reflected in the feedback part of
/// [`ContactFormSnapshot`]; the return value of [`submit`](Self::submit) only
/// repeats it for programmatic callers.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormFeatureService: Send + Sync + 'static {
    /// Returns the current values, validity, interaction flags and feedback.
    fn snapshot(&self) -> impl Future<Output = ContactFormSnapshot> + Send;

    /// Replaces the value of a single field.
    fn set_field(
        &self,
        field: ContactFormField,
        value: String,
    ) -> impl Future<Output = ()> + Send;

    /// Marks a field as interacted with.
    fn touch(&self, field: ContactFormField) -> impl Future<Output = ()> + Send;

    /// Clears the form and all feedback, unless a submission is in flight.
    fn cancel(&self) -> impl Future<Output = ()> + Send;

    /// Validates the form and downloads it as
    /// [`ContactSubmission::FILE_NAME`].
    fn submit(
        &self,
    ) -> impl Future<Output = Result<ContactSubmission, ContactFormSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactFormSubmitError {
    #[error("The contact form contains invalid fields.")]
    Validation { validity: ContactFormFlags },
    #[error("Failed to submit the contact form: {0}")]
    Submission(#[source] anyhow::Error),
}

impl ContactFormSubmitError {
    /// The message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation { .. } => VALIDATION_ERROR_MESSAGE,
            Self::Submission(_) => SUBMISSION_ERROR_MESSAGE,
        }
    }
}

#[cfg(feature = "mock")]
impl MockContactFormFeatureService {
    pub fn with_snapshot(mut self, snapshot: ContactFormSnapshot) -> Self {
        self.expect_snapshot()
            .once()
            .return_once(move || Box::pin(std::future::ready(snapshot)));
        self
    }

    pub fn with_set_field(mut self, field: ContactFormField, value: String) -> Self {
        self.expect_set_field()
            .once()
            .with(
                mockall::predicate::eq(field),
                mockall::predicate::eq(value),
            )
            .return_once(|_, _| Box::pin(std::future::ready(())));
        self
    }

    pub fn with_submit(
        mut self,
        result: Result<ContactSubmission, ContactFormSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
