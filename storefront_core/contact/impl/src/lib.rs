use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use storefront_core_contact_contracts::{
    ContactFormFeatureService, ContactFormSubmitError, SUBMISSION_ERROR_MESSAGE, SUCCESS_MESSAGE,
    VALIDATION_ERROR_MESSAGE,
};
use storefront_download_contracts::DownloadService;
use storefront_models::contact::{
    ContactForm, ContactFormFeedback, ContactFormField, ContactFormFlags, ContactFormSnapshot,
    ContactSubmission, ValidContactForm,
};
use storefront_shared_contracts::time::TimeService;
use tokio::{sync::Mutex, task::AbortHandle};
use tracing::{debug, error, info};

#[cfg(test)]
mod tests;

#[derive(Debug, Default)]
pub struct ContactFormFeatureServiceImpl<Time, Download> {
    time: Time,
    download: Download,
    config: ContactFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// How long the success message stays visible.
    pub success_message_ttl: Duration,
}

impl Default for ContactFeatureConfig {
    fn default() -> Self {
        Self {
            success_message_ttl: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    inner: Mutex<FormState>,
}

#[derive(Debug, Default)]
struct FormState {
    form: ContactForm,
    touched: ContactFormFlags,
    feedback: ContactFormFeedback,
    success_timer: Option<AbortHandle>,
    /// Number of submissions currently being saved.
    in_flight: usize,
}

impl FormState {
    fn clear_feedback(&mut self) {
        self.feedback.success_message.clear();
        self.feedback.error_message.clear();
        if let Some(timer) = self.success_timer.take() {
            timer.abort();
        }
    }

    fn reset_form(&mut self) {
        self.form = ContactForm::default();
        self.touched = ContactFormFlags::default();
    }

    fn start_submission(&mut self) {
        self.in_flight += 1;
        self.feedback.submitting = true;
    }

    fn end_submission(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.feedback.submitting = self.in_flight > 0;
    }
}

/// Marks one submission as in flight until it is finished or dropped.
struct InFlight {
    state: Weak<State>,
    finished: bool,
}

impl InFlight {
    fn start(state: &Arc<State>, form_state: &mut FormState) -> Self {
        form_state.start_submission();
        Self {
            state: Arc::downgrade(state),
            finished: false,
        }
    }

    fn finish(mut self, form_state: &mut FormState) {
        self.finished = true;
        form_state.end_submission();
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let Some(state) = self.state.upgrade() else {
            return;
        };

        debug!("submission abandoned before it finished");
        if let Ok(mut form_state) = state.inner.try_lock() {
            form_state.end_submission();
            return;
        }
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move { state.inner.lock().await.end_submission() });
        }
    }
}

impl Drop for State {
    fn drop(&mut self) {
        if let Some(timer) = self.inner.get_mut().success_timer.take() {
            timer.abort();
        }
    }
}

impl<Time, Download> ContactFormFeatureServiceImpl<Time, Download>
where
    Time: TimeService,
    Download: DownloadService,
{
    /// Creates a controller with an empty form.
    pub fn new(time: Time, download: Download, config: ContactFeatureConfig) -> Self {
        Self {
            time,
            download,
            config,
            state: Default::default(),
        }
    }

    async fn save(&self, form: ValidContactForm) -> anyhow::Result<ContactSubmission> {
        let submission = ContactSubmission::new(form, self.time.now());
        let bytes = serde_json::to_vec_pretty(&submission)?;
        self.download
            .download(bytes, ContactSubmission::FILE_NAME)
            .await?;
        Ok(submission)
    }

    /// Clears the success message after the configured delay. The task only
    /// holds a weak reference, so it never keeps the form alive.
    fn schedule_success_reset(&self, form_state: &mut FormState) {
        let state = Arc::downgrade(&self.state);
        let ttl = self.config.success_message_ttl;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            clear_success_message(state).await;
        });
        if let Some(previous) = form_state.success_timer.replace(handle.abort_handle()) {
            previous.abort();
        }
    }
}

async fn clear_success_message(state: Weak<State>) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut form_state = state.inner.lock().await;
    form_state.feedback.success_message.clear();
    form_state.success_timer = None;
}

impl<Time, Download> ContactFormFeatureService for ContactFormFeatureServiceImpl<Time, Download>
where
    Time: TimeService,
    Download: DownloadService,
{
    async fn snapshot(&self) -> ContactFormSnapshot {
        let form_state = self.state.inner.lock().await;
        ContactFormSnapshot {
            form: form_state.form.clone(),
            validity: form_state.form.validity(),
            touched: form_state.touched,
            feedback: form_state.feedback.clone(),
        }
    }

    async fn set_field(&self, field: ContactFormField, value: String) {
        self.state.inner.lock().await.form.set(field, value);
    }

    async fn touch(&self, field: ContactFormField) {
        self.state.inner.lock().await.touched.set(field, true);
    }

    #[tracing::instrument(skip(self))]
    async fn cancel(&self) {
        let mut form_state = self.state.inner.lock().await;
        if form_state.feedback.submitting {
            debug!("ignoring cancel while a submission is in flight");
            return;
        }

        form_state.reset_form();
        form_state.clear_feedback();
    }

    #[tracing::instrument(skip(self))]
    async fn submit(&self) -> Result<ContactSubmission, ContactFormSubmitError> {
        let (form, in_flight) = {
            let mut form_state = self.state.inner.lock().await;
            form_state.clear_feedback();
            form_state.touched = ContactFormFlags::all(true);

            match form_state.form.validate() {
                Ok(form) => (form, InFlight::start(&self.state, &mut form_state)),
                Err(validity) => {
                    debug!(invalid = ?validity.unset().collect::<Vec<_>>(), "contact form rejected");
                    form_state.feedback.error_message = VALIDATION_ERROR_MESSAGE.into();
                    form_state.feedback.submitting = form_state.in_flight > 0;
                    return Err(ContactFormSubmitError::Validation { validity });
                }
            }
        };

        // The lock is released while saving, so `cancel` can observe the
        // submission in flight.
        let result = self.save(form).await;

        let mut form_state = self.state.inner.lock().await;
        in_flight.finish(&mut form_state);
        match result {
            Ok(submission) => {
                info!("contact form submitted");
                form_state.feedback.success_message = SUCCESS_MESSAGE.into();
                form_state.reset_form();
                self.schedule_success_reset(&mut form_state);
                Ok(submission)
            }
            Err(err) => {
                error!("Failed to submit contact form: {err:#}");
                form_state.feedback.error_message = SUBMISSION_ERROR_MESSAGE.into();
                Err(ContactFormSubmitError::Submission(err))
            }
        }
    }
}
