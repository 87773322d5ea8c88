use std::io::Write;

use clap::Args;
use storefront_config::Config;
use storefront_core_contact_contracts::ContactFormFeatureService;
use storefront_models::contact::{ContactForm, ContactFormField};

use crate::{environment, view};

/// Submits the contact form once
#[derive(Debug, Args)]
pub struct ContactCommand {
    /// Your name
    #[arg(long, default_value = "")]
    name: String,
    /// Your email address
    #[arg(long, default_value = "")]
    email: String,
    /// What your message is about
    #[arg(long, default_value = "")]
    subject: String,
    /// The message itself
    #[arg(long, default_value = "")]
    message: String,
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let service = environment::contact_feature(&config);
        let form = ContactForm {
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
        };
        submit(&service, form, &mut std::io::stdout())
            .await
            .inspect(|_| {
                tracing::info!("saved submission to {}", config.download.directory.display())
            })
    }
}

/// Enters `form`, submits it and prints the resulting form state.
pub async fn submit(
    service: &impl ContactFormFeatureService,
    form: ContactForm,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let ContactForm {
        name,
        email,
        subject,
        message,
    } = form;
    for (field, value) in [
        (ContactFormField::Name, name),
        (ContactFormField::Email, email),
        (ContactFormField::Subject, subject),
        (ContactFormField::Message, message),
    ] {
        service.set_field(field, value).await;
    }

    let result = service.submit().await;
    let snapshot = service.snapshot().await;
    write!(out, "{}", view::render(&snapshot))?;

    result.map(|_| ()).map_err(Into::into)
}
