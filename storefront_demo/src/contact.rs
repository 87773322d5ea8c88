use std::sync::LazyLock;

use storefront_core_contact_contracts::ContactFormFeatureService;
use storefront_models::contact::{ContactForm, ContactFormField};

/// The smallest form that passes validation.
pub static AL: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "Al".into(),
    email: "a@b.com".into(),
    subject: "general".into(),
    message: "Hello there!".into(),
});

/// A valid form whose values are surrounded by whitespace.
pub static PADDED: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "  Max Mustermann ".into(),
    email: " max.mustermann@example.de ".into(),
    subject: " products\n".into(),
    message: "\tDo you ship to Germany?  ".into(),
});

/// Like [`AL`], but the name is one character too short.
pub static SHORT_NAME: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    name: "A".into(),
    ..AL.clone()
});

/// Enters every value of `form` into the contact form.
pub async fn fill(service: &impl ContactFormFeatureService, form: &ContactForm) {
    for field in ContactFormField::ALL {
        service.set_field(field, form.get(field).into()).await;
    }
}
