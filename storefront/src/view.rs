//! Plain text rendering of the contact form.

use storefront_models::contact::{ContactFormFeedback, ContactFormField, ContactFormSnapshot};

/// Renders the field values followed by the feedback. Fields are only marked
/// as invalid once they have been interacted with.
pub fn render(snapshot: &ContactFormSnapshot) -> String {
    let mut out = String::new();
    for field in ContactFormField::ALL {
        let value = snapshot.form.get(field);
        out.push_str(&format!("{:<8} {value:?}", format!("{field}:")));
        if snapshot.touched.get(field) && !snapshot.validity.get(field) {
            out.push_str(&format!("  (invalid: {})", requirement(field)));
        }
        out.push('\n');
    }
    out.push_str(&render_feedback(&snapshot.feedback));
    out
}

pub fn render_feedback(feedback: &ContactFormFeedback) -> String {
    let mut out = String::new();
    if feedback.submitting {
        out.push_str("Submitting...\n");
    }
    for message in [&feedback.success_message, &feedback.error_message] {
        if !message.is_empty() {
            out.push_str(message);
            out.push('\n');
        }
    }
    out
}

fn requirement(field: ContactFormField) -> &'static str {
    match field {
        ContactFormField::Name => "at least 2 characters",
        ContactFormField::Email => "a valid email address",
        ContactFormField::Subject => "required",
        ContactFormField::Message => "at least 10 characters",
    }
}
