use std::{fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::{email_address::EmailAddress, macros::nutype_string};

/// The raw values of the contact form, exactly as they were entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactFormField {
    Name,
    Email,
    Subject,
    Message,
}

/// One boolean per form field. Used for validity as well as for tracking which
/// fields the user has interacted with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactFormFlags {
    pub name: bool,
    pub email: bool,
    pub subject: bool,
    pub message: bool,
}

/// A contact form whose fields all satisfy their invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContactForm {
    pub name: ContactName,
    pub email: EmailAddress,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

/// The payload written to the submission artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    #[serde(rename = "nombre")]
    name: ContactName,
    email: EmailAddress,
    #[serde(rename = "asunto")]
    subject: ContactSubject,
    #[serde(rename = "mensaje")]
    message: ContactMessage,
    #[serde(rename = "createdAt", serialize_with = "serialize_timestamp")]
    created_at: DateTime<Utc>,
}

/// Feedback shown next to the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormFeedback {
    pub submitting: bool,
    pub success_message: String,
    pub error_message: String,
}

/// Everything a presentation layer needs to render the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormSnapshot {
    pub form: ContactForm,
    pub validity: ContactFormFlags,
    pub touched: ContactFormFlags,
    pub feedback: ContactFormFeedback,
}

nutype_string!(ContactName(
    sanitize(trim),
    validate(len_char_min = ContactName::MIN_LENGTH)
));
impl ContactName {
    pub const MIN_LENGTH: usize = 2;
}

nutype_string!(ContactSubject(sanitize(trim), validate(not_empty)));

nutype_string!(ContactMessage(
    sanitize(trim),
    validate(len_char_min = ContactMessage::MIN_LENGTH)
));
impl ContactMessage {
    pub const MIN_LENGTH: usize = 10;
}

impl ContactForm {
    pub fn get(&self, field: ContactFormField) -> &str {
        match field {
            ContactFormField::Name => &self.name,
            ContactFormField::Email => &self.email,
            ContactFormField::Subject => &self.subject,
            ContactFormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactFormField, value: String) {
        let slot = match field {
            ContactFormField::Name => &mut self.name,
            ContactFormField::Email => &mut self.email,
            ContactFormField::Subject => &mut self.subject,
            ContactFormField::Message => &mut self.message,
        };
        *slot = value;
    }

    /// Checks every field invariant. On failure the returned flags are `true`
    /// for the fields that are valid and `false` for the others.
    pub fn validate(&self) -> Result<ValidContactForm, ContactFormFlags> {
        let name = ContactName::try_new(self.name.clone());
        let email = parse_email(&self.email);
        let subject = ContactSubject::try_new(self.subject.clone());
        let message = ContactMessage::try_new(self.message.clone());

        match (name, email, subject, message) {
            (Ok(name), Some(email), Ok(subject), Ok(message)) => Ok(ValidContactForm {
                name,
                email,
                subject,
                message,
            }),
            (name, email, subject, message) => Err(ContactFormFlags {
                name: name.is_ok(),
                email: email.is_some(),
                subject: subject.is_ok(),
                message: message.is_ok(),
            }),
        }
    }

    pub fn validity(&self) -> ContactFormFlags {
        self.validate()
            .map_or_else(|validity| validity, |_| ContactFormFlags::all(true))
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

fn parse_email(raw: &str) -> Option<EmailAddress> {
    raw.trim().parse().ok()
}

impl ContactFormField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ContactFormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown contact form field: {0}")]
pub struct UnknownContactFormField(pub String);

impl FromStr for ContactFormField {
    type Err = UnknownContactFormField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownContactFormField(s.into()))
    }
}

impl ContactFormFlags {
    pub const fn all(value: bool) -> Self {
        Self {
            name: value,
            email: value,
            subject: value,
            message: value,
        }
    }

    pub fn get(&self, field: ContactFormField) -> bool {
        match field {
            ContactFormField::Name => self.name,
            ContactFormField::Email => self.email,
            ContactFormField::Subject => self.subject,
            ContactFormField::Message => self.message,
        }
    }

    pub fn set(&mut self, field: ContactFormField, value: bool) {
        match field {
            ContactFormField::Name => self.name = value,
            ContactFormField::Email => self.email = value,
            ContactFormField::Subject => self.subject = value,
            ContactFormField::Message => self.message = value,
        }
    }

    /// Returns the fields whose flag is not set.
    pub fn unset(&self) -> impl Iterator<Item = ContactFormField> + '_ {
        ContactFormField::ALL
            .into_iter()
            .filter(move |&field| !self.get(field))
    }
}

impl ContactSubmission {
    /// Name of the file the submission is downloaded as.
    pub const FILE_NAME: &'static str = "contacto.json";

    pub fn new(form: ValidContactForm, created_at: DateTime<Utc>) -> Self {
        Self {
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
            created_at,
        }
    }

    pub fn name(&self) -> &ContactName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn subject(&self) -> &ContactSubject {
        &self.subject
    }

    pub fn message(&self) -> &ContactMessage {
        &self.message
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
