use pretty_assertions::assert_eq;
use storefront_core_contact_contracts::ContactFormFeatureService;
use storefront_demo::contact::{fill, AL, SHORT_NAME};
use storefront_models::contact::{ContactForm, ContactFormField, ContactFormFlags, ContactFormSnapshot};

use crate::tests::Sut;

#[tokio::test]
async fn initial_form_is_empty() {
    // Arrange
    let sut = Sut::default();

    // Act
    let result = sut.snapshot().await;

    // Assert
    assert_eq!(result, ContactFormSnapshot::default());
    assert_eq!(result.validity, ContactFormFlags::all(false));
}

#[tokio::test]
async fn set_field() {
    // Arrange
    let sut = Sut::default();

    // Act
    sut.set_field(ContactFormField::Name, "Al".into()).await;
    sut.set_field(ContactFormField::Email, "a@b.com".into())
        .await;

    // Assert
    let result = sut.snapshot().await;
    assert_eq!(
        result.form,
        ContactForm {
            name: "Al".into(),
            email: "a@b.com".into(),
            ..Default::default()
        }
    );
    assert_eq!(
        result.validity,
        ContactFormFlags {
            name: true,
            email: true,
            subject: false,
            message: false,
        }
    );
    assert_eq!(result.touched, ContactFormFlags::default());
}

#[tokio::test]
async fn validity_follows_values() {
    // Arrange
    let sut = Sut::default();
    fill(&sut, &SHORT_NAME).await;

    // Act
    let before = sut.snapshot().await.validity;
    sut.set_field(ContactFormField::Name, AL.name.clone()).await;
    let after = sut.snapshot().await.validity;

    // Assert
    assert_eq!(
        before,
        ContactFormFlags {
            name: false,
            ..ContactFormFlags::all(true)
        }
    );
    assert_eq!(after, ContactFormFlags::all(true));
}

#[tokio::test]
async fn touch() {
    // Arrange
    let sut = Sut::default();

    // Act
    sut.touch(ContactFormField::Message).await;

    // Assert
    assert_eq!(
        sut.snapshot().await.touched,
        ContactFormFlags {
            message: true,
            ..Default::default()
        }
    );
}
