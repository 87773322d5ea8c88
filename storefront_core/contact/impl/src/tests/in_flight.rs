use std::{sync::Arc, time::Duration};

use pretty_assertions::assert_eq;
use storefront_core_contact_contracts::{
    ContactFormFeatureService, SUCCESS_MESSAGE, VALIDATION_ERROR_MESSAGE,
};
use storefront_demo::contact::{fill, AL};
use storefront_download_impl::DownloadServiceImpl;
use storefront_models::contact::{ContactForm, ContactFormField, ContactFormSnapshot};
use storefront_shared_impl::time::TimeServiceImpl;

use crate::{tests::PendingDownloadService, ContactFormFeatureServiceImpl};

fn sut(
    download: PendingDownloadService,
) -> ContactFormFeatureServiceImpl<TimeServiceImpl, PendingDownloadService> {
    ContactFormFeatureServiceImpl::new(TimeServiceImpl, download, Default::default())
}

#[tokio::test(start_paused = true)]
async fn abandoned_submission_ends() {
    // Arrange
    let download = PendingDownloadService::default();
    let sut = sut(download.clone());
    fill(&sut, &AL).await;

    // Act
    tokio::time::timeout(Duration::from_millis(10), sut.submit())
        .await
        .unwrap_err();

    // Assert
    let snapshot = sut.snapshot().await;
    assert!(!snapshot.feedback.submitting);
    assert_eq!(snapshot.form, *AL);

    sut.set_field(ContactFormField::Name, "A".into()).await;
    sut.submit().await.unwrap_err();
    let feedback = sut.snapshot().await.feedback;
    assert!(!feedback.submitting);
    assert_eq!(feedback.error_message, VALIDATION_ERROR_MESSAGE);

    sut.cancel().await;
    assert_eq!(sut.snapshot().await, ContactFormSnapshot::default());
}

#[tokio::test]
async fn controller_dropped_while_pending() {
    // Arrange
    let download = PendingDownloadService::default();
    let sut = Arc::new(sut(download.clone()));
    fill(&*sut, &AL).await;
    let state = Arc::downgrade(&sut.state);

    let submission = tokio::spawn({
        let sut = Arc::clone(&sut);
        async move { sut.submit().await }
    });
    download.wait_started(1).await;

    // Act
    submission.abort();
    assert!(submission.await.unwrap_err().is_cancelled());
    let submitting = sut.snapshot().await.feedback.submitting;
    drop(sut);

    // Assert
    assert!(!submitting);
    assert!(state.upgrade().is_none());
}

#[tokio::test]
async fn overlapping_submissions_stay_submitting_until_all_finish() {
    // Arrange
    let download = PendingDownloadService::default();
    let sut = sut(download.clone());
    fill(&sut, &AL).await;

    // Act
    let (first, second, ()) = tokio::join!(sut.submit(), sut.submit(), async {
        download.wait_started(2).await;
        assert!(sut.snapshot().await.feedback.submitting);

        download.release(1);
        while sut.snapshot().await.feedback.success_message.is_empty() {
            tokio::task::yield_now().await;
        }
        assert!(sut.snapshot().await.feedback.submitting);

        download.release(1);
    });

    // Assert
    first.unwrap();
    second.unwrap();
    let snapshot = sut.snapshot().await;
    assert!(!snapshot.feedback.submitting);
    assert_eq!(snapshot.feedback.success_message, SUCCESS_MESSAGE);
    assert_eq!(snapshot.form, ContactForm::default());
}

#[tokio::test]
async fn overlapping_submissions_each_save_an_artifact() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let sut = ContactFormFeatureServiceImpl::new(
        TimeServiceImpl,
        DownloadServiceImpl::new(dir.path()),
        Default::default(),
    );
    fill(&sut, &AL).await;

    // Act
    let (first, second) = tokio::join!(sut.submit(), sut.submit());

    // Assert
    first.unwrap();
    second.unwrap();

    let mut names = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect::<Vec<_>>();
    names.sort();
    assert_eq!(names, ["contacto (1).json", "contacto.json"]);
    for name in names {
        let json = std::fs::read(dir.path().join(name)).unwrap();
        let json = serde_json::from_slice::<serde_json::Value>(&json).unwrap();
        assert_eq!(json["nombre"], "Al");
        assert_eq!(json["mensaje"], "Hello there!");
    }
}
