use std::sync::{Arc, Mutex};

use storefront_download_contracts::{DownloadService, MockDownloadService};
use storefront_shared_contracts::time::MockTimeService;
use tokio::sync::Semaphore;

use crate::ContactFormFeatureServiceImpl;

mod fields;
mod in_flight;

type Sut = ContactFormFeatureServiceImpl<MockTimeService, MockDownloadService>;

/// Keeps every download in memory.
#[derive(Debug, Clone, Default)]
struct RecordingDownloadService {
    downloads: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl RecordingDownloadService {
    fn downloads(&self) -> Vec<(String, Vec<u8>)> {
        self.downloads.lock().unwrap().clone()
    }
}

impl DownloadService for RecordingDownloadService {
    async fn download(&self, bytes: Vec<u8>, file_name: &str) -> anyhow::Result<()> {
        self.downloads
            .lock()
            .unwrap()
            .push((file_name.into(), bytes));
        Ok(())
    }
}

/// Blocks every download until it is released.
#[derive(Debug, Clone)]
struct PendingDownloadService {
    started: Arc<Semaphore>,
    release: Arc<Semaphore>,
}

impl Default for PendingDownloadService {
    fn default() -> Self {
        Self {
            started: Arc::new(Semaphore::new(0)),
            release: Arc::new(Semaphore::new(0)),
        }
    }
}

impl PendingDownloadService {
    /// Waits until `n` more downloads have started.
    async fn wait_started(&self, n: u32) {
        self.started.acquire_many(n).await.unwrap().forget();
    }

    /// Lets `n` pending downloads finish.
    fn release(&self, n: usize) {
        self.release.add_permits(n);
    }
}

impl DownloadService for PendingDownloadService {
    async fn download(&self, _bytes: Vec<u8>, _file_name: &str) -> anyhow::Result<()> {
        self.started.add_permits(1);
        self.release.acquire().await?.forget();
        Ok(())
    }
}
