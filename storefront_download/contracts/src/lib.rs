use std::future::Future;

/// Hands a file to the host environment, which saves it for the user.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait DownloadService: Send + Sync + 'static {
    /// Offers `bytes` for download under the suggested `file_name`.
    fn download(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockDownloadService {
    pub fn with_download(mut self, file_name: &'static str, ok: bool) -> Self {
        self.expect_download()
            .once()
            .withf(move |_, name| name == file_name)
            .return_once(move |_, _| {
                let result = if ok {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("Failed to save {file_name}"))
                };
                Box::pin(std::future::ready(result))
            });
        self
    }
}
