use std::{
    ffi::OsStr,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context};
use storefront_download_contracts::DownloadService;
use storefront_utils::Apply;
use tokio::fs;
use tracing::debug;

/// Saves downloads into a directory on the local filesystem.
///
/// Existing files are never overwritten. If `contacto.json` already exists the
/// download is saved as `contacto (1).json`, then `contacto (2).json` and so on.
#[derive(Debug, Clone)]
pub struct DownloadServiceImpl {
    directory: PathBuf,
}

impl DownloadServiceImpl {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl DownloadService for DownloadServiceImpl {
    #[tracing::instrument(skip(self, bytes), fields(directory = %self.directory.display(), len = bytes.len()))]
    async fn download(&self, bytes: Vec<u8>, file_name: &str) -> anyhow::Result<()> {
        ensure!(
            !file_name.is_empty()
                && file_name != "."
                && file_name != ".."
                && !file_name.contains(['/', '\\']),
            "Invalid file name: {file_name:?}"
        );

        fs::create_dir_all(&self.directory)
            .await
            .with_context(|| format!("Failed to create {}", self.directory.display()))?;

        let directory = self.directory.clone();
        let file_name = file_name.to_owned();
        let target = tokio::task::spawn_blocking(move || save(&directory, &bytes, &file_name))
            .await??;

        debug!("saved download to {}", target.display());
        Ok(())
    }
}

/// Writes `bytes` into a partial file of its own and moves it to the first
/// free candidate name. The partial file is removed if anything fails.
fn save(directory: &Path, bytes: &[u8], file_name: &str) -> anyhow::Result<PathBuf> {
    let mut partial = tempfile::Builder::new()
        .prefix(".download-")
        .suffix(".part")
        .tempfile_in(directory)
        .with_context(|| format!("Failed to create partial download in {}", directory.display()))?;
    partial
        .write_all(bytes)
        .with_context(|| format!("Failed to write {}", partial.path().display()))?;

    let mut n = 0;
    loop {
        let target = directory.join(numbered_file_name(file_name, n));
        match partial.persist_noclobber(&target) {
            Ok(_) => return Ok(target),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => partial = err.file,
            Err(err) => {
                return Err(anyhow::Error::new(err.error)
                    .context(format!("Failed to move download to {}", target.display())))
            }
        }
        n += 1;
    }
}

/// Returns the `n`th candidate name for a download, `n = 0` being the
/// unchanged `file_name`.
fn numbered_file_name(file_name: &str, n: usize) -> String {
    if n == 0 {
        return file_name.into();
    }

    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or(file_name);
    format!("{stem} ({n})").apply_map(path.extension().and_then(OsStr::to_str), |name, ext| {
        format!("{name}.{ext}")
    })
}
