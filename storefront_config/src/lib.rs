use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Loads the configuration from `paths`. Later files override values of
/// earlier ones.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub download: DownloadConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct DownloadConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub success_message_ttl: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let invalid = || <D::Error as serde::de::Error>::custom("Invalid duration");
        let mut out = std::time::Duration::default();
        for part in s.split_whitespace() {
            let (digits, unit) = part.split_at(
                part.find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(part.len()),
            );
            let value = digits.parse::<u64>().map_err(|_| invalid())?;
            let part = match unit {
                "ms" => Some(std::time::Duration::from_millis(value)),
                "s" | "" => Some(std::time::Duration::from_secs(value)),
                "m" => value.checked_mul(60).map(std::time::Duration::from_secs),
                "h" => value.checked_mul(3600).map(std::time::Duration::from_secs),
                "d" => value
                    .checked_mul(24 * 3600)
                    .map(std::time::Duration::from_secs),
                _ => None,
            };
            out = part
                .and_then(|part| out.checked_add(part))
                .ok_or_else(invalid)?;
        }
        Ok(Self(out))
    }
}
