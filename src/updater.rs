//! Opportunistic self-update.
//!
//! The update channel publishes, per platform, a manifest
//! `hk-<os>-<arch>.json` holding `{ "version", "sha256" }` and a gzip-compressed
//! binary `hk-<version>-<os>-<arch>.gz`. The checksum covers the decompressed
//! binary. Checks are throttled through a `next-check` timestamp in the staging
//! directory.

use std::{
    io::Read,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{DateTime, Utc};
use colored::Colorize;
use flate2::read::GzDecoder;
use rand::Rng;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::{
    config::Configs,
    consts::{self, CLI_NAME},
    dispatch::Maintenance,
};

const CHECK_INTERVAL_HOURS: i64 = 24;
const CHECK_JITTER_SECS: i64 = 60 * 60;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const NEXT_CHECK_FILE: &str = "next-check";

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Update server returned {status} for {url}")]
    ServerError { status: u16, url: String },

    #[error("SHA256 verification failed: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Failed to decompress update: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("Failed to stage update in {}: {source}", .path.display())]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Binary replacement failed: {0}")]
    Replace(#[source] std::io::Error),
}

impl UpdateError {
    /// Soft failures (unreachable server, missing release) are not worth
    /// interrupting the user for.
    pub fn is_hard(&self) -> bool {
        !matches!(self, UpdateError::Network(_) | UpdateError::ServerError { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate,
    Updated { from: String, to: String },
}

/// Where a verified binary ends up.
#[derive(Debug, Clone)]
pub enum InstallTarget {
    /// The executable of this process.
    CurrentExe,
    Path(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Updater {
    base_url: String,
    dir: PathBuf,
    current_version: String,
    target: InstallTarget,
    disabled: bool,
}

impl Updater {
    pub fn new(configs: &Configs) -> Self {
        Self {
            base_url: configs.update_url().to_owned(),
            dir: configs.update_dir(),
            current_version: consts::VERSION.to_owned(),
            target: InstallTarget::CurrentExe,
            disabled: configs.updates_disabled() || cfg!(debug_assertions),
        }
    }

    pub fn with_current_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = version.into();
        self
    }

    pub fn with_target(mut self, target: InstallTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Throttled check-and-apply. Never fails; prints only when an update
    /// was installed or something went wrong beyond the network.
    pub async fn run(&self) {
        if self.disabled {
            tracing::debug!("self-update disabled");
            return;
        }
        if !self.check_due() {
            tracing::debug!("self-update not due yet");
            return;
        }
        if let Err(e) = self.schedule_next_check() {
            tracing::debug!("could not record next update check: {e}");
            return;
        }

        match self.fetch_and_apply().await {
            Ok(UpdateStatus::Updated { to, .. }) => {
                eprintln!("{} {CLI_NAME} to {}", "Updated".green().bold(), to.yellow());
            }
            Ok(UpdateStatus::UpToDate) => {}
            Err(e) if e.is_hard() => {
                eprintln!("{} {e}", "Update failed:".red());
            }
            Err(e) => tracing::debug!("update check skipped: {e}"),
        }
    }

    /// Unthrottled check; installs a newer build if the channel has one.
    pub async fn fetch_and_apply(&self) -> Result<UpdateStatus, UpdateError> {
        let client = reqwest::Client::builder()
            .user_agent(consts::get_user_agent())
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let manifest: Manifest = {
            let url = format!("{}{}", self.base_url, manifest_name());
            let response = fetch(&client, &url).await?;
            response.json().await?
        };
        tracing::debug!(latest = %manifest.version, current = %self.current_version, "fetched update manifest");

        if !is_newer(&manifest.version, &self.current_version) {
            return Ok(UpdateStatus::UpToDate);
        }

        let url = format!("{}{}", self.base_url, binary_name(&manifest.version));
        let compressed = fetch(&client, &url).await?.bytes().await?;
        let binary = decompress(&compressed)?;
        verify_sha256(&binary, &manifest.sha256)?;

        let staged = self.stage(&manifest.version, &binary)?;
        self.install(&staged)?;

        Ok(UpdateStatus::Updated {
            from: self.current_version.clone(),
            to: manifest.version,
        })
    }

    fn next_check_path(&self) -> PathBuf {
        self.dir.join(NEXT_CHECK_FILE)
    }

    /// A missing or unreadable timestamp means a check is due.
    fn check_due(&self) -> bool {
        std::fs::read_to_string(self.next_check_path())
            .ok()
            .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
            .map(|next| Utc::now() >= next.with_timezone(&Utc))
            .unwrap_or(true)
    }

    fn schedule_next_check(&self) -> std::io::Result<()> {
        let jitter = rand::thread_rng().gen_range(0..CHECK_JITTER_SECS);
        let next = Utc::now()
            + chrono::Duration::hours(CHECK_INTERVAL_HOURS)
            + chrono::Duration::seconds(jitter);
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.next_check_path(), next.to_rfc3339())
    }

    fn stage(&self, version: &str, binary: &[u8]) -> Result<PathBuf, UpdateError> {
        let path = self.dir.join(format!("{CLI_NAME}-{version}"));
        let stage_err = |source| UpdateError::Stage {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(stage_err)?;
        std::fs::write(&path, binary).map_err(stage_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .map_err(stage_err)?;
        }
        Ok(path)
    }

    fn install(&self, staged: &Path) -> Result<(), UpdateError> {
        match &self.target {
            InstallTarget::CurrentExe => {
                self_replace::self_replace(staged).map_err(UpdateError::Replace)?;
                let _ = std::fs::remove_file(staged);
            }
            InstallTarget::Path(path) => {
                std::fs::rename(staged, path).map_err(UpdateError::Replace)?;
            }
        }
        Ok(())
    }
}

impl Maintenance for Updater {
    async fn run(&self) {
        Updater::run(self).await
    }
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<reqwest::Response, UpdateError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(UpdateError::ServerError {
            status: response.status().as_u16(),
            url: url.to_owned(),
        });
    }
    Ok(response)
}

fn platform() -> String {
    format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

fn manifest_name() -> String {
    format!("{CLI_NAME}-{}.json", platform())
}

fn binary_name(version: &str) -> String {
    format!("{CLI_NAME}-{version}-{}.gz", platform())
}

fn decompress(compressed: &[u8]) -> Result<Vec<u8>, UpdateError> {
    let mut binary = Vec::new();
    GzDecoder::new(compressed)
        .read_to_end(&mut binary)
        .map_err(UpdateError::Decompress)?;
    Ok(binary)
}

fn verify_sha256(content: &[u8], expected: &str) -> Result<(), UpdateError> {
    let actual = hex::encode(Sha256::digest(content));
    let expected = expected.trim().to_lowercase();
    if actual != expected {
        return Err(UpdateError::ChecksumMismatch { expected, actual });
    }
    Ok(())
}

fn parse_version(version: &str) -> (u64, u64, u64, String) {
    let version = version.trim().trim_start_matches('v');
    let (numbers, prerelease) = version.split_once('-').unwrap_or((version, ""));
    let mut parts = numbers.split('.').map(|p| p.parse::<u64>().unwrap_or(0));
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        prerelease.to_owned(),
    )
}

/// Release versions sort after their pre-releases.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    let (a_major, a_minor, a_patch, a_pre) = parse_version(candidate);
    let (b_major, b_minor, b_patch, b_pre) = parse_version(current);
    match (a_major, a_minor, a_patch).cmp(&(b_major, b_minor, b_patch)) {
        std::cmp::Ordering::Equal => match (a_pre.is_empty(), b_pre.is_empty()) {
            (true, false) => true,
            (false, true) => false,
            _ => a_pre > b_pre,
        },
        ordering => ordering.is_gt(),
    }
}
