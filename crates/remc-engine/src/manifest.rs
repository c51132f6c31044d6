use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use remc_core::{ErrorInfo, RemcError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Structured manifest describing a persisted sampling run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    /// Names of the sampled parameters.
    pub param_names: Vec<String>,
    /// Inverse temperature ladder, in ladder order.
    pub betas: Vec<f64>,
    /// Rows between exchange rounds.
    pub exchange_step: usize,
    /// Master seed the run's substreams were derived from.
    pub master_seed: u64,
    /// Optional seed label captured from the configuration.
    pub seed_label: Option<String>,
    /// Rows recorded when the manifest was built.
    pub loop_count: usize,
    /// Exchange rounds executed when the manifest was built.
    pub exchange_count: usize,
    /// File name of the snapshot the manifest describes.
    pub snapshot_file: PathBuf,
    /// SHA-256 digest of the snapshot bytes, hex encoded.
    pub snapshot_sha256: String,
    /// RFC 3339 timestamp recording when the manifest was built.
    pub created_at: String,
}

impl RunManifest {
    /// Builds a manifest for a snapshot on disk, hashing the file bytes.
    #[allow(clippy::too_many_arguments)]
    pub fn for_snapshot(
        param_names: Vec<String>,
        betas: Vec<f64>,
        exchange_step: usize,
        master_seed: u64,
        seed_label: Option<String>,
        loop_count: usize,
        exchange_count: usize,
        snapshot_path: &Path,
    ) -> Result<Self, RemcError> {
        let bytes = fs::read(snapshot_path).map_err(|err| {
            RemcError::Serde(
                ErrorInfo::new("manifest-snapshot-read", err.to_string())
                    .with_context("path", snapshot_path.display().to_string()),
            )
        })?;
        let snapshot_file = snapshot_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| snapshot_path.to_path_buf());
        Ok(Self {
            param_names,
            betas,
            exchange_step,
            master_seed,
            seed_label,
            loop_count,
            exchange_count,
            snapshot_file,
            snapshot_sha256: hex::encode(Sha256::digest(&bytes)),
            created_at: Local::now().to_rfc3339(),
        })
    }

    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), RemcError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    RemcError::Serde(
                        ErrorInfo::new("manifest-mkdir", err.to_string())
                            .with_context("path", parent.display().to_string()),
                    )
                })?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            RemcError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            RemcError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, RemcError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            RemcError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            RemcError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
