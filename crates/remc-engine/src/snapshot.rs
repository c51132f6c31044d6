use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use remc_core::{ErrorInfo, RemcError};
use serde::{Deserialize, Serialize};

/// Self-contained binary record of one sampling run.
///
/// Carries the run's static configuration next to the full history so a
/// persisted file can be interpreted without the engine that wrote it.
/// Marker values are `1` accepted, `0` rejected, `-1` not applicable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotPayload {
    /// Names of the sampled parameters.
    pub param_names: Vec<String>,
    /// Inverse temperature ladder, in ladder order.
    pub betas: Vec<f64>,
    /// Per-chain, per-coordinate proposal step widths (K x J).
    pub step_widths: Vec<Vec<f64>>,
    /// Rows between exchange rounds.
    pub exchange_step: usize,
    /// Per-coordinate acceptance markers (K x N x J).
    pub accept: Vec<Vec<Vec<i8>>>,
    /// Per adjacent pair exchange outcomes ((K-1) x N).
    pub exchange_accept: Vec<Vec<i8>>,
    /// Sampled parameter vectors (K x N x J).
    pub samples: Vec<Vec<Vec<f64>>>,
    /// Log conditional series (K x N).
    pub log_cond: Vec<Vec<f64>>,
    /// Log prior series (K x N).
    pub log_prior: Vec<Vec<f64>>,
    /// Tempered log posterior series (K x N).
    pub log_post: Vec<Vec<f64>>,
}

impl SnapshotPayload {
    /// Writes the payload as a bincode blob, returning the path actually
    /// written.
    ///
    /// Parent directories are created as needed. If the file already exists,
    /// or `timestamp` is set, a `YYMMDD-HHMMSS-microseconds` suffix is
    /// appended before the extension and the existence check repeats; the
    /// timestamp flag forces a suffix at most once.
    pub fn store(&self, path: &Path, timestamp: bool) -> Result<PathBuf, RemcError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    RemcError::Serde(
                        ErrorInfo::new("snapshot-mkdir", err.to_string())
                            .with_context("path", parent.display().to_string()),
                    )
                })?;
            }
        }
        let mut target = path.to_path_buf();
        let mut force_suffix = timestamp;
        while force_suffix || target.exists() {
            force_suffix = false;
            target = timestamped(&target);
        }
        let bytes = bincode::serialize(self).map_err(|err| {
            RemcError::Serde(
                ErrorInfo::new("snapshot-encode", err.to_string())
                    .with_context("path", target.display().to_string()),
            )
        })?;
        fs::write(&target, bytes).map_err(|err| {
            RemcError::Serde(
                ErrorInfo::new("snapshot-write", err.to_string())
                    .with_context("path", target.display().to_string()),
            )
        })?;
        Ok(target)
    }

    /// Reads a payload previously written by [`store`](Self::store).
    pub fn load(path: &Path) -> Result<Self, RemcError> {
        let bytes = fs::read(path).map_err(|err| {
            RemcError::Serde(
                ErrorInfo::new("snapshot-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        bincode::deserialize(&bytes).map_err(|err| {
            RemcError::Serde(
                ErrorInfo::new("snapshot-decode", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

fn timestamped(path: &Path) -> PathBuf {
    let stamp = Local::now().format("%y%m%d-%H%M%S-%6f");
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("snapshot");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_{stamp}.{ext}"),
        None => format!("{stem}_{stamp}"),
    };
    path.with_file_name(name)
}
