use std::path::Path;

use remc_core::{ErrorInfo, RemcError};
use serde::{Deserialize, Serialize};

/// YAML-configurable inputs for building a replica-exchange sampler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Names of the sampled parameters, one per coordinate.
    pub param_names: Vec<String>,
    /// Temperature ladder specification.
    #[serde(default)]
    pub ladder: LadderPolicy,
    /// Proposal step width specification.
    #[serde(default)]
    pub step_widths: StepWidthPolicy,
    /// Rows between exchange rounds; must be at least 1.
    #[serde(default = "default_exchange_step")]
    pub exchange_step: usize,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_exchange_step() -> usize {
    10
}

impl SamplerConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, RemcError> {
        serde_yaml::from_str(text).map_err(|err| {
            RemcError::Serde(ErrorInfo::new("config-parse", err.to_string()))
        })
    }

    /// Loads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, RemcError> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            RemcError::Serde(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            RemcError::Serde(info) => {
                RemcError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }
}

/// Supported temperature ladder constructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LadderPolicy {
    /// Explicit list of inverse temperatures, used exactly as supplied.
    Manual {
        /// Ordered inverse temperatures, one per chain.
        betas: Vec<f64>,
    },
    /// `count` inverse temperatures spaced as `10^x` for `x` evenly spread
    /// over `[start, stop]`, endpoints included.
    LogSpace {
        /// Exponent of the first rung.
        start: f64,
        /// Exponent of the last rung.
        stop: f64,
        /// Number of rungs.
        count: usize,
    },
}

impl Default for LadderPolicy {
    fn default() -> Self {
        LadderPolicy::Manual { betas: vec![1.0] }
    }
}

impl LadderPolicy {
    /// Resolves the policy into a concrete ladder.
    pub fn build(&self) -> Vec<f64> {
        match self {
            LadderPolicy::Manual { betas } => betas.clone(),
            LadderPolicy::LogSpace { start, stop, count } => {
                let count = (*count).max(1);
                if count == 1 {
                    return vec![10f64.powf(*start)];
                }
                (0..count)
                    .map(|i| {
                        let exponent = start + (stop - start) * i as f64 / (count - 1) as f64;
                        10f64.powf(exponent)
                    })
                    .collect()
            }
        }
    }
}

/// Supported proposal step width constructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StepWidthPolicy {
    /// One width shared by every chain and coordinate.
    Uniform {
        /// Shared proposal scale.
        width: f64,
    },
    /// One width per chain, shared across that chain's coordinates.
    PerChain {
        /// Proposal scale for each chain, in ladder order.
        widths: Vec<f64>,
    },
    /// Full per-chain, per-coordinate width matrix.
    Explicit {
        /// K rows of J proposal scales.
        widths: Vec<Vec<f64>>,
    },
}

impl Default for StepWidthPolicy {
    fn default() -> Self {
        StepWidthPolicy::Uniform { width: 1.0 }
    }
}

impl StepWidthPolicy {
    /// Resolves the policy into a K x J width matrix.
    pub fn build(&self, n_chains: usize, n_params: usize) -> Result<Vec<Vec<f64>>, RemcError> {
        match self {
            StepWidthPolicy::Uniform { width } => Ok(vec![vec![*width; n_params]; n_chains]),
            StepWidthPolicy::PerChain { widths } => {
                if widths.len() != n_chains {
                    return Err(RemcError::Shape(
                        ErrorInfo::new("step-widths-shape", "one step width required per chain")
                            .with_context("expected", n_chains.to_string())
                            .with_context("actual", widths.len().to_string()),
                    ));
                }
                Ok(widths.iter().map(|&w| vec![w; n_params]).collect())
            }
            StepWidthPolicy::Explicit { widths } => {
                if widths.len() != n_chains || widths.iter().any(|row| row.len() != n_params) {
                    return Err(RemcError::Shape(
                        ErrorInfo::new("step-widths-shape", "step widths must form a K x J matrix")
                            .with_context("expected", format!("{n_chains}x{n_params}"))
                            .with_context("actual", matrix_shape(widths)),
                    ));
                }
                Ok(widths.clone())
            }
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed from which all substreams are derived.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in run manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x7E3A_11CE_05EE_D001_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

pub(crate) fn matrix_shape(rows: &[Vec<f64>]) -> String {
    let inner = rows.first().map_or(0, Vec::len);
    format!("{}x{}", rows.len(), inner)
}
