//! Capability trait for caller-supplied probability models.

use rand::Rng;
use rand_distr::Normal;

use crate::errors::{ErrorInfo, RemcError};
use crate::rng::RngHandle;

/// Capability set the sampler requires from a probability model.
///
/// All three calls are pure functions of their arguments; the engine assumes
/// no shared state between invocations. Errors returned here abort the run.
/// A model that merely assigns zero probability to a proposed point should
/// return `f64::NEG_INFINITY` from [`log_cond`](Self::log_cond) or
/// [`log_prior`](Self::log_prior) rather than an error: after construction,
/// a non-finite evaluation simply loses the Metropolis test.
pub trait ProbabilityModel {
    /// Log conditional (likelihood) of the data given `param`.
    fn log_cond(&self, param: &[f64]) -> Result<f64, RemcError>;

    /// Log prior density at `param`.
    fn log_prior(&self, param: &[f64]) -> Result<f64, RemcError>;

    /// Proposes a new parameter vector differing from `param` in coordinate
    /// `coordinate`. The default perturbs that coordinate by a zero-mean
    /// Gaussian scaled by its step width.
    fn propose(
        &self,
        param: &[f64],
        step_width: &[f64],
        coordinate: usize,
        rng: &mut RngHandle,
    ) -> Result<Vec<f64>, RemcError> {
        gaussian_coordinate_step(param, step_width, coordinate, rng)
    }
}

/// Canonical single-coordinate Gaussian proposal.
pub fn gaussian_coordinate_step(
    param: &[f64],
    step_width: &[f64],
    coordinate: usize,
    rng: &mut RngHandle,
) -> Result<Vec<f64>, RemcError> {
    if coordinate >= param.len() || coordinate >= step_width.len() {
        return Err(RemcError::Model(
            ErrorInfo::new("proposal-coordinate", "coordinate index out of range")
                .with_context("coordinate", coordinate.to_string())
                .with_context("dimension", param.len().to_string()),
        ));
    }
    let normal = Normal::new(0.0, step_width[coordinate]).map_err(|err| {
        RemcError::Model(
            ErrorInfo::new("proposal-width", err.to_string())
                .with_context("coordinate", coordinate.to_string())
                .with_context("width", step_width[coordinate].to_string()),
        )
    })?;
    let mut next = param.to_vec();
    next[coordinate] += rng.sample(normal);
    Ok(next)
}
