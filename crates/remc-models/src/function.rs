use remc_core::{ProbabilityModel, RemcError};

use crate::prior::gaussian_log_prior;

/// Target density backed by an arbitrary log-likelihood closure, paired with
/// an independent Gaussian prior.
///
/// The pluggable entry point for callers whose target is a plain function of
/// the parameter vector.
pub struct FunctionModel<F>
where
    F: Fn(&[f64]) -> f64,
{
    target: F,
    prior_center: Vec<f64>,
    prior_width: Vec<f64>,
}

impl<F> FunctionModel<F>
where
    F: Fn(&[f64]) -> f64,
{
    /// Wraps a log-likelihood function with a Gaussian prior profile.
    pub fn new(target: F, prior_center: Vec<f64>, prior_width: Vec<f64>) -> Self {
        Self {
            target,
            prior_center,
            prior_width,
        }
    }
}

impl<F> ProbabilityModel for FunctionModel<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn log_cond(&self, param: &[f64]) -> Result<f64, RemcError> {
        Ok((self.target)(param))
    }

    fn log_prior(&self, param: &[f64]) -> Result<f64, RemcError> {
        gaussian_log_prior(param, &self.prior_center, &self.prior_width)
    }
}
