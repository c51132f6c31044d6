use remc_core::{ErrorInfo, ProbabilityModel, RemcError};

/// Diagonal Gaussian target with a flat prior.
///
/// Useful as a calibration target: the sampler should reproduce the supplied
/// means and standard deviations.
#[derive(Debug, Clone)]
pub struct DiagonalGaussianModel {
    mean: Vec<f64>,
    sd: Vec<f64>,
}

impl DiagonalGaussianModel {
    /// Builds a target from per-coordinate means and standard deviations.
    pub fn new(mean: Vec<f64>, sd: Vec<f64>) -> Result<Self, RemcError> {
        if mean.len() != sd.len() {
            return Err(RemcError::Shape(
                ErrorInfo::new("gaussian-dims", "means and standard deviations must align")
                    .with_context("means", mean.len().to_string())
                    .with_context("sds", sd.len().to_string()),
            ));
        }
        Ok(Self { mean, sd })
    }

    /// The standard normal in `dim` dimensions.
    pub fn standard(dim: usize) -> Self {
        Self {
            mean: vec![0.0; dim],
            sd: vec![1.0; dim],
        }
    }
}

impl ProbabilityModel for DiagonalGaussianModel {
    fn log_cond(&self, param: &[f64]) -> Result<f64, RemcError> {
        if param.len() != self.mean.len() {
            return Err(RemcError::Model(
                ErrorInfo::new("gaussian-eval", "parameter dimension does not match the target")
                    .with_context("expected", self.mean.len().to_string())
                    .with_context("actual", param.len().to_string()),
            ));
        }
        Ok(param
            .iter()
            .zip(&self.mean)
            .zip(&self.sd)
            .map(|((x, m), s)| -(x - m) * (x - m) / (2.0 * s * s))
            .sum())
    }

    fn log_prior(&self, _param: &[f64]) -> Result<f64, RemcError> {
        Ok(0.0)
    }
}
